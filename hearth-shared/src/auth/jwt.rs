/// JWT validation module
///
/// Validates access tokens minted by the external auth service. Tokens are
/// HS256-signed and carry the owner identifier in the standard `sub` claim.
/// This module never creates tokens; it only checks them.
///
/// # Example
///
/// ```no_run
/// use hearth_shared::auth::jwt::validate_token;
///
/// # fn example(token: &str) -> Result<(), Box<dyn std::error::Error>> {
/// let claims = validate_token(token, "shared-signing-secret")?;
/// println!("request from {}", claims.sub);
/// # Ok(())
/// # }
/// ```

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Error type for token validation
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token failed signature or structural validation
    #[error("Invalid token: {0}")]
    Invalid(String),
}

/// Claims carried by an access token
///
/// Only the claims this service relies on are modeled; anything else the
/// issuer adds is ignored during decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the owner identifier as issued by the auth service
    pub sub: String,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issued-at timestamp (seconds since epoch)
    #[serde(default)]
    pub iat: i64,
}

/// Validates an access token and returns its claims
///
/// Checks the HS256 signature and expiration. The issuer is not pinned: the
/// signing secret is already shared only with the auth service.
///
/// # Errors
///
/// Returns [`JwtError::Expired`] for out-of-date tokens and
/// [`JwtError::Invalid`] for anything else (bad signature, malformed token,
/// missing claims).
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let validation = Validation::new(Algorithm::HS256);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Invalid(e.to_string()),
    })?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-signing-secret-at-least-32-bytes!";

    fn mint(sub: &str, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            exp: now + exp_offset_secs,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_round_trip() {
        let token = mint("auth0|user-42", 3600);
        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "auth0|user-42");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = mint("auth0|user-42", -3600);
        match validate_token(&token, SECRET) {
            Err(JwtError::Expired) => {}
            other => panic!("expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = mint("auth0|user-42", 3600);
        match validate_token(&token, "completely-different-secret-value!") {
            Err(JwtError::Invalid(_)) => {}
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            validate_token("not.a.token", SECRET),
            Err(JwtError::Invalid(_))
        ));
    }
}
