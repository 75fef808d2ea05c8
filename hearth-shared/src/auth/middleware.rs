/// Verified identity and header extraction for Axum middleware
///
/// After successful token validation, the API layer inserts an [`Identity`]
/// into request extensions. Handlers extract it with Axum's `Extension`
/// extractor and treat it as authoritative over any owner identifier the
/// client put in the request body.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use hearth_shared::auth::middleware::Identity;
///
/// async fn handler(Extension(identity): Extension<Identity>) -> String {
///     format!("request from {}", identity.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};

use super::jwt::{validate_token, JwtError};

/// Verified identity attached to a request after token validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Owner identifier from the token's `sub` claim
    pub user_id: String,
}

/// Error type for identity extraction
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header on the request
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Authorization header present but not a Bearer token
    #[error("Expected Bearer token")]
    InvalidFormat,

    /// Token failed validation
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),
}

/// Pulls the bearer token out of the request headers
///
/// # Errors
///
/// Returns [`AuthError::MissingCredentials`] when there is no Authorization
/// header and [`AuthError::InvalidFormat`] when it is not a Bearer scheme.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidFormat)
}

/// Validates the request's bearer token and builds the identity
///
/// # Errors
///
/// Propagates extraction and validation failures; see [`AuthError`].
pub fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Result<Identity, AuthError> {
    let token = bearer_token(headers)?;
    let claims = validate_token(token, secret)?;
    Ok(Identity {
        user_id: claims.sub,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_non_bearer_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert!(matches!(
            bearer_token(&headers),
            Err(AuthError::InvalidFormat)
        ));
    }
}
