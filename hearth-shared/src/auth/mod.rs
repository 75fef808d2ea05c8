/// Authentication boundary for Hearth
///
/// Token *issuance* lives in an external auth service; this module only
/// covers the service-side half of the contract: validating a bearer token
/// and turning it into a verified [`middleware::Identity`] that handlers can
/// trust instead of a client-supplied owner field.
///
/// # Modules
///
/// - `jwt`: HS256 token validation
/// - `middleware`: [`middleware::Identity`] and header extraction helpers

pub mod jwt;
pub mod middleware;
