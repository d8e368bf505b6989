//! Bearer-token guard: the issuer signs tokens, this module only verifies
//! them and checks the `permissions` claim.
//!
//! - `errors`: failure kinds, all answered with 401 by the server.
//! - `claims`: the decoded payload.
//! - `verifier`: signature, expiry, issuer and audience checks (HS256 secret or issuer JWKS).
//! - `guard`: header parsing and the permission check.

pub mod errors;
pub mod claims;
pub mod verifier;
pub mod guard;

pub use claims::Claims;
pub use errors::AuthError;
pub use guard::authorize;
pub use verifier::TokenVerifier;

/// Permission strings the coffee-shop endpoints require.
pub mod permissions {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}
