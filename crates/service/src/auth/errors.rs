use thiserror::Error;

/// Why a request failed the bearer-token guard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization header is expected")]
    MissingHeader,
    #[error("malformed authorization header: {0}")]
    MalformedHeader(String),
    #[error("token expired")]
    TokenExpired,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("incorrect claims: {0}")]
    InvalidClaims(String),
    #[error("permissions not included in token")]
    PermissionsMissing,
    #[error("permission not granted: {0}")]
    Forbidden(String),
    #[error("unable to fetch signing keys: {0}")]
    KeyFetch(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingHeader => 1001,
            AuthError::MalformedHeader(_) => 1002,
            AuthError::TokenExpired => 1101,
            AuthError::InvalidToken(_) => 1102,
            AuthError::InvalidClaims(_) => 1103,
            AuthError::PermissionsMissing => 1201,
            AuthError::Forbidden(_) => 1202,
            AuthError::KeyFetch(_) => 1300,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::MissingRequiredClaim(_) => {
                AuthError::InvalidClaims(e.to_string())
            }
            _ => AuthError::InvalidToken(e.to_string()),
        }
    }
}
