use tracing::{instrument, warn};

use super::{claims::Claims, errors::AuthError, verifier::TokenVerifier};

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header.ok_or(AuthError::MissingHeader)?;
    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader("authorization header must start with \"Bearer\"".into()));
    }
    let token = parts
        .next()
        .ok_or_else(|| AuthError::MalformedHeader("token not found".into()))?;
    if parts.next().is_some() {
        return Err(AuthError::MalformedHeader("authorization header must be bearer token".into()));
    }
    Ok(token)
}

/// The token must carry a `permissions` claim that includes `permission`.
pub fn check_permission(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let Some(granted) = claims.permissions.as_deref() else {
        return Err(AuthError::PermissionsMissing);
    };
    if granted.iter().any(|p| p == permission) {
        Ok(())
    } else {
        Err(AuthError::Forbidden(permission.to_string()))
    }
}

/// Full guard: parse the header, verify the token, check the permission.
///
/// ```
/// use service::auth::{authorize, AuthError, TokenVerifier};
///
/// let verifier = TokenVerifier::hs256(b"secret", "https://shop.test/", "drinks");
/// let res = tokio_test::block_on(authorize(&verifier, None, "post:drinks"));
/// assert_eq!(res, Err(AuthError::MissingHeader));
/// ```
#[instrument(skip(verifier, header))]
pub async fn authorize(verifier: &TokenVerifier, header: Option<&str>, permission: &str) -> Result<Claims, AuthError> {
    let result: Result<Claims, AuthError> = async {
        let token = bearer_token(header)?;
        let claims = verifier.verify(token).await?;
        check_permission(&claims, permission)?;
        Ok(claims)
    }
    .await;
    if let Err(e) = &result {
        warn!(code = e.code(), error = %e, "authorization rejected");
    }
    result
}
