use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use service::auth::{authorize, Claims, TokenVerifier};

use crate::errors::JsonApiError;

/// Middleware state: who verifies the token and which permission the route needs.
#[derive(Clone)]
pub struct PermissionGate {
    pub verifier: Arc<TokenVerifier>,
    pub permission: &'static str,
}

/// Reject the request with 401 unless its bearer token grants the gate's
/// permission. Verified claims are left in the request extensions.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let claims: Claims = authorize(&gate.verifier, header.as_deref(), gate.permission).await?;
    debug!(sub = ?claims.sub, permission = gate.permission, "permission granted");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

impl PermissionGate {
    pub fn new(verifier: &Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self { verifier: Arc::clone(verifier), permission }
    }
}
