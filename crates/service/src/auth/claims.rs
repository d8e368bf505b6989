use serde::{Deserialize, Serialize};

/// Token payload. Only `permissions` drives authorization; the registered
/// claims are validated by the verifier before this is handed out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    /// String or list of strings, as the issuer pleases.
    #[serde(default)]
    pub aud: Option<serde_json::Value>,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|perms| perms.iter().any(|p| p == permission))
    }
}
