use std::{sync::Arc, time::Duration};

use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use moka::future::Cache;
use tracing::{debug, warn};

use configs::{AuthAlgorithm, AuthConfig};

use super::{claims::Claims, errors::AuthError};

/// Where signature keys come from.
#[derive(Clone)]
enum KeySource {
    Secret(DecodingKey),
    Jwks(JwksCache),
}

/// Issuer JWKS documents, refetched once the TTL lapses.
#[derive(Clone)]
struct JwksCache {
    url: String,
    client: reqwest::Client,
    cache: Cache<String, Arc<JwkSet>>,
}

impl JwksCache {
    fn new(url: String, ttl: Duration) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    async fn fetch(client: &reqwest::Client, url: &str) -> Result<JwkSet, AuthError> {
        debug!(%url, "fetching jwks");
        client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::KeyFetch(e.to_string()))?
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::KeyFetch(e.to_string()))
    }

    async fn key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let client = self.client.clone();
        let url = self.url.clone();
        let set = self
            .cache
            .try_get_with(self.url.clone(), async move { Self::fetch(&client, &url).await.map(Arc::new) })
            .await
            .map_err(|e| (*e).clone())?;
        let jwk = set
            .find(kid)
            .ok_or_else(|| AuthError::InvalidToken("unable to find the appropriate key".into()))?;
        DecodingKey::from_jwk(jwk).map_err(AuthError::from)
    }
}

/// Verifies signature, expiry, issuer and audience of bearer tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    issuer: String,
    audience: String,
    algorithm: Algorithm,
    keys: KeySource,
}

impl TokenVerifier {
    /// Shared-secret verifier.
    pub fn hs256(secret: &[u8], issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            algorithm: Algorithm::HS256,
            keys: KeySource::Secret(DecodingKey::from_secret(secret)),
        }
    }

    /// Verifier for issuer-signed RS256 tokens, keys looked up by `kid` in the JWKS at `jwks_url`.
    pub fn rs256_jwks(jwks_url: impl Into<String>, issuer: impl Into<String>, audience: impl Into<String>, ttl: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            algorithm: Algorithm::RS256,
            keys: KeySource::Jwks(JwksCache::new(jwks_url.into(), ttl)),
        }
    }

    pub fn from_config(cfg: &AuthConfig) -> anyhow::Result<Self> {
        cfg.validate()?;
        Ok(match cfg.algorithm {
            AuthAlgorithm::Hs256 => {
                let secret = cfg.secret.as_deref().unwrap_or_default();
                Self::hs256(secret.as_bytes(), cfg.issuer(), cfg.audience.clone())
            }
            AuthAlgorithm::Rs256 => Self::rs256_jwks(
                cfg.jwks_url(),
                cfg.issuer(),
                cfg.audience.clone(),
                Duration::from_secs(cfg.jwks_ttl_secs),
            ),
        })
    }

    fn validation(&self) -> Validation {
        let mut v = Validation::new(self.algorithm);
        v.set_issuer(&[self.issuer.as_str()]);
        v.set_audience(&[self.audience.as_str()]);
        v.validate_exp = true;
        v
    }

    /// Decode `token` and return its claims when every check passes.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        if header.alg != self.algorithm {
            warn!(alg = ?header.alg, expected = ?self.algorithm, "token signed with unexpected algorithm");
            return Err(AuthError::InvalidToken(format!("unexpected algorithm {:?}", header.alg)));
        }
        let key = match &self.keys {
            KeySource::Secret(key) => key.clone(),
            KeySource::Jwks(jwks) => {
                let kid = header
                    .kid
                    .as_deref()
                    .ok_or_else(|| AuthError::InvalidToken("token header has no kid".into()))?;
                jwks.key_for(kid).await?
            }
        };
        let data = decode::<Claims>(token, &key, &self.validation())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret";
    const ISS: &str = "https://coffee.test/";
    const AUD: &str = "drinks";

    fn now() -> i64 { chrono::Utc::now().timestamp() }

    fn sign(payload: serde_json::Value, secret: &[u8]) -> String {
        encode(&Header::default(), &payload, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn verifier() -> TokenVerifier { TokenVerifier::hs256(SECRET, ISS, AUD) }

    #[tokio::test]
    async fn accepts_valid_token() {
        let token = sign(json!({"iss": ISS, "aud": AUD, "sub": "barista", "exp": now() + 600, "permissions": ["get:drinks-detail"]}), SECRET);
        let claims = verifier().verify(&token).await.unwrap();
        assert_eq!(claims.sub.as_deref(), Some("barista"));
        assert!(claims.has_permission("get:drinks-detail"));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let token = sign(json!({"iss": ISS, "aud": AUD, "exp": now() - 3600}), SECRET);
        assert_eq!(verifier().verify(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid_token() {
        let token = sign(json!({"iss": ISS, "aud": AUD, "exp": now() + 600}), b"other");
        assert!(matches!(verifier().verify(&token).await, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn wrong_issuer_or_audience_is_invalid_claims() {
        let token = sign(json!({"iss": "https://elsewhere/", "aud": AUD, "exp": now() + 600}), SECRET);
        assert!(matches!(verifier().verify(&token).await, Err(AuthError::InvalidClaims(_))));
        let token = sign(json!({"iss": ISS, "aud": "payroll", "exp": now() + 600}), SECRET);
        assert!(matches!(verifier().verify(&token).await, Err(AuthError::InvalidClaims(_))));
    }

    #[tokio::test]
    async fn garbage_is_invalid_token() {
        assert!(matches!(verifier().verify("not.a.jwt").await, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn jwks_verifier_requires_kid() {
        let v = TokenVerifier::rs256_jwks("http://127.0.0.1:9/jwks.json", ISS, AUD, Duration::from_secs(60));
        // {"alg":"RS256","typ":"JWT"} with no kid; rejected before any key fetch
        let token = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.e30.c2ln";
        assert_eq!(v.verify(token).await, Err(AuthError::InvalidToken("token header has no kid".into())));

        let hs = sign(json!({"iss": ISS, "aud": AUD, "exp": now() + 600}), SECRET);
        assert!(matches!(v.verify(&hs).await, Err(AuthError::InvalidToken(_))));
    }
}
