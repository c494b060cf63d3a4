//! Admin session module.
//!
//! A successful backend login is exchanged for a signed session token carried
//! in an HttpOnly cookie or an `Authorization: Bearer` header. Logging out
//! revokes the token until it would have expired anyway.

use std::collections::HashMap;
use std::time::Duration;

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AppError, ErrorResponse};
use crate::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "epic_admin_session";

/// Where the client is sent when its session is no longer valid.
pub const LOGIN_ROUTE: &str = "/admin";

const SUBJECT: &str = "admin";

/// Claims carried by an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    /// Token issued by the backend at login, forwarded on mutations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_token: Option<String>,
}

/// Issues, verifies and revokes admin session tokens.
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    revoked: RwLock<HashMap<String, i64>>,
}

impl SessionIssuer {
    /// Create an issuer; without a secret a random one is generated for this process.
    pub fn new(secret: Option<&str>, ttl: Duration) -> Self {
        let secret = match secret {
            Some(secret) => secret.to_string(),
            None => {
                tracing::warn!(
                    "No session secret configured (EPIC_SESSION_SECRET). Sessions will not survive a restart!"
                );
                format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
            }
        };

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            revoked: RwLock::new(HashMap::new()),
        }
    }

    /// Sign a new session token.
    pub fn issue(&self, backend_token: Option<String>) -> Result<(String, Claims), AppError> {
        let now = chrono::Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: SUBJECT.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
            backend_token,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign session: {}", e)))?;
        Ok((token, claims))
    }

    /// Check signature, expiry and revocation.
    pub async fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)?.claims;
        if claims.sub != SUBJECT {
            return Err(AppError::Unauthorized("Invalid or expired session".to_string()));
        }
        if self.revoked.read().await.contains_key(&claims.jti) {
            return Err(AppError::Unauthorized("Session has been logged out".to_string()));
        }
        Ok(claims)
    }

    /// Revoke a session until its expiry, pruning entries that have lapsed.
    pub async fn revoke(&self, claims: &Claims) {
        let now = chrono::Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(claims.jti.clone(), claims.exp);
        tracing::debug!(revoked = revoked.len(), "Session revoked");
    }
}

/// Session cookie for a freshly issued token.
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .build()
}

/// Drop the session cookie from the jar.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// Token presented by the request: the session cookie, else a bearer header.
pub fn presented_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A verified admin session; admin handlers take it as a parameter.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub claims: Claims,
}

impl AdminSession {
    pub fn backend_token(&self) -> Option<&str> {
        self.claims.backend_token.as_deref()
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AdminError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = presented_token(&parts.headers) else {
            return Err(AppError::Unauthorized("Login required".to_string()).into());
        };
        let claims = state.sessions.verify(&token).await?;
        Ok(Self { claims })
    }
}

/// Error raised by an admin operation.
///
/// Unauthorized errors also clear the session cookie and point the client
/// back at the login screen.
#[derive(Debug)]
pub struct AdminError(pub AppError);

impl From<AppError> for AdminError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if let AppError::Unauthorized(_) = self.0 {
            let body = ErrorResponse::new(&self.0, Some(serde_json::json!({ "redirect": LOGIN_ROUTE })));
            let jar = clear_session(CookieJar::new());
            return (status, jar, Json(body)).into_response();
        }
        self.0.into_response()
    }
}
