//! Admin session endpoints: login, logout and the session view.

use axum::{extract::State, http::HeaderMap, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::auth::{clear_session, presented_token, session_cookie};
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// A management screen of the portal.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdminScreen {
    pub label: &'static str,
    pub endpoint: &'static str,
}

/// Management screens in portal order.
pub const ADMIN_SCREENS: [AdminScreen; 5] = [
    AdminScreen {
        label: "Case Studies",
        endpoint: "/api/admin/case-studies",
    },
    AdminScreen {
        label: "Events",
        endpoint: "/api/admin/events",
    },
    AdminScreen {
        label: "Resources",
        endpoint: "/api/admin/resources",
    },
    AdminScreen {
        label: "Gallery",
        endpoint: "/api/admin/gallery",
    },
    AdminScreen {
        label: "Team",
        endpoint: "/api/admin/partners",
    },
];

/// What the admin route shows: the login form or the portal.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum SessionView {
    Login,
    #[serde(rename_all = "camelCase")]
    Portal {
        screens: Vec<AdminScreen>,
        expires_at: i64,
    },
}

impl SessionView {
    fn portal(expires_at: i64) -> Self {
        SessionView::Portal {
            screens: ADMIN_SCREENS.to_vec(),
            expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Session token for bearer use; the same token is set as a cookie
    pub token: String,
    pub expires_at: i64,
    pub view: SessionView,
}

/// GET /api/admin/session
pub async fn session_view(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> (CookieJar, ApiResponse<SessionView>) {
    let Some(token) = presented_token(&headers) else {
        return (jar, ApiResponse::new(SessionView::Login));
    };

    match state.sessions.verify(&token).await {
        Ok(claims) => (jar, ApiResponse::new(SessionView::portal(claims.exp))),
        Err(_) => (clear_session(jar), ApiResponse::new(SessionView::Login)),
    }
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<LoginResponse>), AppError> {
    if request.password.is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }

    let outcome = match state.backend.handle_login(&request.password).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Admin login rejected: {}", e.error_code());
            return Err(e);
        }
    };

    let (token, claims) = state.sessions.issue(outcome.token)?;
    tracing::info!(session = %claims.jti, "Admin logged in");

    let jar = jar.add(session_cookie(token.clone(), state.config.secure_cookies));
    Ok((
        jar,
        ApiResponse::new(LoginResponse {
            token,
            expires_at: claims.exp,
            view: SessionView::portal(claims.exp),
        }),
    ))
}

/// POST /api/admin/logout
///
/// Always succeeds; a still-valid session is revoked.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> (CookieJar, ApiResponse<SessionView>) {
    if let Some(token) = presented_token(&headers) {
        if let Ok(claims) = state.sessions.verify(&token).await {
            state.sessions.revoke(&claims).await;
            tracing::info!(session = %claims.jti, "Admin logged out");
        }
    }
    (clear_session(jar), ApiResponse::new(SessionView::Login))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_view_shapes() {
        let login = serde_json::to_value(SessionView::Login).unwrap();
        assert_eq!(login, serde_json::json!({ "view": "login" }));

        let portal = serde_json::to_value(SessionView::portal(42)).unwrap();
        assert_eq!(portal["view"], "portal");
        assert_eq!(portal["expiresAt"], 42);
        assert_eq!(portal["screens"][4]["label"], "Team");
    }
}
