//! HTTP client for the content backend.
//!
//! One method per backend endpoint. Reads return typed collections, mutations
//! forward a [`FormPayload`] as multipart and return the backend's message.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::AppError;
use crate::forms::{FormPart, FormPayload};
use crate::models::{
    Album, AlbumCollection, AssetResolver, CaseStudy, CaseStudyCollection, Event, EventCollection, Partner, Resource,
    ResourceCollection,
};

/// Message returned by the backend when an admin session is no longer accepted.
pub const SESSION_EXPIRED: &str = "Session expired, please log in again";

/// Body shape shared by the backend's mutation and login responses.
#[derive(Debug, Default, Deserialize)]
struct BackendMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    /// Token to present on later mutations, when the backend issues one
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    assets: AssetResolver,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build backend client: {}", e)))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            http,
            assets: AssetResolver::new(base_url.clone()),
            base_url,
        })
    }

    /// Resolver for asset paths served by this backend.
    pub fn assets(&self) -> &AssetResolver {
        &self.assets
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, limit: Option<usize>) -> Result<T, AppError> {
        let mut request = self.http.get(self.url(path));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(failure(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    // ==================== READS ====================

    /// `GET /get_case_studies`; `limit` keeps the most recent entries.
    pub async fn get_case_studies(&self, limit: Option<usize>) -> Result<Vec<CaseStudy>, AppError> {
        let collection: CaseStudyCollection = self.get_json("get_case_studies", limit).await?;
        Ok(collection.case_studies)
    }

    pub async fn get_events(&self, limit: Option<usize>) -> Result<Vec<Event>, AppError> {
        let collection: EventCollection = self.get_json("get_events", limit).await?;
        Ok(collection.events)
    }

    pub async fn get_resources(&self, limit: Option<usize>) -> Result<Vec<Resource>, AppError> {
        let collection: ResourceCollection = self.get_json("get_resources", limit).await?;
        Ok(collection.resources)
    }

    pub async fn get_photo_albums(&self, limit: Option<usize>) -> Result<Vec<Album>, AppError> {
        let collection: AlbumCollection = self.get_json("get_photo_albums", limit).await?;
        Ok(collection.albums)
    }

    /// `GET /get_partners`, a bare array.
    pub async fn get_partners(&self) -> Result<Vec<Partner>, AppError> {
        self.get_json("get_partners", None).await
    }

    // ==================== LOGIN ====================

    /// `POST /handle_login` with the password as form data.
    pub async fn handle_login(&self, password: &str) -> Result<LoginOutcome, AppError> {
        let response = self
            .http
            .post(self.url("handle_login"))
            .form(&[("password", password)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let message: BackendMessage = serde_json::from_str(&body).unwrap_or_default();

        match status {
            s if s.is_success() => Ok(LoginOutcome { token: message.token }),
            StatusCode::UNAUTHORIZED => Err(AppError::InvalidPassword),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimited(
                message
                    .error
                    .unwrap_or_else(|| "Too many login attempts, try again later".to_string()),
            )),
            _ => Err(failure(status, &body)),
        }
    }

    // ==================== MUTATIONS ====================

    async fn send_form(&self, path: &str, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        let mut request = self.http.post(self.url(path)).multipart(multipart_form(payload)?);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        accept(request.send().await?).await
    }

    async fn send_delete(&self, path: &str, token: Option<&str>) -> Result<String, AppError> {
        let mut request = self.http.delete(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        accept(request.send().await?).await
    }

    pub async fn upload_case_study(&self, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        self.send_form("upload_case_study", payload, token).await
    }

    pub async fn upload_event(&self, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        self.send_form("upload_event", payload, token).await
    }

    pub async fn upload_resource(&self, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        self.send_form("upload_resource", payload, token).await
    }

    pub async fn upload_photo_album(&self, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        self.send_form("upload_photo_album", payload, token).await
    }

    pub async fn delete_case_study(&self, number: &str, token: Option<&str>) -> Result<String, AppError> {
        self.send_delete(&format!("delete_case_study/{}", number), token).await
    }

    pub async fn delete_event(&self, number: &str, token: Option<&str>) -> Result<String, AppError> {
        self.send_delete(&format!("delete_event/{}", number), token).await
    }

    pub async fn delete_resource(&self, number: &str, token: Option<&str>) -> Result<String, AppError> {
        self.send_delete(&format!("delete_resource/{}", number), token).await
    }

    pub async fn delete_photo_album(&self, number: &str, token: Option<&str>) -> Result<String, AppError> {
        self.send_delete(&format!("delete_photo_album/{}", number), token).await
    }

    pub async fn update_partner(&self, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        self.send_form("update_partner", payload, token).await
    }

    pub async fn add_team_member(&self, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        self.send_form("add_team_member", payload, token).await
    }

    pub async fn update_team_member(&self, payload: FormPayload, token: Option<&str>) -> Result<String, AppError> {
        self.send_form("update_team_member", payload, token).await
    }

    /// `POST /delete_team_member`; the backend takes both ids as form fields.
    pub async fn delete_team_member(
        &self,
        partner_id: &str,
        member_id: &str,
        token: Option<&str>,
    ) -> Result<String, AppError> {
        let mut payload = FormPayload::new();
        payload.text("partner_id", partner_id).text("member_id", member_id);
        self.send_form("delete_team_member", payload, token).await
    }
}

/// Convert an outgoing payload into a reqwest multipart body, preserving order.
fn multipart_form(payload: FormPayload) -> Result<Form, AppError> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, upload } => {
                let file = Part::bytes(upload.bytes.to_vec())
                    .file_name(upload.file_name)
                    .mime_str(&upload.content_type)?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

/// Read a mutation response, returning the backend's success message.
async fn accept(response: Response) -> Result<String, AppError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(failure(status, &body));
    }

    let message: BackendMessage = serde_json::from_str(&body).unwrap_or_default();
    Ok(message.message.unwrap_or_else(|| "OK".to_string()))
}

/// Map a non-success backend response onto an application error.
fn failure(status: StatusCode, body: &str) -> AppError {
    if status == StatusCode::UNAUTHORIZED {
        return AppError::Unauthorized(SESSION_EXPIRED.to_string());
    }

    let message = serde_json::from_str::<BackendMessage>(body)
        .ok()
        .and_then(|m| m.error)
        .unwrap_or_else(|| format!("Backend returned {}", status));
    tracing::warn!(status = status.as_u16(), "Backend request failed: {}", message);

    AppError::Backend {
        status: Some(status.as_u16()),
        message,
    }
}
