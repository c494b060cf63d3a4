//! Admin management endpoints.
//!
//! Every mutation reads the submitted form into a draft, runs it through the
//! [`AdminForm`] state machine, forwards it to the backend and answers with the
//! refreshed list.

use std::future::Future;

use axum::extract::{Multipart, Path, State};
use serde::Serialize;

use super::pages::listed;
use super::{success, ApiResponse};
use crate::auth::{AdminError, AdminSession};
use crate::errors::AppError;
use crate::forms::{
    AdminForm, AlbumDraft, CaseStudyDraft, Draft, EventDraft, FormPayload, InboundForm, MemberDraft, PartnerDraft,
    ResourceDraft,
};
use crate::models::{find_item, Album, CaseStudy, ContentItem, Event, Partner, Resource};
use crate::AppState;

pub type AdminResult<T> = Result<ApiResponse<T>, AdminError>;

/// Outcome of a successful mutation.
#[derive(Debug, Serialize)]
pub struct Mutation<T: Serialize> {
    /// Message returned by the backend
    pub message: String,
    /// The list after the change
    pub items: Vec<T>,
}

/// Drive one submission through the form state machine.
async fn submit<D, F, Fut>(draft: D, editing: Option<&str>, send: F) -> Result<String, AppError>
where
    D: Draft,
    F: FnOnce(FormPayload) -> Fut,
    Fut: Future<Output = Result<String, AppError>>,
{
    let mut form = AdminForm::new();
    match editing {
        Some(id) => form.open_edit(id, draft),
        None => form.open_create(draft),
    }

    let payload = form.begin_submit()?;
    let outcome = send(payload).await;
    let message = outcome.as_ref().ok().cloned();
    form.finish(outcome.map(|_| ()))?;
    Ok(message.unwrap_or_default())
}

/// Record to edit, matched against the raw backend collection.
fn existing<T: ContentItem>(items: Vec<T>, id: &str) -> Result<T, AppError> {
    find_item(items, id).ok_or_else(|| AppError::NotFound(T::KIND.not_found_message(id)))
}

fn mutation<T: ContentItem + Serialize>(
    state: &AppState,
    message: String,
    refreshed: Result<Vec<T>, AppError>,
) -> AdminResult<Mutation<T>> {
    success(Mutation {
        message,
        items: listed(refreshed, state.backend.assets()),
    })
}

fn resolved<T: ContentItem>(state: &AppState, mut items: Vec<T>) -> Vec<T> {
    for item in &mut items {
        item.resolve_assets(state.backend.assets());
    }
    items
}

// ==================== CASE STUDIES ====================

/// GET /api/admin/case-studies
pub async fn admin_list_case_studies(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AdminResult<Vec<CaseStudy>> {
    let items = state.backend.get_case_studies(None).await?;
    success(resolved(&state, items))
}

/// POST /api/admin/case-studies
pub async fn create_case_study(
    State(state): State<AppState>,
    session: AdminSession,
    multipart: Multipart,
) -> AdminResult<Mutation<CaseStudy>> {
    let form = InboundForm::read(multipart).await?;
    let mut draft = CaseStudyDraft::blank();
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, None, |payload| {
        state.backend.upload_case_study(payload, session.backend_token())
    })
    .await?;
    tracing::info!(title = %form.text("title").unwrap_or_default(), "Case study created");

    mutation(&state, message, state.backend.get_case_studies(None).await)
}

/// PUT /api/admin/case-studies/{id}
pub async fn update_case_study(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AdminResult<Mutation<CaseStudy>> {
    let form = InboundForm::read(multipart).await?;
    let record = existing(state.backend.get_case_studies(None).await?, &id)?;
    let mut draft = CaseStudyDraft::from_existing(&record);
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, Some(&id), |payload| {
        state.backend.upload_case_study(payload, session.backend_token())
    })
    .await?;
    tracing::info!(case_study = %id, "Case study updated");

    mutation(&state, message, state.backend.get_case_studies(None).await)
}

/// DELETE /api/admin/case-studies/{id}
pub async fn delete_case_study(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AdminResult<Mutation<CaseStudy>> {
    let message = state.backend.delete_case_study(&id, session.backend_token()).await?;
    tracing::info!(case_study = %id, "Case study deleted");
    mutation(&state, message, state.backend.get_case_studies(None).await)
}

// ==================== EVENTS ====================

/// GET /api/admin/events
pub async fn admin_list_events(State(state): State<AppState>, _session: AdminSession) -> AdminResult<Vec<Event>> {
    let items = state.backend.get_events(None).await?;
    success(resolved(&state, items))
}

/// POST /api/admin/events
pub async fn create_event(
    State(state): State<AppState>,
    session: AdminSession,
    multipart: Multipart,
) -> AdminResult<Mutation<Event>> {
    let form = InboundForm::read(multipart).await?;
    let mut draft = EventDraft::blank();
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, None, |payload| {
        state.backend.upload_event(payload, session.backend_token())
    })
    .await?;
    tracing::info!("Event created");

    mutation(&state, message, state.backend.get_events(None).await)
}

/// PUT /api/admin/events/{id}
pub async fn update_event(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AdminResult<Mutation<Event>> {
    let form = InboundForm::read(multipart).await?;
    let record = existing(state.backend.get_events(None).await?, &id)?;
    let mut draft = EventDraft::from_existing(&record);
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, Some(&id), |payload| {
        state.backend.upload_event(payload, session.backend_token())
    })
    .await?;
    tracing::info!(event = %id, "Event updated");

    mutation(&state, message, state.backend.get_events(None).await)
}

/// DELETE /api/admin/events/{id}
pub async fn delete_event(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AdminResult<Mutation<Event>> {
    let message = state.backend.delete_event(&id, session.backend_token()).await?;
    tracing::info!(event = %id, "Event deleted");
    mutation(&state, message, state.backend.get_events(None).await)
}

// ==================== RESOURCES ====================

/// GET /api/admin/resources
pub async fn admin_list_resources(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AdminResult<Vec<Resource>> {
    let items = state.backend.get_resources(None).await?;
    success(resolved(&state, items))
}

/// POST /api/admin/resources
pub async fn create_resource(
    State(state): State<AppState>,
    session: AdminSession,
    multipart: Multipart,
) -> AdminResult<Mutation<Resource>> {
    let form = InboundForm::read(multipart).await?;
    let mut draft = ResourceDraft::blank();
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, None, |payload| {
        state.backend.upload_resource(payload, session.backend_token())
    })
    .await?;
    tracing::info!("Resource created");

    mutation(&state, message, state.backend.get_resources(None).await)
}

/// PUT /api/admin/resources/{id}
pub async fn update_resource(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AdminResult<Mutation<Resource>> {
    let form = InboundForm::read(multipart).await?;
    let record = existing(state.backend.get_resources(None).await?, &id)?;
    let mut draft = ResourceDraft::from_existing(&record);
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, Some(&id), |payload| {
        state.backend.upload_resource(payload, session.backend_token())
    })
    .await?;
    tracing::info!(resource = %id, "Resource updated");

    mutation(&state, message, state.backend.get_resources(None).await)
}

/// DELETE /api/admin/resources/{id}
pub async fn delete_resource(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AdminResult<Mutation<Resource>> {
    let message = state.backend.delete_resource(&id, session.backend_token()).await?;
    tracing::info!(resource = %id, "Resource deleted");
    mutation(&state, message, state.backend.get_resources(None).await)
}

// ==================== GALLERY ====================

/// GET /api/admin/gallery
pub async fn admin_list_albums(State(state): State<AppState>, _session: AdminSession) -> AdminResult<Vec<Album>> {
    let items = state.backend.get_photo_albums(None).await?;
    success(resolved(&state, items))
}

/// POST /api/admin/gallery
pub async fn create_album(
    State(state): State<AppState>,
    session: AdminSession,
    multipart: Multipart,
) -> AdminResult<Mutation<Album>> {
    let form = InboundForm::read(multipart).await?;
    let mut draft = AlbumDraft::blank();
    draft.apply(&form, &state.image_settings()).await?;
    let photos = draft.photos.len();

    let message = submit(draft, None, |payload| {
        state.backend.upload_photo_album(payload, session.backend_token())
    })
    .await?;
    tracing::info!(photos, "Album created");

    mutation(&state, message, state.backend.get_photo_albums(None).await)
}

/// PUT /api/admin/gallery/{id}
pub async fn update_album(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AdminResult<Mutation<Album>> {
    let form = InboundForm::read(multipart).await?;
    let record = existing(state.backend.get_photo_albums(None).await?, &id)?;
    let mut draft = AlbumDraft::from_existing(&record);
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, Some(&id), |payload| {
        state.backend.upload_photo_album(payload, session.backend_token())
    })
    .await?;
    tracing::info!(album = %id, "Album updated");

    mutation(&state, message, state.backend.get_photo_albums(None).await)
}

/// DELETE /api/admin/gallery/{id}
pub async fn delete_album(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
) -> AdminResult<Mutation<Album>> {
    let message = state.backend.delete_photo_album(&id, session.backend_token()).await?;
    tracing::info!(album = %id, "Album deleted");
    mutation(&state, message, state.backend.get_photo_albums(None).await)
}

// ==================== TEAM ====================

/// GET /api/admin/partners
pub async fn admin_list_partners(
    State(state): State<AppState>,
    _session: AdminSession,
) -> AdminResult<Vec<Partner>> {
    let items = state.backend.get_partners().await?;
    success(resolved(&state, items))
}

/// PUT /api/admin/partners/{id}
pub async fn update_partner(
    State(state): State<AppState>,
    session: AdminSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AdminResult<Mutation<Partner>> {
    let form = InboundForm::read(multipart).await?;
    let partner = existing(state.backend.get_partners().await?, &id)?;
    let mut draft = PartnerDraft::from_existing(&partner);
    draft.apply(&form);

    let message = submit(draft, Some(&id), |payload| {
        state.backend.update_partner(payload, session.backend_token())
    })
    .await?;
    tracing::info!(partner = %id, "Partner updated");

    mutation(&state, message, state.backend.get_partners().await)
}

/// POST /api/admin/partners/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    session: AdminSession,
    Path(partner_id): Path<String>,
    multipart: Multipart,
) -> AdminResult<Mutation<Partner>> {
    let form = InboundForm::read(multipart).await?;
    existing(state.backend.get_partners().await?, &partner_id)?;
    let mut draft = MemberDraft::blank(partner_id.as_str());
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, None, |payload| {
        state.backend.add_team_member(payload, session.backend_token())
    })
    .await?;
    tracing::info!(partner = %partner_id, "Team member added");

    mutation(&state, message, state.backend.get_partners().await)
}

/// PUT /api/admin/partners/{id}/members/{member}
pub async fn update_member(
    State(state): State<AppState>,
    session: AdminSession,
    Path((partner_id, member_id)): Path<(String, String)>,
    multipart: Multipart,
) -> AdminResult<Mutation<Partner>> {
    let form = InboundForm::read(multipart).await?;
    let partner = existing(state.backend.get_partners().await?, &partner_id)?;
    let member = partner
        .member(&member_id)
        .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", member_id)))?;
    let mut draft = MemberDraft::from_existing(partner_id.as_str(), member);
    draft.apply(&form, &state.image_settings()).await?;

    let message = submit(draft, Some(&member_id), |payload| {
        state.backend.update_team_member(payload, session.backend_token())
    })
    .await?;
    tracing::info!(partner = %partner_id, member = %member_id, "Team member updated");

    mutation(&state, message, state.backend.get_partners().await)
}

/// DELETE /api/admin/partners/{id}/members/{member}
pub async fn delete_member(
    State(state): State<AppState>,
    session: AdminSession,
    Path((partner_id, member_id)): Path<(String, String)>,
) -> AdminResult<Mutation<Partner>> {
    let message = state
        .backend
        .delete_team_member(&partner_id, &member_id, session.backend_token())
        .await?;
    tracing::info!(partner = %partner_id, member = %member_id, "Team member deleted");
    mutation(&state, message, state.backend.get_partners().await)
}
