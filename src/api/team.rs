//! Team page: partner organisations and their members.

use axum::extract::{Path, State};
use serde::Serialize;

use super::pages::{detail, listed, DetailResult};
use super::{success, ApiResult, WidgetPayload};
use crate::maps;
use crate::models::Partner;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct TeamPage {
    pub partners: Vec<Partner>,
    pub map: Option<WidgetPayload>,
}

/// GET /api/team
pub async fn team_page(State(state): State<AppState>) -> ApiResult<TeamPage> {
    let partners = listed(state.backend.get_partners().await, state.backend.assets());
    success(TeamPage {
        partners,
        map: maps::widget("partners").map(WidgetPayload::from),
    })
}

/// GET /api/team/{id}
pub async fn get_partner(State(state): State<AppState>, Path(id): Path<String>) -> DetailResult<Partner> {
    detail(state.backend.get_partners().await, &id, state.backend.assets())
}
