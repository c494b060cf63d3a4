//! Public content pages.

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use super::{success, ApiResponse, ApiResult, WidgetPayload};
use crate::errors::{AppError, AppErrorWithBackLink, BackLink};
use crate::maps;
use crate::models::{
    find_item, Album, AssetResolver, CaseStudy, ContentItem, Event, EventStatus, Resource, ResourceType,
};
use crate::AppState;

/// Number of case studies featured on the home page.
pub const RECENT_CASE_STUDIES: usize = 3;

/// A single record together with the way back to its list.
#[derive(Debug, Serialize)]
pub struct DetailPage<T: Serialize> {
    pub item: T,
    pub back: BackLink,
}

/// Result of a detail route: errors render as a panel with a back link.
pub type DetailResult<T> = Result<ApiResponse<DetailPage<T>>, AppErrorWithBackLink>;

/// Items of a list page. A failed fetch is logged and shows as an empty list.
pub(crate) fn listed<T: ContentItem>(result: Result<Vec<T>, AppError>, assets: &AssetResolver) -> Vec<T> {
    match result {
        Ok(mut items) => {
            for item in &mut items {
                item.resolve_assets(assets);
            }
            items
        }
        Err(e) => {
            tracing::warn!("Failed to load {} list: {}", T::KIND.label(), e);
            Vec::new()
        }
    }
}

/// Resolve `id` against a fetched collection.
pub(crate) fn detail<T: ContentItem + Serialize>(
    result: Result<Vec<T>, AppError>,
    id: &str,
    assets: &AssetResolver,
) -> DetailResult<T> {
    let back = T::KIND.back_link();
    let items = match result {
        Ok(items) => items,
        Err(error) => {
            tracing::warn!("Failed to load {} #{}: {}", T::KIND.label(), id, error);
            return Err(AppErrorWithBackLink { error, back });
        }
    };

    let Some(mut item) = find_item(items, id) else {
        return Err(AppErrorWithBackLink {
            error: AppError::NotFound(T::KIND.not_found_message(id)),
            back,
        });
    };
    item.resolve_assets(assets);
    success(DetailPage { item, back })
}

fn map_of(name: &str) -> Option<WidgetPayload> {
    maps::widget(name).map(WidgetPayload::from)
}

// ==================== HOME ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub recent_case_studies: Vec<CaseStudy>,
    pub upcoming_events: Vec<Event>,
    pub map: Option<WidgetPayload>,
}

/// GET /api/pages/home
pub async fn home_page(State(state): State<AppState>) -> ApiResult<HomePage> {
    let (case_studies, events) = tokio::join!(
        state.backend.get_case_studies(Some(RECENT_CASE_STUDIES)),
        state.backend.get_events(None),
    );
    let assets = state.backend.assets();

    let upcoming_events = listed(events, assets)
        .into_iter()
        .filter(|e| e.status == EventStatus::Upcoming)
        .collect();

    success(HomePage {
        recent_case_studies: listed(case_studies, assets),
        upcoming_events,
        map: map_of("case-studies"),
    })
}

// ==================== CASE STUDIES ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudiesPage {
    pub case_studies: Vec<CaseStudy>,
    pub map: Option<WidgetPayload>,
}

/// GET /api/case-studies
pub async fn list_case_studies(State(state): State<AppState>) -> ApiResult<CaseStudiesPage> {
    let case_studies = listed(state.backend.get_case_studies(None).await, state.backend.assets());
    success(CaseStudiesPage {
        case_studies,
        map: map_of("case-studies"),
    })
}

/// GET /api/case-studies/{id}
pub async fn get_case_study(State(state): State<AppState>, Path(id): Path<String>) -> DetailResult<CaseStudy> {
    detail(state.backend.get_case_studies(None).await, &id, state.backend.assets())
}

// ==================== EVENTS ====================

#[derive(Debug, Serialize)]
pub struct EventsPage {
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}

/// GET /api/events
pub async fn list_events(State(state): State<AppState>) -> ApiResult<EventsPage> {
    let (upcoming, past): (Vec<Event>, Vec<Event>) = listed(state.backend.get_events(None).await, state.backend.assets())
        .into_iter()
        .partition(|e| e.status == EventStatus::Upcoming);
    success(EventsPage { upcoming, past })
}

/// GET /api/events/{id}
pub async fn get_event(State(state): State<AppState>, Path(id): Path<String>) -> DetailResult<Event> {
    detail(state.backend.get_events(None).await, &id, state.backend.assets())
}

// ==================== RESOURCES ====================

#[derive(Debug, Default, Deserialize)]
pub struct ResourceFilter {
    #[serde(rename = "type")]
    pub resource_type: Option<String>,
    /// Free-text search over title and description
    pub q: Option<String>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        let type_ok = match self.resource_type.as_deref().map(str::trim) {
            Some(wanted) if !wanted.is_empty() => resource.resource_type.matches(wanted),
            _ => true,
        };
        let text_ok = match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                resource.title.to_lowercase().contains(&q) || resource.description.to_lowercase().contains(&q)
            }
            _ => true,
        };
        type_ok && text_ok
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcesPage {
    pub resources: Vec<Resource>,
    /// Filter options offered on the page
    pub types: Vec<ResourceType>,
}

/// GET /api/resources?type=&q=
pub async fn list_resources(
    State(state): State<AppState>,
    Query(filter): Query<ResourceFilter>,
) -> ApiResult<ResourcesPage> {
    let resources = listed(state.backend.get_resources(None).await, state.backend.assets())
        .into_iter()
        .filter(|r| filter.matches(r))
        .collect();
    success(ResourcesPage {
        resources,
        types: ResourceType::KNOWN.to_vec(),
    })
}

/// GET /api/resources/{id}
pub async fn get_resource(State(state): State<AppState>, Path(id): Path<String>) -> DetailResult<Resource> {
    detail(state.backend.get_resources(None).await, &id, state.backend.assets())
}

// ==================== GALLERY ====================

#[derive(Debug, Serialize)]
pub struct GalleryPage {
    pub albums: Vec<Album>,
}

/// GET /api/gallery
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<GalleryPage> {
    let albums = listed(state.backend.get_photo_albums(None).await, state.backend.assets());
    success(GalleryPage { albums })
}

/// GET /api/gallery/{id}
pub async fn get_album(State(state): State<AppState>, Path(id): Path<String>) -> DetailResult<Album> {
    detail(state.backend.get_photo_albums(None).await, &id, state.backend.assets())
}
