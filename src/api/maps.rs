//! Map widget endpoints.

use axum::extract::Path;
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::maps::{self, MapConfig, MapView, MapWidget, Marker, MarkerClick};

/// A marker as sent to the client, with the route it opens.
#[derive(Debug, Serialize)]
pub struct MarkerPayload {
    #[serde(flatten)]
    pub marker: Marker,
    pub href: String,
}

/// A widget with its markers and fitted initial view.
#[derive(Debug, Serialize)]
pub struct WidgetPayload {
    pub name: &'static str,
    pub config: MapConfig,
    pub markers: Vec<MarkerPayload>,
    pub view: Option<MapView>,
}

impl From<&MapWidget> for WidgetPayload {
    fn from(widget: &MapWidget) -> Self {
        Self {
            name: widget.name,
            config: widget.config,
            markers: widget
                .markers
                .iter()
                .map(|marker| MarkerPayload {
                    href: marker.href(),
                    marker: marker.clone(),
                })
                .collect(),
            view: widget.view(),
        }
    }
}

fn find_widget(name: &str) -> Result<&'static MapWidget, AppError> {
    maps::widget(name).ok_or_else(|| {
        AppError::NotFound(format!(
            "Map {} not found, available maps: {}",
            name,
            maps::WIDGETS.join(", ")
        ))
    })
}

/// GET /api/maps/{widget}
pub async fn get_map(Path(name): Path<String>) -> ApiResult<WidgetPayload> {
    let widget = find_widget(&name)?;
    success(WidgetPayload::from(widget))
}

/// GET /api/maps/{widget}/markers/{marker}
pub async fn click_marker(Path((name, marker)): Path<(String, String)>) -> ApiResult<MarkerClick> {
    let widget = find_widget(&name)?;
    let click = widget
        .click(&marker)
        .ok_or_else(|| AppError::NotFound(format!("Marker {} not found on map {}", marker, name)))?;
    success(click)
}
