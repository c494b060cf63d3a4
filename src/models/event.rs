//! Event model matching the backend directory entries.

use serde::{Deserialize, Serialize};

use super::content::{identifier, nullable_string, AssetResolver, ContentItem, ContentKind};
use super::section::{resolve_sections, Section};

/// Whether an event is still ahead.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventStatus {
    #[default]
    Upcoming,
    Past,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "Upcoming",
            EventStatus::Past => "Past",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Upcoming" => Some(EventStatus::Upcoming),
            "Past" => Some(EventStatus::Past),
            _ => None,
        }
    }
}

/// A workshop, conference or field visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    #[serde(deserialize_with = "identifier")]
    pub event_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub status: EventStatus,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ContentItem for Event {
    const KIND: ContentKind = ContentKind::Event;

    fn identifier(&self) -> &str {
        &self.event_number
    }

    fn resolve_assets(&mut self, assets: &AssetResolver) {
        assets.resolve_in_place(&mut self.cover_image);
        resolve_sections(&mut self.sections, assets);
    }
}

/// Body of `GET /get_events`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCollection {
    #[serde(default)]
    pub events: Vec<Event>,
}
