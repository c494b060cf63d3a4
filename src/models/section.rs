//! Long-form content blocks shared by case studies, events and resources.

use serde::{Deserialize, Serialize};

use super::content::{nullable_string, AssetResolver};

/// One block of an article: optional image, heading and body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Section {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub heading: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub body: String,
}

impl Section {
    pub(crate) fn resolve_assets(&mut self, assets: &AssetResolver) {
        assets.resolve_in_place(&mut self.image);
    }
}

pub(crate) fn resolve_sections(sections: &mut [Section], assets: &AssetResolver) {
    for section in sections {
        section.resolve_assets(assets);
    }
}
