//! Shared behaviour of the content collections served by the backend.

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::BackLink;

/// The kinds of content reachable through a detail route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentKind {
    CaseStudy,
    Event,
    Resource,
    Album,
    Partner,
}

impl ContentKind {
    /// Singular display label.
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::CaseStudy => "Case Study",
            ContentKind::Event => "Event",
            ContentKind::Resource => "Resource",
            ContentKind::Album => "Album",
            ContentKind::Partner => "Partner",
        }
    }

    /// Route of the list page.
    pub fn list_path(&self) -> &'static str {
        match self {
            ContentKind::CaseStudy => "/case-studies",
            ContentKind::Event => "/events",
            ContentKind::Resource => "/resources",
            ContentKind::Album => "/gallery",
            ContentKind::Partner => "/team",
        }
    }

    fn list_title(&self) -> &'static str {
        match self {
            ContentKind::CaseStudy => "Case Studies",
            ContentKind::Event => "Events",
            ContentKind::Resource => "Resources",
            ContentKind::Album => "Gallery",
            ContentKind::Partner => "Team",
        }
    }

    /// Route of a single item, `/<content-type>/<id>`.
    pub fn detail_path(&self, id: &str) -> String {
        format!("{}/{}", self.list_path(), id)
    }

    /// Link back to the list page.
    pub fn back_link(&self) -> BackLink {
        BackLink {
            label: format!("Back to {}", self.list_title()),
            href: self.list_path().to_string(),
        }
    }

    /// Message shown when an identifier is absent from its collection.
    pub fn not_found_message(&self, id: &str) -> String {
        format!("{} #{} not found", self.label(), id)
    }
}

/// A record addressable by a detail route.
pub trait ContentItem {
    const KIND: ContentKind;

    /// Identifier matched against the URL parameter.
    fn identifier(&self) -> &str;

    /// Rewrite backend asset paths into absolute URLs.
    fn resolve_assets(&mut self, _assets: &AssetResolver) {}
}

/// Find the item whose identifier matches `id`.
pub fn find_item<T: ContentItem>(items: Vec<T>, id: &str) -> Option<T> {
    items.into_iter().find(|item| item.identifier() == id)
}

/// Turns backend-relative asset paths into URLs on the backend origin.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    origin: String,
}

impl AssetResolver {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.origin, path)
        } else {
            format!("{}/{}", self.origin, path)
        }
    }

    pub fn resolve_in_place(&self, path: &mut Option<String>) {
        if let Some(p) = path.as_mut() {
            *p = self.resolve(p);
        }
    }
}

/// Accept identifiers written either as strings or as bare numbers.
pub(crate) fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

/// Treat `null` like a missing string.
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
