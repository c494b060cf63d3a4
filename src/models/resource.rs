//! Resource model matching the backend directory entries.

use serde::{Deserialize, Serialize};

use super::content::{identifier, nullable_string, AssetResolver, ContentItem, ContentKind};
use super::section::{resolve_sections, Section};

/// Publication category of a resource.
///
/// Labels outside the known set are preserved as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    JournalArticles,
    ConferencePapers,
    MastersThesis,
    BlogPosts,
    Others,
    Other(String),
}

impl ResourceType {
    pub const KNOWN: [ResourceType; 5] = [
        ResourceType::JournalArticles,
        ResourceType::ConferencePapers,
        ResourceType::MastersThesis,
        ResourceType::BlogPosts,
        ResourceType::Others,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::JournalArticles => "Journal Articles",
            ResourceType::ConferencePapers => "Conference Papers",
            ResourceType::MastersThesis => "Masters Thesis",
            ResourceType::BlogPosts => "Blog Posts",
            ResourceType::Others => "Others",
            ResourceType::Other(label) => label,
        }
    }

    /// Case-insensitive match against the known labels.
    pub fn matches(&self, label: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(label.trim())
    }
}

impl From<String> for ResourceType {
    fn from(label: String) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|known| known.as_str() == label)
            .unwrap_or(ResourceType::Other(label))
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.as_str().to_string()
    }
}

/// A publication: either a downloadable file or an external link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    #[serde(deserialize_with = "identifier")]
    pub resource_number: String,
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ContentItem for Resource {
    const KIND: ContentKind = ContentKind::Resource;

    fn identifier(&self) -> &str {
        &self.resource_number
    }

    fn resolve_assets(&mut self, assets: &AssetResolver) {
        assets.resolve_in_place(&mut self.file);
        assets.resolve_in_place(&mut self.thumbnail);
        resolve_sections(&mut self.sections, assets);
    }
}

/// Body of `GET /get_resources`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceCollection {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_types() {
        assert_eq!(
            ResourceType::from("Masters Thesis".to_string()),
            ResourceType::MastersThesis
        );
        let custom = ResourceType::from("Policy Brief".to_string());
        assert_eq!(custom, ResourceType::Other("Policy Brief".into()));
        assert_eq!(String::from(custom), "Policy Brief");
        assert!(ResourceType::BlogPosts.matches("blog posts"));
    }

    #[test]
    fn test_link_resource() {
        let resource: Resource = serde_json::from_value(serde_json::json!({
            "resource_number": "4",
            "title": "Equity in irrigation",
            "type": "Journal Articles",
            "description": "Peer reviewed",
            "link": "https://doi.org/10.0/epic",
            "file": null
        }))
        .unwrap();
        assert_eq!(resource.resource_type, ResourceType::JournalArticles);
        assert!(resource.file.is_none());
        let back = serde_json::to_value(&resource).unwrap();
        assert_eq!(back["type"], "Journal Articles");
    }
}
