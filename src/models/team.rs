//! Partner organisations and their team members.

use serde::{Deserialize, Serialize};

use super::content::{identifier, nullable_string, AssetResolver, ContentItem, ContentKind};

/// A person listed on the team page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webpage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A consortium organisation grouping team members.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    #[serde(deserialize_with = "identifier")]
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

impl Partner {
    pub fn member(&self, member_id: &str) -> Option<&TeamMember> {
        self.members.iter().find(|m| m.id == member_id)
    }
}

impl ContentItem for Partner {
    const KIND: ContentKind = ContentKind::Partner;

    fn identifier(&self) -> &str {
        &self.id
    }

    fn resolve_assets(&mut self, assets: &AssetResolver) {
        for member in &mut self.members {
            assets.resolve_in_place(&mut member.image);
        }
    }
}
