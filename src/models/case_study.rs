//! Case study model matching the backend directory entries.

use serde::{Deserialize, Serialize};

use super::content::{identifier, nullable_string, AssetResolver, ContentItem, ContentKind};
use super::section::{resolve_sections, Section};

/// A field site documented by the project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaseStudy {
    #[serde(deserialize_with = "identifier")]
    pub case_study_number: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ContentItem for CaseStudy {
    const KIND: ContentKind = ContentKind::CaseStudy;

    fn identifier(&self) -> &str {
        &self.case_study_number
    }

    fn resolve_assets(&mut self, assets: &AssetResolver) {
        assets.resolve_in_place(&mut self.cover_image);
        assets.resolve_in_place(&mut self.pdf_file);
        resolve_sections(&mut self.sections, assets);
    }
}

/// Body of `GET /get_case_studies`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseStudyCollection {
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_entry() {
        let raw = serde_json::json!({
            "case_studies": [{
                "case_study_number": "1",
                "title": "Groundwater based farmer collectives",
                "location": "Andhra Pradesh",
                "date": "2024-03-01",
                "category": "Social Equity",
                "upload_date": "2024-03-02 10:00:00",
                "cover_image": null,
                "pdf_file": "/static/case_studies/case_study_1.pdf",
                "description": "Equity in groundwater irrigation",
                "sections": [
                    {"heading": "Context", "body": "Wells", "image": "/static/case_studies/s0.jpg"},
                    {"heading": "Findings", "body": null}
                ]
            }, {
                "case_study_number": 2,
                "title": "Gaya"
            }]
        });

        let collection: CaseStudyCollection = serde_json::from_value(raw).unwrap();
        let first = &collection.case_studies[0];
        assert_eq!(first.identifier(), "1");
        assert!(first.cover_image.is_none());
        assert_eq!(first.sections.len(), 2);
        assert_eq!(first.sections[1].body, "");
        assert_eq!(collection.case_studies[1].identifier(), "2");
        assert_eq!(collection.case_studies[1].description, "");
    }
}
