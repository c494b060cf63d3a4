//! Resizable list of article sections edited in admin forms.

use super::FormPayload;
use crate::imaging::ImageSlot;
use crate::models::Section;

/// Most sections a single article may carry.
pub const MAX_SECTIONS: usize = 50;

/// A section being edited: text plus either a new image or a kept one.
#[derive(Debug, Clone, Default)]
pub struct SectionDraft {
    pub heading: String,
    pub body: String,
    /// Newly chosen image with its own quality
    pub image: Option<ImageSlot>,
    /// Path of an image already stored by the backend
    pub existing_image: Option<String>,
}

impl From<&Section> for SectionDraft {
    fn from(section: &Section) -> Self {
        Self {
            heading: section.heading.clone(),
            body: section.body.clone(),
            image: None,
            existing_image: section.image.clone().filter(|p| !p.is_empty()),
        }
    }
}

/// Ordered sections of a draft; never empty.
#[derive(Debug, Clone)]
pub struct SectionList {
    entries: Vec<SectionDraft>,
}

impl Default for SectionList {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionList {
    /// A single blank section.
    pub fn new() -> Self {
        Self {
            entries: vec![SectionDraft::default()],
        }
    }

    /// Sections of an existing record, or one blank section when it has none.
    pub fn from_existing(sections: &[Section]) -> Self {
        if sections.is_empty() {
            return Self::new();
        }
        Self {
            entries: sections.iter().map(SectionDraft::from).collect(),
        }
    }

    /// Set the number of sections to `count`, kept within `[1, MAX_SECTIONS]`.
    ///
    /// Growing appends blank sections, shrinking drops trailing ones.
    pub fn resize(&mut self, count: usize) {
        self.entries
            .resize_with(count.clamp(1, MAX_SECTIONS), SectionDraft::default);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&SectionDraft> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SectionDraft> {
        self.entries.get_mut(index)
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &SectionDraft> {
        self.entries.iter()
    }

    /// Append `section_{i}_*` fields in order.
    ///
    /// When editing, sections without a new image name the image they keep.
    pub fn append_to(&self, payload: &mut FormPayload, editing: bool) {
        for (index, section) in self.entries.iter().enumerate() {
            if let Some(slot) = &section.image {
                payload.file(format!("section_{}_image", index), slot.upload().clone());
            } else if editing {
                payload.text(
                    format!("section_{}_existing_image", index),
                    section.existing_image.clone().unwrap_or_default(),
                );
            }
            payload.text(format!("section_{}_heading", index), &section.heading);
            payload.text(format!("section_{}_body", index), &section.body);
        }
    }
}
