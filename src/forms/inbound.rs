//! Multipart forms submitted by the admin portal.

use std::collections::HashMap;

use axum::extract::Multipart;

use super::sections::MAX_SECTIONS;
use super::SectionList;
use crate::errors::AppError;
use crate::imaging::{ImageSlot, Quality, ResizePolicy, Upload};

/// Compression settings applied to images in a submitted form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSettings {
    pub default_quality: Quality,
    pub policy: ResizePolicy,
}

/// Text fields and files of a submitted form, keyed by field name.
#[derive(Debug, Default)]
pub struct InboundForm {
    texts: HashMap<String, Vec<String>>,
    files: HashMap<String, Vec<Upload>>,
}

impl InboundForm {
    /// Drain a multipart request. Empty file inputs are ignored.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let bytes = field.bytes().await?;
                    if file_name.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    form.push_file(name, Upload::new(file_name, content_type, bytes));
                }
                None => {
                    let value = field.text().await?;
                    form.push_text(name, value);
                }
            }
        }

        Ok(form)
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.texts.entry(name.into()).or_default().push(value.into());
    }

    pub fn push_file(&mut self, name: impl Into<String>, upload: Upload) {
        self.files.entry(name.into()).or_default().push(upload);
    }

    /// First value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// Every value of a repeated text field.
    pub fn texts(&self, name: &str) -> &[String] {
        self.texts.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Overwrite `target` when the form carries the field.
    pub fn overlay(&self, name: &str, target: &mut String) {
        if let Some(value) = self.text(name) {
            *target = value.to_string();
        }
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.text(name), Some("true" | "on" | "1"))
    }

    pub fn file(&self, name: &str) -> Option<Upload> {
        self.files.get(name).and_then(|v| v.first()).cloned()
    }

    pub fn files(&self, name: &str) -> Vec<Upload> {
        self.files.get(name).cloned().unwrap_or_default()
    }

    /// Quality for one image: its own field, else the form-wide default.
    pub fn quality(&self, name: &str, settings: &ImageSettings) -> Result<Quality, AppError> {
        match self.non_empty(name) {
            Some(raw) => Quality::parse(&raw),
            None => Ok(settings.default_quality),
        }
    }

    /// Compress the image uploaded under `name` at `<name>_quality`.
    pub async fn image(&self, name: &str, settings: &ImageSettings) -> Result<Option<ImageSlot>, AppError> {
        let Some(upload) = self.file(name) else {
            return Ok(None);
        };
        let quality = self.quality(&format!("{}_quality", name), settings)?;
        Ok(Some(ImageSlot::compressed(upload, quality, settings.policy).await))
    }

    /// Number of sections the form describes.
    ///
    /// `section_count` wins; otherwise the highest `section_{i}_*` index seen.
    /// Indices at or past [`MAX_SECTIONS`] are ignored.
    pub fn section_count(&self) -> Result<Option<usize>, AppError> {
        if let Some(raw) = self.non_empty("section_count") {
            let count = raw
                .parse::<usize>()
                .map_err(|_| AppError::Validation(format!("Invalid number of sections: {}", raw)))?;
            if count > MAX_SECTIONS {
                return Err(AppError::Validation(format!(
                    "At most {} sections are allowed",
                    MAX_SECTIONS
                )));
            }
            return Ok(Some(count));
        }

        let highest = self
            .texts
            .keys()
            .chain(self.files.keys())
            .filter_map(|key| section_index(key))
            .filter(|index| *index < MAX_SECTIONS)
            .max();
        Ok(highest.map(|i| i + 1))
    }

    /// Apply `section_*` fields onto a section list.
    pub async fn apply_sections(&self, sections: &mut SectionList, settings: &ImageSettings) -> Result<(), AppError> {
        if let Some(count) = self.section_count()? {
            sections.resize(count);
        }

        for index in 0..sections.len() {
            let image = self.image(&format!("section_{}_image", index), settings).await?;
            let remove = self.flag(&format!("section_{}_remove_image", index));
            let Some(section) = sections.get_mut(index) else {
                continue;
            };
            self.overlay(&format!("section_{}_heading", index), &mut section.heading);
            self.overlay(&format!("section_{}_body", index), &mut section.body);
            if remove {
                section.image = None;
                section.existing_image = None;
            }
            if image.is_some() {
                section.image = image;
            }
        }
        Ok(())
    }
}

fn section_index(key: &str) -> Option<usize> {
    let rest = key.strip_prefix("section_")?;
    let (index, _) = rest.split_once('_')?;
    index.parse().ok()
}
