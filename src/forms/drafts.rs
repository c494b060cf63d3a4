//! Drafts of every content type managed from the admin portal.

use super::{Draft, FormPayload, ImageSettings, InboundForm, SectionList};
use crate::errors::AppError;
use crate::imaging::{compress_batch, ImageSlot, Upload};
use crate::models::{Album, CaseStudy, Event, EventStatus, Partner, Resource, ResourceType, TeamMember};

fn required(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

/// Asset kept when no replacement is uploaded: a new file, else the stored path.
fn append_asset(
    payload: &mut FormPayload,
    field: &str,
    upload: Option<&Upload>,
    existing: Option<&String>,
    editing: bool,
) {
    match upload {
        Some(upload) => {
            payload.file(field, upload.clone());
        }
        None if editing => {
            if let Some(path) = existing {
                payload.text(format!("existing_{}", field), path);
            }
        }
        None => {}
    }
}

// ==================== CASE STUDIES ====================

/// Case study form contents.
#[derive(Debug, Clone, Default)]
pub struct CaseStudyDraft {
    /// Identifier of the record being edited
    pub editing: Option<String>,
    pub title: String,
    pub location: String,
    pub date: String,
    pub category: String,
    pub description: String,
    pub link: String,
    pub cover_image: Option<ImageSlot>,
    pub existing_cover_image: Option<String>,
    pub pdf_file: Option<Upload>,
    pub existing_pdf_file: Option<String>,
    pub sections: SectionList,
}

impl CaseStudyDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_existing(case_study: &CaseStudy) -> Self {
        Self {
            editing: Some(case_study.case_study_number.clone()),
            title: case_study.title.clone(),
            location: case_study.location.clone().unwrap_or_default(),
            date: case_study.date.clone().unwrap_or_default(),
            category: case_study.category.clone().unwrap_or_default(),
            description: case_study.description.clone(),
            link: case_study.link.clone().unwrap_or_default(),
            cover_image: None,
            existing_cover_image: case_study.cover_image.clone(),
            pdf_file: None,
            existing_pdf_file: case_study.pdf_file.clone(),
            sections: SectionList::from_existing(&case_study.sections),
        }
    }

    pub async fn apply(&mut self, form: &InboundForm, settings: &ImageSettings) -> Result<(), AppError> {
        form.overlay("title", &mut self.title);
        form.overlay("location", &mut self.location);
        form.overlay("date", &mut self.date);
        form.overlay("category", &mut self.category);
        form.overlay("description", &mut self.description);
        form.overlay("link", &mut self.link);
        if let Some(cover) = form.image("cover_image", settings).await? {
            self.cover_image = Some(cover);
        }
        if let Some(pdf) = form.file("pdf_file") {
            self.pdf_file = Some(pdf);
        }
        form.apply_sections(&mut self.sections, settings).await
    }
}

impl Draft for CaseStudyDraft {
    fn validate(&self) -> Result<(), AppError> {
        if self.editing.is_none() && self.cover_image.is_none() {
            return Err(AppError::Validation(
                "Please fill in at least title and cover image".to_string(),
            ));
        }
        required(&self.title, "Please fill in at least title and cover image")
    }

    fn to_payload(&self) -> FormPayload {
        let editing = self.editing.is_some();
        let mut payload = FormPayload::new();
        if let Some(number) = &self.editing {
            payload.text("case_study_number", number);
        }
        payload
            .text("title", self.title.trim())
            .text("location", &self.location)
            .text("date", &self.date)
            .text("category", &self.category)
            .text("description", &self.description)
            .text("link", &self.link);
        append_asset(
            &mut payload,
            "cover_image",
            self.cover_image.as_ref().map(ImageSlot::upload),
            self.existing_cover_image.as_ref(),
            editing,
        );
        append_asset(
            &mut payload,
            "pdf_file",
            self.pdf_file.as_ref(),
            self.existing_pdf_file.as_ref(),
            editing,
        );
        if editing {
            payload.text("is_edit", "true");
        }
        self.sections.append_to(&mut payload, editing);
        payload
    }
}

// ==================== EVENTS ====================

/// Event form contents.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub editing: Option<String>,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub event_type: String,
    pub status: EventStatus,
    pub description: String,
    pub registration_link: String,
    pub cover_image: Option<ImageSlot>,
    pub existing_cover_image: Option<String>,
    pub sections: SectionList,
}

impl EventDraft {
    /// Blank event dated today.
    pub fn blank() -> Self {
        Self {
            editing: None,
            title: String::new(),
            date: today(),
            time: String::new(),
            location: String::new(),
            event_type: String::new(),
            status: EventStatus::Upcoming,
            description: String::new(),
            registration_link: String::new(),
            cover_image: None,
            existing_cover_image: None,
            sections: SectionList::new(),
        }
    }

    pub fn from_existing(event: &Event) -> Self {
        Self {
            editing: Some(event.event_number.clone()),
            title: event.title.clone(),
            date: event.date.clone().unwrap_or_default(),
            time: event.time.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            event_type: event.event_type.clone().unwrap_or_default(),
            status: event.status,
            description: event.description.clone(),
            registration_link: event.registration_link.clone().unwrap_or_default(),
            cover_image: None,
            existing_cover_image: event.cover_image.clone(),
            sections: SectionList::from_existing(&event.sections),
        }
    }

    pub async fn apply(&mut self, form: &InboundForm, settings: &ImageSettings) -> Result<(), AppError> {
        form.overlay("title", &mut self.title);
        form.overlay("date", &mut self.date);
        form.overlay("time", &mut self.time);
        form.overlay("location", &mut self.location);
        form.overlay("type", &mut self.event_type);
        form.overlay("description", &mut self.description);
        form.overlay("registration_link", &mut self.registration_link);
        if let Some(raw) = form.non_empty("status") {
            self.status = EventStatus::from_str(&raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown event status: {}", raw)))?;
        }
        if let Some(cover) = form.image("cover_image", settings).await? {
            self.cover_image = Some(cover);
        }
        form.apply_sections(&mut self.sections, settings).await
    }
}

impl Draft for EventDraft {
    fn validate(&self) -> Result<(), AppError> {
        if self.editing.is_none() && self.cover_image.is_none() {
            return Err(AppError::Validation(
                "Please fill in at least title and cover image".to_string(),
            ));
        }
        required(&self.title, "Please fill in at least title and cover image")
    }

    fn to_payload(&self) -> FormPayload {
        let editing = self.editing.is_some();
        let mut payload = FormPayload::new();
        if let Some(number) = &self.editing {
            payload.text("event_number", number);
        }
        payload
            .text("title", self.title.trim())
            .text("date", &self.date)
            .text("time", &self.time)
            .text("location", &self.location)
            .text("type", &self.event_type)
            .text("status", self.status.as_str())
            .text("description", &self.description)
            .text("registration_link", &self.registration_link);
        append_asset(
            &mut payload,
            "cover_image",
            self.cover_image.as_ref().map(ImageSlot::upload),
            self.existing_cover_image.as_ref(),
            editing,
        );
        if editing {
            payload.text("is_edit", "true");
        }
        self.sections.append_to(&mut payload, editing);
        payload
    }
}

// ==================== RESOURCES ====================

/// Resource form contents.
#[derive(Debug, Clone, Default)]
pub struct ResourceDraft {
    pub editing: Option<String>,
    pub title: String,
    pub resource_type: Option<ResourceType>,
    pub description: String,
    pub link: String,
    pub download_size: String,
    pub resource_file: Option<Upload>,
    pub existing_file: Option<String>,
    pub thumbnail: Option<ImageSlot>,
    pub existing_thumbnail: Option<String>,
    pub sections: SectionList,
}

impl ResourceDraft {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn from_existing(resource: &Resource) -> Self {
        Self {
            editing: Some(resource.resource_number.clone()),
            title: resource.title.clone(),
            resource_type: Some(resource.resource_type.clone()),
            description: resource.description.clone(),
            link: resource.link.clone().unwrap_or_default(),
            download_size: resource.download_size.clone().unwrap_or_default(),
            resource_file: None,
            existing_file: resource.file.clone(),
            thumbnail: None,
            existing_thumbnail: resource.thumbnail.clone(),
            sections: SectionList::from_existing(&resource.sections),
        }
    }

    pub async fn apply(&mut self, form: &InboundForm, settings: &ImageSettings) -> Result<(), AppError> {
        form.overlay("title", &mut self.title);
        form.overlay("description", &mut self.description);
        form.overlay("link", &mut self.link);
        if let Some(label) = form.text("type") {
            self.resource_type = Some(label.trim().to_string())
                .filter(|l| !l.is_empty())
                .map(ResourceType::from);
        }
        if let Some(file) = form.file("resource_file") {
            self.download_size = crate::imaging::format_file_size(file.len() as u64);
            self.resource_file = Some(file);
        }
        form.overlay("download_size", &mut self.download_size);
        if let Some(thumbnail) = form.image("thumbnail", settings).await? {
            self.thumbnail = Some(thumbnail);
        }
        form.apply_sections(&mut self.sections, settings).await
    }

    fn has_target(&self) -> bool {
        !self.link.trim().is_empty() || self.resource_file.is_some() || self.existing_file.is_some()
    }
}

impl Draft for ResourceDraft {
    fn validate(&self) -> Result<(), AppError> {
        const MESSAGE: &str = "Please fill in all required fields (Title, Type, and a Link or File)";
        required(&self.title, MESSAGE)?;
        if self.resource_type.is_none() || !self.has_target() {
            return Err(AppError::Validation(MESSAGE.to_string()));
        }
        Ok(())
    }

    fn to_payload(&self) -> FormPayload {
        let editing = self.editing.is_some();
        let mut payload = FormPayload::new();
        if let Some(number) = &self.editing {
            payload.text("resource_number", number);
        }
        payload
            .text("title", self.title.trim())
            .text(
                "type",
                self.resource_type
                    .as_ref()
                    .map(ResourceType::as_str)
                    .unwrap_or_default(),
            )
            .text("description", &self.description)
            .text("link", &self.link)
            .text("download_size", &self.download_size);
        append_asset(
            &mut payload,
            "resource_file",
            self.resource_file.as_ref(),
            self.existing_file.as_ref(),
            editing,
        );
        append_asset(
            &mut payload,
            "thumbnail",
            self.thumbnail.as_ref().map(ImageSlot::upload),
            self.existing_thumbnail.as_ref(),
            editing,
        );
        if editing {
            payload.text("is_edit", "true");
        }
        self.sections.append_to(&mut payload, editing);
        payload
    }
}

// ==================== ALBUMS ====================

/// Gallery album form contents.
#[derive(Debug, Clone)]
pub struct AlbumDraft {
    pub editing: Option<String>,
    pub title: String,
    pub date: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub cover_image: Option<ImageSlot>,
    pub existing_cover_image: Option<String>,
    /// Newly added photos, compressed
    pub photos: Vec<ImageSlot>,
    /// Stored photos kept by an edit, in order
    pub existing_photos: Vec<String>,
}

impl AlbumDraft {
    pub fn blank() -> Self {
        Self {
            editing: None,
            title: String::new(),
            date: today(),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            cover_image: None,
            existing_cover_image: None,
            photos: Vec::new(),
            existing_photos: Vec::new(),
        }
    }

    pub fn from_existing(album: &Album) -> Self {
        Self {
            editing: Some(album.album_number.clone()),
            title: album.title.clone(),
            date: album.date.clone(),
            description: album.description.clone(),
            location: album.location.clone().unwrap_or_default(),
            category: album.category.clone().unwrap_or_default(),
            cover_image: None,
            existing_cover_image: album.cover_image.clone(),
            photos: Vec::new(),
            existing_photos: album.photos.clone(),
        }
    }

    pub async fn apply(&mut self, form: &InboundForm, settings: &ImageSettings) -> Result<(), AppError> {
        form.overlay("title", &mut self.title);
        form.overlay("date", &mut self.date);
        form.overlay("description", &mut self.description);
        form.overlay("location", &mut self.location);
        form.overlay("category", &mut self.category);
        if let Some(cover) = form.image("cover_image", settings).await? {
            self.cover_image = Some(cover);
        }

        let removed = form.texts("remove_photo");
        self.existing_photos.retain(|path| !removed.contains(path));

        let photos = form.files("photos");
        if !photos.is_empty() {
            let quality = form.quality("photo_quality", settings)?;
            self.photos
                .extend(compress_batch(photos, quality, settings.policy).await);
        }
        Ok(())
    }
}

impl Draft for AlbumDraft {
    fn validate(&self) -> Result<(), AppError> {
        if self.editing.is_none() && self.cover_image.is_none() {
            return Err(AppError::Validation(
                "Please fill in at least title and cover image".to_string(),
            ));
        }
        required(&self.title, "Please fill in at least title and cover image")
    }

    fn to_payload(&self) -> FormPayload {
        let editing = self.editing.is_some();
        let mut payload = FormPayload::new();
        if let Some(number) = &self.editing {
            payload.text("album_number", number);
        }
        payload
            .text("title", self.title.trim())
            .text("date", &self.date)
            .text("description", &self.description)
            .text("location", &self.location)
            .text("category", &self.category);
        append_asset(
            &mut payload,
            "cover_image",
            self.cover_image.as_ref().map(ImageSlot::upload),
            self.existing_cover_image.as_ref(),
            editing,
        );
        if editing {
            payload.text("is_edit", "true");
            payload.text(
                "existing_photos",
                serde_json::Value::from(self.existing_photos.clone()).to_string(),
            );
        }
        for photo in &self.photos {
            payload.file("photos", photo.upload().clone());
        }
        payload
    }
}

// ==================== TEAM ====================

/// Partner name and description edit.
#[derive(Debug, Clone)]
pub struct PartnerDraft {
    pub partner_id: String,
    pub name: String,
    pub description: String,
}

impl PartnerDraft {
    pub fn from_existing(partner: &Partner) -> Self {
        Self {
            partner_id: partner.id.clone(),
            name: partner.name.clone(),
            description: partner.description.clone(),
        }
    }

    pub fn apply(&mut self, form: &InboundForm) {
        form.overlay("name", &mut self.name);
        form.overlay("description", &mut self.description);
    }
}

impl Draft for PartnerDraft {
    fn validate(&self) -> Result<(), AppError> {
        required(&self.name, "Partner name is required")
    }

    fn to_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        payload
            .text("partner_id", &self.partner_id)
            .text("name", self.name.trim())
            .text("description", &self.description);
        payload
    }
}

/// Team member form contents.
#[derive(Debug, Clone, Default)]
pub struct MemberDraft {
    pub partner_id: String,
    /// Identifier of the member being edited
    pub member_id: Option<String>,
    pub name: String,
    pub designation: String,
    pub role: String,
    pub department: String,
    pub bio: String,
    pub email: String,
    pub linkedin: String,
    pub twitter: String,
    pub webpage: String,
    pub photo: Option<ImageSlot>,
    pub existing_image: Option<String>,
}

impl MemberDraft {
    pub fn blank(partner_id: impl Into<String>) -> Self {
        Self {
            partner_id: partner_id.into(),
            ..Self::default()
        }
    }

    pub fn from_existing(partner_id: impl Into<String>, member: &TeamMember) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            partner_id: partner_id.into(),
            member_id: Some(member.id.clone()),
            name: member.name.clone(),
            designation: text(&member.designation),
            role: member.role.clone(),
            department: text(&member.department),
            bio: member.bio.clone(),
            email: text(&member.email),
            linkedin: text(&member.linkedin),
            twitter: text(&member.twitter),
            webpage: text(&member.webpage),
            photo: None,
            existing_image: member.image.clone().filter(|p| !p.is_empty()),
        }
    }

    pub async fn apply(&mut self, form: &InboundForm, settings: &ImageSettings) -> Result<(), AppError> {
        form.overlay("name", &mut self.name);
        form.overlay("designation", &mut self.designation);
        form.overlay("role", &mut self.role);
        form.overlay("department", &mut self.department);
        form.overlay("bio", &mut self.bio);
        form.overlay("email", &mut self.email);
        form.overlay("linkedin", &mut self.linkedin);
        form.overlay("twitter", &mut self.twitter);
        form.overlay("webpage", &mut self.webpage);
        if let Some(photo) = form.image("photo", settings).await? {
            self.photo = Some(photo);
        }
        Ok(())
    }
}

impl Draft for MemberDraft {
    fn validate(&self) -> Result<(), AppError> {
        required(&self.name, "Member name and role are required")?;
        required(&self.role, "Member name and role are required")
    }

    fn to_payload(&self) -> FormPayload {
        let mut payload = FormPayload::new();
        payload.text("partner_id", &self.partner_id);
        if let Some(member_id) = &self.member_id {
            payload.text("member_id", member_id);
        }
        payload
            .text("name", self.name.trim())
            .text("designation", &self.designation)
            .text("role", &self.role)
            .text("department", &self.department)
            .text("bio", &self.bio)
            .text("email", &self.email)
            .text("linkedin", &self.linkedin)
            .text("twitter", &self.twitter)
            .text("webpage", &self.webpage);
        match (&self.photo, &self.existing_image) {
            (Some(photo), _) => {
                payload.file("photo", photo.upload().clone());
            }
            (None, Some(existing)) => {
                payload.text("existing_image", existing);
            }
            (None, None) => {}
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::tests::photo_png;
    use crate::imaging::{Quality, ResizePolicy};
    use crate::models::Section;

    fn existing_case_study() -> CaseStudy {
        serde_json::from_value(serde_json::json!({
            "case_study_number": "2",
            "title": "Gaya",
            "location": "Bihar",
            "description": "Ahar-pyne systems",
            "cover_image": "/static/case_studies/case_study_2_cover.jpg",
            "pdf_file": "/static/case_studies/case_study_2.pdf",
            "sections": [{"heading": "History", "body": "Old", "image": "/static/case_studies/cs2_s0.jpg"}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_case_study_create_requires_cover() {
        let mut form = InboundForm::default();
        form.push_text("title", "Kalyanpura");
        let mut draft = CaseStudyDraft::blank();
        draft.apply(&form, &ImageSettings::default()).await.unwrap();
        assert!(draft.validate().is_err());

        form.push_file("cover_image", photo_png(200, 100));
        let mut draft = CaseStudyDraft::blank();
        draft.apply(&form, &ImageSettings::default()).await.unwrap();
        draft.validate().unwrap();

        let payload = draft.to_payload();
        assert_eq!(payload.files("cover_image").len(), 1);
        assert_eq!(payload.text_value("is_edit"), None);
        assert_eq!(payload.text_value("section_0_heading"), Some(""));
    }

    #[tokio::test]
    async fn test_case_study_edit_keeps_existing_assets() {
        let mut form = InboundForm::default();
        form.push_text("title", "Gaya district");
        let mut draft = CaseStudyDraft::from_existing(&existing_case_study());
        draft.apply(&form, &ImageSettings::default()).await.unwrap();
        draft.validate().unwrap();

        let payload = draft.to_payload();
        assert_eq!(payload.text_value("title"), Some("Gaya district"));
        assert_eq!(payload.text_value("location"), Some("Bihar"));
        assert_eq!(payload.text_value("is_edit"), Some("true"));
        assert_eq!(payload.text_value("case_study_number"), Some("2"));
        assert_eq!(
            payload.text_value("existing_cover_image"),
            Some("/static/case_studies/case_study_2_cover.jpg")
        );
        assert_eq!(
            payload.text_value("existing_pdf_file"),
            Some("/static/case_studies/case_study_2.pdf")
        );
        assert_eq!(
            payload.text_value("section_0_existing_image"),
            Some("/static/case_studies/cs2_s0.jpg")
        );
        assert!(payload.files("cover_image").is_empty());
    }

    #[tokio::test]
    async fn test_event_rejects_unknown_status() {
        let mut form = InboundForm::default();
        form.push_text("status", "Cancelled");
        let mut draft = EventDraft::blank();
        assert!(draft.apply(&form, &ImageSettings::default()).await.is_err());
    }

    #[test]
    fn test_event_blank_is_dated_today() {
        let draft = EventDraft::blank();
        assert_eq!(draft.date, chrono::Local::now().date_naive().to_string());
        assert_eq!(draft.status, EventStatus::Upcoming);
    }

    #[tokio::test]
    async fn test_resource_needs_link_or_file() {
        let mut form = InboundForm::default();
        form.push_text("title", "Policy brief");
        form.push_text("type", "Others");
        let mut draft = ResourceDraft::blank();
        draft.apply(&form, &ImageSettings::default()).await.unwrap();
        assert!(draft.validate().is_err());

        form.push_text("link", "https://example.org/brief");
        let mut draft = ResourceDraft::blank();
        draft.apply(&form, &ImageSettings::default()).await.unwrap();
        draft.validate().unwrap();
        assert_eq!(draft.to_payload().text_value("type"), Some("Others"));
    }

    #[tokio::test]
    async fn test_resource_file_sets_download_size() {
        let mut form = InboundForm::default();
        form.push_text("title", "Thesis");
        form.push_text("type", "Masters Thesis");
        form.push_file(
            "resource_file",
            Upload::new("thesis.pdf", "application/pdf", vec![0u8; 2048].into()),
        );
        let mut draft = ResourceDraft::blank();
        draft.apply(&form, &ImageSettings::default()).await.unwrap();
        draft.validate().unwrap();
        let payload = draft.to_payload();
        assert_eq!(payload.text_value("download_size"), Some("2 KB"));
        assert_eq!(payload.files("resource_file")[0].file_name, "thesis.pdf");
    }

    #[tokio::test]
    async fn test_album_edit_merges_photos() {
        let album: Album = serde_json::from_value(serde_json::json!({
            "album_number": "3",
            "title": "Workshop",
            "date": "2024-02-01",
            "cover_image": "/static/gallery/album_3_cover.jpg",
            "photos": ["/static/gallery/p0.jpg", "/static/gallery/p1.jpg"]
        }))
        .unwrap();

        let mut form = InboundForm::default();
        form.push_text("remove_photo", "/static/gallery/p0.jpg");
        form.push_file("photos", photo_png(120, 80));
        form.push_file("photos", photo_png(80, 120));
        form.push_text("photo_quality", "40");

        let mut draft = AlbumDraft::from_existing(&album);
        draft.apply(&form, &ImageSettings::default()).await.unwrap();
        draft.validate().unwrap();

        let payload = draft.to_payload();
        assert_eq!(
            payload.text_value("existing_photos"),
            Some(r#"["/static/gallery/p1.jpg"]"#)
        );
        assert_eq!(payload.files("photos").len(), 2);
        assert!(draft.photos.iter().all(|p| p.quality() == Quality::clamped(40)));
    }

    #[tokio::test]
    async fn test_member_draft_keeps_existing_image() {
        let member = TeamMember {
            id: "m1".into(),
            name: "Researcher".into(),
            designation: None,
            role: "Co-PI".into(),
            department: Some("Civil Engineering".into()),
            bio: "Water".into(),
            email: None,
            linkedin: None,
            twitter: None,
            webpage: None,
            image: Some("/static/team/m1.jpg".into()),
        };
        let mut form = InboundForm::default();
        form.push_text("role", "PI");
        let mut draft = MemberDraft::from_existing("1", &member);
        draft.apply(&form, &ImageSettings::default()).await.unwrap();

        let payload = draft.to_payload();
        assert_eq!(payload.text_value("role"), Some("PI"));
        assert_eq!(payload.text_value("member_id"), Some("m1"));
        assert_eq!(payload.text_value("existing_image"), Some("/static/team/m1.jpg"));

        let blank = MemberDraft::blank("1");
        assert!(blank.validate().is_err());
    }

    #[tokio::test]
    async fn test_section_quality_is_per_image() {
        let settings = ImageSettings {
            default_quality: Quality::clamped(70),
            policy: ResizePolicy::default(),
        };
        let mut draft = CaseStudyDraft::blank();
        draft.sections = SectionList::from_existing(&[Section::default(), Section::default()]);

        let mut form = InboundForm::default();
        form.push_file("section_1_image", photo_png(100, 100));
        draft.apply(&form, &settings).await.unwrap();

        assert!(draft.sections.get(0).unwrap().image.is_none());
        let slot = draft.sections.get(1).unwrap().image.as_ref().unwrap();
        assert_eq!(slot.quality().get(), 70);
    }
}
