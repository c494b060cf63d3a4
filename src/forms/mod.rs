//! Admin form state: drafts, sections and the submission state machine.
//!
//! A draft is validated before anything is sent; the outgoing multipart body is
//! described by a [`FormPayload`] so it can be inspected independently of the
//! HTTP client.

mod drafts;
mod inbound;
mod sections;

pub use drafts::*;
pub use inbound::{ImageSettings, InboundForm};
pub use sections::SectionList;

use serde::Serialize;

use crate::errors::AppError;
use crate::imaging::Upload;

/// One part of an outgoing multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, upload: Upload },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Ordered multipart body sent to the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormPayload {
    parts: Vec<FormPart>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts.push(FormPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(&mut self, name: impl Into<String>, upload: Upload) -> &mut Self {
        self.parts.push(FormPart::File {
            name: name.into(),
            upload,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    /// First text value sent under `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// All files sent under `name`, in order.
    pub fn files(&self, name: &str) -> Vec<&Upload> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                FormPart::File { name: n, upload } if n == name => Some(upload),
                _ => None,
            })
            .collect()
    }
}

/// Behaviour every admin draft provides.
pub trait Draft {
    /// Reject the draft before any network call.
    fn validate(&self) -> Result<(), AppError>;

    /// Build the multipart body for the backend.
    fn to_payload(&self) -> FormPayload;
}

/// Where an admin form currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FormState {
    Idle,
    Creating,
    Editing { id: String },
    Submitting { id: Option<String> },
    Error { message: String, id: Option<String> },
}

/// Submission state machine of one admin screen.
#[derive(Debug)]
pub struct AdminForm<D> {
    state: FormState,
    draft: Option<D>,
}

impl<D> Default for AdminForm<D> {
    fn default() -> Self {
        Self {
            state: FormState::Idle,
            draft: None,
        }
    }
}

impl<D: Draft> AdminForm<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a blank form.
    pub fn open_create(&mut self, draft: D) {
        self.state = FormState::Creating;
        self.draft = Some(draft);
    }

    /// Open a form pre-populated from an existing record.
    pub fn open_edit(&mut self, id: impl Into<String>, draft: D) {
        self.state = FormState::Editing { id: id.into() };
        self.draft = Some(draft);
    }

    #[cfg(test)]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    #[cfg(test)]
    pub fn draft(&self) -> Option<&D> {
        self.draft.as_ref()
    }

    #[cfg(test)]
    pub fn draft_mut(&mut self) -> Option<&mut D> {
        self.draft.as_mut()
    }

    fn editing_id(&self) -> Option<String> {
        match &self.state {
            FormState::Editing { id } => Some(id.clone()),
            FormState::Submitting { id } | FormState::Error { id, .. } => id.clone(),
            _ => None,
        }
    }

    /// Validate the draft and move to `Submitting`.
    ///
    /// Validation failures leave the form open in the `Error` state.
    pub fn begin_submit(&mut self) -> Result<FormPayload, AppError> {
        let id = self.editing_id();
        let draft = match (&self.state, &self.draft) {
            (FormState::Creating | FormState::Editing { .. } | FormState::Error { .. }, Some(draft)) => draft,
            (FormState::Submitting { .. }, _) => {
                return Err(AppError::BadRequest("Submission already in progress".to_string()))
            }
            _ => return Err(AppError::BadRequest("No form is open".to_string())),
        };

        if let Err(e) = draft.validate() {
            self.state = FormState::Error {
                message: e.message(),
                id,
            };
            return Err(e);
        }

        let payload = draft.to_payload();
        self.state = FormState::Submitting { id };
        Ok(payload)
    }

    /// Record the backend outcome of a submission.
    ///
    /// Success closes the form; failure keeps the draft for correction.
    pub fn finish(&mut self, outcome: Result<(), AppError>) -> Result<(), AppError> {
        let FormState::Submitting { id } = &self.state else {
            return Err(AppError::BadRequest("No submission in progress".to_string()));
        };
        match outcome {
            Ok(()) => {
                self.state = FormState::Idle;
                self.draft = None;
                Ok(())
            }
            Err(e) => {
                self.state = FormState::Error {
                    message: e.message(),
                    id: id.clone(),
                };
                Err(e)
            }
        }
    }

    /// Close the form without submitting.
    #[cfg(test)]
    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
        self.draft = None;
    }
}
