//! Data models for the EPIC site.
//!
//! These models match the backend JSON directory entries field for field.

mod album;
mod case_study;
mod content;
mod event;
mod resource;
mod section;
mod team;

pub use album::*;
pub use case_study::*;
pub use content::{find_item, AssetResolver, ContentItem, ContentKind};
pub use event::*;
pub use resource::*;
pub use section::Section;
pub use team::*;
