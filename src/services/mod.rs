//! Service layer
//!
//! Business logic lives here; handlers in [`crate::web`] stay thin and
//! delegate to these services.

pub mod idea_mapper;
pub mod photo_cache;

pub use idea_mapper::IdeaMapper;
pub use photo_cache::{PhotoCache, PhotoRequestMode};
