//! Web handlers module
//!
//! HTTP request handlers organized by domain. Each handler extracts and
//! validates its input, then delegates to the service layer.

pub mod health;
pub mod ideas;
pub mod photos;
