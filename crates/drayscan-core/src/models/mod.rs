//! Data models: extracted fields, load drafts, and configuration.

pub mod config;
pub mod fields;
pub mod load;
