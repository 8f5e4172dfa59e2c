//! Config Module
//!
//! Centralized configuration for the construction editor.

pub mod editor_config;

pub use editor_config::{ConfigError, EditorConfig};
