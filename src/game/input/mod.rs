//! Input Module
//!
//! Editor action definitions.

pub mod actions;

pub use actions::EditorAction;
