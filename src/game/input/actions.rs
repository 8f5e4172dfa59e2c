//! Editor Actions
//!
//! Discrete commands the input surface sends to the editor. Which key or
//! button produces which action is decided by the host.

use serde::{Deserialize, Serialize};

use crate::game::builder::mode::InteractionMode;

/// High-level editor command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EditorAction {
    /// Switch interaction mode
    SetMode { mode: InteractionMode },
    /// Grow or shrink the brick width
    AdjustWidth { delta: i32 },
    /// Grow or shrink the brick depth
    AdjustDepth { delta: i32 },
    /// Exchange width and depth
    SwapDimensions,
    /// Pick a palette slot (1-8)
    SelectColor { slot: usize },
    /// Switch to the next color theme
    CycleTheme,
    Undo,
    Redo,
    /// Save as a new creation, or update the current one
    Save {
        #[serde(default)]
        name: Option<String>,
    },
    /// Replace the construction with a stored creation
    Load { id: String },
    /// Request a page of stored creations
    ListCreations {
        #[serde(default)]
        limit: Option<usize>,
        #[serde(default)]
        offset: usize,
    },
    /// Remove a stored creation
    DeleteCreation { id: String },
    /// Remove every brick
    Clear,
    /// Enter or leave play mode
    TogglePlay,
    /// Show or hide the build preview
    TogglePreview,
}

impl EditorAction {
    /// Whether the action is still accepted while in play mode.
    pub fn allowed_while_playing(&self) -> bool {
        matches!(self, EditorAction::TogglePlay)
    }
}
