//! Editor Configuration
//!
//! Tunables for the construction editor. `Default` returns the values the
//! editor ships with; a JSON file may override any subset of them.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::game::builder::history::ClearBehavior;
use crate::game::builder::tools::{DEFAULT_BRICK_SIZE, TAP_THRESHOLD_PX};
use crate::game::building::DEFAULT_COLOR;
use crate::world::GridConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Platform and layer geometry
    pub grid: GridConfig,
    /// Pointer travel (pixels) that turns a tap into a drag
    pub tap_threshold_px: f32,
    /// Quiet period before the local cache is written
    pub autosave_delay_ms: u64,
    /// Whether clearing wipes undo history or is itself undoable
    pub clear_behavior: ClearBehavior,
    /// Maximum undo snapshots kept; `None` keeps everything
    pub history_limit: Option<usize>,
    pub default_width: u32,
    pub default_depth: u32,
    pub default_color: String,
    /// Creations requested per page when listing
    pub list_page_size: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            tap_threshold_px: TAP_THRESHOLD_PX,
            autosave_delay_ms: 500,
            clear_behavior: ClearBehavior::default(),
            history_limit: None,
            default_width: DEFAULT_BRICK_SIZE,
            default_depth: DEFAULT_BRICK_SIZE,
            default_color: DEFAULT_COLOR.to_string(),
            list_page_size: 10,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}
