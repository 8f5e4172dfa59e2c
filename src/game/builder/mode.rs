//! Builder Mode
//!
//! Interaction mode state machine. The active mode is exposed as an
//! [`InteractionPolicy`] that the input dispatcher consults before routing a
//! pointer event; nothing about the scene objects themselves changes with
//! the mode.

use serde::{Deserialize, Serialize};

/// What pointer input does on the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Tap to place the previewed brick
    #[default]
    Build,
    /// Drag to orbit, pan and zoom the camera
    Move,
    /// Tap a brick to remove it
    Erase,
}

impl InteractionMode {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Build => "build",
            InteractionMode::Move => "move",
            InteractionMode::Erase => "erase",
        }
    }

    /// Routing policy for this mode.
    pub fn policy(&self) -> InteractionPolicy {
        InteractionPolicy { mode: *self }
    }
}

/// Routing rules for the active mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionPolicy {
    mode: InteractionMode,
}

impl InteractionPolicy {
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Build mode traces the pointer ray onto the build surface every frame.
    pub fn consumes_preview_ray(&self) -> bool {
        self.mode == InteractionMode::Build
    }

    /// Erase mode picks bricks when asked (press, hover).
    pub fn picks_on_demand(&self) -> bool {
        self.mode == InteractionMode::Erase
    }

    /// Camera orbit/pan/zoom is only enabled in move mode.
    pub fn camera_controls_enabled(&self) -> bool {
        self.mode == InteractionMode::Move
    }
}

/// Holds the active mode and the transient hover/pick state tied to it.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: InteractionMode,
    hovered: Option<usize>,
}

impl ModeController {
    pub fn new(mode: InteractionMode) -> Self {
        Self { mode, hovered: None }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn policy(&self) -> InteractionPolicy {
        self.mode.policy()
    }

    /// Switch modes. Returns `true` when the mode actually changed.
    ///
    /// Any change clears the hovered brick; the caller must also cancel its
    /// in-flight gesture.
    pub fn set_mode(&mut self, mode: InteractionMode) -> bool {
        if mode == self.mode {
            return false;
        }
        log::info!("[Builder] Mode: {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        self.hovered = None;
        true
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index;
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }
}
