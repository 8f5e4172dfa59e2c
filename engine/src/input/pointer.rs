//! Pointer Input Module
//!
//! Pointer and touch events in screen space, decoupled from any windowing or
//! browser event type.

use serde::{Deserialize, Serialize};

use crate::physics::Ray;

/// 2D screen position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another position.
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Position {
    fn from(tuple: (f32, f32)) -> Self {
        Self {
            x: tuple.0,
            y: tuple.1,
        }
    }
}

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerDevice {
    /// Desktop mouse or pen with hover
    #[default]
    Mouse,
    /// Touch screen; no hover between taps
    Touch,
}

impl PointerDevice {
    /// Whether the device reports movement while nothing is pressed.
    pub fn supports_hover(&self) -> bool {
        matches!(self, PointerDevice::Mouse)
    }
}

/// Phase of a pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the interaction surface; handled like `Up`
    Leave,
}

/// A single pointer event with the camera ray through its screen position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Position,
    #[serde(default)]
    pub device: PointerDevice,
    /// World-space ray through `position`, supplied by the camera collaborator
    pub ray: Ray,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Position, device: PointerDevice, ray: Ray) -> Self {
        Self {
            phase,
            position,
            device,
            ray,
        }
    }
}
