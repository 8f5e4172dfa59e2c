//! Input Module
//!
//! Platform-agnostic pointer input and surface capture. This module is
//! decoupled from any specific windowing system or browser API; the host
//! translates its native events into [`PointerEvent`]s carrying the camera
//! ray for the pointer position.
//!
//! # Example
//!
//! ```rust,ignore
//! use block_forge_engine::input::{PointerEvent, PointerPhase, PointerDevice, Position};
//! use std::time::Instant;
//!
//! let event = PointerEvent::new(
//!     PointerPhase::Down,
//!     Position::new(120.0, 80.0),
//!     PointerDevice::Touch,
//!     camera.ray_through(120.0, 80.0),
//! );
//! session.handle_pointer(&event, Instant::now());
//! ```

pub mod capture;
pub mod pointer;

pub use capture::{InputCapture, InputSurface};
pub use pointer::{PointerDevice, PointerEvent, PointerPhase, Position};
