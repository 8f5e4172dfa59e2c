//! Block Forge Engine Library
//!
//! Grid-aligned brick building: the interaction core that turns pointer
//! input into validated, undoable edits of a brick construction. Rendering
//! and camera control live with the host.
//!
//! # Modules
//!
//! - [`world`] - Platform geometry (grid snapping, layers, bounds)
//! - [`physics`] - Ray primitives for picking and surface projection
//! - [`input`] - Pointer events and scoped input capture
//! - [`game`] - Bricks, the builder session, history and persistence
//!
//! # Example
//!
//! ```ignore
//! use block_forge_engine::game::{BuilderSession, EditorConfig};
//! use block_forge_engine::game::persistence::MemoryLocalCache;
//! use block_forge_engine::input::{PointerDevice, PointerEvent, PointerPhase, Position};
//! use std::time::Instant;
//!
//! let mut session = BuilderSession::new(EditorConfig::default(), Box::new(MemoryLocalCache::new()));
//! session.restore_from_cache();
//!
//! // Host translates its native events, adding the camera ray
//! let event = PointerEvent::new(PointerPhase::Down, Position::new(320.0, 240.0), PointerDevice::Mouse, ray);
//! session.handle_pointer(&event, Instant::now());
//!
//! // Once per frame
//! session.update_frame(Some(&ray), Instant::now());
//! let view = session.render_view();
//! ```

pub mod input;
pub mod physics;
pub mod world;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export world types for convenience
pub use world::{GridConfig, snap_axis};
// Re-export commonly used input types
pub use input::{InputCapture, InputSurface, PointerDevice, PointerEvent, PointerPhase, Position};
pub use physics::Ray;
