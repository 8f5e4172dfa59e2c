//! Builder Module
//!
//! Construction interaction engine: turns pointer input into validated,
//! undoable brick edits.

pub mod gesture;
pub mod history;
pub mod mode;
pub mod placement;
pub mod raycast;
pub mod session;
pub mod tools;

pub use gesture::{GestureOutcome, GestureSession, GestureTracker};
pub use history::{ClearBehavior, ConstructionHistory, HistoryError};
pub use mode::{InteractionMode, InteractionPolicy, ModeController};
pub use placement::{PlacementResult, is_valid_placement, resolve_placement, resolve_stack_height};
pub use raycast::{PickHit, build_surface_hit, pick_block};
pub use session::{BuilderSession, PreviewBrick, RenderView};
pub use tools::{BrickDimensions, DEFAULT_BRICK_SIZE, SAME_LAYER_EPSILON, TAP_THRESHOLD_PX};
