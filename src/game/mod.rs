//! Game Module
//!
//! Brick-building editor built on top of the engine.

pub mod builder;
pub mod building;
pub mod config;
pub mod input;
pub mod persistence;

pub use builder::{BuilderSession, ClearBehavior, ConstructionHistory, InteractionMode, RenderView};
pub use building::{Block, ColorTheme, Construction};
pub use config::EditorConfig;
pub use input::EditorAction;
pub use persistence::{CreationStore, LocalCache, Notice, StoreWorker};
