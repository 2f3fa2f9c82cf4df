//! Scribble Core Library
//!
//! Annotation layer for media viewers: freehand strokes, shapes and text
//! drawn over an image or video, with per-gesture undo/redo.

pub mod config;
pub mod history;
pub mod render;
pub mod scene;
pub mod shapes;
pub mod snapshot;
pub mod surface;
pub mod toolbar;
pub mod tools;

pub use config::{ConfigError, EngineConfig};
pub use history::{History, HistoryState};
pub use render::{DisplayItem, DisplayList};
pub use scene::Scene;
pub use shapes::{Drawable, DrawableId};
pub use snapshot::{Snapshot, SnapshotError};
pub use surface::{
    RecordingBackend, Surface, SurfaceBackend, SurfaceCommand, SurfaceError, SurfaceResult,
};
pub use toolbar::{ToolbarBridge, ToolbarSettings, TriggerCounters};
pub use tools::{InteractionState, ToolController, ToolKind};
