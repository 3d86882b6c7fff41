//! Ink session engine.
//!
//! This module turns host pointer events into strokes. It applies the current
//! tool (pen or rectangular eraser), keeps the stroke-level undo/redo history,
//! and publishes whether undo and redo are currently possible.

pub mod events;
pub mod history;
pub mod session;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{PointerAction, PointerEvent};
pub use history::{HistoryState, RedoPolicy};
pub use session::{Gesture, InkSession};
pub use tool::{DrawMode, ToolConfig};
