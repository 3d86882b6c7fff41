//! Undo/redo affordances and redo-buffer policy.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What happens to the redo buffer when a new stroke is completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RedoPolicy {
    /// Completing a stroke discards every pending redo entry (editor convention)
    #[default]
    DiscardOnNewStroke,
    /// Redo entries survive new strokes and can still be restored on top of them
    Keep,
}

/// Whether the undo and redo controls should be enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
}
