//! Drawing session state and stroke history.

use crate::draw::{
    DirtyTracker, Frame, Point, RasterSnapshot, RenderError, SnapshotOptions, Stroke, StrokeId,
    render_snapshot,
};
use crate::ink::history::{HistoryState, RedoPolicy};
use crate::ink::tool::{DrawMode, ToolConfig};
use crate::util::{Bounds, Rect};
use log::{debug, warn};
use std::collections::HashSet;
use tokio::sync::watch;

/// In-flight pointer gesture.
///
/// Chosen on pointer-down from the tool mode; later move/up events follow the
/// gesture rather than the (possibly changed) tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// No pointer is down
    Idle,
    /// A pen stroke is growing
    Drawing {
        /// The stroke receiving new points
        id: StrokeId,
    },
    /// An erase rectangle is being dragged
    Erasing {
        /// Where the pointer went down; one corner of the erase rectangle
        anchor: Point,
    },
}

/// A drawing surface's strokes, redo buffer and gesture state.
///
/// Owned by the UI thread. Every operation is total: calls that make no sense
/// in the current state (undo with nothing drawn, move without a down, ...)
/// are no-ops.
pub struct InkSession {
    /// Visible strokes in paint order
    pub(super) strokes: Frame,
    /// Strokes removed by undo or erase, most recent last
    pub(super) redo: Frame,
    /// Current pointer gesture
    pub(super) gesture: Gesture,
    /// Next id handed to a new stroke
    pub(super) next_id: u64,
    /// Redo-buffer handling when a stroke completes
    redo_policy: RedoPolicy,
    /// Publishes undo/redo availability to observers
    history: watch::Sender<HistoryState>,
    /// Damage accumulated since the host last repainted
    pub(super) dirty: DirtyTracker,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl Default for InkSession {
    fn default() -> Self {
        Self::new(RedoPolicy::default())
    }
}

impl InkSession {
    /// Creates an empty session.
    pub fn new(redo_policy: RedoPolicy) -> Self {
        let (history, _) = watch::channel(HistoryState::default());
        Self {
            strokes: Frame::new(),
            redo: Frame::new(),
            gesture: Gesture::Idle,
            next_id: 1,
            redo_policy,
            history,
            dirty: DirtyTracker::new(),
            needs_redraw: true,
        }
    }

    /// Creates a session pre-populated with previously saved strokes.
    ///
    /// Stroke order is kept. New ids are allocated above the largest loaded id;
    /// any duplicate id in `strokes` is replaced by a fresh one. If the loaded
    /// ids leave no room above them, all strokes are renumbered 1..=n.
    pub fn from_strokes(mut strokes: Vec<Stroke>, redo_policy: RedoPolicy) -> Self {
        let mut session = Self::new(redo_policy);
        let headroom = u64::MAX - strokes.len() as u64;
        if strokes.iter().any(|stroke| stroke.id.0 >= headroom) {
            warn!(
                "Loaded stroke ids reach {}; renumbering {} strokes",
                headroom,
                strokes.len()
            );
            for (index, stroke) in strokes.iter_mut().enumerate() {
                stroke.id = StrokeId(index as u64 + 1);
            }
        }
        session.next_id = strokes
            .iter()
            .map(|stroke| stroke.id.0)
            .max()
            .map_or(1, |max| max.saturating_add(1));

        let mut seen = HashSet::with_capacity(strokes.len());
        for mut stroke in strokes {
            if !seen.insert(stroke.id) {
                let fresh = session.allocate_id();
                warn!(
                    "Loaded drawing repeats stroke id {}; reassigning to {}",
                    stroke.id, fresh
                );
                stroke.id = fresh;
                seen.insert(fresh);
            }
            session.strokes.push(stroke);
        }

        debug!("Restored ink session with {} strokes", session.strokes.len());
        session.dirty.mark_full();
        session.publish_history();
        session
    }

    fn allocate_id(&mut self) -> StrokeId {
        if self.next_id == u64::MAX {
            self.renumber();
        }
        let id = StrokeId(self.next_id);
        self.next_id = self.next_id.checked_add(1).unwrap_or(u64::MAX);
        id
    }

    /// Reassigns ids 1..=n across visible and redo strokes, keeping order.
    fn renumber(&mut self) {
        let active = match self.gesture {
            Gesture::Drawing { id } => Some(id),
            _ => None,
        };
        let mut next = 1u64;
        for stroke in self.strokes.iter_mut().chain(self.redo.iter_mut()) {
            let fresh = StrokeId(next);
            if active == Some(stroke.id) {
                self.gesture = Gesture::Drawing { id: fresh };
            }
            stroke.id = fresh;
            next += 1;
        }
        warn!("Stroke ids exhausted; renumbered {} strokes", next - 1);
        self.next_id = next;
    }

    // ------------------------------------------------------------------
    // Pen
    // ------------------------------------------------------------------

    /// Starts a new stroke at `(x, y)` styled from `tool`.
    ///
    /// Any open gesture is finished first. Returns `None` (no-op) when the
    /// tool is in erase mode.
    pub fn begin_stroke(&mut self, x: f32, y: f32, tool: &ToolConfig) -> Option<StrokeId> {
        if tool.mode != DrawMode::Pen {
            debug!("begin_stroke ignored: tool is in {:?} mode", tool.mode);
            return None;
        }
        self.finish_gesture();

        let id = self.allocate_id();
        let stroke = Stroke::new(id, tool.stroke_style(), Point::new(x, y));
        self.dirty.mark_stroke(&stroke);
        self.strokes.push(stroke);
        self.gesture = Gesture::Drawing { id };
        self.needs_redraw = true;
        self.publish_history();

        debug!("Stroke {} started at ({:.1}, {:.1})", id, x, y);
        Some(id)
    }

    /// Appends `(x, y)` to the stroke being drawn.
    ///
    /// Returns `false` (no-op) when no stroke is being drawn.
    pub fn extend_stroke(&mut self, x: f32, y: f32) -> bool {
        let Gesture::Drawing { id } = self.gesture else {
            return false;
        };
        let Some(stroke) = self.strokes.get_mut(id) else {
            // Erased out from under the pen; the rest of the gesture is dropped.
            return false;
        };

        stroke.points.push(Point::new(x, y));
        let tail_start = stroke.points.len().saturating_sub(2);
        self.dirty
            .mark_points(&stroke.points[tail_start..], stroke.style.width);
        self.needs_redraw = true;
        true
    }

    /// Finishes the stroke being drawn and applies the redo policy.
    ///
    /// Returns the finished stroke's id, or `None` when no stroke was open.
    pub fn end_stroke(&mut self) -> Option<StrokeId> {
        let Gesture::Drawing { id } = self.gesture else {
            return None;
        };
        self.gesture = Gesture::Idle;

        if self.redo_policy == RedoPolicy::DiscardOnNewStroke && !self.redo.is_empty() {
            debug!(
                "Stroke {} completed; discarding {} redo entries",
                id,
                self.redo.len()
            );
            self.redo.clear();
        }
        self.publish_history();
        Some(id)
    }

    // ------------------------------------------------------------------
    // Eraser
    // ------------------------------------------------------------------

    /// Anchors an erase rectangle at `(x, y)`. Nothing is erased until the
    /// pointer moves.
    pub fn begin_erase(&mut self, x: f32, y: f32) {
        self.finish_gesture();
        self.gesture = Gesture::Erasing {
            anchor: Point::new(x, y),
        };
    }

    /// Erases with the rectangle spanning the anchor and `(x, y)`.
    ///
    /// Returns the ids of the strokes removed by this call; empty when no
    /// erase gesture is open.
    pub fn erase_to(&mut self, x: f32, y: f32) -> Vec<StrokeId> {
        let Gesture::Erasing { anchor } = self.gesture else {
            return Vec::new();
        };
        self.erase_rect(Bounds::from_corners(anchor.x, anchor.y, x, y))
    }

    /// Ends the erase gesture, if one is open.
    pub fn end_erase(&mut self) {
        if matches!(self.gesture, Gesture::Erasing { .. }) {
            self.gesture = Gesture::Idle;
        }
    }

    /// Removes every stroke with at least one point inside `area` (inclusive).
    ///
    /// Erasing is all-or-nothing per stroke. Removed strokes move to the redo
    /// buffer in paint order, so the topmost one is restored first.
    pub fn erase_rect(&mut self, area: Bounds) -> Vec<StrokeId> {
        let removed = self.strokes.remove_intersecting(&area);
        if removed.is_empty() {
            return Vec::new();
        }

        let ids: Vec<StrokeId> = removed.iter().map(|stroke| stroke.id).collect();
        for stroke in removed {
            self.dirty.mark_stroke(&stroke);
            self.redo.push(stroke);
        }
        self.needs_redraw = true;
        self.publish_history();

        debug!("Erased {} strokes: {:?}", ids.len(), ids);
        ids
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Moves the most recently inserted stroke to the redo buffer.
    pub fn undo(&mut self) -> Option<StrokeId> {
        self.finish_gesture();
        let stroke = self.strokes.pop()?;
        let id = stroke.id;

        self.dirty.mark_stroke(&stroke);
        self.redo.push(stroke);
        self.needs_redraw = true;
        self.publish_history();

        debug!("Undo removed stroke {}", id);
        Some(id)
    }

    /// Restores the most recent redo entry on top of the visible strokes.
    ///
    /// The stroke goes to the end of the paint order even if it was below
    /// other strokes before it was removed.
    pub fn redo(&mut self) -> Option<StrokeId> {
        self.finish_gesture();
        let stroke = self.redo.pop()?;
        let id = stroke.id;

        self.dirty.mark_stroke(&stroke);
        self.strokes.push(stroke);
        self.needs_redraw = true;
        self.publish_history();

        debug!("Redo restored stroke {}", id);
        Some(id)
    }

    /// Removes all strokes and empties the redo buffer.
    pub fn clear(&mut self) {
        self.gesture = Gesture::Idle;
        let removed = self.strokes.len() + self.redo.len();
        self.strokes.clear();
        self.redo.clear();
        self.dirty.mark_full();
        self.needs_redraw = true;
        self.publish_history();

        debug!("Cleared ink session ({} strokes dropped)", removed);
    }

    /// Empties only the redo buffer.
    pub fn clear_redo(&mut self) {
        if self.redo.is_empty() {
            return;
        }
        self.redo.clear();
        self.publish_history();
    }

    /// Closes whatever gesture is open, as if the pointer had been lifted.
    pub(super) fn finish_gesture(&mut self) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { .. } => {
                self.end_stroke();
            }
            Gesture::Erasing { .. } => self.end_erase(),
        }
    }

    fn publish_history(&self) {
        let state = self.history_state();
        self.history.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn history_state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }

    /// Subscribes to undo/redo availability. The receiver only wakes when
    /// either flag actually changes.
    pub fn subscribe(&self) -> watch::Receiver<HistoryState> {
        self.history.subscribe()
    }

    /// Visible strokes in paint order.
    pub fn strokes(&self) -> &[Stroke] {
        self.strokes.strokes()
    }

    /// Strokes available to [`InkSession::redo`], most recent last.
    pub fn redo_buffer(&self) -> &[Stroke] {
        self.redo.strokes()
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.get(id)
    }

    /// The stroke currently being drawn, if any.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        match self.gesture {
            Gesture::Drawing { id } => self.strokes.get(id),
            _ => None,
        }
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn redo_policy(&self) -> RedoPolicy {
        self.redo_policy
    }

    pub fn set_redo_policy(&mut self, policy: RedoPolicy) {
        self.redo_policy = policy;
    }

    /// Drains damage accumulated since the last call (see [`DirtyTracker`]).
    pub fn take_dirty_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        self.needs_redraw = false;
        self.dirty.take_regions(width, height)
    }

    /// Renders the visible strokes 1:1 onto a transparent `width`×`height` image.
    pub fn snapshot(&self, width: i32, height: i32) -> Result<RasterSnapshot, RenderError> {
        self.snapshot_with(&SnapshotOptions::sized(width, height))
    }

    pub fn snapshot_with(&self, options: &SnapshotOptions) -> Result<RasterSnapshot, RenderError> {
        render_snapshot(self.strokes(), options)
    }

    /// Consumes the session, returning the visible strokes for saving.
    pub fn into_strokes(self) -> Vec<Stroke> {
        self.strokes.into_strokes()
    }
}
