use crate::ink::events::{PointerAction, PointerEvent};
use crate::ink::tool::{DrawMode, ToolConfig};
use log::trace;

use super::{Gesture, InkSession};

impl InkSession {
    /// Routes a raw pointer event to the pen or eraser.
    ///
    /// # Behavior
    /// - Down: pen mode begins a stroke; erase mode anchors the erase rectangle
    /// - Move: extends the open stroke, or erases with the rectangle spanning
    ///   the anchor and the pointer (re-evaluated on every move)
    /// - Up: finishes the open gesture without adding a point
    ///
    /// Move/Up with no preceding Down are ignored.
    pub fn handle_pointer(&mut self, event: PointerEvent, tool: &ToolConfig) {
        let PointerEvent { action, x, y } = event;
        match action {
            PointerAction::Down => match tool.mode {
                DrawMode::Pen => {
                    self.begin_stroke(x, y, tool);
                }
                DrawMode::Erase => self.begin_erase(x, y),
            },
            PointerAction::Move => match self.gesture {
                Gesture::Drawing { .. } => {
                    self.extend_stroke(x, y);
                }
                Gesture::Erasing { .. } => {
                    self.erase_to(x, y);
                }
                Gesture::Idle => trace!("Pointer move at ({x}, {y}) without a gesture"),
            },
            PointerAction::Up => match self.gesture {
                Gesture::Drawing { .. } => {
                    self.end_stroke();
                }
                Gesture::Erasing { .. } => self.end_erase(),
                Gesture::Idle => trace!("Pointer up at ({x}, {y}) without a gesture"),
            },
        }
    }
}
