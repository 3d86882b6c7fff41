//! Pointer event types forwarded by the host UI.

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    /// Finger/stylus/button went down
    Down,
    /// Pointer moved while down
    Move,
    /// Finger/stylus/button lifted
    Up,
}

/// A raw pointer sample in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            action: PointerAction::Down,
            x,
            y,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            action: PointerAction::Move,
            x,
            y,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            action: PointerAction::Up,
            x,
            y,
        }
    }
}
