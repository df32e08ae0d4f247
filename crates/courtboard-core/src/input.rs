//! Gesture events consumed by the tool state machine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Device that produced a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Touch,
    Mouse(MouseButton),
    Pen,
}

impl PointerKind {
    /// Touch is always primary; mouse and pen only with the main button.
    pub fn is_primary(self) -> bool {
        match self {
            PointerKind::Touch | PointerKind::Pen => true,
            PointerKind::Mouse(button) => button == MouseButton::Left,
        }
    }
}

/// Phase of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    Start,
    Move,
    End,
    /// The platform aborted the gesture; any open transient is dropped.
    Cancel,
}

/// A single gesture event in drawing-surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub position: Point,
    pub pointer: PointerKind,
}

impl GestureEvent {
    pub fn new(phase: GesturePhase, position: Point, pointer: PointerKind) -> Self {
        Self {
            phase,
            position,
            pointer,
        }
    }

    /// Touch `start` event.
    pub fn start(position: Point) -> Self {
        Self::new(GesturePhase::Start, position, PointerKind::Touch)
    }

    /// Touch `move` event.
    pub fn moved(position: Point) -> Self {
        Self::new(GesturePhase::Move, position, PointerKind::Touch)
    }

    /// Touch `end` event.
    pub fn end(position: Point) -> Self {
        Self::new(GesturePhase::End, position, PointerKind::Touch)
    }

    pub fn cancel() -> Self {
        Self::new(GesturePhase::Cancel, Point::ZERO, PointerKind::Touch)
    }

    pub fn with_pointer(mut self, pointer: PointerKind) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.pointer.is_primary()
    }
}
