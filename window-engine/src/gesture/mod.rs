//! Pointer gestures on a single window.
//!
//! Controllers keep the in-flight geometry to themselves while the pointer
//! moves. Renderers read it from the return value of `update` (or an
//! `on_live` listener) and paint it directly; the registry is written once,
//! when the gesture ends.

mod drag;
mod resize;

pub use drag::{clamp_drag_origin, DragController, DragSession};
pub use resize::{resize_rect, ResizeController, ResizeSession};

use shared_types::{Point, ResizeDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Auxiliary,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(PointerButton::Primary),
            1 => Some(PointerButton::Auxiliary),
            2 => Some(PointerButton::Secondary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPress {
    pub point: Point,
    pub button: PointerButton,
}

impl PointerPress {
    pub fn primary(x: i32, y: i32) -> Self {
        Self {
            point: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// Part of a window a press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitRegion {
    Header,
    /// Minimize or maximize button
    Control,
    Body,
    Handle(ResizeDirection),
}
