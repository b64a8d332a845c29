//! Shared types between the window engine and the web desktop
//!
//! These types are used by both:
//! - `window-engine` (target independent state machines)
//! - `folio-desktop` Dioxus components (WASM)
//!
//! Serializable with serde so records can be logged and inspected as JSON

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Geometry
// ============================================================================

/// Top-left corner in viewport CSS pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Browser viewport dimensions
pub type Viewport = Size;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }
}

// ============================================================================
// Window State
// ============================================================================

/// Display mode of a floating window.
///
/// Minimized and maximized are exclusive by construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WindowMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

/// Authoritative state of one floating window
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: String,
    pub position: Point,
    pub size: Size,
    /// Stacking order; higher renders on top
    pub z_order: u32,
    pub mode: WindowMode,
}

impl WindowRecord {
    pub fn is_minimized(&self) -> bool {
        self.mode == WindowMode::Minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.mode == WindowMode::Maximized
    }
}

pub const DEFAULT_WINDOW_POSITION: Point = Point::new(100, 100);
pub const DEFAULT_WINDOW_SIZE: Size = Size::new(400, 300);

/// Caller-supplied state for a window being registered
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InitialWindowState {
    #[serde(default)]
    pub position: Option<Point>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub mode: WindowMode,
    /// Overrides the registry baseline when present
    #[serde(default)]
    pub z_order: Option<u32>,
}

impl InitialWindowState {
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn with_z_order(mut self, z_order: u32) -> Self {
        self.z_order = Some(z_order);
        self
    }

    pub fn position_or_default(&self) -> Point {
        self.position.unwrap_or(DEFAULT_WINDOW_POSITION)
    }

    pub fn size_or_default(&self) -> Size {
        self.size.unwrap_or(DEFAULT_WINDOW_SIZE)
    }
}

// ============================================================================
// Resize Handles
// ============================================================================

/// One of the eight edge/corner resize handles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::N,
        ResizeDirection::S,
        ResizeDirection::E,
        ResizeDirection::W,
        ResizeDirection::Ne,
        ResizeDirection::Nw,
        ResizeDirection::Se,
        ResizeDirection::Sw,
    ];

    pub fn has_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    pub fn has_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    pub fn has_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    pub fn has_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::S => "s",
            Self::E => "e",
            Self::W => "w",
            Self::Ne => "ne",
            Self::Nw => "nw",
            Self::Se => "se",
            Self::Sw => "sw",
        }
    }
}

impl fmt::Display for ResizeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
