//! Screen geometry shared by the panel, the gesture interpreter and the
//! viewport coordinator
//!
//! All values are physical pixels with the origin at the top-left corner of
//! the map surface. Y grows downward.

use serde::{Deserialize, Serialize};

/// Size of the parent surface the panel is laid out in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle expressed by its two corners
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle covering the whole surface
    pub fn full(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Inclusive on the top-left edges, exclusive on the bottom-right ones
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Move the rectangle by the given offsets
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }
}

/// Where the panel lives on screen
///
/// Phones dock the panel to the bottom edge. Wide and landscape layouts put
/// it into a fixed-width column on the left edge; the panel still slides
/// vertically inside that column.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DockingMode {
    #[default]
    Bottom,
    Side { width: f32 },
}

impl DockingMode {
    /// Horizontal extent of the panel for a parent of the given width
    pub fn panel_span(&self, parent_width: f32) -> (f32, f32) {
        match *self {
            DockingMode::Bottom => (0.0, parent_width),
            DockingMode::Side { width } => (0.0, width.min(parent_width)),
        }
    }
}

/// Measurements the host reports after laying out the panel content
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentMetrics {
    /// Intrinsic height of the preview block shown while collapsed
    pub preview_height: f32,
    /// Full height of the panel content when expanded
    pub content_height: f32,
    /// Height of the button bar pinned under the preview
    pub button_bar_height: f32,
    /// Part of the button bar hidden behind the system navigation inset
    pub button_bar_bottom_inset: f32,
}

/// Geometry of one panel, derived on every layout pass and never persisted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySnapshot {
    /// Y of the panel's top edge inside the parent
    pub top_edge_y: f32,
    /// Full measured height of the panel content
    pub measured_height: f32,
    /// Visible height while collapsed
    pub peek_height: f32,
    /// Height of the parent the values above refer to
    pub parent_height: f32,
}

impl GeometrySnapshot {
    /// Height of the panel currently on screen
    pub fn visible_height(&self) -> f32 {
        (self.parent_height - self.top_edge_y).max(0.0)
    }

    /// Whether any part of the panel is on screen
    pub fn is_visible(&self) -> bool {
        self.visible_height() > 0.0
    }
}
