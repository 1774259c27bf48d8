//! Keeps the map's unobscured rectangle in sync with the panels
//!
//! Geometry changes only mark the coordinator dirty. The rectangle is
//! computed on the posted layout tick, after the host has laid out the change,
//! and pushed to the map only when it differs from the last one pushed.

use tracing::debug;

use crate::config::PanelConfig;
use crate::geometry::{DockingMode, GeometrySnapshot, Rect, Size};

#[derive(Debug, Clone)]
pub struct ViewportCoordinator {
    /// The map never gets shorter than this while a bottom panel is visible
    min_height: f32,
    dirty: bool,
    /// A layout tick is already queued
    tick_pending: bool,
    last_pushed: Option<Rect>,
}

impl ViewportCoordinator {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            min_height: config.viewport_min_height,
            dirty: false,
            tick_pending: false,
            last_pushed: None,
        }
    }

    /// Note a geometry change; returns true when a layout tick must be posted
    pub fn request_layout(&mut self) -> bool {
        self.dirty = true;
        if self.tick_pending {
            return false;
        }
        self.tick_pending = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forget the last pushed rectangle so the next tick pushes again
    pub fn invalidate(&mut self) {
        self.last_pushed = None;
    }

    pub fn last_pushed(&self) -> Option<Rect> {
        self.last_pushed
    }

    /// Run the posted layout tick; returns the rectangle to push, if any
    pub fn on_layout_tick<I>(&mut self, screen: Size, docking: DockingMode, panels: I) -> Option<Rect>
    where
        I: IntoIterator<Item = GeometrySnapshot>,
    {
        self.tick_pending = false;
        if !self.dirty {
            return None;
        }
        self.dirty = false;

        let rect = visible_rect(screen, docking, self.min_height, panels);
        if self.last_pushed == Some(rect) {
            return None;
        }
        debug!(target: "viewport", ?rect, "visible rect changed");
        self.last_pushed = Some(rect);
        Some(rect)
    }
}

/// Rectangle of the map not covered by any visible panel
pub fn visible_rect<I>(screen: Size, docking: DockingMode, min_height: f32, panels: I) -> Rect
where
    I: IntoIterator<Item = GeometrySnapshot>,
{
    let full = Rect::full(screen);
    let highest_top = panels
        .into_iter()
        .filter(GeometrySnapshot::is_visible)
        .map(|geometry| geometry.top_edge_y)
        .reduce(f32::min);

    let Some(top) = highest_top else {
        return full;
    };

    match docking {
        DockingMode::Bottom => {
            let y1 = top.max(min_height).min(screen.height);
            Rect { y1, ..full }
        }
        DockingMode::Side { .. } => {
            let (_, x0) = docking.panel_span(screen.width);
            Rect { x0, ..full }
        }
    }
}
