//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::time::Duration;

use crate::data::DataRef;
use crate::geometry::{ContentMetrics, DockingMode, Rect, Size};

/// Requests addressed to the panel composite
#[derive(Debug, Clone)]
pub enum PanelMsg {
    /// Show a payload, switching variants if needed
    Open(DataRef),
    /// Hide the active panel
    Close { deactivate_selection: bool },
    /// The host measured the active panel's content
    ContentMeasured(ContentMetrics),
    /// Bookmark flag of the shown feature changed
    BookmarkChanged { is_bookmark: bool },
    /// Panel-local rectangles whose content scrolls horizontally
    SetScrollRegions(Vec<Rect>),
}

/// Raw pointer input in screen coordinates
///
/// `time` is a monotonic timestamp supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMsg {
    Down { x: f32, y: f32, time: Duration },
    Move { x: f32, y: f32, time: Duration },
    Up { x: f32, y: f32, time: Duration },
    Cancel { time: Duration },
}

/// A device position fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

/// Positional sensor updates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorMsg {
    Location(Location),
    /// Headings in degrees; a negative `true_north` means unavailable
    Compass { magnetic_north: f64, true_north: f64 },
}

/// Host lifecycle callbacks between `initialize` and `destroy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMsg {
    Start,
    Resume,
    Pause,
    Stop,
}

/// Layout notifications
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutMsg {
    /// Posted layout pass; geometry measured now reflects the last change
    Tick,
    /// The map surface changed size
    Resize(Size),
    /// Switch between bottom and side docking
    SetDocking(DockingMode),
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Panel(PanelMsg),
    Pointer(PointerMsg),
    Sensor(SensorMsg),
    Host(HostMsg),
    Layout(LayoutMsg),
    /// Animation frame with the time elapsed since the previous one
    Frame(Duration),
}
