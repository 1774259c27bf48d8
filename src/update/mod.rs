//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod host;
mod layout;
mod panel;
mod pointer;
mod sensor;

use std::time::Duration;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::PlacePageModel;

#[cfg(debug_assertions)]
use crate::tracing::PanelSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use host::update_host;
pub use layout::update_layout;
pub use panel::update_panel;
pub use pointer::update_pointer;
pub use sensor::update_sensor;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut PlacePageModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut PlacePageModel, msg: Msg) -> Option<Cmd> {
    let result = match msg {
        Msg::Panel(m) => panel::update_panel(model, m),
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::Sensor(m) => sensor::update_sensor(model, m),
        Msg::Host(m) => host::update_host(model, m),
        Msg::Layout(m) => layout::update_layout(model, m),
        Msg::Frame(dt) => update_frame(model, dt),
    };

    coalesce(model, result)
}

/// Advance every running animation by one frame
fn update_frame(model: &mut PlacePageModel, dt: Duration) -> Option<Cmd> {
    let mut out = Vec::new();
    model.composite.on_frame(dt, &mut out);
    Cmd::from_vec(out)
}

/// Collapse the commands of one update
///
/// Layout requests are merged into at most one posted tick, and at most one
/// frame request survives. Everything else keeps its order.
fn coalesce(model: &mut PlacePageModel, result: Option<Cmd>) -> Option<Cmd> {
    let cmds = result?.flatten();
    let wants_layout = cmds.contains(&Cmd::ScheduleLayout);
    let wants_frame = cmds.contains(&Cmd::RequestFrame);

    let mut merged: Vec<Cmd> = cmds
        .into_iter()
        .filter(|cmd| !matches!(cmd, Cmd::ScheduleLayout | Cmd::RequestFrame))
        .collect();
    if wants_layout && model.viewport.request_layout() {
        merged.push(Cmd::ScheduleLayout);
    }
    if wants_frame {
        merged.push(Cmd::RequestFrame);
    }
    Cmd::from_vec(merged)
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after panel state and logs diffs for debugging.
/// Filters out noisy messages like animation frames and pointer moves.
#[cfg(debug_assertions)]
fn update_traced(model: &mut PlacePageModel, msg: Msg) -> Option<Cmd> {
    use crate::messages::PointerMsg;

    // Skip logging for noisy periodic messages
    let is_noisy = matches!(
        &msg,
        Msg::Frame(_) | Msg::Pointer(PointerMsg::Move { .. }) | Msg::Sensor(_)
    );

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = PanelSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = PanelSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "panel", %diff, "state changed");
    }

    model.composite.assert_invariants();

    result
}

/// Get a display name for a message type
///
/// Uses Debug formatting to include variant names and arguments; payloads are
/// shown by id only.
/// Example outputs:
/// - `Panel::Open(node/42)`
/// - `Pointer::Down { x: 10.0, y: 700.0, time: 0ns }`
/// - `Layout::Resize(Size { width: 400.0, height: 800.0 })`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Panel(crate::messages::PanelMsg::Open(data)) => format!("Panel::Open({})", data.id()),
        Msg::Panel(m) => format!("Panel::{:?}", m),
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        Msg::Sensor(m) => format!("Sensor::{:?}", m),
        Msg::Host(m) => format!("Host::{:?}", m),
        Msg::Layout(m) => format!("Layout::{:?}", m),
        Msg::Frame(dt) => format!("Frame({:?})", dt),
    }
}
