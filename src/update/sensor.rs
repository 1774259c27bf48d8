//! Positional sensor handlers

use tracing::trace;

use crate::commands::Cmd;
use crate::messages::SensorMsg;
use crate::model::PlacePageModel;

/// Forward sensor updates to the active panel while it rests on screen
///
/// Updates arriving while the panel is hidden or moving are dropped, not
/// queued.
pub fn update_sensor(model: &mut PlacePageModel, msg: SensorMsg) -> Option<Cmd> {
    let state = model.active_state();
    if !state.is_shown() {
        trace!(target: "panel", %state, "sensor update dropped");
        return None;
    }

    let active = model.composite.active_mut();
    match msg {
        SensorMsg::Location(location) => active.on_location(location),
        SensorMsg::Compass {
            magnetic_north,
            true_north,
        } => active.on_compass(magnetic_north, true_north),
    }
    None
}
