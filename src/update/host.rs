//! Host lifecycle handlers

use tracing::debug;

use crate::commands::Cmd;
use crate::messages::HostMsg;
use crate::model::{HostPhase, PlacePageModel};

pub fn update_host(model: &mut PlacePageModel, msg: HostMsg) -> Option<Cmd> {
    if !model.is_initialized() {
        debug!(target: "panel", ?msg, "lifecycle event before initialize ignored");
        return None;
    }

    let mut out = Vec::new();
    model.phase = match msg {
        HostMsg::Start => {
            model.composite.active_mut().on_start();
            HostPhase::Started
        }
        HostMsg::Resume => HostPhase::Resumed,
        HostMsg::Pause => HostPhase::Paused,
        HostMsg::Stop => {
            // A drag cannot survive the host going to the background
            if model.gestures.is_dragging() {
                model
                    .composite
                    .active_mut()
                    .sheet_mut()
                    .drag_end(0.0, &mut out);
            }
            model.gestures.reset();
            model.composite.active_mut().on_stop();
            HostPhase::Stopped
        }
    };
    Cmd::from_vec(out)
}
