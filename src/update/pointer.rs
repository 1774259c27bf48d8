//! Pointer message handlers
//!
//! Raw pointer events go through the gesture interpreter; the resulting
//! semantic events drive the active panel's sheet.

use crate::commands::Cmd;
use crate::gesture::GestureEvent;
use crate::messages::PointerMsg;
use crate::model::PlacePageModel;

pub fn update_pointer(model: &mut PlacePageModel, msg: PointerMsg) -> Option<Cmd> {
    let region = if model.is_initialized() {
        model.active_panel_rect()
    } else {
        None
    };
    let interpretation = model.gestures.handle(msg, region);
    model.pointer_consumed = interpretation.consumed;

    let mut out = Vec::new();
    let sheet = model.composite.active_mut().sheet_mut();
    for event in interpretation.events {
        match event {
            GestureEvent::Tap => sheet.tap(&mut out),
            GestureEvent::DragStart => {
                // Rejected while settling; later moves are then ignored by the sheet
                sheet.drag_start(&mut out);
            }
            GestureEvent::DragMove { dy } => sheet.drag_by(dy, &mut out),
            GestureEvent::DragEnd { velocity } => sheet.drag_end(velocity, &mut out),
        }
    }
    Cmd::from_vec(out)
}
