//! Layout message handlers (layout tick, resize, docking)

use crate::commands::Cmd;
use crate::messages::LayoutMsg;
use crate::model::PlacePageModel;

pub fn update_layout(model: &mut PlacePageModel, msg: LayoutMsg) -> Option<Cmd> {
    match msg {
        LayoutMsg::Tick => {
            let geometries = model.panel_geometries();
            model
                .viewport
                .on_layout_tick(model.screen, model.docking, geometries)
                .map(Cmd::SetVisibleRect)
        }

        LayoutMsg::Resize(size) => {
            model.screen = size;
            relayout(model)
        }

        LayoutMsg::SetDocking(docking) => {
            model.docking = docking;
            relayout(model)
        }
    }
}

/// Push new parent geometry into every sheet and force a fresh viewport push
fn relayout(model: &mut PlacePageModel) -> Option<Cmd> {
    let mut out = Vec::new();
    model
        .composite
        .set_parent(model.screen, model.docking, &mut out);
    model.viewport.invalidate();
    out.push(Cmd::ScheduleLayout);
    Cmd::from_vec(out)
}
