//! Panel message handlers (open, close, content changes)

use tracing::debug;

use crate::commands::Cmd;
use crate::messages::PanelMsg;
use crate::model::PlacePageModel;

/// Handle requests addressed to the panel composite
pub fn update_panel(model: &mut PlacePageModel, msg: PanelMsg) -> Option<Cmd> {
    let mut out = Vec::new();
    match msg {
        PanelMsg::Open(data) => {
            assert!(
                model.is_initialized(),
                "open_for called outside an initialized session"
            );
            debug!(target: "panel", payload = %data.id(), kind = data.kind_name(), "open requested");
            model.composite.open_for(data, &mut out);
        }

        PanelMsg::Close {
            deactivate_selection,
        } => {
            model.composite.close(deactivate_selection, &mut out);
        }

        PanelMsg::ContentMeasured(metrics) => {
            model.composite.set_metrics(metrics, &mut out);
        }

        PanelMsg::BookmarkChanged { is_bookmark } => {
            model
                .composite
                .active_mut()
                .on_bookmark_changed(is_bookmark, &mut out);
        }

        PanelMsg::SetScrollRegions(regions) => {
            model.gestures.set_scroll_regions(regions);
        }
    }
    Cmd::from_vec(out)
}
