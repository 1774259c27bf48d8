//! Elevation profile variant

use super::{Closable, HostContext, Initializable, PanelController, VariantCore, VariantId};
use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::data::{DataRef, ElevationSummary, PlacePageData};

pub struct ElevationProfilePanel {
    core: VariantCore,
    summary: Option<ElevationSummary>,
}

impl ElevationProfilePanel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            core: VariantCore::new(VariantId::ElevationProfile, config),
            summary: None,
        }
    }

    /// Header numbers of the bound track
    pub fn summary(&self) -> Option<ElevationSummary> {
        self.summary
    }
}

impl Initializable for ElevationProfilePanel {
    fn initialize(&mut self, ctx: &HostContext, out: &mut Vec<Cmd>) {
        self.core.initialize(ctx, out);
    }

    fn destroy(&mut self) {
        self.core.destroy();
        self.summary = None;
    }
}

impl Closable for ElevationProfilePanel {
    fn close(&mut self, deactivate_selection: bool, out: &mut Vec<Cmd>) {
        self.core.close(deactivate_selection, out);
    }

    fn is_closed(&self) -> bool {
        self.core.sheet().is_hidden()
    }
}

impl PanelController for ElevationProfilePanel {
    fn id(&self) -> VariantId {
        VariantId::ElevationProfile
    }

    fn support(&self, data: &PlacePageData) -> bool {
        matches!(data, PlacePageData::ElevationProfile(_))
    }

    fn core(&self) -> &VariantCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VariantCore {
        &mut self.core
    }

    fn on_bind(&mut self, data: &DataRef) {
        self.summary = match data.as_ref() {
            PlacePageData::ElevationProfile(profile) => Some(profile.summary()),
            _ => None,
        };
    }

    fn on_unbind(&mut self) {
        self.summary = None;
    }
}
