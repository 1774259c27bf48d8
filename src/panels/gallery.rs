//! Guides gallery variant

use super::{Closable, HostContext, Initializable, PanelController, VariantCore, VariantId};
use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::data::{DataRef, PlacePageData};

pub struct GuidesGalleryPanel {
    core: VariantCore,
    item_count: usize,
}

impl GuidesGalleryPanel {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            core: VariantCore::new(VariantId::GuidesGallery, config),
            item_count: 0,
        }
    }

    /// Number of cards in the bound gallery
    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

impl Initializable for GuidesGalleryPanel {
    fn initialize(&mut self, ctx: &HostContext, out: &mut Vec<Cmd>) {
        self.core.initialize(ctx, out);
    }

    fn destroy(&mut self) {
        self.core.destroy();
        self.item_count = 0;
    }
}

impl Closable for GuidesGalleryPanel {
    fn close(&mut self, deactivate_selection: bool, out: &mut Vec<Cmd>) {
        self.core.close(deactivate_selection, out);
    }

    fn is_closed(&self) -> bool {
        self.core.sheet().is_hidden()
    }
}

impl PanelController for GuidesGalleryPanel {
    fn id(&self) -> VariantId {
        VariantId::GuidesGallery
    }

    fn support(&self, data: &PlacePageData) -> bool {
        matches!(data, PlacePageData::GuidesGallery(_))
    }

    fn core(&self) -> &VariantCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut VariantCore {
        &mut self.core
    }

    fn on_bind(&mut self, data: &DataRef) {
        self.item_count = match data.as_ref() {
            PlacePageData::GuidesGallery(gallery) => gallery.items.len(),
            _ => 0,
        };
    }

    fn on_unbind(&mut self) {
        self.item_count = 0;
    }
}
