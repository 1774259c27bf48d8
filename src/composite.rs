//! Registry of panel variants with exactly one active at a time
//!
//! `open_for` keeps the active variant when it supports the payload. Otherwise
//! the active variant is closed without touching the map selection, and the
//! first variant in registration order that supports the payload takes over.
//! The closed variant keeps animating out; only the active reference moves.

use std::time::Duration;

use tracing::debug;

use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::data::{DataRef, PlacePageData};
use crate::geometry::{ContentMetrics, DockingMode, Size};
use crate::panel::{PanelState, StableState};
use crate::panels::{default_variants, HostContext, PanelController, VariantId};

pub struct PanelComposite {
    variants: Vec<Box<dyn PanelController>>,
    active: usize,
}

impl PanelComposite {
    /// Registry over the given variants; the first one starts out active
    pub fn new(variants: Vec<Box<dyn PanelController>>) -> Self {
        assert!(
            !variants.is_empty(),
            "panel composite needs at least one variant"
        );
        Self {
            variants,
            active: 0,
        }
    }

    pub fn with_default_variants(config: &PanelConfig) -> Self {
        Self::new(default_variants(config))
    }

    pub fn active(&self) -> &dyn PanelController {
        self.variants[self.active].as_ref()
    }

    pub fn active_mut(&mut self) -> &mut dyn PanelController {
        self.variants[self.active].as_mut()
    }

    pub fn active_id(&self) -> VariantId {
        self.active().id()
    }

    pub fn active_state(&self) -> PanelState {
        self.active().sheet().state()
    }

    pub fn variants(&self) -> impl Iterator<Item = &dyn PanelController> {
        self.variants.iter().map(|variant| variant.as_ref())
    }

    pub fn variant(&self, id: VariantId) -> Option<&dyn PanelController> {
        self.variants().find(|variant| variant.id() == id)
    }

    /// First registered variant that can render the payload
    pub fn find_supporting(&self, data: &PlacePageData) -> Option<VariantId> {
        self.variants()
            .find(|variant| variant.support(data))
            .map(|variant| variant.id())
    }

    pub fn initialize(&mut self, ctx: &HostContext, out: &mut Vec<Cmd>) {
        for variant in &mut self.variants {
            variant.initialize(ctx, out);
        }
    }

    pub fn destroy(&mut self) {
        for variant in &mut self.variants {
            variant.destroy();
        }
        self.active = 0;
    }

    /// Show a payload in the variant that supports it
    ///
    /// # Panics
    ///
    /// When no registered variant supports the payload.
    pub fn open_for(&mut self, data: DataRef, out: &mut Vec<Cmd>) {
        if self.active().support(&data) {
            self.active_mut().open_for(data, out);
            return;
        }

        let Some(index) = self.variants.iter().position(|v| v.support(&data)) else {
            panic!(
                "no panel variant supports {} payload {}",
                data.kind_name(),
                data.id()
            );
        };

        debug!(
            target: "panel",
            from = %self.active_id(),
            to = %self.variants[index].id(),
            "switching active variant"
        );
        self.active_mut().close(false, out);
        self.active = index;
        self.active_mut().open_for(data, out);
    }

    pub fn close(&mut self, deactivate_selection: bool, out: &mut Vec<Cmd>) {
        self.active_mut().close(deactivate_selection, out);
    }

    pub fn is_closed(&self) -> bool {
        self.active().is_closed()
    }

    /// Make `id` active and re-enter a persisted state
    ///
    /// # Panics
    ///
    /// When `id` is not registered or does not support the payload.
    pub fn restore(
        &mut self,
        id: VariantId,
        data: DataRef,
        state: StableState,
        out: &mut Vec<Cmd>,
    ) {
        let Some(index) = self.variants.iter().position(|v| v.id() == id) else {
            panic!("panel variant {} is not registered", id);
        };
        assert!(
            self.variants[index].support(&data),
            "panel variant {} cannot restore {} payload",
            id,
            data.kind_name()
        );
        if index != self.active {
            debug!(
                target: "panel",
                from = %self.active_id(),
                to = %id,
                "switching active variant for restore"
            );
            self.active_mut().close(false, out);
            self.active = index;
        }
        self.active_mut().on_restore(data, state, out);
    }

    /// Advance every variant, including ones still closing after a switch
    pub fn on_frame(&mut self, dt: Duration, out: &mut Vec<Cmd>) {
        for variant in &mut self.variants {
            variant.on_frame(dt, out);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.variants().any(|variant| variant.sheet().is_animating())
    }

    pub fn set_parent(&mut self, parent: Size, docking: DockingMode, out: &mut Vec<Cmd>) {
        for variant in &mut self.variants {
            variant.sheet_mut().set_parent(parent, docking, out);
        }
    }

    pub fn set_metrics(&mut self, metrics: ContentMetrics, out: &mut Vec<Cmd>) {
        self.active_mut().sheet_mut().set_metrics(metrics, out);
    }

    pub fn assert_invariants(&self) {
        assert!(
            self.active < self.variants.len(),
            "active variant index {} out of range",
            self.active
        );
        for variant in self.variants() {
            variant.sheet().assert_invariants();
        }
    }
}
