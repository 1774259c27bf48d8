//! Panel variants selected by payload type
//!
//! Each variant owns a `VariantCore`: one `PanelStateMachine` plus the payload
//! it is bound to. The composite talks to variants only through the
//! `PanelController` trait, whose default methods implement the shared
//! open/close/pending logic; variants override the support predicate and the
//! content hooks.
//!
//! ## Available Variants
//!
//! - **PlacePagePanel**: map features, with distance/compass and the button bar
//! - **GuidesGalleryPanel**: horizontally scrolling guide gallery
//! - **ElevationProfilePanel**: elevation chart of a track

pub mod buttons;
mod elevation;
mod gallery;
mod place;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use elevation::ElevationProfilePanel;
pub use gallery::GuidesGalleryPanel;
pub use place::{PlaceDetails, PlacePagePanel};

use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::data::{DataRef, PayloadId, PlacePageData};
use crate::geometry::{DockingMode, Size};
use crate::messages::Location;
use crate::panel::{next_state, PanelState, PanelStateMachine, SheetEvent, StableState};

/// Identity of a panel variant, persisted across restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantId {
    PlacePage,
    GuidesGallery,
    ElevationProfile,
}

impl VariantId {
    pub fn name(self) -> &'static str {
        match self {
            VariantId::PlacePage => "place_page",
            VariantId::GuidesGallery => "guides_gallery",
            VariantId::ElevationProfile => "elevation_profile",
        }
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the host hands the panels on `initialize`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostContext {
    pub screen: Size,
    pub docking: DockingMode,
}

/// Result of a completed close
#[derive(Debug, Clone)]
pub enum Rebind {
    /// A pending payload replaced the one that was closed
    Bound(DataRef),
    /// The panel is hidden with nothing bound
    Released,
}

/// Sheet and payload binding shared by every variant
#[derive(Debug)]
pub struct VariantCore {
    id: VariantId,
    sheet: PanelStateMachine,
    data: Option<DataRef>,
    /// Payload to open once the running close reaches `Hidden`
    pending: Option<DataRef>,
    initialized: bool,
}

impl VariantCore {
    pub fn new(id: VariantId, config: &PanelConfig) -> Self {
        Self {
            id,
            sheet: PanelStateMachine::new(config, true),
            data: None,
            pending: None,
            initialized: false,
        }
    }

    pub fn sheet(&self) -> &PanelStateMachine {
        &self.sheet
    }

    pub fn sheet_mut(&mut self) -> &mut PanelStateMachine {
        &mut self.sheet
    }

    pub fn data(&self) -> Option<&DataRef> {
        self.data.as_ref()
    }

    pub fn pending(&self) -> Option<&DataRef> {
        self.pending.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn initialize(&mut self, ctx: &HostContext, out: &mut Vec<Cmd>) {
        assert!(
            !self.initialized,
            "panel variant {} initialized twice without destroy",
            self.id
        );
        self.initialized = true;
        self.sheet.set_parent(ctx.screen, ctx.docking, out);
        self.sheet.reset();
    }

    pub fn destroy(&mut self) {
        assert!(
            self.initialized,
            "panel variant {} destroyed without initialize",
            self.id
        );
        self.initialized = false;
        self.data = None;
        self.pending = None;
        self.sheet.reset();
    }

    /// Payload the panel will show once in-flight transitions finish
    ///
    /// A panel closing with nothing pending will show nothing, even though it
    /// still holds the payload it is animating out.
    fn expected_id(&self) -> Option<&PayloadId> {
        if let Some(pending) = &self.pending {
            return Some(pending.id());
        }
        if self.sheet.is_closing() {
            return None;
        }
        self.data.as_ref().map(|data| data.id())
    }

    /// Returns the payload when it was bound right away
    fn open_for(&mut self, data: DataRef, out: &mut Vec<Cmd>) -> Option<DataRef> {
        assert!(
            self.initialized,
            "open_for on panel variant {} outside an initialized session",
            self.id
        );
        let same_payload = self.expected_id() == Some(data.id());
        if next_state(self.sheet.state(), SheetEvent::Open { same_payload }).is_none() {
            debug!(target: "panel", variant = %self.id, payload = %data.id(), "already showing payload");
            return None;
        }

        if self.sheet.is_hidden() {
            debug!(target: "panel", variant = %self.id, payload = %data.id(), "binding payload");
            self.data = Some(data.clone());
            self.sheet.open(data.opening_mode(), out);
            Some(data)
        } else {
            debug!(
                target: "panel",
                variant = %self.id,
                payload = %data.id(),
                "closing before showing new payload"
            );
            self.pending = Some(data);
            self.sheet.close(false, out);
            None
        }
    }

    pub fn close(&mut self, deactivate: bool, out: &mut Vec<Cmd>) {
        self.pending = None;
        self.sheet.close(deactivate, out);
    }

    fn tick(&mut self, dt: Duration, out: &mut Vec<Cmd>) -> Option<Rebind> {
        if self.sheet.tick(dt, out)? != PanelState::Hidden {
            return None;
        }
        match self.pending.take() {
            Some(next) => {
                debug!(target: "panel", variant = %self.id, payload = %next.id(), "opening pending payload");
                self.data = Some(next.clone());
                self.sheet.open(next.opening_mode(), out);
                Some(Rebind::Bound(next))
            }
            None => {
                self.data = None;
                Some(Rebind::Released)
            }
        }
    }

    fn restore(&mut self, data: DataRef, state: StableState, out: &mut Vec<Cmd>) {
        assert!(
            self.initialized,
            "restore on panel variant {} outside an initialized session",
            self.id
        );
        self.pending = None;
        self.sheet.restore(data.opening_mode(), state, out);
        self.data = Some(data);
    }

    fn saved(&self) -> Option<(PayloadId, StableState)> {
        if self.pending.is_some() {
            return None;
        }
        let state = self.sheet.saved_state()?;
        let data = self.data.as_ref()?;
        Some((data.id().clone(), state))
    }
}

/// Scoped acquisition and release of a variant's resources
pub trait Initializable {
    fn initialize(&mut self, ctx: &HostContext, out: &mut Vec<Cmd>);
    fn destroy(&mut self);
}

/// A variant that can be dismissed
pub trait Closable {
    fn close(&mut self, deactivate_selection: bool, out: &mut Vec<Cmd>);
    fn is_closed(&self) -> bool;
}

/// Contract every panel variant fulfils towards the composite
pub trait PanelController: Initializable + Closable {
    fn id(&self) -> VariantId;

    /// Whether this variant can render the payload
    fn support(&self, data: &PlacePageData) -> bool;

    fn core(&self) -> &VariantCore;

    fn core_mut(&mut self) -> &mut VariantCore;

    /// A payload was bound and is about to be shown
    fn on_bind(&mut self, _data: &DataRef) {}

    /// The panel reached `Hidden` and dropped its payload
    fn on_unbind(&mut self) {}

    fn sheet(&self) -> &PanelStateMachine {
        self.core().sheet()
    }

    fn sheet_mut(&mut self) -> &mut PanelStateMachine {
        self.core_mut().sheet_mut()
    }

    fn data(&self) -> Option<&DataRef> {
        self.core().data()
    }

    fn open_for(&mut self, data: DataRef, out: &mut Vec<Cmd>) {
        assert!(
            self.support(&data),
            "panel variant {} asked to open unsupported {} payload",
            self.id(),
            data.kind_name()
        );
        if let Some(bound) = self.core_mut().open_for(data, out) {
            self.on_bind(&bound);
        }
    }

    /// Advance animations; handles pending opens once a close completes
    fn on_frame(&mut self, dt: Duration, out: &mut Vec<Cmd>) {
        match self.core_mut().tick(dt, out) {
            Some(Rebind::Bound(data)) => self.on_bind(&data),
            Some(Rebind::Released) => self.on_unbind(),
            None => {}
        }
    }

    /// Payload id and resting state to persist
    fn on_save(&self) -> Option<(PayloadId, StableState)> {
        self.core().saved()
    }

    /// Re-enter a persisted state without animation
    fn on_restore(&mut self, data: DataRef, state: StableState, out: &mut Vec<Cmd>) {
        self.core_mut().restore(data.clone(), state, out);
        self.on_bind(&data);
    }

    fn on_location(&mut self, _location: Location) {}

    fn on_compass(&mut self, _magnetic_north: f64, _true_north: f64) {}

    fn on_bookmark_changed(&mut self, _is_bookmark: bool, _out: &mut Vec<Cmd>) {}

    fn on_start(&mut self) {}

    fn on_stop(&mut self) {}
}

/// The default variant set in registration order
pub fn default_variants(config: &PanelConfig) -> Vec<Box<dyn PanelController>> {
    vec![
        Box::new(PlacePagePanel::new(config)),
        Box::new(GuidesGalleryPanel::new(config)),
        Box::new(ElevationProfilePanel::new(config)),
    ]
}
