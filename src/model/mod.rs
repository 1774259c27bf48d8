//! Place-page model - the complete state of the panel subsystem
//!
//! This module holds all state following the Elm Architecture pattern. Ports
//! and queues live in the runtime; the model never performs side effects.

use crate::composite::PanelComposite;
use crate::config::PanelConfig;
use crate::geometry::{DockingMode, GeometrySnapshot, Rect, Size};
use crate::gesture::GestureInterpreter;
use crate::panel::PanelState;
use crate::panels::{default_variants, PanelController};
use crate::viewport::ViewportCoordinator;

/// Host lifecycle phase between `initialize` and `destroy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostPhase {
    /// Not initialized, or destroyed
    #[default]
    Detached,
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
}

/// The complete panel model
pub struct PlacePageModel {
    /// Tuning loaded from config.yaml
    pub config: PanelConfig,
    /// Registered variants and the active one
    pub composite: PanelComposite,
    pub gestures: GestureInterpreter,
    pub viewport: ViewportCoordinator,
    /// Size of the map surface
    pub screen: Size,
    pub docking: DockingMode,
    pub phase: HostPhase,
    /// Whether the last pointer event was consumed by the panel
    pub pointer_consumed: bool,
}

impl PlacePageModel {
    /// Model with the default variant set
    pub fn new(config: PanelConfig) -> Self {
        let variants = default_variants(&config);
        Self::with_variants(config, variants)
    }

    pub fn with_variants(config: PanelConfig, variants: Vec<Box<dyn PanelController>>) -> Self {
        Self {
            composite: PanelComposite::new(variants),
            gestures: GestureInterpreter::new(&config),
            viewport: ViewportCoordinator::new(&config),
            screen: Size::new(0.0, 0.0),
            docking: DockingMode::Bottom,
            phase: HostPhase::Detached,
            pointer_consumed: false,
            config,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.phase != HostPhase::Detached
    }

    pub fn active(&self) -> &dyn PanelController {
        self.composite.active()
    }

    pub fn active_state(&self) -> PanelState {
        self.composite.active_state()
    }

    /// Screen rectangle of the active panel, `None` while it is hidden
    pub fn active_panel_rect(&self) -> Option<Rect> {
        let sheet = self.active().sheet();
        if sheet.is_hidden() {
            None
        } else {
            Some(sheet.screen_rect())
        }
    }

    /// Geometry of every variant, including ones still closing
    pub fn panel_geometries(&self) -> Vec<GeometrySnapshot> {
        self.composite
            .variants()
            .map(|variant| variant.sheet().geometry())
            .collect()
    }

    /// Unobscured rectangle for the current geometry
    pub fn visible_rect(&self) -> Rect {
        crate::viewport::visible_rect(
            self.screen,
            self.docking,
            self.config.viewport_min_height,
            self.panel_geometries(),
        )
    }
}
