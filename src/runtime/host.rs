//! The place-page host: lifecycle, UI queue and command execution
//!
//! Everything runs on one thread. Messages posted with `post` are queued and
//! processed in order by `run_pending`; commands returned by `update` are
//! executed right away against the ports, except `ScheduleLayout`, which
//! posts a layout tick to the back of the queue.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::data::{DataRef, PlacePageData};
use crate::messages::{HostMsg, LayoutMsg, Msg, PanelMsg, PointerMsg};
use crate::model::{HostPhase, PlacePageModel};
use crate::panels::{HostContext, PanelController};
use crate::persistence::{PersistedState, PersistenceAdapter, RestoreOutcome};
use crate::ports::{FeatureDataSource, MapViewportPort, PositionSource, SlideListener};
use crate::update::update;
use crate::viewport::ViewportCoordinator;

/// Upper bound on frames driven by `run_animations`
const MAX_ANIMATION_FRAMES: usize = 10_000;

pub struct PlacePageHost {
    model: PlacePageModel,
    data_source: Box<dyn FeatureDataSource>,
    map: Box<dyn MapViewportPort>,
    positions: Box<dyn PositionSource>,
    slide_listener: Option<SlideListener>,
    queue: VecDeque<Msg>,
    frame_requested: bool,
}

impl PlacePageHost {
    pub fn new(
        config: PanelConfig,
        data_source: Box<dyn FeatureDataSource>,
        map: Box<dyn MapViewportPort>,
        positions: Box<dyn PositionSource>,
    ) -> Self {
        Self::with_model(PlacePageModel::new(config), data_source, map, positions)
    }

    /// Host around a prebuilt model, e.g. one with a custom variant set
    pub fn with_model(
        model: PlacePageModel,
        data_source: Box<dyn FeatureDataSource>,
        map: Box<dyn MapViewportPort>,
        positions: Box<dyn PositionSource>,
    ) -> Self {
        Self {
            model,
            data_source,
            map,
            positions,
            slide_listener: None,
            queue: VecDeque::new(),
            frame_requested: false,
        }
    }

    pub fn model(&self) -> &PlacePageModel {
        &self.model
    }

    pub fn active(&self) -> &dyn PanelController {
        self.model.active()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Acquire panel resources for one host session
    ///
    /// # Panics
    ///
    /// When called twice without `destroy` in between.
    pub fn initialize(&mut self, ctx: HostContext) {
        assert!(
            !self.model.is_initialized(),
            "place page host initialized twice without destroy"
        );
        info!("Initializing place page host");
        self.model.screen = ctx.screen;
        self.model.docking = ctx.docking;
        self.model.phase = HostPhase::Created;
        self.positions.subscribe();

        let mut out = Vec::new();
        self.model.composite.initialize(&ctx, &mut out);
        // First tick pushes the full-screen rectangle
        self.model.viewport.invalidate();
        self.process_direct(out);
    }

    /// Release everything acquired by `initialize`
    ///
    /// # Panics
    ///
    /// When the host is not initialized.
    pub fn destroy(&mut self) {
        assert!(
            self.model.is_initialized(),
            "place page host destroyed without initialize"
        );
        info!("Destroying place page host");
        self.positions.unsubscribe();
        self.model.composite.destroy();
        self.model.gestures.reset();
        self.model.viewport = ViewportCoordinator::new(&self.model.config);
        self.model.phase = HostPhase::Detached;
        self.slide_listener = None;
        self.queue.clear();
        self.frame_requested = false;
    }

    pub fn is_initialized(&self) -> bool {
        self.model.is_initialized()
    }

    // =========================================================================
    // Host-shell API
    // =========================================================================

    /// Show a payload
    ///
    /// # Panics
    ///
    /// Outside an initialized session, or when no variant supports the payload.
    pub fn open_for(&mut self, data: DataRef) {
        self.dispatch(Msg::Panel(PanelMsg::Open(data)));
    }

    pub fn close(&mut self, deactivate_selection: bool) {
        self.dispatch(Msg::Panel(PanelMsg::Close {
            deactivate_selection,
        }));
    }

    pub fn is_closed(&self) -> bool {
        self.model.composite.is_closed()
    }

    pub fn support(&self, data: &PlacePageData) -> bool {
        self.model.composite.find_supporting(data).is_some()
    }

    pub fn on_save(&self) -> Option<PersistedState> {
        PersistenceAdapter::save(&self.model.composite)
    }

    /// Re-enter a saved state; anything unresolvable leaves the panel hidden
    pub fn on_restore(&mut self, saved: Option<&PersistedState>) -> RestoreOutcome {
        assert!(
            self.model.is_initialized(),
            "restore called outside an initialized session"
        );
        let mut out = Vec::new();
        let outcome = PersistenceAdapter::restore(
            &mut self.model.composite,
            saved,
            self.data_source.as_ref(),
            &mut out,
        );
        self.process_direct(out);
        outcome
    }

    pub fn set_slide_listener(&mut self, listener: SlideListener) {
        self.slide_listener = Some(listener);
    }

    /// Feed one pointer event; returns whether the panel consumed it
    pub fn pointer(&mut self, msg: PointerMsg) -> bool {
        self.dispatch(Msg::Pointer(msg));
        self.model.pointer_consumed
    }

    // =========================================================================
    // Message loop
    // =========================================================================

    /// Queue a message for the next `run_pending`
    pub fn post(&mut self, msg: Msg) {
        self.queue.push_back(msg);
    }

    /// Process queued messages until the queue is empty
    pub fn run_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Some(msg) = self.queue.pop_front() {
            self.dispatch(msg);
            processed += 1;
        }
        processed
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run one message through update and execute the resulting commands
    pub fn dispatch(&mut self, msg: Msg) {
        if let Msg::Host(HostMsg::Resume) = msg {
            self.check_payload_on_resume();
        }
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Deliver one animation frame and the layout work it caused
    pub fn advance_frame(&mut self, dt: Duration) {
        self.frame_requested = false;
        self.dispatch(Msg::Frame(dt));
        self.run_pending();
    }

    /// Whether an animation asked for another frame
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Drive frames of `frame` length until every animation has finished
    ///
    /// Returns the number of frames delivered.
    pub fn run_animations(&mut self, frame: Duration) -> usize {
        self.run_pending();
        let mut frames = 0;
        while self.model.composite.is_animating() && frames < MAX_ANIMATION_FRAMES {
            self.advance_frame(frame);
            frames += 1;
        }
        frames
    }

    /// Close a panel whose payload disappeared while the host was paused
    fn check_payload_on_resume(&mut self) {
        let Some(id) = self.model.active().data().map(|data| data.id().clone()) else {
            return;
        };
        if self.data_source.resolve(&id).is_some() {
            return;
        }
        debug!(target: "panel", payload = %id, "payload gone on resume, closing");
        self.close(false);
    }

    /// Run commands produced outside `update`, always followed by a layout tick
    fn process_direct(&mut self, cmds: Vec<Cmd>) {
        let mut cmds: Vec<Cmd> = Cmd::from_vec(cmds)
            .map(Cmd::flatten)
            .unwrap_or_default()
            .into_iter()
            .filter(|cmd| *cmd != Cmd::ScheduleLayout)
            .collect();
        if self.model.viewport.request_layout() {
            cmds.push(Cmd::ScheduleLayout);
        }
        for cmd in cmds {
            self.process_cmd(cmd);
        }
    }

    /// Execute one command against the ports
    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::ScheduleLayout => self.post(Msg::Layout(LayoutMsg::Tick)),
            Cmd::SetVisibleRect(rect) => self.map.set_visible_rect(rect),
            Cmd::ClearMapSelection => self.map.clear_map_selection(),
            Cmd::NotifySlide { top } => {
                if let Some(listener) = self.slide_listener.as_mut() {
                    listener(top);
                }
            }
            Cmd::RequestFrame => self.frame_requested = true,
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }
}
