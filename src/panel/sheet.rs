//! The draggable sheet shared by every panel variant
//!
//! `PanelStateMachine` owns the top edge of one panel, the animator that moves
//! it, and the current presentation state. It knows nothing about payloads;
//! variants decide *when* to open or close and the sheet decides *how*.
//!
//! Every method appends the side effects it produces to `out`. Motion always
//! ends through `tick`, which reports the state the sheet landed in.

use std::time::Duration;

use tracing::debug;

use super::animator::Animator;
use super::peek::peek_height;
use super::snap::{resolve_settle, SettlePolicy, SnapOffsets};
use super::state::{next_state, Edge, PanelState, SheetEvent, StableState};
use crate::commands::Cmd;
use crate::config::PanelConfig;
use crate::data::OpeningMode;
use crate::geometry::{ContentMetrics, DockingMode, GeometrySnapshot, Rect, Size};

/// Offsets closer than this are considered equal
const GEOMETRY_EPSILON: f32 = 0.01;

#[derive(Debug, Clone)]
pub struct PanelStateMachine {
    config: PanelConfig,
    hideable: bool,
    parent: Size,
    docking: DockingMode,
    metrics: ContentMetrics,
    /// Measurements that arrived while the sheet was in motion
    pending_metrics: Option<ContentMetrics>,
    opening_mode: OpeningMode,
    peek: f32,
    state: PanelState,
    top: f32,
    /// Where the running settle lands; meaningful only while `Settling`
    settle_target: PanelState,
    /// Moves `top` while settling, or while the collapsed peek changes
    animator: Option<Animator>,
    /// Clear the map selection when `Hidden` is reached
    deactivate_on_hide: bool,
}

impl PanelStateMachine {
    pub fn new(config: &PanelConfig, hideable: bool) -> Self {
        Self {
            config: config.clone(),
            hideable,
            parent: Size::new(0.0, 0.0),
            docking: DockingMode::Bottom,
            metrics: ContentMetrics::default(),
            pending_metrics: None,
            opening_mode: OpeningMode::Preview,
            peek: 0.0,
            state: PanelState::Hidden,
            top: 0.0,
            settle_target: PanelState::Hidden,
            animator: None,
            deactivate_on_hide: true,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn peek(&self) -> f32 {
        self.peek
    }

    pub fn metrics(&self) -> ContentMetrics {
        self.metrics
    }

    pub fn parent(&self) -> Size {
        self.parent
    }

    pub fn docking(&self) -> DockingMode {
        self.docking
    }

    pub fn opening_mode(&self) -> OpeningMode {
        self.opening_mode
    }

    pub fn is_hidden(&self) -> bool {
        self.state == PanelState::Hidden
    }

    /// True while the sheet is on its way to `Hidden`
    pub fn is_closing(&self) -> bool {
        self.state == PanelState::Settling && self.settle_target == PanelState::Hidden
    }

    /// Target of the running settle
    pub fn settle_target(&self) -> Option<PanelState> {
        (self.state == PanelState::Settling).then_some(self.settle_target)
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_some()
    }

    pub fn offsets(&self) -> SnapOffsets {
        SnapOffsets::compute(
            self.parent.height,
            self.metrics.content_height,
            self.peek,
            self.config.anchor_ratio,
        )
    }

    pub fn geometry(&self) -> GeometrySnapshot {
        GeometrySnapshot {
            top_edge_y: self.top,
            measured_height: self.metrics.content_height,
            peek_height: self.peek,
            parent_height: self.parent.height,
        }
    }

    /// Screen rectangle currently covered by the panel
    pub fn screen_rect(&self) -> Rect {
        let (x0, x1) = self.docking.panel_span(self.parent.width);
        Rect::new(x0, self.top.min(self.parent.height), x1, self.parent.height)
    }

    /// Resting state to persist, if any
    ///
    /// A settle reports where it is heading; a drag reports the nearest
    /// on-screen state. Nothing is saved for a sheet that is, or is about to
    /// be, hidden.
    pub fn saved_state(&self) -> Option<StableState> {
        match self.state {
            PanelState::Settling => self.settle_target.as_stable(),
            PanelState::Dragging => self.offsets().nearest_shown(self.top).as_stable(),
            state => state.as_stable(),
        }
    }

    // =========================================================================
    // Geometry inputs
    // =========================================================================

    /// Parent surface or docking mode changed
    ///
    /// Resting sheets snap to the offset of the same state, a running settle is
    /// retargeted from where it currently is.
    pub fn set_parent(&mut self, parent: Size, docking: DockingMode, out: &mut Vec<Cmd>) {
        if parent == self.parent && docking == self.docking {
            return;
        }
        self.parent = parent;
        self.docking = docking;
        self.peek = self.compute_peek();

        let offsets = self.offsets();
        match self.state {
            PanelState::Settling => {
                // Restart from inside the new travel range
                let top = self.top.clamp(offsets.expanded, offsets.hidden);
                self.set_top(top, out);
                self.animator = None;
                let to = offsets.top_for(self.settle_target).unwrap_or(offsets.hidden);
                self.animate_to(to, self.config.settle_duration(), out);
            }
            PanelState::Dragging => {
                let top = self.top.clamp(offsets.expanded, offsets.hidden);
                self.set_top(top, out);
            }
            state => {
                self.animator = None;
                if let Some(top) = offsets.top_for(state) {
                    self.set_top(top, out);
                }
            }
        }
        out.push(Cmd::ScheduleLayout);
    }

    /// The host measured the panel content
    pub fn set_metrics(&mut self, metrics: ContentMetrics, out: &mut Vec<Cmd>) {
        if metrics == self.pending_metrics.unwrap_or(self.metrics) {
            return;
        }
        if self.state.is_in_motion() {
            debug!(
                target: "panel",
                state = %self.state,
                "content changed while in motion, update deferred"
            );
            self.pending_metrics = Some(metrics);
            return;
        }
        self.metrics = metrics;
        self.pending_metrics = None;
        self.refresh_geometry(out);
    }

    /// Recompute the peek and move a resting sheet to its updated offset
    fn refresh_geometry(&mut self, out: &mut Vec<Cmd>) {
        let new_peek = self.compute_peek();
        let peek_changed = (new_peek - self.peek).abs() > GEOMETRY_EPSILON;
        self.peek = new_peek;

        let offsets = self.offsets();
        match self.state {
            PanelState::Collapsed if peek_changed => {
                debug!(target: "panel", peek = new_peek, "animating collapsed peek change");
                self.animate_to(offsets.collapsed, self.config.peek_change_duration(), out);
            }
            PanelState::Anchored | PanelState::Expanded => {
                if let Some(top) = offsets.top_for(self.state) {
                    self.set_top(top, out);
                }
            }
            _ => {}
        }
        out.push(Cmd::ScheduleLayout);
    }

    fn compute_peek(&self) -> f32 {
        peek_height(
            &self.metrics,
            self.opening_mode,
            self.parent.height,
            self.config.preview_plus_ratio,
        )
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Reveal a hidden sheet for a freshly bound payload
    pub fn open(&mut self, mode: OpeningMode, out: &mut Vec<Cmd>) {
        // Visible sheets are re-pointed by their variant through close
        if self.state != PanelState::Hidden {
            return;
        }
        self.opening_mode = mode;
        self.peek = self.compute_peek();
        self.deactivate_on_hide = true;
        self.top = self.parent.height;

        let target = match mode {
            OpeningMode::Details => PanelState::Expanded,
            OpeningMode::Preview | OpeningMode::PreviewPlus => PanelState::Collapsed,
        };
        debug!(target: "panel", ?mode, %target, peek = self.peek, "opening");
        self.settle_to(target, out);
    }

    /// Toggle between collapsed and the anchor
    pub fn tap(&mut self, out: &mut Vec<Cmd>) {
        if next_state(self.state, SheetEvent::Tap) != Some(Edge::Settle) {
            return;
        }
        let target = match self.state {
            PanelState::Collapsed => PanelState::Anchored,
            _ => PanelState::Collapsed,
        };
        self.settle_to(target, out);
    }

    /// Promote a collapsed sheet to the anchor
    pub fn promote(&mut self, out: &mut Vec<Cmd>) {
        if self.state == PanelState::Collapsed {
            self.settle_to(PanelState::Anchored, out);
        }
    }

    /// Start tracking the pointer; returns whether the drag was accepted
    pub fn drag_start(&mut self, out: &mut Vec<Cmd>) -> bool {
        if next_state(self.state, SheetEvent::DragStart) != Some(Edge::Drag) {
            return false;
        }
        // Take over from a running peek animation where it currently is
        self.animator = None;
        self.set_state(PanelState::Dragging);
        out.push(Cmd::ScheduleLayout);
        true
    }

    /// Move the top edge by `dy`, clamped to the sheet's travel
    pub fn drag_by(&mut self, dy: f32, out: &mut Vec<Cmd>) {
        if next_state(self.state, SheetEvent::DragMove) != Some(Edge::Drag) {
            return;
        }
        let offsets = self.offsets();
        let top = (self.top + dy).clamp(offsets.expanded, offsets.hidden);
        self.set_top(top, out);
    }

    /// Release the drag with a velocity in px/s, positive downward
    pub fn drag_end(&mut self, velocity: f32, out: &mut Vec<Cmd>) {
        if next_state(self.state, SheetEvent::DragEnd) != Some(Edge::Settle) {
            return;
        }
        let policy = SettlePolicy {
            min_fling_velocity: self.config.min_fling_velocity,
            hide_friction: self.config.hide_friction,
            hide_threshold: self.config.hide_threshold,
            peek: self.peek,
            hideable: self.hideable,
        };
        let target = resolve_settle(&self.offsets(), self.top, velocity, &policy);
        debug!(target: "panel", top = self.top, velocity, %target, "drag released");
        self.settle_to(target, out);
    }

    /// Animate to `Hidden`
    ///
    /// While already closing only the deactivate flag is widened, so the map
    /// selection is cleared at most once per close.
    pub fn close(&mut self, deactivate: bool, out: &mut Vec<Cmd>) {
        if next_state(self.state, SheetEvent::Close).is_none() {
            return;
        }
        if self.is_closing() {
            self.deactivate_on_hide |= deactivate;
            return;
        }
        self.deactivate_on_hide = deactivate;
        self.settle_to(PanelState::Hidden, out);
    }

    /// Enter a resting state directly, without animation
    pub fn restore(&mut self, mode: OpeningMode, state: StableState, out: &mut Vec<Cmd>) {
        if let Some(metrics) = self.pending_metrics.take() {
            self.metrics = metrics;
        }
        self.opening_mode = mode;
        self.peek = self.compute_peek();
        self.animator = None;
        self.deactivate_on_hide = true;
        let state = PanelState::from(state);
        if let Some(top) = self.offsets().top_for(state) {
            self.top = top;
        }
        self.set_state(state);
        out.push(Cmd::ScheduleLayout);
    }

    /// Drop straight to `Hidden` without animation or callbacks
    pub fn reset(&mut self) {
        if let Some(metrics) = self.pending_metrics.take() {
            self.metrics = metrics;
        }
        self.animator = None;
        self.deactivate_on_hide = true;
        self.top = self.parent.height;
        self.set_state(PanelState::Hidden);
    }

    /// Advance the running animation by one frame
    ///
    /// Returns the state the sheet landed in when a settle completed.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<Cmd>) -> Option<PanelState> {
        let animator = self.animator.as_mut()?;
        let top = animator.advance(dt);
        let finished = animator.is_finished();
        self.set_top(top, out);

        if !finished {
            out.push(Cmd::RequestFrame);
            return None;
        }
        self.animator = None;

        if next_state(self.state, SheetEvent::SettleComplete) != Some(Edge::Land) {
            // Peek change animation finished without a state change
            return None;
        }
        let landed = self.settle_target;
        self.land(landed, out);
        Some(landed)
    }

    fn land(&mut self, target: PanelState, out: &mut Vec<Cmd>) {
        if let Some(metrics) = self.pending_metrics.take() {
            self.metrics = metrics;
        }
        let offsets = self.offsets();
        if let Some(top) = offsets.top_for(target) {
            self.set_top(top, out);
        }
        self.set_state(target);
        out.push(Cmd::ScheduleLayout);

        if target == PanelState::Hidden {
            if self.deactivate_on_hide {
                out.push(Cmd::ClearMapSelection);
            }
            self.deactivate_on_hide = true;
        } else {
            // Content may have changed while the sheet was moving
            self.refresh_geometry(out);
        }
    }

    fn settle_to(&mut self, target: PanelState, out: &mut Vec<Cmd>) {
        let offsets = self.offsets();
        let Some(to) = offsets.top_for(target) else {
            return;
        };
        self.settle_target = target;
        self.set_state(PanelState::Settling);
        self.animate_to(to, self.config.settle_duration(), out);
    }

    /// Start or retarget the animator from the current top
    fn animate_to(&mut self, to: f32, duration: Duration, out: &mut Vec<Cmd>) {
        match self.animator.as_mut() {
            Some(animator) => animator.retarget(to, duration),
            None => {
                self.animator = Some(Animator::new(self.top, to, duration, self.config.easing));
            }
        }
        out.push(Cmd::RequestFrame);
    }

    fn set_top(&mut self, top: f32, out: &mut Vec<Cmd>) {
        if (top - self.top).abs() <= f32::EPSILON {
            return;
        }
        self.top = top;
        out.push(Cmd::NotifySlide { top });
        out.push(Cmd::ScheduleLayout);
    }

    fn set_state(&mut self, state: PanelState) {
        if state != self.state {
            debug!(target: "panel", from = %self.state, to = %state, top = self.top, "state changed");
            self.state = state;
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Panic if the sheet geometry is inconsistent with its state
    pub fn assert_invariants(&self) {
        let offsets = self.offsets();
        // A running animator may briefly trail a geometry change
        if self.animator.is_some() {
            return;
        }
        assert!(
            self.top >= offsets.expanded - GEOMETRY_EPSILON
                && self.top <= offsets.hidden + GEOMETRY_EPSILON,
            "panel top {} outside [{}, {}] in {}",
            self.top,
            offsets.expanded,
            offsets.hidden,
            self.state
        );
        if let Some(expected) = offsets.top_for(self.state) {
            assert!(
                (self.top - expected).abs() <= GEOMETRY_EPSILON,
                "idle panel in {} with top {} (expected {})",
                self.state,
                self.top,
                expected
            );
        }
    }
}
