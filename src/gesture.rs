//! Classifies raw pointer input over the panel
//!
//! A press becomes a vertical drag once it travels past the touch slop
//! vertically, a tap when released in place within the long-press timeout,
//! or is handed back to nested horizontally scrolling content. A drag never
//! turns back into a tap.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace};

use crate::config::PanelConfig;
use crate::geometry::Rect;
use crate::messages::PointerMsg;

/// Samples older than this do not contribute to the release velocity
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

/// Semantic events produced for the panel state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Tap,
    DragStart,
    /// Top edge displacement since the previous event, positive downward
    DragMove { dy: f32 },
    /// Release velocity in px/s, positive downward
    DragEnd { velocity: f32 },
}

/// Outcome of one pointer event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interpretation {
    /// False when the event should fall through to whatever is below the panel
    pub consumed: bool,
    pub events: Vec<GestureEvent>,
}

impl Interpretation {
    fn consumed(events: Vec<GestureEvent>) -> Self {
        Self {
            consumed: true,
            events,
        }
    }

    fn passed_through() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    /// Down landed outside the panel; wait for the pointer to lift
    Ignored,
    Pressed {
        down_x: f32,
        down_y: f32,
        down_time: Duration,
        in_scroll_region: bool,
        tap_possible: bool,
    },
    Dragging {
        last_y: f32,
        samples: VecDeque<(Duration, f32)>,
    },
    /// Locked to nested horizontal scrolling until the pointer lifts
    Horizontal,
}

#[derive(Debug, Clone)]
pub struct GestureInterpreter {
    touch_slop: f32,
    long_press_timeout: Duration,
    /// Panel-local rectangles whose content scrolls horizontally
    scroll_regions: Vec<Rect>,
    phase: Phase,
}

impl GestureInterpreter {
    pub fn new(config: &PanelConfig) -> Self {
        Self {
            touch_slop: config.touch_slop,
            long_press_timeout: config.long_press_timeout(),
            scroll_regions: Vec::new(),
            phase: Phase::Idle,
        }
    }

    pub fn set_scroll_regions(&mut self, regions: Vec<Rect>) {
        self.scroll_regions = regions;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Drop any gesture in progress without producing events
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    /// Interpret one pointer event
    ///
    /// `panel` is the panel's screen rectangle, `None` while it is hidden.
    pub fn handle(&mut self, msg: PointerMsg, panel: Option<Rect>) -> Interpretation {
        match msg {
            PointerMsg::Down { x, y, time } => self.on_down(x, y, time, panel),
            PointerMsg::Move { x, y, time } => self.on_move(x, y, time),
            PointerMsg::Up { x, y, time } => self.on_up(x, y, time),
            PointerMsg::Cancel { .. } => self.on_cancel(),
        }
    }

    fn on_down(&mut self, x: f32, y: f32, time: Duration, panel: Option<Rect>) -> Interpretation {
        // A second down without an up ends whatever was in progress
        let mut events = Vec::new();
        if self.is_dragging() {
            events.push(GestureEvent::DragEnd { velocity: 0.0 });
        }

        let Some(panel) = panel.filter(|rect| rect.contains(x, y)) else {
            self.phase = Phase::Ignored;
            return Interpretation {
                consumed: false,
                events,
            };
        };

        let (local_x, local_y) = (x - panel.x0, y - panel.y0);
        let in_scroll_region = self
            .scroll_regions
            .iter()
            .any(|region| region.contains(local_x, local_y));

        trace!(target: "gesture", x, y, in_scroll_region, "down");
        self.phase = Phase::Pressed {
            down_x: x,
            down_y: y,
            down_time: time,
            in_scroll_region,
            tap_possible: true,
        };
        Interpretation::consumed(events)
    }

    fn on_move(&mut self, x: f32, y: f32, time: Duration) -> Interpretation {
        match &mut self.phase {
            Phase::Idle | Phase::Ignored | Phase::Horizontal => Interpretation::passed_through(),
            Phase::Dragging { last_y, samples } => {
                let dy = y - *last_y;
                *last_y = y;
                push_sample(samples, time, y);
                Interpretation::consumed(vec![GestureEvent::DragMove { dy }])
            }
            Phase::Pressed {
                down_x,
                down_y,
                down_time,
                in_scroll_region,
                tap_possible,
            } => {
                let dx = x - *down_x;
                let dy = y - *down_y;
                let slop = self.touch_slop;

                if dy.abs() > slop && dy.abs() >= dx.abs() {
                    debug!(target: "gesture", dy, "drag started");
                    let mut samples = VecDeque::new();
                    push_sample(&mut samples, *down_time, *down_y);
                    push_sample(&mut samples, time, y);
                    self.phase = Phase::Dragging { last_y: y, samples };
                    return Interpretation::consumed(vec![
                        GestureEvent::DragStart,
                        GestureEvent::DragMove { dy },
                    ]);
                }

                if dx.abs() > slop && dx.abs() > dy.abs() {
                    if *in_scroll_region {
                        debug!(target: "gesture", dx, "locked to horizontal scroll");
                        self.phase = Phase::Horizontal;
                        return Interpretation::passed_through();
                    }
                    if *tap_possible {
                        trace!(target: "gesture", dx, "horizontal movement, tap cancelled");
                        *tap_possible = false;
                    }
                }
                Interpretation::consumed(Vec::new())
            }
        }
    }

    fn on_up(&mut self, x: f32, y: f32, time: Duration) -> Interpretation {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        match phase {
            Phase::Idle | Phase::Ignored | Phase::Horizontal => Interpretation::passed_through(),
            Phase::Dragging {
                last_y,
                mut samples,
            } => {
                let mut events = Vec::new();
                if y != last_y {
                    events.push(GestureEvent::DragMove { dy: y - last_y });
                }
                push_sample(&mut samples, time, y);
                let velocity = release_velocity(&samples, time);
                debug!(target: "gesture", velocity, "drag released");
                events.push(GestureEvent::DragEnd { velocity });
                Interpretation::consumed(events)
            }
            Phase::Pressed {
                down_x,
                down_y,
                down_time,
                tap_possible,
                ..
            } => {
                let within_slop =
                    (x - down_x).abs() <= self.touch_slop && (y - down_y).abs() <= self.touch_slop;
                let quick = time.saturating_sub(down_time) <= self.long_press_timeout;
                if tap_possible && within_slop && quick {
                    debug!(target: "gesture", "tap");
                    Interpretation::consumed(vec![GestureEvent::Tap])
                } else {
                    Interpretation::consumed(Vec::new())
                }
            }
        }
    }

    fn on_cancel(&mut self) -> Interpretation {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle);
        match phase {
            Phase::Dragging { .. } => {
                debug!(target: "gesture", "drag cancelled");
                Interpretation::consumed(vec![GestureEvent::DragEnd { velocity: 0.0 }])
            }
            Phase::Pressed { .. } => Interpretation::consumed(Vec::new()),
            Phase::Idle | Phase::Ignored | Phase::Horizontal => Interpretation::passed_through(),
        }
    }
}

/// Record a sample, dropping ones that fell out of the velocity window
fn push_sample(samples: &mut VecDeque<(Duration, f32)>, time: Duration, y: f32) {
    samples.push_back((time, y));
    while let Some(&(oldest, _)) = samples.front() {
        if time.saturating_sub(oldest) > VELOCITY_WINDOW {
            samples.pop_front();
        } else {
            break;
        }
    }
}

/// Velocity over the samples within the window ending at `now`, in px/s
fn release_velocity(samples: &VecDeque<(Duration, f32)>, now: Duration) -> f32 {
    let mut recent = samples
        .iter()
        .filter(|(time, _)| now.saturating_sub(*time) <= VELOCITY_WINDOW);
    let Some(&(first_time, first_y)) = recent.next() else {
        return 0.0;
    };
    let (last_time, last_y) = recent.last().copied().unwrap_or((first_time, first_y));
    let dt = last_time.saturating_sub(first_time).as_secs_f32();
    if dt <= 0.0 {
        0.0
    } else {
        (last_y - first_y) / dt
    }
}
