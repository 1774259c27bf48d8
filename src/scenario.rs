//! Scenario scripts replayed by the `placepage` binary
//!
//! A scenario is a YAML document naming a screen, the payloads the in-memory
//! data source knows and a list of steps:
//!
//! ```yaml
//! screen: { width: 400, height: 800 }
//! payloads:
//!   - kind: feature
//!     id: node/1
//!     title: Cafe
//!     lat: 52.52
//!     lon: 13.40
//! steps:
//!   - open: node/1
//!   - measure: { preview_height: 120, content_height: 560, button_bar_height: 56, button_bar_bottom_inset: 8 }
//!   - tap: { x: 200, y: 700 }
//!   - drag: { from: [200, 300], to: [200, 760], duration_ms: 80 }
//! ```
//!
//! Every step is followed by the layout ticks it caused and, unless
//! `auto_settle` is off, by animation frames until the panel rests.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::PanelConfig;
use crate::data::{PayloadId, PlacePageData};
use crate::geometry::{ContentMetrics, DockingMode, Rect, Size};
use crate::messages::{HostMsg, LayoutMsg, Location, Msg, PanelMsg, PointerMsg, SensorMsg};
use crate::panels::HostContext;
use crate::persistence::{PersistedState, RestoreOutcome};
use crate::panel::PanelState;
use crate::ports::{
    FeatureDataSource, MemoryDataSource, PortCall, PortLog, RecordingMap, RecordingPositionSource,
};
use crate::runtime::PlacePageHost;

/// Length of one animation frame
pub const FRAME: Duration = Duration::from_millis(16);

/// Time between a tap's down and up
const TAP_DURATION: Duration = Duration::from_millis(50);

/// Pause inserted between steps so gestures never overlap in time
const STEP_GAP: Duration = Duration::from_millis(200);

fn default_screen() -> Size {
    Size::new(400.0, 800.0)
}

fn default_true() -> bool {
    true
}

fn default_drag_duration() -> u64 {
    300
}

fn default_drag_moves() -> u32 {
    8
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_screen")]
    pub screen: Size,
    #[serde(default)]
    pub docking: DockingMode,
    /// Run frames after every step until nothing animates
    #[serde(default = "default_true")]
    pub auto_settle: bool,
    #[serde(default)]
    pub payloads: Vec<PlacePageData>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        serde_yaml::from_str(content).map_err(|e| format!("Failed to parse scenario: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario at {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Start,
    Resume,
    Pause,
    Stop,
}

impl From<Lifecycle> for HostMsg {
    fn from(phase: Lifecycle) -> Self {
        match phase {
            Lifecycle::Start => HostMsg::Start,
            Lifecycle::Resume => HostMsg::Resume,
            Lifecycle::Pause => HostMsg::Pause,
            Lifecycle::Stop => HostMsg::Stop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Open the payload with this id
    Open(String),
    Close {
        #[serde(default)]
        deactivate_selection: bool,
    },
    /// Report measured content
    Measure(ContentMetrics),
    Tap { x: f32, y: f32 },
    Drag {
        from: [f32; 2],
        to: [f32; 2],
        #[serde(default = "default_drag_duration")]
        duration_ms: u64,
        #[serde(default = "default_drag_moves")]
        moves: u32,
    },
    /// Advance animation frames covering this many milliseconds
    Wait(u64),
    /// Run frames until the panel rests
    Settle,
    Host(Lifecycle),
    Location { lat: f64, lon: f64 },
    Compass {
        magnetic_north: f64,
        #[serde(default = "negative_one")]
        true_north: f64,
    },
    Bookmark(bool),
    Resize(Size),
    Docking(DockingMode),
    ScrollRegions(Vec<Rect>),
    /// Drop a payload from the data source
    Remove(String),
    /// Remember the current state
    Save,
    /// Re-enter the last remembered state
    Restore,
}

fn negative_one() -> f64 {
    -1.0
}

/// Replays a scenario against in-memory ports and records what happened
pub struct ScenarioRunner {
    host: PlacePageHost,
    data: MemoryDataSource,
    log: PortLog,
    slides: Rc<Cell<usize>>,
    clock: Duration,
    auto_settle: bool,
    saved: Option<PersistedState>,
    transcript: Vec<String>,
}

impl ScenarioRunner {
    /// Build the host, seed the data source and initialize the session
    pub fn new(scenario: &Scenario, config: PanelConfig) -> Self {
        let data = MemoryDataSource::new();
        for payload in &scenario.payloads {
            data.insert(Rc::new(payload.clone()));
        }
        let log = PortLog::default();
        let mut host = PlacePageHost::new(
            config,
            Box::new(data.clone()),
            Box::new(RecordingMap::new(log.clone())),
            Box::new(RecordingPositionSource::new(log.clone())),
        );

        let slides = Rc::new(Cell::new(0));
        let counter = slides.clone();
        host.set_slide_listener(Box::new(move |_| counter.set(counter.get() + 1)));

        host.initialize(HostContext {
            screen: scenario.screen,
            docking: scenario.docking,
        });
        host.run_pending();

        let mut runner = Self {
            host,
            data,
            log,
            slides,
            clock: Duration::ZERO,
            auto_settle: scenario.auto_settle,
            saved: None,
            transcript: Vec::new(),
        };
        runner.flush_port_calls("initialize");
        runner
    }

    pub fn host(&self) -> &PlacePageHost {
        &self.host
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn slide_notifications(&self) -> usize {
        self.slides.get()
    }

    /// Restore a state saved by an earlier run
    pub fn restore(&mut self, saved: Option<&PersistedState>) -> RestoreOutcome {
        let outcome = self.host.on_restore(saved);
        self.host.run_pending();
        self.transcript.push(format!(
            "restore -> {:?} ({})",
            outcome,
            self.host.model().active_state()
        ));
        self.flush_port_calls("restore");
        outcome
    }

    pub fn run(&mut self, steps: &[Step]) {
        for (index, step) in steps.iter().enumerate() {
            self.run_step(index + 1, step);
        }
    }

    /// Save the state and tear the session down
    pub fn finish(mut self) -> (Option<PersistedState>, Vec<String>) {
        let saved = self.host.on_save();
        self.host.destroy();
        self.flush_port_calls("destroy");
        self.transcript
            .push(format!("slide notifications: {}", self.slides.get()));
        (saved, self.transcript)
    }

    fn run_step(&mut self, index: usize, step: &Step) {
        debug!(target: "panel", index, ?step, "scenario step");
        let before = self.host.model().active_state();

        match step {
            Step::Open(id) => {
                let id = PayloadId::new(id.as_str());
                match self.data.resolve(&id) {
                    Some(data) => self.host.open_for(data),
                    None => {
                        self.transcript
                            .push(format!("[{}] open {}: unknown payload, skipped", index, id));
                        return;
                    }
                }
            }
            Step::Close {
                deactivate_selection,
            } => self.host.close(*deactivate_selection),
            Step::Measure(metrics) => self
                .host
                .dispatch(Msg::Panel(PanelMsg::ContentMeasured(*metrics))),
            Step::Tap { x, y } => self.tap(*x, *y),
            Step::Drag {
                from,
                to,
                duration_ms,
                moves,
            } => self.drag(*from, *to, Duration::from_millis(*duration_ms), *moves),
            Step::Wait(ms) => {
                let frames = (*ms as u128).div_ceil(FRAME.as_millis()).max(1);
                for _ in 0..frames {
                    self.host.advance_frame(FRAME);
                }
                self.clock += Duration::from_millis(*ms);
            }
            Step::Settle => {
                self.settle();
            }
            Step::Host(phase) => self.host.dispatch(Msg::Host((*phase).into())),
            Step::Location { lat, lon } => {
                self.host
                    .dispatch(Msg::Sensor(SensorMsg::Location(Location {
                        lat: *lat,
                        lon: *lon,
                    })))
            }
            Step::Compass {
                magnetic_north,
                true_north,
            } => self.host.dispatch(Msg::Sensor(SensorMsg::Compass {
                magnetic_north: *magnetic_north,
                true_north: *true_north,
            })),
            Step::Bookmark(is_bookmark) => self
                .host
                .dispatch(Msg::Panel(PanelMsg::BookmarkChanged {
                    is_bookmark: *is_bookmark,
                })),
            Step::Resize(size) => self.host.dispatch(Msg::Layout(LayoutMsg::Resize(*size))),
            Step::Docking(docking) => self
                .host
                .dispatch(Msg::Layout(LayoutMsg::SetDocking(*docking))),
            Step::ScrollRegions(regions) => self
                .host
                .dispatch(Msg::Panel(PanelMsg::SetScrollRegions(regions.clone()))),
            Step::Remove(id) => {
                self.data.remove(&PayloadId::new(id.as_str()));
            }
            Step::Save => {
                self.saved = self.host.on_save();
            }
            Step::Restore => {
                let saved = self.saved.clone();
                let outcome = self.host.on_restore(saved.as_ref());
                self.transcript
                    .push(format!("[{}] restore -> {:?}", index, outcome));
            }
        }

        self.host.run_pending();
        let landed = self.host.model().active_state();
        let settled = if self.auto_settle && !matches!(step, Step::Wait(_)) {
            self.settle()
        } else {
            landed
        };

        let label = format!("[{}] {}", index, describe(step));
        let mut line = format!("{}: {}", label, before);
        if landed != before {
            line.push_str(&format!(" -> {}", landed));
        }
        if settled != landed {
            line.push_str(&format!(" -> {}", settled));
        }
        self.transcript.push(line);
        self.flush_port_calls(&label);
        self.clock += STEP_GAP;
    }

    fn settle(&mut self) -> PanelState {
        let frames = self.host.run_animations(FRAME);
        self.clock += FRAME * frames as u32;
        self.host.model().active_state()
    }

    fn tap(&mut self, x: f32, y: f32) {
        self.host.pointer(PointerMsg::Down {
            x,
            y,
            time: self.clock,
        });
        self.clock += TAP_DURATION;
        self.host.pointer(PointerMsg::Up {
            x,
            y,
            time: self.clock,
        });
    }

    fn drag(&mut self, from: [f32; 2], to: [f32; 2], duration: Duration, moves: u32) {
        let moves = moves.max(1);
        let [x0, y0] = from;
        let [x1, y1] = to;
        let start = self.clock;
        self.host.pointer(PointerMsg::Down {
            x: x0,
            y: y0,
            time: start,
        });
        for i in 1..=moves {
            let t = i as f32 / moves as f32;
            let time = start + duration.mul_f32(t);
            self.host.pointer(PointerMsg::Move {
                x: x0 + (x1 - x0) * t,
                y: y0 + (y1 - y0) * t,
                time,
            });
            // Frames keep running while the finger moves
            self.host.run_pending();
        }
        self.clock = start + duration;
        self.host.pointer(PointerMsg::Up {
            x: x1,
            y: y1,
            time: self.clock,
        });
    }

    fn flush_port_calls(&mut self, label: &str) {
        let calls: Vec<PortCall> = self.log.borrow_mut().drain(..).collect();
        for call in calls {
            let text = match call {
                PortCall::SetVisibleRect(rect) => format!(
                    "map.set_visible_rect({}, {}, {}, {})",
                    rect.x0, rect.y0, rect.x1, rect.y1
                ),
                PortCall::ClearMapSelection => "map.clear_map_selection()".to_string(),
                PortCall::Subscribe => "positions.subscribe()".to_string(),
                PortCall::Unsubscribe => "positions.unsubscribe()".to_string(),
            };
            debug!(target: "viewport", label, call = %text, "port call");
            self.transcript.push(format!("    {}", text));
        }
    }
}

/// One-line description of a step for the transcript
fn describe(step: &Step) -> String {
    match step {
        Step::Open(id) => format!("open {}", id),
        Step::Close {
            deactivate_selection,
        } => format!("close (deactivate_selection: {})", deactivate_selection),
        Step::Measure(metrics) => format!(
            "measure (preview {}, content {})",
            metrics.preview_height, metrics.content_height
        ),
        Step::Tap { x, y } => format!("tap ({}, {})", x, y),
        Step::Drag { from, to, .. } => format!(
            "drag ({}, {}) -> ({}, {})",
            from[0], from[1], to[0], to[1]
        ),
        Step::Wait(ms) => format!("wait {}ms", ms),
        Step::Settle => "settle".to_string(),
        Step::Host(phase) => format!("host {:?}", phase),
        Step::Location { lat, lon } => format!("location ({}, {})", lat, lon),
        Step::Compass { magnetic_north, .. } => format!("compass {}", magnetic_north),
        Step::Bookmark(is_bookmark) => format!("bookmark {}", is_bookmark),
        Step::Resize(size) => format!("resize {}x{}", size.width, size.height),
        Step::Docking(docking) => format!("docking {:?}", docking),
        Step::ScrollRegions(regions) => format!("scroll regions ({})", regions.len()),
        Step::Remove(id) => format!("remove {}", id),
        Step::Save => "save".to_string(),
        Step::Restore => "restore".to_string(),
    }
}
