//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use placepage::config::PanelConfig;
use placepage::data::{
    DataRef, ElevationPoint, ElevationProfileData, FeatureInfo, GalleryData, GalleryItem,
    PayloadId, PlacePageData,
};
use placepage::geometry::{ContentMetrics, DockingMode, Rect, Size};
use placepage::messages::{Msg, PanelMsg, PointerMsg};
use placepage::panel::PanelState;
use placepage::panels::HostContext;
use placepage::ports::{MemoryDataSource, PortCall, PortLog, RecordingMap, RecordingPositionSource};
use placepage::runtime::PlacePageHost;

pub const SCREEN: Size = Size::new(400.0, 800.0);
pub const FRAME: Duration = Duration::from_millis(16);

/// Preview 120 + bar 56 - inset 8 = 168 peek; content 560 tall
pub fn metrics() -> ContentMetrics {
    ContentMetrics {
        preview_height: 120.0,
        content_height: 560.0,
        button_bar_height: 56.0,
        button_bar_bottom_inset: 8.0,
    }
}

/// Content taller than the screen, so anchored and expanded differ
pub fn tall_metrics() -> ContentMetrics {
    ContentMetrics {
        content_height: 1200.0,
        ..metrics()
    }
}

pub fn feature(id: &str) -> PlacePageData {
    PlacePageData::Feature(FeatureInfo::new(id, format!("Feature {}", id), 52.52, 13.40))
}

pub fn gallery(id: &str) -> PlacePageData {
    PlacePageData::GuidesGallery(GalleryData {
        id: PayloadId::new(id),
        title: "Guides".to_string(),
        items: vec![GalleryItem {
            title: "Old town walk".to_string(),
            subtitle: "2 h".to_string(),
        }],
    })
}

pub fn elevation(id: &str) -> PlacePageData {
    PlacePageData::ElevationProfile(ElevationProfileData {
        id: PayloadId::new(id),
        track_name: "Ridge loop".to_string(),
        points: vec![
            ElevationPoint {
                distance_m: 0.0,
                altitude_m: 100.0,
            },
            ElevationPoint {
                distance_m: 500.0,
                altitude_m: 180.0,
            },
            ElevationPoint {
                distance_m: 1000.0,
                altitude_m: 120.0,
            },
        ],
    })
}

/// Host wired to recording ports, with a pointer clock
pub struct TestHost {
    pub host: PlacePageHost,
    pub data: MemoryDataSource,
    pub log: PortLog,
    pub slides: Rc<RefCell<Vec<f32>>>,
    pub clock: Duration,
}

impl TestHost {
    pub fn new() -> Self {
        Self::with_config(PanelConfig::default())
    }

    /// Initialized host with the default variants
    pub fn with_config(config: PanelConfig) -> Self {
        let mut test = Self::uninitialized(config);
        test.host.initialize(HostContext {
            screen: SCREEN,
            docking: DockingMode::Bottom,
        });
        test.host.run_pending();
        test
    }

    pub fn uninitialized(config: PanelConfig) -> Self {
        let data = MemoryDataSource::new();
        let log = PortLog::default();
        let mut host = PlacePageHost::new(
            config,
            Box::new(data.clone()),
            Box::new(RecordingMap::new(log.clone())),
            Box::new(RecordingPositionSource::new(log.clone())),
        );
        let slides = Rc::new(RefCell::new(Vec::new()));
        let sink = slides.clone();
        host.set_slide_listener(Box::new(move |top| sink.borrow_mut().push(top)));
        Self {
            host,
            data,
            log,
            slides,
            clock: Duration::ZERO,
        }
    }

    /// Register a payload with the data source
    pub fn insert(&self, payload: PlacePageData) -> DataRef {
        let data = Rc::new(payload);
        self.data.insert(data.clone());
        data
    }

    /// Report content metrics for the active variant
    pub fn measure(&mut self, metrics: ContentMetrics) {
        self.host
            .dispatch(Msg::Panel(PanelMsg::ContentMeasured(metrics)));
        self.host.run_pending();
    }

    /// Open a feature with measured content and let it settle
    pub fn open_feature(&mut self, id: &str) -> DataRef {
        self.measure(metrics());
        let data = self.insert(feature(id));
        self.host.open_for(data.clone());
        self.settle();
        data
    }

    pub fn settle(&mut self) -> usize {
        let frames = self.host.run_animations(FRAME);
        self.clock += FRAME * frames as u32;
        frames
    }

    pub fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.host.advance_frame(FRAME);
            self.clock += FRAME;
        }
    }

    pub fn state(&self) -> PanelState {
        self.host.model().active_state()
    }

    pub fn top(&self) -> f32 {
        self.host.active().sheet().top()
    }

    /// Press and release in place; returns whether the panel consumed it
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        let down = self.host.pointer(PointerMsg::Down {
            x,
            y,
            time: self.clock,
        });
        self.clock += Duration::from_millis(50);
        self.host.pointer(PointerMsg::Up {
            x,
            y,
            time: self.clock,
        });
        self.host.run_pending();
        down
    }

    /// Vertical drag from `from_y` to `to_y` in even steps over `duration`
    pub fn drag(&mut self, x: f32, from_y: f32, to_y: f32, duration: Duration) -> bool {
        let steps = 8;
        let start = self.clock;
        let consumed = self.host.pointer(PointerMsg::Down {
            x,
            y: from_y,
            time: start,
        });
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            self.host.pointer(PointerMsg::Move {
                x,
                y: from_y + (to_y - from_y) * t,
                time: start + duration.mul_f32(t),
            });
            self.host.run_pending();
        }
        self.clock = start + duration;
        self.host.pointer(PointerMsg::Up {
            x,
            y: to_y,
            time: self.clock,
        });
        self.host.run_pending();
        consumed
    }

    /// Quick downward fling covering `distance`
    pub fn fling_down(&mut self, from_y: f32, distance: f32) {
        self.drag(200.0, from_y, from_y + distance, Duration::from_millis(80));
    }

    /// Drain every recorded port call
    pub fn take_calls(&self) -> Vec<PortCall> {
        self.log.borrow_mut().drain(..).collect()
    }

    pub fn visible_rects(calls: &[PortCall]) -> Vec<Rect> {
        calls
            .iter()
            .filter_map(|call| match call {
                PortCall::SetVisibleRect(rect) => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn clear_count(calls: &[PortCall]) -> usize {
        calls
            .iter()
            .filter(|call| **call == PortCall::ClearMapSelection)
            .count()
    }

    /// Last rectangle pushed to the map
    pub fn last_rect(&self) -> Option<Rect> {
        self.host.model().viewport.last_pushed()
    }
}

pub fn full_rect() -> Rect {
    Rect::full(SCREEN)
}

pub fn assert_near(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {}, got {}",
        expected,
        actual
    );
}
