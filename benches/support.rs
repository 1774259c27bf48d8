//! Shared helpers for benchmarks

use std::rc::Rc;
use std::time::Duration;

use placepage::config::PanelConfig;
use placepage::data::{FeatureInfo, PlacePageData};
use placepage::geometry::{ContentMetrics, DockingMode, Size};
use placepage::messages::{Msg, PanelMsg, PointerMsg};
use placepage::panels::HostContext;
use placepage::ports::{MemoryDataSource, PortLog, RecordingMap, RecordingPositionSource};
use placepage::runtime::PlacePageHost;

pub const SCREEN: Size = Size::new(400.0, 800.0);
pub const FRAME: Duration = Duration::from_millis(16);

#[allow(dead_code)]
pub fn metrics() -> ContentMetrics {
    ContentMetrics {
        preview_height: 120.0,
        content_height: 1200.0,
        button_bar_height: 56.0,
        button_bar_bottom_inset: 8.0,
    }
}

/// Initialized host with a collapsed feature panel on screen
#[allow(dead_code)]
pub fn make_host() -> PlacePageHost {
    let data = MemoryDataSource::new();
    let log = PortLog::default();
    let mut host = PlacePageHost::new(
        PanelConfig::default(),
        Box::new(data.clone()),
        Box::new(RecordingMap::new(log.clone())),
        Box::new(RecordingPositionSource::new(log)),
    );
    host.initialize(HostContext {
        screen: SCREEN,
        docking: DockingMode::Bottom,
    });
    host.dispatch(Msg::Panel(PanelMsg::ContentMeasured(metrics())));

    let feature = Rc::new(PlacePageData::Feature(FeatureInfo::new(
        "node/1", "Bench", 52.52, 13.40,
    )));
    data.insert(feature.clone());
    host.open_for(feature);
    host.run_animations(FRAME);
    host
}

/// Vertical drag over the collapsed panel: down, `moves` moves, up
#[allow(dead_code)]
pub fn drag_stream(from_y: f32, to_y: f32, moves: usize, duration: Duration) -> Vec<PointerMsg> {
    let mut stream = Vec::with_capacity(moves + 2);
    stream.push(PointerMsg::Down {
        x: 200.0,
        y: from_y,
        time: Duration::ZERO,
    });
    for i in 1..=moves {
        let t = i as f32 / moves as f32;
        stream.push(PointerMsg::Move {
            x: 200.0,
            y: from_y + (to_y - from_y) * t,
            time: duration.mul_f32(t),
        });
    }
    stream.push(PointerMsg::Up {
        x: 200.0,
        y: to_y,
        time: duration,
    });
    stream
}
