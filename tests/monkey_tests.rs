//! Monkey tests - edge cases, fuzzing, and stress testing
//!
//! These tests intentionally push the panel to its limits with weird inputs,
//! extreme values, and unusual sequences of operations.

mod common;

use std::time::Duration;

use common::{feature, gallery, metrics, TestHost};
use placepage::geometry::{ContentMetrics, DockingMode, Size};
use placepage::messages::{HostMsg, LayoutMsg, Msg, PointerMsg};
use placepage::panel::PanelState;

// ========================================================================
// Degenerate geometry
// ========================================================================

#[test]
fn test_resize_to_zero_does_not_crash() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    test.host
        .dispatch(Msg::Layout(LayoutMsg::Resize(Size::new(0.0, 0.0))));
    test.settle();
    test.tap(0.0, 0.0);
    test.settle();

    // Model should still be usable
    test.host
        .dispatch(Msg::Layout(LayoutMsg::Resize(common::SCREEN)));
    test.settle();
    assert!(test.state().is_stable());
}

#[test]
fn test_content_taller_than_screen() {
    let mut test = TestHost::new();
    test.measure(ContentMetrics {
        preview_height: 5000.0,
        content_height: 9000.0,
        button_bar_height: 56.0,
        button_bar_bottom_inset: 0.0,
    });
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();

    // The peek never exceeds the parent
    assert_eq!(test.state(), PanelState::Collapsed);
    assert!(test.top() >= 0.0);
    assert_eq!(test.host.active().sheet().peek(), 800.0);
}

#[test]
fn test_zero_content_opens_invisible() {
    let mut test = TestHost::new();
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();

    assert_eq!(test.state(), PanelState::Collapsed);
    assert_eq!(test.last_rect(), Some(common::full_rect()));
    // Nothing on screen to hit
    assert!(!test.tap(200.0, 799.0));
}

#[test]
fn test_inset_larger_than_bar() {
    let mut test = TestHost::new();
    test.measure(ContentMetrics {
        preview_height: 0.0,
        content_height: 100.0,
        button_bar_height: 10.0,
        button_bar_bottom_inset: 50.0,
    });
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();
    assert_eq!(test.host.active().sheet().peek(), 0.0);
}

// ========================================================================
// Unusual input sequences
// ========================================================================

#[test]
fn test_up_without_down() {
    let mut test = TestHost::new();
    test.open_feature("node/1");
    assert!(!test.host.pointer(PointerMsg::Up {
        x: 200.0,
        y: 700.0,
        time: Duration::ZERO,
    }));
    assert_eq!(test.state(), PanelState::Collapsed);
}

#[test]
fn test_second_down_ends_drag() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    let t = test.clock;
    test.host.pointer(PointerMsg::Down {
        x: 200.0,
        y: 700.0,
        time: t,
    });
    test.host.pointer(PointerMsg::Move {
        x: 200.0,
        y: 660.0,
        time: t + Duration::from_millis(200),
    });
    assert_eq!(test.state(), PanelState::Dragging);

    test.host.pointer(PointerMsg::Down {
        x: 200.0,
        y: 700.0,
        time: t + Duration::from_millis(300),
    });
    assert_eq!(test.state(), PanelState::Settling);
    test.settle();
    assert!(test.state().is_stable());
}

#[test]
fn test_timestamps_going_backwards() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    let t = Duration::from_secs(10);
    test.host.pointer(PointerMsg::Down {
        x: 200.0,
        y: 700.0,
        time: t,
    });
    test.host.pointer(PointerMsg::Move {
        x: 200.0,
        y: 600.0,
        time: t - Duration::from_secs(1),
    });
    test.host.pointer(PointerMsg::Up {
        x: 200.0,
        y: 500.0,
        time: t - Duration::from_secs(2),
    });
    test.settle();
    assert!(test.state().is_stable());
}

#[test]
fn test_zero_length_frames() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    for _ in 0..100 {
        test.host.advance_frame(Duration::ZERO);
    }
    assert_eq!(test.state(), PanelState::Settling);
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
}

#[test]
fn test_huge_frame_lands_immediately() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.host.advance_frame(Duration::from_secs(60));
    assert_eq!(test.state(), PanelState::Collapsed);
}

#[test]
fn test_rapid_open_close_storm() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let first = test.insert(feature("node/1"));
    let second = test.insert(feature("node/2"));
    let guides = test.insert(gallery("guides/1"));
    test.take_calls();

    for i in 0..50 {
        match i % 4 {
            0 => test.host.open_for(first.clone()),
            1 => test.host.open_for(guides.clone()),
            2 => test.host.open_for(second.clone()),
            _ => test.host.close(i % 8 == 3),
        }
        test.frames(i % 3);
    }
    test.settle();

    assert!(test.state().is_stable());
    assert!(!test.host.model().composite.is_animating());
    assert_eq!(test.last_rect(), Some(test.host.model().visible_rect()));
}

// ========================================================================
// Random walks
// ========================================================================

/// Small deterministic generator so failures reproduce
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }

    fn coord(&mut self, max: f32) -> f32 {
        self.below(max as u64 + 1) as f32
    }
}

fn random_walk(seed: u64, steps: usize) {
    let mut rng = Lcg(seed);
    let mut test = TestHost::new();
    test.measure(metrics());
    let payloads = [
        test.insert(feature("node/1")),
        test.insert(feature("node/2")),
        test.insert(gallery("guides/1")),
    ];

    for _ in 0..steps {
        let t = test.clock;
        match rng.below(14) {
            0 => {
                let data = payloads[rng.below(3) as usize].clone();
                test.host.open_for(data);
            }
            1 => test.host.close(rng.below(2) == 0),
            2 => {
                let (x, y) = (rng.coord(400.0), rng.coord(800.0));
                test.host.pointer(PointerMsg::Down { x, y, time: t });
            }
            3 | 4 => {
                let (x, y) = (rng.coord(400.0), rng.coord(800.0));
                test.host.pointer(PointerMsg::Move { x, y, time: t });
            }
            5 => {
                let (x, y) = (rng.coord(400.0), rng.coord(800.0));
                test.host.pointer(PointerMsg::Up { x, y, time: t });
            }
            6 => {
                test.host.pointer(PointerMsg::Cancel { time: t });
            }
            7 => {
                let size = Size::new(rng.coord(1200.0), rng.coord(1200.0));
                test.host.dispatch(Msg::Layout(LayoutMsg::Resize(size)));
            }
            8 => {
                let docking = if rng.below(2) == 0 {
                    DockingMode::Bottom
                } else {
                    DockingMode::Side {
                        width: rng.coord(500.0),
                    }
                };
                test.host.dispatch(Msg::Layout(LayoutMsg::SetDocking(docking)));
            }
            9 => test.measure(ContentMetrics {
                preview_height: rng.coord(300.0),
                content_height: rng.coord(1500.0),
                button_bar_height: rng.coord(80.0),
                button_bar_bottom_inset: rng.coord(40.0),
            }),
            10 => {
                let msg = match rng.below(4) {
                    0 => HostMsg::Start,
                    1 => HostMsg::Resume,
                    2 => HostMsg::Pause,
                    _ => HostMsg::Stop,
                };
                test.host.dispatch(Msg::Host(msg));
            }
            _ => {
                let frames = rng.below(6) as usize;
                test.frames(frames);
            }
        }
        test.host.run_pending();
        test.clock += Duration::from_millis(rng.below(40));
        test.host.model().composite.assert_invariants();
    }

    // Lift any finger still down and let everything come to rest
    test.host.pointer(PointerMsg::Cancel { time: test.clock });
    test.settle();
    test.host.model().composite.assert_invariants();
    assert!(test.state().is_stable(), "ended in {}", test.state());
    assert!(!test.host.model().composite.is_animating());
}

#[test]
fn test_random_walk_seed_1() {
    random_walk(1, 2000);
}

#[test]
fn test_random_walk_seed_42() {
    random_walk(42, 2000);
}

#[test]
fn test_random_walk_seed_31337() {
    random_walk(31337, 2000);
}
