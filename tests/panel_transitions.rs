//! Panel state machine tests driven through the host
//!
//! Geometry used throughout: 400x800 screen, peek 168 (collapsed top 632),
//! content 560 (anchored and expanded at 240) or 1200 (expanded at 0,
//! anchored at 240).

mod common;

use std::rc::Rc;
use std::time::Duration;

use common::{assert_near, feature, metrics, tall_metrics, TestHost};
use placepage::config::PanelConfig;
use placepage::data::{FeatureInfo, OpeningMode, PlacePageData};
use placepage::panel::PanelState;

fn feature_with_mode(id: &str, mode: OpeningMode) -> PlacePageData {
    PlacePageData::Feature(FeatureInfo::new(id, "Museum", 52.5, 13.4).with_opening_mode(mode))
}

// ========================================================================
// Opening
// ========================================================================

#[test]
fn test_open_preview_collapses_to_peek() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    assert_eq!(test.state(), PanelState::Collapsed);
    assert_near(test.top(), 632.0);
    assert_near(test.host.active().sheet().peek(), 168.0);
}

#[test]
fn test_open_details_expands() {
    let mut test = TestHost::new();
    test.measure(tall_metrics());
    let data = test.insert(feature_with_mode("node/1", OpeningMode::Details));
    test.host.open_for(data);
    test.settle();

    assert_eq!(test.state(), PanelState::Expanded);
    assert_near(test.top(), 0.0);
}

#[test]
fn test_open_preview_plus_uses_minimum_ratio() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature_with_mode("node/1", OpeningMode::PreviewPlus));
    test.host.open_for(data);
    test.settle();

    assert_eq!(test.state(), PanelState::Collapsed);
    // 0.45 * 800 beats the organic 168
    assert_near(test.host.active().sheet().peek(), 360.0);
    assert_near(test.top(), 440.0);
}

#[test]
fn test_open_goes_through_settling() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);

    assert_eq!(test.state(), PanelState::Settling);
    assert_eq!(
        test.host.active().sheet().settle_target(),
        Some(PanelState::Collapsed)
    );
    assert!(test.host.frame_requested());
}

#[test]
fn test_reopening_same_payload_is_a_noop() {
    let mut test = TestHost::new();
    let data = test.open_feature("node/1");
    test.take_calls();
    let slides_before = test.slides.borrow().len();

    test.host.open_for(data);
    test.host.run_pending();

    assert_eq!(test.state(), PanelState::Collapsed);
    assert!(!test.host.frame_requested());
    assert!(test.take_calls().is_empty());
    assert_eq!(test.slides.borrow().len(), slides_before);
}

#[test]
fn test_reopening_equal_payload_by_id_is_a_noop() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    // A fresh allocation carrying the same identity
    test.host.open_for(Rc::new(feature("node/1")));
    assert_eq!(test.state(), PanelState::Collapsed);
}

#[test]
fn test_open_other_payload_closes_then_reopens() {
    let mut test = TestHost::new();
    test.open_feature("node/1");
    test.take_calls();

    let second = test.insert(feature("node/2"));
    test.host.open_for(second);
    assert_eq!(test.state(), PanelState::Settling);
    assert!(test.host.active().sheet().is_closing());
    // Still bound to the first payload until hidden
    assert_eq!(
        test.host.active().data().map(|data| data.id().as_str()),
        Some("node/1")
    );

    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
    assert_eq!(
        test.host.active().data().map(|data| data.id().as_str()),
        Some("node/2")
    );
    // Switching payloads keeps the map selection
    assert_eq!(TestHost::clear_count(&test.take_calls()), 0);
}

#[test]
fn test_latest_pending_payload_wins() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    let second = test.insert(feature("node/2"));
    let third = test.insert(feature("node/3"));
    test.host.open_for(second);
    test.frames(2);
    test.host.open_for(third);
    test.settle();

    assert_eq!(
        test.host.active().data().map(|data| data.id().as_str()),
        Some("node/3")
    );
}

// ========================================================================
// Taps
// ========================================================================

#[test]
fn test_tap_toggles_collapsed_and_anchored() {
    let mut test = TestHost::new();
    test.measure(tall_metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();

    assert!(test.tap(200.0, 700.0));
    test.settle();
    assert_eq!(test.state(), PanelState::Anchored);
    assert_near(test.top(), 240.0);

    assert!(test.tap(200.0, 300.0));
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
    assert_near(test.top(), 632.0);
}

#[test]
fn test_tap_in_expanded_collapses() {
    let mut test = TestHost::new();
    test.measure(tall_metrics());
    let data = test.insert(feature_with_mode("node/1", OpeningMode::Details));
    test.host.open_for(data);
    test.settle();
    assert_eq!(test.state(), PanelState::Expanded);

    test.tap(200.0, 100.0);
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
}

#[test]
fn test_tap_while_settling_is_ignored() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.frames(10);

    let top = test.top();
    test.tap(200.0, top + 20.0);
    assert_eq!(
        test.host.active().sheet().settle_target(),
        Some(PanelState::Collapsed)
    );
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
}

// ========================================================================
// Drags
// ========================================================================

#[test]
fn test_slow_drag_snaps_to_nearest_state() {
    let mut test = TestHost::new();
    test.measure(tall_metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();

    // 300 px over two seconds ends at 332, closest to the anchor at 240
    test.drag(200.0, 700.0, 400.0, Duration::from_secs(2));
    assert_eq!(test.state(), PanelState::Settling);
    test.settle();
    assert_eq!(test.state(), PanelState::Anchored);
}

#[test]
fn test_slow_short_drag_returns_to_collapsed() {
    let mut test = TestHost::new();
    test.measure(tall_metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();

    test.drag(200.0, 700.0, 600.0, Duration::from_secs(1));
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
    assert_near(test.top(), 632.0);
}

#[test]
fn test_panel_follows_the_finger() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    let start = test.clock;
    test.host.pointer(placepage::messages::PointerMsg::Down {
        x: 200.0,
        y: 700.0,
        time: start,
    });
    test.host.pointer(placepage::messages::PointerMsg::Move {
        x: 200.0,
        y: 650.0,
        time: start + Duration::from_millis(100),
    });
    assert_eq!(test.state(), PanelState::Dragging);
    assert_near(test.top(), 582.0);
}

#[test]
fn test_fling_up_opens_next_state() {
    let mut test = TestHost::new();
    test.measure(tall_metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();

    test.drag(200.0, 700.0, 600.0, Duration::from_millis(80));
    test.settle();
    assert_eq!(test.state(), PanelState::Anchored);
}

#[test]
fn test_short_fling_down_from_anchor_collapses() {
    let mut test = TestHost::new();
    test.measure(tall_metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.settle();
    test.tap(200.0, 700.0);
    test.settle();
    assert_eq!(test.state(), PanelState::Anchored);

    test.fling_down(300.0, 100.0);
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
    assert_eq!(TestHost::clear_count(&test.take_calls()), 0);
}

#[test]
fn test_long_fling_down_hides() {
    let mut test = TestHost::new();
    test.open_feature("node/1");
    test.take_calls();

    test.fling_down(650.0, 140.0);
    test.settle();
    assert_eq!(test.state(), PanelState::Hidden);
    assert!(test.host.is_closed());
    assert!(test.host.active().data().is_none());
    assert_eq!(TestHost::clear_count(&test.take_calls()), 1);
}

#[test]
fn test_drag_rejected_while_settling() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.frames(12);
    assert_eq!(test.state(), PanelState::Settling);

    let top = test.top();
    test.drag(200.0, top + 10.0, top - 100.0, Duration::from_millis(300));
    assert_ne!(test.state(), PanelState::Dragging);
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
}

// ========================================================================
// Closing
// ========================================================================

#[test]
fn test_close_with_deactivate_clears_selection_once() {
    let mut test = TestHost::new();
    test.open_feature("node/1");
    test.take_calls();

    test.host.close(true);
    assert!(!test.host.is_closed());
    test.settle();
    assert!(test.host.is_closed());

    // Closing a hidden panel does nothing
    test.host.close(true);
    test.settle();
    assert_eq!(TestHost::clear_count(&test.take_calls()), 1);
}

#[test]
fn test_close_without_deactivate_keeps_selection() {
    let mut test = TestHost::new();
    test.open_feature("node/1");
    test.take_calls();

    test.host.close(false);
    test.settle();
    assert_eq!(test.state(), PanelState::Hidden);
    assert_eq!(TestHost::clear_count(&test.take_calls()), 0);
}

#[test]
fn test_second_close_widens_deactivate_flag() {
    let mut test = TestHost::new();
    test.open_feature("node/1");
    test.take_calls();

    test.host.close(false);
    test.frames(3);
    test.host.close(true);
    test.host.close(true);
    test.settle();
    assert_eq!(TestHost::clear_count(&test.take_calls()), 1);
}

#[test]
fn test_reopening_payload_while_it_closes_shows_it_again() {
    let mut test = TestHost::new();
    let data = test.open_feature("node/1");
    test.host.close(false);
    test.frames(2);
    assert_eq!(test.state(), PanelState::Settling);

    test.host.open_for(data);
    test.settle();
    assert_eq!(test.state(), PanelState::Collapsed);
    assert_near(test.top(), 632.0);
}

#[test]
fn test_close_drops_pending_payload() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    let second = test.insert(feature("node/2"));
    test.host.open_for(second);
    test.host.close(true);
    test.settle();

    assert_eq!(test.state(), PanelState::Hidden);
    assert!(test.host.active().data().is_none());
}

// ========================================================================
// Content changes
// ========================================================================

#[test]
fn test_peek_change_while_collapsed_animates() {
    let mut test = TestHost::new();
    test.open_feature("node/1");

    let mut taller = metrics();
    taller.preview_height = 200.0;
    test.measure(taller);
    // Stays collapsed while the peek animates
    assert_eq!(test.state(), PanelState::Collapsed);
    assert!(test.host.frame_requested());

    test.settle();
    assert_near(test.host.active().sheet().peek(), 248.0);
    assert_near(test.top(), 552.0);
}

#[test]
fn test_content_change_while_settling_applies_on_landing() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    test.frames(4);

    let mut taller = metrics();
    taller.preview_height = 200.0;
    test.measure(taller);
    test.settle();

    assert_eq!(test.state(), PanelState::Collapsed);
    assert_near(test.top(), 552.0);
}

#[test]
fn test_reduced_motion_lands_on_next_frame() {
    let config = PanelConfig {
        reduced_motion: true,
        ..PanelConfig::default()
    };
    let mut test = TestHost::with_config(config);
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);

    assert_eq!(test.settle(), 1);
    assert_eq!(test.state(), PanelState::Collapsed);
}

#[test]
fn test_slide_listener_tracks_top_edge() {
    let mut test = TestHost::new();
    test.slides.borrow_mut().clear();
    test.open_feature("node/1");

    let slides = test.slides.borrow();
    assert!(slides.len() > 2, "expected several slide notifications");
    assert_near(*slides.last().unwrap(), 632.0);
    // Opening only moves up
    assert!(slides.windows(2).all(|pair| pair[1] <= pair[0]));
}

#[test]
fn test_settle_takes_configured_duration() {
    let mut test = TestHost::new();
    test.measure(metrics());
    let data = test.insert(feature("node/1"));
    test.host.open_for(data);
    let frames = test.settle();
    // 250 ms at 16 ms per frame
    assert_eq!(frames, 16);
    assert!(!test.host.frame_requested());
}
