//! Behaviour tests for the transport coordinator
//!
//! This test suite verifies:
//! - Auto-hide timing and the single-pending-task guarantee
//! - Seek gestures, progress math and tick alignment
//! - Mute, volume and brightness handling
//! - Key, touch and binding edge cases

mod common;

use bridge_traits::{
    AnchorSurface, ManualClock, MuteIcon, PlayPauseIcon, PlaybackControlPort, SidePanel,
    SizeVariant, Timestamp, WindowBrightness,
};
use common::{
    phone_bounds, tablet_bounds, EngineCall, FakeEngine, FakeWindow, FixedAnchor,
    RecordingRenderTarget,
};
use core_runtime::events::{EventBus, EventStream};
use core_runtime::{TransportConfig, TransportEvent};
use core_transport::{
    ChangeOrigin, KeyCode, KeyDisposition, KeyEvent, TaskKind, TouchPhase, TransportCoordinator,
    TransportState,
};
use std::sync::Arc;

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    clock: Arc<ManualClock>,
    engine: Arc<FakeEngine>,
    render: Arc<RecordingRenderTarget>,
    coordinator: TransportCoordinator,
}

impl Harness {
    fn new(engine: FakeEngine) -> Self {
        Self::with_render(engine, RecordingRenderTarget::default())
    }

    fn with_render(engine: FakeEngine, render: RecordingRenderTarget) -> Self {
        let clock = Arc::new(ManualClock::new());
        let engine = Arc::new(engine);
        let render = Arc::new(render);

        let mut coordinator = TransportCoordinator::new(TransportConfig::default(), clock.clone())
            .unwrap()
            .with_render_target(render.clone());
        coordinator.attach(Some(port(&engine)), Some(anchor(tablet_bounds())));
        engine.clear_calls();

        Self {
            clock,
            engine,
            render,
            coordinator,
        }
    }

    fn advance(&mut self, millis: u64) -> usize {
        self.clock.advance(millis);
        self.coordinator.run_due()
    }

    fn fade_out_at(&self) -> Option<u64> {
        self.coordinator
            .pending_task(TaskKind::FadeOut)
            .map(|task| task.fire_at.as_millis())
    }

    fn tick_at(&self) -> Option<u64> {
        self.coordinator
            .pending_task(TaskKind::ProgressTick)
            .map(|task| task.fire_at.as_millis())
    }
}

fn port(engine: &Arc<FakeEngine>) -> Arc<dyn PlaybackControlPort> {
    engine.clone()
}

fn anchor(bounds: bridge_traits::Bounds) -> Arc<dyn AnchorSurface> {
    Arc::new(FixedAnchor(bounds))
}

fn drain(stream: &mut EventStream) -> Vec<TransportEvent> {
    let mut events = Vec::new();
    while let Some(Ok(event)) = stream.try_recv() {
        events.push(event);
    }
    events
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_show_then_timeout_hides_exactly_once() {
    let bus = EventBus::new(64);
    let mut stream = EventStream::new(bus.subscribe()).filter(|event| !event.is_periodic());
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator = h.coordinator.with_event_bus(bus);

    h.coordinator.show(3_000);
    assert!(h.coordinator.is_visible());
    assert_eq!(h.render.attach_count(), 1);

    h.advance(2_999);
    assert!(h.coordinator.is_visible());

    h.advance(1);
    assert!(!h.coordinator.is_visible());
    assert_eq!(h.render.detach_count(), 1);

    assert_eq!(h.advance(60_000), 0);
    assert_eq!(h.render.detach_count(), 1);

    let hidden = drain(&mut stream)
        .into_iter()
        .filter(|event| *event == TransportEvent::VisibilityChanged { visible: false })
        .count();
    assert_eq!(hidden, 1);
}

#[test]
fn test_repeated_show_keeps_single_fade_out() {
    let mut h = Harness::new(FakeEngine::new(200_000));

    h.coordinator.show(3_000);
    h.advance(1_000);
    h.coordinator.show(3_000);
    h.advance(1_000);
    h.coordinator.show(5_000);

    assert_eq!(h.fade_out_at(), Some(7_000));
    assert_eq!(h.coordinator.state().timeout_at, Some(Timestamp::from_millis(7_000)));
    // geometry is computed once per appearance
    assert_eq!(h.render.attach_count(), 1);

    h.advance(4_999);
    assert!(h.coordinator.is_visible());
    h.advance(1);
    assert!(!h.coordinator.is_visible());
}

#[test]
fn test_zero_timeout_is_persistent() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.show(0);

    assert_eq!(h.fade_out_at(), None);
    h.advance(3_600_000);
    assert!(h.coordinator.is_visible());
}

#[test]
fn test_zero_timeout_keeps_existing_fade_out() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.show(3_000);
    h.coordinator.show(0);
    assert_eq!(h.fade_out_at(), Some(3_000));
}

#[test]
fn test_hide_cancels_pending_tasks() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));
    h.coordinator.show_default();
    h.coordinator.hide();

    assert!(!h.coordinator.is_visible());
    assert!(h.coordinator.next_deadline().is_none());
}

#[test]
fn test_hide_swallows_already_removed_overlay() {
    let mut h = Harness::with_render(FakeEngine::new(200_000), RecordingRenderTarget::racing());
    h.coordinator.show_default();
    h.coordinator.hide();

    assert!(!h.coordinator.is_visible());
    assert_eq!(h.render.detach_count(), 1);
    assert!(!h.render.last_frame().unwrap().visible);
}

#[test]
fn test_compact_layout_for_narrow_anchor() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.set_anchor(Some(anchor(phone_bounds())));
    h.coordinator.show_default();

    let layout = h.coordinator.view().layout.unwrap();
    assert_eq!(layout.variant, SizeVariant::Compact);
    assert_eq!((layout.x, layout.y), (0, 120));
    assert_eq!(layout.level_bar_height, 180);
}

// ============================================================================
// Seeking & Progress
// ============================================================================

#[test]
fn test_seek_gesture_issues_exactly_one_seek() {
    for (value, expected) in [(0, 0), (285, 57_000), (333, 66_600), (1_000, 200_000)] {
        let mut h = Harness::new(FakeEngine::new(200_000));

        h.coordinator.on_seek_start();
        assert!(h.coordinator.is_dragging());
        h.coordinator.on_seek_change(value, ChangeOrigin::User);
        h.coordinator.on_seek_stop();

        assert_eq!(h.engine.seeks(), vec![expected], "slider value {}", value);
        assert!(!h.coordinator.is_dragging());
    }
}

#[test]
fn test_seek_without_duration_targets_zero() {
    let mut h = Harness::new(FakeEngine::new(0));
    h.coordinator.on_seek_change(500, ChangeOrigin::User);
    assert_eq!(h.engine.seeks(), vec![0]);
}

#[test]
fn test_progress_scenario() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.engine.set_position(57_000);
    h.engine.set_buffer(40);

    assert_eq!(h.coordinator.refresh_progress(), 57_000);

    let view = h.coordinator.view();
    assert_eq!(view.primary_progress, 285);
    assert_eq!(view.secondary_progress, 400);
    assert_eq!(h.render.last_frame().unwrap().primary_progress, 285);
}

#[test]
fn test_refresh_during_drag_returns_previous_position() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.engine.set_position(10_000);
    h.coordinator.refresh_progress();

    h.coordinator.on_seek_start();
    h.engine.set_position(90_000);

    assert_eq!(h.coordinator.refresh_progress(), 10_000);
    assert_eq!(h.coordinator.seek_slider().value(), 50);
}

#[test]
fn test_refresh_without_engine_is_noop() {
    let clock = Arc::new(ManualClock::new());
    let mut coordinator = TransportCoordinator::new(TransportConfig::default(), clock).unwrap();
    assert_eq!(coordinator.refresh_progress(), 0);
}

#[test]
fn test_tick_aligns_to_next_second_of_playback() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));
    h.engine.set_position(4_500);

    h.coordinator.show(3_000);
    assert_eq!(h.tick_at(), Some(0));

    h.coordinator.run_due();
    assert_eq!(h.tick_at(), Some(500));

    h.engine.set_position(5_000);
    h.advance(500);
    assert_eq!(h.tick_at(), Some(1_500));

    h.engine.set_position(6_020);
    h.advance(1_000);
    assert_eq!(h.tick_at(), Some(2_480));
}

#[test]
fn test_tick_stops_when_paused() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));
    h.coordinator.show_default();
    h.coordinator.run_due();
    assert!(h.tick_at().is_some());

    h.engine.set_playing(false);
    h.engine.set_position(1_000);
    h.advance(1_000);
    assert!(h.tick_at().is_none());
}

#[test]
fn test_seek_start_suspends_ticks() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));
    h.coordinator.show_default();
    h.coordinator.run_due();

    h.coordinator.on_seek_start();
    assert!(h.tick_at().is_none());
    assert_eq!(h.fade_out_at(), Some(3_600_000));
}

#[test]
fn test_seek_stop_leaves_single_tick() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));
    h.coordinator.show_default();
    h.coordinator.on_seek_start();
    h.advance(2_000);
    h.coordinator.on_seek_stop();

    assert_eq!(h.tick_at(), Some(2_000));
    assert_eq!(h.fade_out_at(), Some(5_000));
    assert_eq!(h.coordinator.next_deadline(), Some(Timestamp::from_millis(2_000)));
}

#[test]
fn test_fade_out_ignored_while_dragging() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.show_default();
    h.coordinator.on_seek_start();

    h.advance(3_600_000);
    assert!(h.coordinator.is_visible());
    assert!(h.coordinator.is_dragging());
}

#[test]
fn test_programmatic_slider_changes_never_reach_engine() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.engine.set_position(57_000);
    h.coordinator.refresh_progress();

    // widget that flags its echoes
    h.coordinator.on_seek_change(285, ChangeOrigin::Programmatic);

    // widget that reports every change as user input
    h.coordinator.refresh_progress();
    h.coordinator.on_seek_change(285, ChangeOrigin::User);

    h.coordinator.on_volume_change(10, ChangeOrigin::Programmatic);

    assert_eq!(h.coordinator.seek_slider().value(), 285);
    assert!(h.engine.calls().is_empty());
}

// ============================================================================
// Playback
// ============================================================================

#[test]
fn test_toggle_play_pause_updates_icon() {
    let mut h = Harness::new(FakeEngine::new(200_000));

    h.coordinator.toggle_play_pause();
    assert_eq!(h.engine.calls(), vec![EngineCall::Play]);
    assert_eq!(h.coordinator.view().play_pause, PlayPauseIcon::Pause);

    h.coordinator.toggle_play_pause();
    assert_eq!(h.engine.calls(), vec![EngineCall::Play, EngineCall::Pause]);
    assert_eq!(h.coordinator.view().play_pause, PlayPauseIcon::Play);
}

#[test]
fn test_play_pause_click_shows_controls() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.on_play_pause_click();
    assert!(h.coordinator.is_visible());
    assert_eq!(h.fade_out_at(), Some(3_000));
}

#[test]
fn test_unpausable_engine_disables_pause() {
    let mut h = Harness::new(FakeEngine::new(200_000).unpausable());
    h.coordinator.show_default();
    assert!(!h.coordinator.view().pause_enabled);

    h.coordinator.set_enabled(true);
    assert!(!h.coordinator.view().pause_enabled);
    assert!(h.coordinator.view().progress_enabled);

    h.coordinator.set_enabled(false);
    assert!(!h.coordinator.view().progress_enabled);
}

// ============================================================================
// Volume, Mute & Brightness
// ============================================================================

#[test]
fn test_attach_applies_initial_volume() {
    let clock = Arc::new(ManualClock::new());
    let engine = Arc::new(FakeEngine::new(1_000));
    let mut coordinator = TransportCoordinator::new(TransportConfig::default(), clock).unwrap();

    coordinator.attach(Some(port(&engine)), Some(anchor(tablet_bounds())));

    assert_eq!(engine.calls(), vec![EngineCall::SetVolume(0.5, 0.5)]);
    assert_eq!(coordinator.view().volume_level, 50);
}

#[test]
fn test_mute_double_toggle_restores_volume() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.on_volume_change(73, ChangeOrigin::User);
    let before = h.coordinator.volume_slider().fraction();

    h.coordinator.toggle_mute();
    assert!(h.coordinator.is_muted());
    assert_eq!(h.engine.last_volume(), Some((0.0, 0.0)));
    assert_eq!(h.coordinator.view().mute, MuteIcon::Muted);
    assert_eq!(h.coordinator.view().volume_level, 0);

    h.coordinator.toggle_mute();
    assert!(!h.coordinator.is_muted());
    assert_eq!(h.engine.last_volume(), Some((before, before)));
    assert_eq!(h.coordinator.view().volume_level, 73);
    assert_eq!(h.coordinator.state().volume_before_mute, None);
}

#[test]
fn test_mute_with_zero_volume_round_trips() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.on_volume_change(0, ChangeOrigin::User);

    h.coordinator.toggle_mute();
    assert!(h.coordinator.is_muted());
    assert_eq!(h.coordinator.state().volume_before_mute, Some(0.0));

    h.coordinator.toggle_mute();
    assert!(!h.coordinator.is_muted());
    assert_eq!(h.engine.last_volume(), Some((0.0, 0.0)));
}

#[test]
fn test_mute_restores_volume_off_the_slider_grid() {
    let clock = Arc::new(ManualClock::new());
    let config = TransportConfig::builder()
        .initial_volume(0.333)
        .build()
        .unwrap();
    let engine = Arc::new(FakeEngine::new(200_000));
    let mut coordinator = TransportCoordinator::new(config, clock).unwrap();
    coordinator.attach(Some(port(&engine)), Some(anchor(tablet_bounds())));
    assert_eq!(engine.last_volume(), Some((0.333, 0.333)));
    assert_eq!(coordinator.view().volume_level, 33);

    coordinator.toggle_mute();
    assert_eq!(coordinator.state().volume_before_mute, Some(0.333));
    coordinator.toggle_mute();

    assert!(!coordinator.is_muted());
    assert_eq!(engine.last_volume(), Some((0.333, 0.333)));
}

#[test]
fn test_state_serializes_with_pending_timeout() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.advance(250);
    h.coordinator.show_default();

    let state = h.coordinator.state();
    assert_eq!(state.timeout_at, Some(Timestamp::from_millis(3_250)));

    let json = serde_json::to_string(&state).unwrap();
    let back: TransportState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}

#[test]
fn test_mute_echo_is_filtered() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.toggle_mute();
    h.engine.clear_calls();

    h.coordinator.on_volume_change(0, ChangeOrigin::User);
    assert!(h.engine.calls().is_empty());
    assert!(h.coordinator.is_muted());
}

#[test]
fn test_user_volume_change_clears_mute() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.toggle_mute();

    h.coordinator.on_volume_start();
    h.coordinator.on_volume_change(40, ChangeOrigin::User);

    assert!(!h.coordinator.is_muted());
    assert_eq!(h.engine.last_volume(), Some((0.4, 0.4)));
    assert_eq!(h.coordinator.state().volume_before_mute, None);
}

#[test]
fn test_level_tracking_is_sticky_without_dragging() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));

    h.coordinator.on_volume_start();
    assert_eq!(h.fade_out_at(), Some(3_600_000));
    assert!(!h.coordinator.is_dragging());
    assert!(h.tick_at().is_some());

    h.advance(500);
    h.coordinator.on_volume_stop();
    assert_eq!(h.fade_out_at(), Some(3_500));
}

#[test]
fn test_brightness_goes_to_window_not_engine() {
    let window = Arc::new(FakeWindow::new(0.4));
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator = h
        .coordinator
        .with_brightness(window.clone() as Arc<dyn WindowBrightness>);
    assert_eq!(h.coordinator.view().brightness_level, 40);

    h.coordinator.on_brightness_start();
    h.coordinator.on_brightness_change(80, ChangeOrigin::User);
    h.coordinator.on_brightness_stop();

    assert_eq!(window.level(), 0.8);
    assert!(h.engine.calls().is_empty());
}

#[test]
fn test_select_panel_switches_slot() {
    let bus = EventBus::new(64);
    let mut stream = EventStream::new(bus.subscribe()).filter(|event| !event.is_periodic());
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator = h.coordinator.with_event_bus(bus);

    h.coordinator.select_panel(SidePanel::Brightness);

    assert_eq!(h.coordinator.view().panel, SidePanel::Brightness);
    assert!(h.coordinator.is_visible());
    assert!(drain(&mut stream).contains(&TransportEvent::PanelSelected {
        panel: SidePanel::Brightness
    }));
}

// ============================================================================
// Keys & Touch
// ============================================================================

#[test]
fn test_volume_keys_never_show_or_hide() {
    let mut h = Harness::new(FakeEngine::new(200_000));

    for code in [KeyCode::VolumeUp, KeyCode::VolumeDown, KeyCode::VolumeMute] {
        assert_eq!(
            h.coordinator.dispatch_key(KeyEvent::down(code)),
            KeyDisposition::PassThrough
        );
    }
    assert!(!h.coordinator.is_visible());
    assert_eq!(h.render.attach_count(), 0);

    h.coordinator.show_default();
    h.clock.advance(1_000);
    for code in [KeyCode::VolumeUp, KeyCode::VolumeDown, KeyCode::VolumeMute] {
        h.coordinator.dispatch_key(KeyEvent::down(code));
        h.coordinator.dispatch_key(KeyEvent::up(code));
    }
    assert!(h.coordinator.is_visible());
    assert_eq!(h.fade_out_at(), Some(3_000));
    assert!(h.engine.calls().is_empty());
}

#[test]
fn test_play_pause_keys_toggle_on_first_press_only() {
    let mut h = Harness::new(FakeEngine::new(200_000));

    let first = h.coordinator.dispatch_key(KeyEvent::down(KeyCode::Space));
    assert_eq!(first, KeyDisposition::Consumed);
    assert!(h.coordinator.is_visible());

    let repeat = h.coordinator.dispatch_key(KeyEvent::repeated(KeyCode::Space, 1));
    let release = h.coordinator.dispatch_key(KeyEvent::up(KeyCode::Space));
    assert_eq!(repeat, KeyDisposition::PassThrough);
    assert_eq!(release, KeyDisposition::PassThrough);

    h.coordinator.dispatch_key(KeyEvent::down(KeyCode::HeadsetHook));
    assert_eq!(h.engine.calls(), vec![EngineCall::Play, EngineCall::Pause]);
}

#[test]
fn test_stop_key_pauses_only_when_playing() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    assert!(h
        .coordinator
        .dispatch_key(KeyEvent::down(KeyCode::MediaStop))
        .is_consumed());
    assert!(h.engine.calls().is_empty());

    h.engine.set_playing(true);
    h.coordinator.dispatch_key(KeyEvent::down(KeyCode::MediaStop));
    assert_eq!(h.engine.calls(), vec![EngineCall::Pause]);
    assert_eq!(h.coordinator.view().play_pause, PlayPauseIcon::Play);
    assert!(!h.coordinator.is_visible());
}

#[test]
fn test_back_and_menu_hide_and_consume() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    for code in [KeyCode::Back, KeyCode::Menu] {
        h.coordinator.show_default();
        assert!(h.coordinator.dispatch_key(KeyEvent::down(code)).is_consumed());
        assert!(!h.coordinator.is_visible());
    }
}

#[test]
fn test_other_keys_show_and_pass_through() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    let disposition = h.coordinator.dispatch_key(KeyEvent::down(KeyCode::Other(21)));
    assert_eq!(disposition, KeyDisposition::PassThrough);
    assert!(h.coordinator.is_visible());
}

#[test]
fn test_touch_routing() {
    let mut h = Harness::new(FakeEngine::new(200_000));

    assert!(h.coordinator.on_controls_touch());
    assert!(h.coordinator.is_visible());

    assert!(!h.coordinator.on_backdrop_touch(TouchPhase::Move));
    assert!(h.coordinator.is_visible());
    assert!(!h.coordinator.on_backdrop_touch(TouchPhase::Down));
    assert!(!h.coordinator.is_visible());

    assert!(!h.coordinator.on_trackball());
    assert!(h.coordinator.is_visible());
}

// ============================================================================
// Binding
// ============================================================================

#[test]
fn test_attach_without_engine_is_noop() {
    let clock = Arc::new(ManualClock::new());
    let render = Arc::new(RecordingRenderTarget::default());
    let mut coordinator = TransportCoordinator::new(TransportConfig::default(), clock)
        .unwrap()
        .with_render_target(render.clone());

    coordinator.attach(None, Some(anchor(tablet_bounds())));
    coordinator.show_default();

    assert!(!coordinator.has_engine());
    assert!(!coordinator.is_visible());
    assert_eq!(render.attach_count(), 0);

    // without an engine every control collapses to a no-op
    coordinator.toggle_play_pause();
    coordinator.toggle_mute();
    coordinator.on_seek_change(500, ChangeOrigin::User);
    assert!(!coordinator.is_muted());
    assert!(!coordinator.suspend());
    assert!(coordinator.metadata().is_none());
}

#[test]
fn test_reattach_cancels_tasks_and_reshows() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));
    h.coordinator.show_default();
    h.advance(1_000);

    let replacement = Arc::new(FakeEngine::new(90_000));
    h.coordinator.attach_engine(Some(port(&replacement)));

    assert_eq!(replacement.calls(), vec![EngineCall::SetVolume(0.5, 0.5)]);
    assert_eq!(h.fade_out_at(), Some(4_000));
    assert_eq!(h.tick_at(), Some(1_000));

    h.engine.clear_calls();
    h.advance(10_000);
    assert!(h.engine.calls().is_empty());
    assert!(!h.coordinator.is_visible());
}

#[test]
fn test_detach_clears_engine_and_tasks() {
    let mut h = Harness::new(FakeEngine::new(200_000).playing(true));
    h.coordinator.show_default();
    h.coordinator.detach();

    assert!(!h.coordinator.has_engine());
    assert!(!h.coordinator.is_visible());
    assert!(h.coordinator.next_deadline().is_none());

    h.coordinator.toggle_play_pause();
    assert!(h.engine.calls().is_empty());
}

#[test]
fn test_clearing_anchor_hides_first() {
    let mut h = Harness::new(FakeEngine::new(200_000));
    h.coordinator.show_default();
    h.coordinator.set_anchor(None);

    assert!(!h.coordinator.is_visible());
    assert_eq!(h.render.detach_count(), 1);
    assert!(h.coordinator.view().layout.is_none());
}

#[test]
fn test_optional_capabilities_pass_through() {
    let h = Harness::new(FakeEngine::new(200_000).suspendable());
    assert!(h.coordinator.suspend());
    assert!(h.coordinator.resume());
    assert_eq!(
        h.coordinator.metadata().and_then(|meta| meta.title),
        Some("Big Buck Bunny".to_string())
    );
}

#[test]
fn test_metadata_is_forwarded_as_json() {
    let h = Harness::new(FakeEngine::new(200_000));
    let json = serde_json::to_value(h.coordinator.metadata()).unwrap();
    assert_eq!(json["title"], "Big Buck Bunny");

    // hosts may omit every optional field
    let parsed: bridge_traits::MediaMetadata =
        serde_json::from_str(r#"{"title":"Big Buck Bunny"}"#).unwrap();
    assert_eq!(Some(parsed), h.coordinator.metadata());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TransportConfig {
        seek_range_max: 0,
        ..TransportConfig::default()
    };
    let result = TransportCoordinator::new(config, Arc::new(ManualClock::new()));
    assert!(matches!(result, Err(core_transport::TransportError::Config(_))));
}
