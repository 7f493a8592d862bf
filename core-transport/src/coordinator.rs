//! # Transport Coordinator
//!
//! Mediates between a playback engine and the floating transport controls.
//!
//! ## Overview
//!
//! The `TransportCoordinator` owns every piece of mutable transport state:
//! - Overlay visibility and its auto-hide deadline
//! - The seek drag flag that freezes progress polling
//! - Mute state and the volume to restore on unmute
//! - The three sliders (seek, volume, brightness) and what they display
//!
//! It turns input (slider gestures, button clicks, keys, touches) into
//! [`PlaybackControlPort`] calls and keeps the rendered values in step with
//! the engine through a position-aligned progress tick.
//!
//! ## Scheduling
//!
//! Delayed work lives in a [`VisibilityTimer`]. Nothing fires on its own:
//! the owner calls [`TransportCoordinator::run_due`] whenever the clock may
//! have passed [`TransportCoordinator::next_deadline`]. The
//! [`TransportDriver`](crate::TransportDriver) does this on a tokio task; tests
//! do it by hand with a [`ManualClock`](bridge_traits::ManualClock).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_traits::SystemClock;
//! use core_runtime::TransportConfig;
//! use core_transport::TransportCoordinator;
//! use std::sync::Arc;
//!
//! let mut coordinator = TransportCoordinator::new(TransportConfig::default(), Arc::new(SystemClock::new()))?
//!     .with_render_target(render_target);
//!
//! coordinator.attach(Some(engine), Some(video_surface));
//! coordinator.show_default();
//! ```
//!
//! ## Error Handling
//!
//! Operations never fail. A missing engine or anchor turns an operation into a
//! no-op, and removing an overlay that is already gone is logged and ignored.

use crate::{
    input::{KeyCode, KeyDisposition, KeyEvent, TouchPhase},
    layout::compute_layout,
    slider::{ChangeOrigin, SliderAdapter},
    timer::{ScheduledTask, TaskKind, VisibilityTimer},
    Result,
};
use bridge_traits::{
    AnchorSurface, Clock, ControlsView, MediaMetadata, MuteIcon, OverlayLayout, PlayPauseIcon,
    PlaybackControlPort, RenderTarget, SidePanel, Timestamp, WindowBrightness,
};
use core_runtime::{EventBus, TransportConfig, TransportEvent};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Snapshot of the coordinator's transport state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportState {
    pub visible: bool,
    pub dragging: bool,
    pub muted: bool,
    /// Volume fraction restored by the next unmute.
    pub volume_before_mute: Option<f32>,
    /// Deadline of the pending auto-hide, if any.
    pub timeout_at: Option<Timestamp>,
    /// Position returned by the last successful progress refresh.
    pub last_position_ms: u64,
}

/// Coordinates a playback engine with its on-screen transport controls.
pub struct TransportCoordinator {
    config: TransportConfig,
    clock: Arc<dyn Clock>,

    // Collaborators
    engine: Option<Arc<dyn PlaybackControlPort>>,
    anchor: Option<Arc<dyn AnchorSurface>>,
    render_target: Option<Arc<dyn RenderTarget>>,
    window: Option<Arc<dyn WindowBrightness>>,
    events: Option<EventBus>,

    timer: VisibilityTimer,

    seek: SliderAdapter,
    volume: SliderAdapter,
    brightness: SliderAdapter,
    secondary_progress: u32,

    visible: bool,
    dragging: bool,
    muted: bool,
    /// Volume last sent to the engine; the volume slider only holds it
    /// rounded to its grid.
    engine_volume: f32,
    volume_before_mute: Option<f32>,
    last_position_ms: u64,

    layout: Option<OverlayLayout>,
    play_pause: PlayPauseIcon,
    controls_enabled: bool,
    pause_enabled: bool,
    panel: SidePanel,
}

impl TransportCoordinator {
    /// Create a coordinator with no engine, anchor or host bridges bound.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Config`](crate::TransportError::Config) if
    /// `config` fails validation.
    pub fn new(config: TransportConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;

        let initial_volume = config.initial_volume;
        let mut volume = SliderAdapter::new(config.level_range_max);
        volume.set_fraction(initial_volume);

        Ok(Self {
            seek: SliderAdapter::new(config.seek_range_max),
            brightness: SliderAdapter::new(config.level_range_max),
            volume,
            config,
            clock,
            engine: None,
            anchor: None,
            render_target: None,
            window: None,
            events: None,
            timer: VisibilityTimer::new(),
            secondary_progress: 0,
            visible: false,
            dragging: false,
            muted: false,
            engine_volume: initial_volume,
            volume_before_mute: None,
            last_position_ms: 0,
            layout: None,
            play_pause: PlayPauseIcon::Play,
            controls_enabled: true,
            pause_enabled: true,
            panel: SidePanel::Volume,
        })
    }

    /// Host that owns the overlay window and draws [`ControlsView`]s.
    pub fn with_render_target(mut self, render_target: Arc<dyn RenderTarget>) -> Self {
        self.render_target = Some(render_target);
        self
    }

    /// Window brightness collaborator. The brightness slider starts at its
    /// current level.
    pub fn with_brightness(mut self, window: Arc<dyn WindowBrightness>) -> Self {
        self.brightness.set_fraction(window.brightness());
        self.window = Some(window);
        self
    }

    /// Publish [`TransportEvent`]s on `events`.
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    // ========================================================================
    // Binding
    // ========================================================================

    /// Bind an engine and the surface the overlay floats above.
    ///
    /// Does nothing at all when `engine` is `None`.
    pub fn attach(
        &mut self,
        engine: Option<Arc<dyn PlaybackControlPort>>,
        anchor: Option<Arc<dyn AnchorSurface>>,
    ) {
        if engine.is_none() {
            debug!("attach without an engine ignored");
            return;
        }
        self.set_anchor(anchor);
        self.attach_engine(engine);
    }

    /// Swap the bound engine. Pending tasks always target the previous engine
    /// and are cancelled.
    pub fn attach_engine(&mut self, engine: Option<Arc<dyn PlaybackControlPort>>) {
        self.timer.cancel_all();
        self.dragging = false;
        self.seek.end_tracking();

        let Some(engine) = engine else {
            debug!("engine detached");
            self.engine = None;
            self.publish();
            return;
        };

        debug!("engine attached");
        self.engine = Some(engine.clone());

        let initial = self.config.initial_volume;
        self.volume.set_fraction(initial);
        engine.set_volume(initial, initial);
        self.engine_volume = initial;
        self.muted = false;
        self.volume_before_mute = None;

        if let Some(window) = &self.window {
            self.brightness.set_fraction(window.brightness());
        }

        self.update_play_pause();

        if self.visible {
            self.show_default();
        } else {
            self.publish();
        }
    }

    /// Bind or clear the anchor surface. Clearing it hides the overlay first.
    pub fn set_anchor(&mut self, anchor: Option<Arc<dyn AnchorSurface>>) {
        match anchor {
            Some(anchor) => {
                if self.visible {
                    self.layout = Some(compute_layout(anchor.bounds(), &self.config));
                }
                self.anchor = Some(anchor);
                self.publish();
            }
            None => {
                self.hide();
                self.anchor = None;
                self.layout = None;
                self.publish();
            }
        }
    }

    /// Hide the overlay, cancel all pending work and release the engine.
    pub fn detach(&mut self) {
        self.hide();
        self.timer.cancel_all();
        self.dragging = false;
        self.seek.end_tracking();
        self.engine = None;
        debug!("coordinator detached");
        self.publish();
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    // ========================================================================
    // Visibility
    // ========================================================================

    /// Show the overlay, hiding it again after `timeout_ms`.
    ///
    /// A zero timeout keeps it up until [`hide`](Self::hide). Calling this
    /// while shown only refreshes progress and re-arms the timers.
    pub fn show(&mut self, timeout_ms: u64) {
        if !self.visible {
            if let Some(anchor) = self.anchor.clone() {
                let layout = compute_layout(anchor.bounds(), &self.config);

                if let Some(render_target) = &self.render_target {
                    if let Err(err) = render_target.attach_overlay(&layout) {
                        error!(error = %err, "failed to attach overlay");
                        return;
                    }
                }

                self.layout = Some(layout);
                self.visible = true;
                self.disable_unsupported_controls();
                debug!(
                    width = layout.width,
                    height = layout.height,
                    variant = ?layout.variant,
                    "controls shown"
                );
                self.emit(TransportEvent::VisibilityChanged { visible: true });
            }
        }

        self.update_play_pause();
        self.refresh_progress();

        let now = self.clock.now();
        self.timer.schedule(TaskKind::ProgressTick, now, 0);
        if timeout_ms != 0 {
            self.timer.schedule(TaskKind::FadeOut, now, timeout_ms);
        }

        self.publish();
    }

    /// [`show`](Self::show) with the configured default timeout.
    pub fn show_default(&mut self) {
        self.show(self.config.default_timeout_ms);
    }

    /// Remove the overlay. A no-op without an anchor or when already hidden.
    pub fn hide(&mut self) {
        if self.anchor.is_none() || !self.visible {
            return;
        }

        self.timer.cancel(TaskKind::ProgressTick);
        self.timer.cancel(TaskKind::FadeOut);

        if let Err(err) = self.remove_overlay() {
            error!(error = %err, "failed to remove overlay");
        }

        self.visible = false;
        debug!("controls hidden");
        self.emit(TransportEvent::VisibilityChanged { visible: false });
        self.publish();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn remove_overlay(&self) -> Result<()> {
        let Some(render_target) = &self.render_target else {
            return Ok(());
        };

        match render_target.detach_overlay() {
            Ok(()) => Ok(()),
            Err(err) if err.is_benign_race() => {
                warn!(error = %err, "overlay already removed");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Pause when playing, play otherwise.
    pub fn toggle_play_pause(&mut self) {
        let Some(engine) = self.engine.clone() else {
            return;
        };

        if engine.is_playing() {
            engine.pause();
        } else {
            engine.play();
        }

        self.update_play_pause();
        self.emit(TransportEvent::PlaybackToggled {
            playing: engine.is_playing(),
        });
        self.publish();
    }

    /// Play/pause button click.
    pub fn on_play_pause_click(&mut self) {
        self.toggle_play_pause();
        self.show_default();
    }

    /// The user grabbed the seek bar.
    pub fn on_seek_start(&mut self) {
        self.show(self.config.sticky_timeout_ms);
        self.dragging = true;
        self.seek.begin_tracking();
        // no progress refresh while the thumb is held
        self.timer.cancel(TaskKind::ProgressTick);
        debug!("seek drag started");
        self.publish();
    }

    /// Seek bar value notification. Only user-originated changes seek.
    pub fn on_seek_change(&mut self, value: u32, origin: ChangeOrigin) {
        if self.seek.on_widget_change(value, origin).is_none() {
            return;
        }
        let Some(engine) = self.engine.clone() else {
            return;
        };

        let duration = engine.duration_ms();
        let target = scale_rounded(
            duration,
            u64::from(self.seek.value()),
            u64::from(self.seek.max()),
        )
        .min(duration);

        engine.seek_to(target);
        trace!(target_ms = target, "seek requested");
        self.emit(TransportEvent::SeekRequested {
            position_ms: target,
        });
    }

    /// The user released the seek bar.
    pub fn on_seek_stop(&mut self) {
        self.dragging = false;
        self.seek.end_tracking();
        self.refresh_progress();
        self.update_play_pause();
        self.show_default();

        // show() is a no-op for layout when already visible; make sure exactly
        // one tick is pending either way
        let now = self.clock.now();
        self.timer.schedule(TaskKind::ProgressTick, now, 0);
        debug!("seek drag finished");
        self.publish();
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    // ========================================================================
    // Volume & Brightness
    // ========================================================================

    pub fn on_volume_start(&mut self) {
        self.volume.begin_tracking();
        self.show(self.config.sticky_timeout_ms);
    }

    /// Volume bar value notification. Only user-originated changes reach
    /// the engine.
    pub fn on_volume_change(&mut self, value: u32, origin: ChangeOrigin) {
        let Some(level) = self.volume.on_widget_change(value, origin) else {
            return;
        };

        if let Some(engine) = &self.engine {
            engine.set_volume(level, level);
            self.engine_volume = level;
        }

        if self.muted {
            self.muted = false;
            self.volume_before_mute = None;
            self.emit(TransportEvent::MuteChanged { muted: false });
        }

        self.emit(TransportEvent::VolumeChanged { level });
        self.publish();
    }

    pub fn on_volume_stop(&mut self) {
        self.volume.end_tracking();
        self.show_default();
    }

    pub fn on_brightness_start(&mut self) {
        self.brightness.begin_tracking();
        self.show(self.config.sticky_timeout_ms);
    }

    /// Brightness bar value notification, forwarded to the window.
    pub fn on_brightness_change(&mut self, value: u32, origin: ChangeOrigin) {
        let Some(level) = self.brightness.on_widget_change(value, origin) else {
            return;
        };

        if let Some(window) = &self.window {
            window.set_brightness(level);
        }

        self.emit(TransportEvent::BrightnessChanged { level });
        self.publish();
    }

    pub fn on_brightness_stop(&mut self) {
        self.brightness.end_tracking();
        self.show_default();
    }

    /// Mute, remembering the current volume, or restore it.
    pub fn toggle_mute(&mut self) {
        let Some(engine) = self.engine.clone() else {
            return;
        };

        if self.muted {
            let restored = self
                .volume_before_mute
                .take()
                .unwrap_or(self.config.initial_volume);
            self.volume.set_fraction(restored);
            engine.set_volume(restored, restored);
            self.engine_volume = restored;
            self.muted = false;
            debug!(level = restored, "unmuted");
        } else {
            self.volume_before_mute = Some(self.engine_volume);
            self.volume.set_value(0);
            engine.set_volume(0.0, 0.0);
            self.engine_volume = 0.0;
            self.muted = true;
            debug!("muted");
        }

        self.emit(TransportEvent::MuteChanged { muted: self.muted });
        self.publish();
    }

    /// Mute button click.
    pub fn on_mute_click(&mut self) {
        self.toggle_mute();
        self.show_default();
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Switch the shared side slot between the volume and brightness bars.
    pub fn select_panel(&mut self, panel: SidePanel) {
        if self.panel != panel {
            self.panel = panel;
            self.emit(TransportEvent::PanelSelected { panel });
        }
        self.show_default();
    }

    // ========================================================================
    // Progress & Timers
    // ========================================================================

    /// Re-read the engine position into the seek bar.
    ///
    /// Returns the position in milliseconds. Without an engine, or while the
    /// seek bar is being dragged, nothing is read and the previous position is
    /// returned.
    pub fn refresh_progress(&mut self) -> u64 {
        let Some(engine) = self.engine.clone() else {
            return self.last_position_ms;
        };
        if self.dragging {
            return self.last_position_ms;
        }

        let position = engine.position_ms();
        let duration = engine.duration_ms();

        if duration > 0 {
            let primary = scale_rounded(u64::from(self.seek.max()), position.min(duration), duration);
            self.seek.set_value(primary as u32);
        }

        let buffered = u32::from(engine.buffer_percent().min(100));
        self.secondary_progress = buffered * self.seek.max() / 100;
        self.last_position_ms = position;

        trace!(
            position_ms = position,
            duration_ms = duration,
            primary = self.seek.value(),
            secondary = self.secondary_progress,
            "progress refreshed"
        );
        self.emit(TransportEvent::ProgressUpdated {
            position_ms: position,
            duration_ms: duration,
            primary: self.seek.value(),
            secondary: self.secondary_progress,
        });
        self.publish();

        position
    }

    /// Run every task that is due, in deadline order. Returns how many ran.
    pub fn run_due(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.timer.pop_due(self.clock.now()) {
            self.run_task(task);
            ran += 1;
        }
        ran
    }

    /// When [`run_due`](Self::run_due) next has work.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timer.next_deadline()
    }

    /// Pending task of `kind`, if any.
    pub fn pending_task(&self, kind: TaskKind) -> Option<ScheduledTask> {
        self.timer.pending(kind)
    }

    fn run_task(&mut self, task: ScheduledTask) {
        trace!(kind = %task.kind, fire_at = %task.fire_at, "task due");

        match task.kind {
            TaskKind::FadeOut => {
                if self.dragging {
                    debug!("fade-out ignored while dragging");
                    return;
                }
                self.hide();
            }
            TaskKind::ProgressTick => {
                let Some(engine) = self.engine.clone() else {
                    return;
                };

                let position = self.refresh_progress();
                if !self.dragging && self.visible && engine.is_playing() {
                    let interval = self.config.progress_tick_interval_ms;
                    let delay = interval - position % interval;
                    let next = self
                        .timer
                        .schedule(TaskKind::ProgressTick, self.clock.now(), delay);
                    trace!(delay_ms = delay, fire_at = %next.fire_at, "progress tick re-armed");
                }
            }
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Route a hardware key. Volume keys are never handled here.
    pub fn dispatch_key(&mut self, event: KeyEvent) -> KeyDisposition {
        if event.code.is_play_pause() && event.is_unique_down() {
            self.toggle_play_pause();
            self.show_default();
            return KeyDisposition::Consumed;
        }

        match event.code {
            KeyCode::MediaStop => {
                if let Some(engine) = self.engine.clone() {
                    if engine.is_playing() {
                        engine.pause();
                        self.update_play_pause();
                        self.emit(TransportEvent::PlaybackToggled { playing: false });
                        self.publish();
                    }
                }
                KeyDisposition::Consumed
            }
            code if code.is_volume() => KeyDisposition::PassThrough,
            code if code.is_dismiss() => {
                self.hide();
                KeyDisposition::Consumed
            }
            _ => {
                self.show_default();
                KeyDisposition::PassThrough
            }
        }
    }

    /// A touch anywhere on the controls.
    pub fn on_controls_touch(&mut self) -> bool {
        self.show_default();
        true
    }

    /// A touch on the transparent backdrop around the controls. Never
    /// consumes the touch.
    pub fn on_backdrop_touch(&mut self, phase: TouchPhase) -> bool {
        if phase == TouchPhase::Down && self.visible {
            self.hide();
        }
        false
    }

    /// Trackball motion over the controls.
    pub fn on_trackball(&mut self) -> bool {
        self.show_default();
        false
    }

    // ========================================================================
    // Controls state
    // ========================================================================

    /// Enable or disable the play/pause and seek controls.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
        self.pause_enabled = enabled;
        self.disable_unsupported_controls();
        self.publish();
    }

    fn disable_unsupported_controls(&mut self) {
        if let Some(engine) = &self.engine {
            if !engine.can_pause() {
                self.pause_enabled = false;
            }
        }
    }

    fn update_play_pause(&mut self) {
        if let Some(engine) = &self.engine {
            self.play_pause = if engine.is_playing() {
                PlayPauseIcon::Pause
            } else {
                PlayPauseIcon::Play
            };
        }
    }

    // ========================================================================
    // Optional engine capabilities
    // ========================================================================

    /// Ask the engine to release decoder resources. `false` when unsupported
    /// or unbound.
    pub fn suspend(&self) -> bool {
        self.engine.as_ref().is_some_and(|engine| engine.try_suspend())
    }

    pub fn resume(&self) -> bool {
        self.engine.as_ref().is_some_and(|engine| engine.try_resume())
    }

    pub fn metadata(&self) -> Option<MediaMetadata> {
        self.engine.as_ref().and_then(|engine| engine.metadata())
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Everything the UI layer renders.
    pub fn view(&self) -> ControlsView {
        ControlsView {
            visible: self.visible,
            layout: self.layout,
            play_pause: self.play_pause,
            pause_enabled: self.pause_enabled,
            progress_enabled: self.controls_enabled,
            mute: if self.muted {
                MuteIcon::Muted
            } else {
                MuteIcon::Unmuted
            },
            primary_progress: self.seek.value(),
            secondary_progress: self.secondary_progress,
            volume_level: self.volume.value(),
            brightness_level: self.brightness.value(),
            panel: self.panel,
        }
    }

    pub fn state(&self) -> TransportState {
        TransportState {
            visible: self.visible,
            dragging: self.dragging,
            muted: self.muted,
            volume_before_mute: self.volume_before_mute,
            timeout_at: self.timer.pending(TaskKind::FadeOut).map(|task| task.fire_at),
            last_position_ms: self.last_position_ms,
        }
    }

    pub fn seek_slider(&self) -> &SliderAdapter {
        &self.seek
    }

    pub fn volume_slider(&self) -> &SliderAdapter {
        &self.volume
    }

    pub fn brightness_slider(&self) -> &SliderAdapter {
        &self.brightness
    }

    fn publish(&self) {
        if let Some(render_target) = &self.render_target {
            render_target.render(&self.view());
        }
    }

    fn emit(&self, event: TransportEvent) {
        if let Some(events) = &self.events {
            // no subscribers is fine
            events.emit(event).ok();
        }
    }
}

impl fmt::Debug for TransportCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportCoordinator")
            .field("has_engine", &self.engine.is_some())
            .field("has_anchor", &self.anchor.is_some())
            .field("state", &self.state())
            .field("pending_tasks", &self.timer.pending_count())
            .finish()
    }
}

/// `round(amount * numerator / denominator)` without intermediate overflow.
fn scale_rounded(amount: u64, numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let product = u128::from(amount) * u128::from(numerator);
    let denominator = u128::from(denominator);
    let rounded = (product + denominator / 2) / denominator;
    u64::try_from(rounded).unwrap_or(u64::MAX)
}
