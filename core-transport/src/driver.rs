//! # Transport Driver
//!
//! Runs a [`TransportCoordinator`] on a single tokio task.
//!
//! ## Overview
//!
//! The coordinator is not `Sync`-shared: one task owns it and every input
//! arrives as a [`TransportCommand`] over an `mpsc` channel. Between commands
//! the task sleeps until the coordinator's next deadline and then runs the due
//! tasks, so auto-hide and progress polling happen on the same turn as input
//! handling.
//!
//! ```text
//! ┌─────────────────┐  TransportCommand  ┌─────────────────┐
//! │ TransportHandle ├───────────────────>│ TransportDriver │──> TransportCoordinator
//! └─────────────────┘                    └────────┬────────┘
//!                                                 │ sleep_until(next_deadline)
//!                                                 └──> run_due()
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let clock = Arc::new(TokioClock::new());
//! let coordinator = TransportCoordinator::new(config, clock.clone())?;
//! let (driver, handle) = TransportDriver::new(coordinator, clock);
//! tokio::spawn(driver.run());
//!
//! handle.attach(Some(engine), Some(surface)).await?;
//! handle.show_default().await?;
//! ```

use crate::{
    coordinator::{TransportCoordinator, TransportState},
    input::{KeyDisposition, KeyEvent, TouchPhase},
    slider::ChangeOrigin,
    Result,
};
use bridge_traits::{
    time::duration_millis, AnchorSurface, Clock, ControlsView, PlaybackControlPort, SidePanel,
    Timestamp,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// Default command channel capacity.
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

// ============================================================================
// Clock
// ============================================================================

/// [`Clock`] on tokio's timeline, so paused-time tests control it.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// The tokio instant corresponding to `timestamp`.
    pub fn instant_at(&self, timestamp: Timestamp) -> Instant {
        self.origin + Duration::from_millis(timestamp.as_millis())
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(duration_millis(Instant::now() - self.origin))
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Input delivered to the driver task.
pub enum TransportCommand {
    Attach {
        engine: Option<Arc<dyn PlaybackControlPort>>,
        anchor: Option<Arc<dyn AnchorSurface>>,
    },
    AttachEngine(Option<Arc<dyn PlaybackControlPort>>),
    SetAnchor(Option<Arc<dyn AnchorSurface>>),
    Detach,

    Show { timeout_ms: u64 },
    ShowDefault,
    Hide,

    TogglePlayPause,
    PlayPauseClick,
    SeekStart,
    SeekChange { value: u32, origin: ChangeOrigin },
    SeekStop,

    VolumeStart,
    VolumeChange { value: u32, origin: ChangeOrigin },
    VolumeStop,
    BrightnessStart,
    BrightnessChange { value: u32, origin: ChangeOrigin },
    BrightnessStop,
    ToggleMute,
    MuteClick,
    SelectPanel(SidePanel),
    SetEnabled(bool),

    ControlsTouch,
    BackdropTouch(TouchPhase),
    Trackball,
    Key {
        event: KeyEvent,
        reply: oneshot::Sender<KeyDisposition>,
    },

    Snapshot {
        reply: oneshot::Sender<(TransportState, ControlsView)>,
    },
    /// Stop the driver and hand the coordinator back from [`TransportDriver::run`].
    Shutdown,
}

impl fmt::Debug for TransportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportCommand::Attach { .. } => "Attach",
            TransportCommand::AttachEngine(_) => "AttachEngine",
            TransportCommand::SetAnchor(_) => "SetAnchor",
            TransportCommand::Detach => "Detach",
            TransportCommand::Show { .. } => "Show",
            TransportCommand::ShowDefault => "ShowDefault",
            TransportCommand::Hide => "Hide",
            TransportCommand::TogglePlayPause => "TogglePlayPause",
            TransportCommand::PlayPauseClick => "PlayPauseClick",
            TransportCommand::SeekStart => "SeekStart",
            TransportCommand::SeekChange { .. } => "SeekChange",
            TransportCommand::SeekStop => "SeekStop",
            TransportCommand::VolumeStart => "VolumeStart",
            TransportCommand::VolumeChange { .. } => "VolumeChange",
            TransportCommand::VolumeStop => "VolumeStop",
            TransportCommand::BrightnessStart => "BrightnessStart",
            TransportCommand::BrightnessChange { .. } => "BrightnessChange",
            TransportCommand::BrightnessStop => "BrightnessStop",
            TransportCommand::ToggleMute => "ToggleMute",
            TransportCommand::MuteClick => "MuteClick",
            TransportCommand::SelectPanel(_) => "SelectPanel",
            TransportCommand::SetEnabled(_) => "SetEnabled",
            TransportCommand::ControlsTouch => "ControlsTouch",
            TransportCommand::BackdropTouch(_) => "BackdropTouch",
            TransportCommand::Trackball => "Trackball",
            TransportCommand::Key { .. } => "Key",
            TransportCommand::Snapshot { .. } => "Snapshot",
            TransportCommand::Shutdown => "Shutdown",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Handle
// ============================================================================

/// Cloneable sender side of a running [`TransportDriver`].
///
/// Every method fails with [`TransportError::DriverStopped`](crate::TransportError::DriverStopped) once the driver
/// task has exited.
#[derive(Debug, Clone)]
pub struct TransportHandle {
    sender: mpsc::Sender<TransportCommand>,
}

impl TransportHandle {
    pub async fn send(&self, command: TransportCommand) -> Result<()> {
        self.sender.send(command).await?;
        Ok(())
    }

    pub async fn attach(
        &self,
        engine: Option<Arc<dyn PlaybackControlPort>>,
        anchor: Option<Arc<dyn AnchorSurface>>,
    ) -> Result<()> {
        self.send(TransportCommand::Attach { engine, anchor }).await
    }

    pub async fn detach(&self) -> Result<()> {
        self.send(TransportCommand::Detach).await
    }

    pub async fn show(&self, timeout_ms: u64) -> Result<()> {
        self.send(TransportCommand::Show { timeout_ms }).await
    }

    pub async fn show_default(&self) -> Result<()> {
        self.send(TransportCommand::ShowDefault).await
    }

    pub async fn hide(&self) -> Result<()> {
        self.send(TransportCommand::Hide).await
    }

    pub async fn toggle_play_pause(&self) -> Result<()> {
        self.send(TransportCommand::TogglePlayPause).await
    }

    pub async fn seek_start(&self) -> Result<()> {
        self.send(TransportCommand::SeekStart).await
    }

    pub async fn seek_change(&self, value: u32, origin: ChangeOrigin) -> Result<()> {
        self.send(TransportCommand::SeekChange { value, origin })
            .await
    }

    pub async fn seek_stop(&self) -> Result<()> {
        self.send(TransportCommand::SeekStop).await
    }

    pub async fn toggle_mute(&self) -> Result<()> {
        self.send(TransportCommand::ToggleMute).await
    }

    /// Route a key and wait for the coordinator's verdict.
    pub async fn dispatch_key(&self, event: KeyEvent) -> Result<KeyDisposition> {
        let (reply, response) = oneshot::channel();
        self.send(TransportCommand::Key { event, reply }).await?;
        Ok(response.await?)
    }

    /// Current state and rendered view.
    pub async fn snapshot(&self) -> Result<(TransportState, ControlsView)> {
        let (reply, response) = oneshot::channel();
        self.send(TransportCommand::Snapshot { reply }).await?;
        Ok(response.await?)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(TransportCommand::Shutdown).await
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Owns a coordinator and feeds it commands and timer deadlines.
pub struct TransportDriver {
    coordinator: TransportCoordinator,
    clock: Arc<TokioClock>,
    receiver: mpsc::Receiver<TransportCommand>,
}

impl TransportDriver {
    /// `clock` must be the clock `coordinator` was built with.
    pub fn new(
        coordinator: TransportCoordinator,
        clock: Arc<TokioClock>,
    ) -> (Self, TransportHandle) {
        Self::with_capacity(coordinator, clock, DEFAULT_COMMAND_BUFFER)
    }

    pub fn with_capacity(
        coordinator: TransportCoordinator,
        clock: Arc<TokioClock>,
        capacity: usize,
    ) -> (Self, TransportHandle) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                coordinator,
                clock,
                receiver,
            },
            TransportHandle { sender },
        )
    }

    /// Process commands and deadlines until shutdown or until every handle is
    /// dropped. Returns the coordinator, detached from its engine.
    pub async fn run(mut self) -> TransportCoordinator {
        debug!("transport driver started");

        loop {
            let deadline = self
                .coordinator
                .next_deadline()
                .map(|at| self.clock.instant_at(at));

            tokio::select! {
                command = self.receiver.recv() => match command {
                    Some(TransportCommand::Shutdown) | None => break,
                    Some(command) => self.apply(command),
                },
                _ = sleep_until_deadline(deadline) => {
                    let ran = self.coordinator.run_due();
                    trace!(ran, "timer tasks executed");
                }
            }
        }

        self.coordinator.detach();
        debug!("transport driver stopped");
        self.coordinator
    }

    fn apply(&mut self, command: TransportCommand) {
        trace!(?command, "command received");
        let coordinator = &mut self.coordinator;

        match command {
            TransportCommand::Attach { engine, anchor } => coordinator.attach(engine, anchor),
            TransportCommand::AttachEngine(engine) => coordinator.attach_engine(engine),
            TransportCommand::SetAnchor(anchor) => coordinator.set_anchor(anchor),
            TransportCommand::Detach => coordinator.detach(),
            TransportCommand::Show { timeout_ms } => coordinator.show(timeout_ms),
            TransportCommand::ShowDefault => coordinator.show_default(),
            TransportCommand::Hide => coordinator.hide(),
            TransportCommand::TogglePlayPause => coordinator.toggle_play_pause(),
            TransportCommand::PlayPauseClick => coordinator.on_play_pause_click(),
            TransportCommand::SeekStart => coordinator.on_seek_start(),
            TransportCommand::SeekChange { value, origin } => {
                coordinator.on_seek_change(value, origin)
            }
            TransportCommand::SeekStop => coordinator.on_seek_stop(),
            TransportCommand::VolumeStart => coordinator.on_volume_start(),
            TransportCommand::VolumeChange { value, origin } => {
                coordinator.on_volume_change(value, origin)
            }
            TransportCommand::VolumeStop => coordinator.on_volume_stop(),
            TransportCommand::BrightnessStart => coordinator.on_brightness_start(),
            TransportCommand::BrightnessChange { value, origin } => {
                coordinator.on_brightness_change(value, origin)
            }
            TransportCommand::BrightnessStop => coordinator.on_brightness_stop(),
            TransportCommand::ToggleMute => coordinator.toggle_mute(),
            TransportCommand::MuteClick => coordinator.on_mute_click(),
            TransportCommand::SelectPanel(panel) => coordinator.select_panel(panel),
            TransportCommand::SetEnabled(enabled) => coordinator.set_enabled(enabled),
            TransportCommand::ControlsTouch => {
                coordinator.on_controls_touch();
            }
            TransportCommand::BackdropTouch(phase) => {
                coordinator.on_backdrop_touch(phase);
            }
            TransportCommand::Trackball => {
                coordinator.on_trackball();
            }
            TransportCommand::Key { event, reply } => {
                let disposition = coordinator.dispatch_key(event);
                // the caller may have given up waiting
                reply.send(disposition).ok();
            }
            TransportCommand::Snapshot { reply } => {
                reply.send((coordinator.state(), coordinator.view())).ok();
            }
            TransportCommand::Shutdown => {}
        }
    }
}

impl fmt::Debug for TransportDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportDriver")
            .field("coordinator", &self.coordinator)
            .finish()
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Spawn a driver for `coordinator` on the current tokio runtime.
pub fn spawn(
    coordinator: TransportCoordinator,
    clock: Arc<TokioClock>,
) -> (TransportHandle, tokio::task::JoinHandle<TransportCoordinator>) {
    let (driver, handle) = TransportDriver::new(coordinator, clock);
    (handle, tokio::spawn(driver.run()))
}
