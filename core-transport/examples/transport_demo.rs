//! # Transport Controls Example
//!
//! Drives a [`TransportCoordinator`] on a tokio task against an in-memory
//! engine: shows the controls, plays, scrubs, mutes, and lets the overlay
//! auto-hide.
//!
//! Run with: `cargo run --example transport_demo --package core-transport`

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{
    AnchorSurface, Bounds, ControlsView, MediaMetadata, OverlayLayout, PlaybackControlPort,
    RenderTarget,
};
use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
use core_runtime::{EventBus, TransportConfig, TransportEvent};
use core_transport::{spawn, ChangeOrigin, KeyCode, KeyEvent, TokioClock, TransportCoordinator};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// In-memory engine (for demonstration)
// ============================================================================

struct DemoEngine {
    started: Mutex<Option<tokio::time::Instant>>,
    offset_ms: Mutex<u64>,
    duration_ms: u64,
}

impl DemoEngine {
    fn new(duration_ms: u64) -> Self {
        Self {
            started: Mutex::new(None),
            offset_ms: Mutex::new(0),
            duration_ms,
        }
    }

    fn lock_offset(&self) -> u64 {
        self.offset_ms.lock().map(|offset| *offset).unwrap_or(0)
    }
}

impl PlaybackControlPort for DemoEngine {
    fn is_playing(&self) -> bool {
        self.started
            .lock()
            .map(|started| started.is_some())
            .unwrap_or(false)
    }

    fn play(&self) {
        if let Ok(mut started) = self.started.lock() {
            started.get_or_insert_with(tokio::time::Instant::now);
        }
    }

    fn pause(&self) {
        let position = self.position_ms();
        if let (Ok(mut started), Ok(mut offset)) = (self.started.lock(), self.offset_ms.lock()) {
            *started = None;
            *offset = position;
        }
    }

    fn seek_to(&self, position_ms: u64) {
        if let Ok(mut offset) = self.offset_ms.lock() {
            *offset = position_ms;
        }
        if let Ok(mut started) = self.started.lock() {
            if started.is_some() {
                *started = Some(tokio::time::Instant::now());
            }
        }
    }

    fn position_ms(&self) -> u64 {
        let elapsed = self
            .started
            .lock()
            .ok()
            .and_then(|started| *started)
            .map(|at| at.elapsed().as_millis() as u64)
            .unwrap_or(0);
        (self.lock_offset() + elapsed).min(self.duration_ms)
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    fn buffer_percent(&self) -> u8 {
        60
    }

    fn set_volume(&self, left: f32, right: f32) {
        println!("  engine volume -> {left:.2}/{right:.2}");
    }

    fn can_pause(&self) -> bool {
        true
    }

    fn try_suspend(&self) -> bool {
        false
    }

    fn try_resume(&self) -> bool {
        false
    }

    fn metadata(&self) -> Option<MediaMetadata> {
        Some(MediaMetadata::titled("Sintel (trailer)"))
    }
}

// ============================================================================
// Console surfaces
// ============================================================================

struct Screen;

impl AnchorSurface for Screen {
    fn bounds(&self) -> Bounds {
        Bounds::new(0, 0, 1280, 720)
    }
}

struct ConsoleOverlay;

impl RenderTarget for ConsoleOverlay {
    fn attach_overlay(&self, layout: &OverlayLayout) -> BridgeResult<()> {
        println!(
            "  overlay attached at ({}, {}) {}x{} [{:?}]",
            layout.x, layout.y, layout.width, layout.height, layout.variant
        );
        Ok(())
    }

    fn detach_overlay(&self) -> BridgeResult<()> {
        println!("  overlay removed");
        Ok(())
    }

    fn render(&self, view: &ControlsView) {
        if view.visible {
            println!(
                "  [{:?}] progress {}/{} volume {} {:?}",
                view.play_pause,
                view.primary_progress,
                view.secondary_progress,
                view.volume_level,
                view.mute
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(
        LoggingConfig::default()
            .with_format(LogFormat::Compact)
            .with_filter("warn,core_transport=debug"),
    )?;

    println!("=== Transport Controls Demo ===\n");

    let config = TransportConfig::builder().default_timeout_ms(2_000).build()?;
    let bus = EventBus::new(64);
    let mut events = bus.subscribe();

    let clock = Arc::new(TokioClock::new());
    let coordinator = TransportCoordinator::new(config, clock.clone())?
        .with_render_target(Arc::new(ConsoleOverlay))
        .with_event_bus(bus);
    let (handle, task) = spawn(coordinator, clock);

    let engine: Arc<dyn PlaybackControlPort> = Arc::new(DemoEngine::new(52_000));
    let anchor: Arc<dyn AnchorSurface> = Arc::new(Screen);
    handle.attach(Some(engine), Some(anchor)).await?;

    println!("1. Show controls and start playback");
    handle.show_default().await?;
    handle.toggle_play_pause().await?;
    tokio::time::sleep(Duration::from_millis(1_200)).await;

    println!("\n2. Scrub to the middle");
    handle.seek_start().await?;
    handle.seek_change(500, ChangeOrigin::User).await?;
    handle.seek_stop().await?;
    tokio::time::sleep(Duration::from_millis(600)).await;

    println!("\n3. Mute, then restore the previous volume");
    handle.toggle_mute().await?;
    handle.toggle_mute().await?;

    println!("\n4. Space toggles playback");
    let disposition = handle.dispatch_key(KeyEvent::down(KeyCode::Space)).await?;
    println!("  space -> {disposition:?}");

    println!("\n5. Wait for the overlay to hide itself");
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let (state, _) = handle.snapshot().await?;
    println!("  visible = {}", state.visible);

    handle.shutdown().await?;
    let coordinator = task.await?;
    println!("\n  engine attached after shutdown: {}", coordinator.has_engine());

    println!("\n6. Events observed");
    while let Ok(event) = events.try_recv() {
        if !matches!(event, TransportEvent::ProgressUpdated { .. }) {
            println!("  {event:?}");
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
