//! # Host Bridge Traits
//!
//! Capability traits the transport core consumes from its host, plus the
//! value types it hands back for rendering.
//!
//! ## Overview
//!
//! The transport coordinator sits between a playback engine and a set of
//! interactive controls. It owns no platform objects: everything it needs from
//! the outside world arrives through one of the traits below, and each host
//! (Android, desktop, web) ships its own implementations.
//!
//! ## Traits
//!
//! ### Playback
//! - [`PlaybackControlPort`](playback::PlaybackControlPort) - play/pause/seek/volume and position queries
//!
//! ### Surfaces
//! - [`AnchorSurface`](surface::AnchorSurface) - where the video sits on screen
//! - [`RenderTarget`](surface::RenderTarget) - hosts the floating overlay and draws [`ControlsView`](surface::ControlsView)
//! - [`WindowBrightness`](surface::WindowBrightness) - brightness of the hosting window
//!
//! ### Utilities
//! - [`Clock`](time::Clock) - Monotonic time source for deterministic testing
//! - [`LoggerSink`](time::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! Bridge calls that can fail return [`BridgeError`](error::BridgeError).
//! [`BridgeError::NotAttached`] is special: removing an overlay that is
//! already gone is a benign race and the core only logs it.
//!
//! ## Thread Safety
//!
//! On native targets every bridge trait requires `Send + Sync` (see
//! [`platform::PlatformSendSync`]) so the coordinator can be moved onto a
//! tokio task.

pub mod error;
pub mod platform;
pub mod playback;
pub mod surface;
pub mod time;

pub use error::BridgeError;

// Re-export commonly used types
pub use playback::{MediaMetadata, PlaybackControlPort};
pub use surface::{
    AnchorSurface, Bounds, ControlsView, MuteIcon, OverlayLayout, PlayPauseIcon, RenderTarget,
    SidePanel, SizeVariant, WindowBrightness,
};
pub use time::{Clock, ConsoleLogger, LogEntry, LogLevel, LoggerSink, ManualClock, SystemClock, Timestamp};
