//! # Transport Control Module
//!
//! Coordinates a playback engine with an on-screen transport overlay.
//!
//! ## Overview
//!
//! This module handles:
//! - Showing and auto-hiding the controls overlay
//! - Seek, volume and brightness gestures, filtered for programmatic echoes
//! - Position polling aligned to whole seconds of playback
//! - Key, touch and trackball routing
//! - Running all of the above on a single tokio task

pub mod coordinator;
pub mod driver;
pub mod error;
pub mod input;
pub mod layout;
pub mod slider;
pub mod timer;

pub use coordinator::{TransportCoordinator, TransportState};
pub use driver::{spawn, TokioClock, TransportCommand, TransportDriver, TransportHandle};
pub use error::{Result, TransportError};
pub use input::{KeyAction, KeyCode, KeyDisposition, KeyEvent, TouchPhase};
pub use layout::compute_layout;
pub use slider::{ChangeOrigin, SliderAdapter};
pub use timer::{ScheduledTask, TaskKind, VisibilityTimer};
