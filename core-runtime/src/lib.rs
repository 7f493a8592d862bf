//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the transport core:
//! - Logging and tracing infrastructure
//! - Configuration management
//! - Event bus system
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the coordinator depends on. It
//! establishes the logging conventions, the tunables of the controls overlay,
//! and the event broadcasting used to observe transport activity.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::TransportConfig;
pub use error::{Error, Result};
pub use events::{EventBus, TransportEvent};
