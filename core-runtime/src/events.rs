//! # Event Bus System
//!
//! Broadcasts what the transport coordinator does, using `tokio::sync::broadcast`.
//! Hosts subscribe to drive analytics, accessibility announcements, or
//! secondary displays without coupling them to the coordinator.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────┐  emit   ┌───────────┐  subscribe  ┌────────────┐
//! │ TransportCoordinator├────────>│ EventBus  ├────────────>│ Subscriber │
//! └─────────────────────┘         └───────────┘             └────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use core_runtime::events::{EventBus, TransportEvent};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let bus = EventBus::new(16);
//! let mut rx = bus.subscribe();
//!
//! bus.emit(TransportEvent::VisibilityChanged { visible: true }).ok();
//!
//! let event = rx.recv().await.unwrap();
//! assert_eq!(event, TransportEvent::VisibilityChanged { visible: true });
//! # }
//! ```
//!
//! ## Error Handling
//!
//! - **`RecvError::Lagged(n)`**: the subscriber missed `n` events; it can keep
//!   receiving. Progress updates arrive roughly once a second while playing,
//!   so the default buffer is generous.
//! - **`RecvError::Closed`**: the bus was dropped together with its coordinator.

use bridge_traits::SidePanel;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the event bus channel.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 100;

// ============================================================================
// Transport Events
// ============================================================================

/// Something observable the coordinator did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TransportEvent {
    /// The overlay appeared or disappeared.
    VisibilityChanged { visible: bool },
    /// Play/pause was toggled; `playing` is the engine state afterwards.
    PlaybackToggled { playing: bool },
    /// A user seek was forwarded to the engine.
    SeekRequested { position_ms: u64 },
    /// The engine volume was changed (both channels).
    VolumeChanged { level: f32 },
    /// Mute was toggled.
    MuteChanged { muted: bool },
    /// Window brightness was changed.
    BrightnessChanged { level: f32 },
    /// The seek bar was refreshed from the engine position.
    ProgressUpdated {
        position_ms: u64,
        duration_ms: u64,
        primary: u32,
        secondary: u32,
    },
    /// The shared side slot switched between volume and brightness.
    PanelSelected { panel: SidePanel },
}

impl TransportEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &str {
        match self {
            TransportEvent::VisibilityChanged { visible: true } => "Controls shown",
            TransportEvent::VisibilityChanged { visible: false } => "Controls hidden",
            TransportEvent::PlaybackToggled { .. } => "Playback toggled",
            TransportEvent::SeekRequested { .. } => "Seek requested",
            TransportEvent::VolumeChanged { .. } => "Volume changed",
            TransportEvent::MuteChanged { .. } => "Mute toggled",
            TransportEvent::BrightnessChanged { .. } => "Brightness changed",
            TransportEvent::ProgressUpdated { .. } => "Progress updated",
            TransportEvent::PanelSelected { .. } => "Side panel selected",
        }
    }

    /// Periodic events that subscribers usually filter out.
    pub fn is_periodic(&self) -> bool {
        matches!(self, TransportEvent::ProgressUpdated { .. })
    }
}

// ============================================================================
// Event Bus
// ============================================================================

/// Central broadcast channel for [`TransportEvent`]s.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<TransportEvent>,
}

impl EventBus {
    /// Creates a new event bus with the specified buffer size.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// if there are none.
    pub fn emit(&self, event: TransportEvent) -> Result<usize, SendError<TransportEvent>> {
        self.sender.send(event)
    }

    /// Creates a new subscriber. Past events are not replayed.
    pub fn subscribe(&self) -> Receiver<TransportEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ============================================================================
// Event Stream Wrapper
// ============================================================================

type EventFilter = Box<dyn Fn(&TransportEvent) -> bool + Send + Sync>;

/// A wrapper around `broadcast::Receiver` with optional filtering.
///
/// ```rust
/// use core_runtime::events::{EventBus, EventStream};
///
/// let bus = EventBus::default();
/// let quiet = EventStream::new(bus.subscribe()).filter(|event| !event.is_periodic());
/// ```
pub struct EventStream {
    receiver: Receiver<TransportEvent>,
    filter: Option<EventFilter>,
}

impl EventStream {
    pub fn new(receiver: Receiver<TransportEvent>) -> Self {
        Self {
            receiver,
            filter: None,
        }
    }

    /// Only events matching `predicate` will be returned.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&TransportEvent) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(predicate));
        self
    }

    fn accepts(&self, event: &TransportEvent) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter(event))
    }

    /// Receives the next event that passes the filter.
    pub async fn recv(&mut self) -> Result<TransportEvent, RecvError> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Attempts to receive an event without waiting.
    ///
    /// Returns `None` if no matching event is currently available.
    pub fn try_recv(&mut self) -> Option<Result<TransportEvent, RecvError>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.accepts(&event) {
                        return Some(Ok(event));
                    }
                }
                Err(broadcast::error::TryRecvError::Empty) => return None,
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    return Some(Err(RecvError::Lagged(n)))
                }
                Err(broadcast::error::TryRecvError::Closed) => return Some(Err(RecvError::Closed)),
            }
        }
    }
}

impl fmt::Debug for EventStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("has_filter", &self.filter.is_some())
            .finish()
    }
}
