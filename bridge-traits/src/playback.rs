//! Playback control bridge.
//!
//! The transport coordinator never decodes or renders media. It drives
//! whatever engine the host already has (a platform media player, a
//! GStreamer pipeline, a web `<video>` element) through the small capability
//! surface defined here. Host applications are expected to provide concrete
//! implementations that satisfy their platform constraints.
//!
//! All calls are synchronous and must not block: the coordinator issues them
//! from its event turn and expects position/duration queries to return
//! whatever the engine currently knows.

use crate::platform::PlatformSendSync;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptive metadata an engine may expose about the current item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaMetadata {
    /// Display title, when known.
    pub title: Option<String>,
    /// Whether the item supports seeking at all.
    pub seekable: Option<bool>,
    /// Whether the item supports pausing.
    pub pausable: Option<bool>,
    /// Arbitrary extra fields reported by the engine.
    pub extra: HashMap<String, String>,
}

impl MediaMetadata {
    /// Create empty metadata with a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Capability surface a playback engine exposes to the transport coordinator.
///
/// Positions and durations are in milliseconds. A duration of `0` means the
/// engine does not know it yet (live stream, still preparing).
///
/// The trailing methods with default bodies are optional capabilities. An
/// engine binding that does not override them reports "unsupported", and the
/// coordinator degrades gracefully instead of failing.
pub trait PlaybackControlPort: PlatformSendSync {
    /// Whether the engine is currently rendering frames.
    fn is_playing(&self) -> bool;

    /// Start or resume playback.
    fn play(&self);

    /// Pause playback without releasing the media.
    fn pause(&self);

    /// Seek to an absolute position.
    fn seek_to(&self, position_ms: u64);

    /// Current playback position.
    fn position_ms(&self) -> u64;

    /// Total duration of the current item (`0` when unknown).
    fn duration_ms(&self) -> u64;

    /// How much of the stream has been buffered, `0..=100`.
    fn buffer_percent(&self) -> u8;

    /// Per-channel gain, each in `0.0..=1.0`.
    fn set_volume(&self, left: f32, right: f32);

    /// Whether the current item can be paused. Engines that cannot tell are
    /// assumed pausable.
    fn can_pause(&self) -> bool {
        true
    }

    /// Release decoder resources while keeping the position. Returns `false`
    /// when the engine has no such facility.
    fn try_suspend(&self) -> bool {
        false
    }

    /// Undo a previous [`try_suspend`](Self::try_suspend). Returns `false`
    /// when unsupported.
    fn try_resume(&self) -> bool {
        false
    }

    /// Engine-reported metadata for the current item, if available.
    fn metadata(&self) -> Option<MediaMetadata> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BareEngine;

    impl PlaybackControlPort for BareEngine {
        fn is_playing(&self) -> bool {
            false
        }
        fn play(&self) {}
        fn pause(&self) {}
        fn seek_to(&self, _position_ms: u64) {}
        fn position_ms(&self) -> u64 {
            0
        }
        fn duration_ms(&self) -> u64 {
            0
        }
        fn buffer_percent(&self) -> u8 {
            0
        }
        fn set_volume(&self, _left: f32, _right: f32) {}
    }

    #[test]
    fn optional_capabilities_default_to_unsupported() {
        let engine = BareEngine;
        assert!(engine.can_pause());
        assert!(!engine.try_suspend());
        assert!(!engine.try_resume());
        assert!(engine.metadata().is_none());
    }

    #[test]
    fn metadata_titled() {
        let meta = MediaMetadata::titled("Trailer");
        assert_eq!(meta.title.as_deref(), Some("Trailer"));
        assert!(meta.seekable.is_none());
        assert!(meta.extra.is_empty());
    }
}
