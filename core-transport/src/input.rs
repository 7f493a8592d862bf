//! Key and touch input model used by
//! [`TransportCoordinator::dispatch_key`](crate::TransportCoordinator::dispatch_key)
//! and [`TransportCoordinator::on_backdrop_touch`](crate::TransportCoordinator::on_backdrop_touch).

use serde::{Deserialize, Serialize};

/// Keys the coordinator distinguishes. Anything else is [`KeyCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCode {
    HeadsetHook,
    MediaPlayPause,
    Space,
    MediaStop,
    VolumeUp,
    VolumeDown,
    VolumeMute,
    Back,
    Menu,
    /// Host-specific key code.
    Other(u32),
}

impl KeyCode {
    /// Keys that toggle play/pause.
    pub fn is_play_pause(&self) -> bool {
        matches!(
            self,
            KeyCode::HeadsetHook | KeyCode::MediaPlayPause | KeyCode::Space
        )
    }

    /// Keys handled by the system volume UI. The overlay ignores them.
    pub fn is_volume(&self) -> bool {
        matches!(
            self,
            KeyCode::VolumeUp | KeyCode::VolumeDown | KeyCode::VolumeMute
        )
    }

    pub fn is_dismiss(&self) -> bool {
        matches!(self, KeyCode::Back | KeyCode::Menu)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    Down,
    Up,
}

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub action: KeyAction,
    /// Auto-repeat count; `0` for the initial press.
    pub repeat_count: u32,
}

impl KeyEvent {
    pub fn down(code: KeyCode) -> Self {
        Self {
            code,
            action: KeyAction::Down,
            repeat_count: 0,
        }
    }

    pub fn up(code: KeyCode) -> Self {
        Self {
            code,
            action: KeyAction::Up,
            repeat_count: 0,
        }
    }

    pub fn repeated(code: KeyCode, repeat_count: u32) -> Self {
        Self {
            code,
            action: KeyAction::Down,
            repeat_count,
        }
    }

    /// First key-down of a press, excluding auto-repeats.
    pub fn is_unique_down(&self) -> bool {
        self.action == KeyAction::Down && self.repeat_count == 0
    }
}

/// Whether the coordinator handled a key or the host should keep routing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyDisposition {
    Consumed,
    PassThrough,
}

impl KeyDisposition {
    pub fn is_consumed(&self) -> bool {
        matches!(self, KeyDisposition::Consumed)
    }
}

/// Phase of a pointer gesture on the overlay backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}
