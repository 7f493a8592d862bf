//! Surface, window and rendering bridges.
//!
//! The coordinator composes these capabilities instead of being a view
//! itself: an [`AnchorSurface`] tells it where the video sits, a
//! [`RenderTarget`] hosts the floating overlay and draws the values the
//! coordinator publishes, and [`WindowBrightness`] owns the screen brightness
//! of the hosting window.

use crate::{error::Result, platform::PlatformSendSync};
use serde::{Deserialize, Serialize};

/// Screen-space rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The view the overlay floats above (usually the video surface).
pub trait AnchorSurface: PlatformSendSync {
    /// Location and size of the anchor on screen.
    fn bounds(&self) -> Bounds;
}

/// Brightness of the window hosting the video.
pub trait WindowBrightness: PlatformSendSync {
    /// Current brightness, `0.0..=1.0`.
    fn brightness(&self) -> f32;

    /// Apply a new brightness, `0.0..=1.0`.
    fn set_brightness(&self, level: f32);
}

/// Icon/bar sizing applied when the overlay is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeVariant {
    /// Small anchors: icons scaled down.
    Compact,
    /// Icons at their intrinsic size.
    Regular,
}

/// Geometry of the floating overlay, computed from the anchor on first show.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayout {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub variant: SizeVariant,
    /// Multiplier applied to icon intrinsic sizes (`1.0` for regular).
    pub icon_scale: f32,
    /// Height of the vertical volume/brightness bars.
    pub level_bar_height: i32,
}

/// Play/pause button artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayPauseIcon {
    /// Engine is paused; pressing the button plays.
    #[default]
    Play,
    /// Engine is playing; pressing the button pauses.
    Pause,
}

/// Mute button artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuteIcon {
    #[default]
    Unmuted,
    Muted,
}

/// Which vertical bar occupies the shared side slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePanel {
    #[default]
    Volume,
    Brightness,
}

/// Snapshot of every value the UI layer renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlsView {
    pub visible: bool,
    pub layout: Option<OverlayLayout>,
    pub play_pause: PlayPauseIcon,
    pub pause_enabled: bool,
    pub progress_enabled: bool,
    pub mute: MuteIcon,
    /// Seek bar position on its integer scale.
    pub primary_progress: u32,
    /// Buffered indicator on the seek bar scale.
    pub secondary_progress: u32,
    pub volume_level: u32,
    pub brightness_level: u32,
    pub panel: SidePanel,
}

impl Default for ControlsView {
    fn default() -> Self {
        Self {
            visible: false,
            layout: None,
            play_pause: PlayPauseIcon::Play,
            pause_enabled: true,
            progress_enabled: true,
            mute: MuteIcon::Unmuted,
            primary_progress: 0,
            secondary_progress: 0,
            volume_level: 0,
            brightness_level: 0,
            panel: SidePanel::Volume,
        }
    }
}

/// Host that owns the floating overlay window and draws the controls.
pub trait RenderTarget: PlatformSendSync {
    /// Add the overlay above the anchor with the given geometry.
    fn attach_overlay(&self, layout: &OverlayLayout) -> Result<()>;

    /// Remove the overlay. Returns [`BridgeError::NotAttached`](crate::BridgeError::NotAttached)
    /// if it is already gone.
    fn detach_overlay(&self) -> Result<()>;

    /// Redraw the controls from a fresh snapshot.
    fn render(&self, view: &ControlsView);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_is_hidden_and_pausable() {
        let view = ControlsView::default();
        assert!(!view.visible);
        assert!(view.layout.is_none());
        assert!(view.pause_enabled);
        assert_eq!(view.play_pause, PlayPauseIcon::Play);
        assert_eq!(view.panel, SidePanel::Volume);
    }

    #[test]
    fn bounds_constructor() {
        let b = Bounds::new(10, 20, 640, 360);
        assert_eq!(b, Bounds { x: 10, y: 20, width: 640, height: 360 });
    }
}
