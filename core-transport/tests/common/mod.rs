//! Hand-written host fakes shared by the integration tests.

#![allow(dead_code)]

use bridge_traits::error::Result as BridgeResult;
use bridge_traits::{
    AnchorSurface, BridgeError, Bounds, ControlsView, MediaMetadata, OverlayLayout,
    PlaybackControlPort, RenderTarget, WindowBrightness,
};
use std::sync::Mutex;

// ============================================================================
// Engine
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Play,
    Pause,
    SeekTo(u64),
    SetVolume(f32, f32),
}

#[derive(Debug)]
struct EngineState {
    playing: bool,
    position_ms: u64,
    duration_ms: u64,
    buffer_percent: u8,
    can_pause: bool,
    suspendable: bool,
    calls: Vec<EngineCall>,
}

/// Engine that records every control call and reports scripted positions.
#[derive(Debug)]
pub struct FakeEngine {
    state: Mutex<EngineState>,
}

impl FakeEngine {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            state: Mutex::new(EngineState {
                playing: false,
                position_ms: 0,
                duration_ms,
                buffer_percent: 0,
                can_pause: true,
                suspendable: false,
                calls: Vec::new(),
            }),
        }
    }

    pub fn playing(self, playing: bool) -> Self {
        self.state.lock().unwrap().playing = playing;
        self
    }

    pub fn unpausable(self) -> Self {
        self.state.lock().unwrap().can_pause = false;
        self
    }

    pub fn suspendable(self) -> Self {
        self.state.lock().unwrap().suspendable = true;
        self
    }

    pub fn set_position(&self, position_ms: u64) {
        self.state.lock().unwrap().position_ms = position_ms;
    }

    pub fn set_buffer(&self, percent: u8) {
        self.state.lock().unwrap().buffer_percent = percent;
    }

    pub fn set_playing(&self, playing: bool) {
        self.state.lock().unwrap().playing = playing;
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn seeks(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                EngineCall::SeekTo(position) => Some(position),
                _ => None,
            })
            .collect()
    }

    pub fn last_volume(&self) -> Option<(f32, f32)> {
        self.calls().into_iter().rev().find_map(|call| match call {
            EngineCall::SetVolume(left, right) => Some((left, right)),
            _ => None,
        })
    }
}

impl PlaybackControlPort for FakeEngine {
    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    fn play(&self) {
        let mut state = self.state.lock().unwrap();
        state.playing = true;
        state.calls.push(EngineCall::Play);
    }

    fn pause(&self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.calls.push(EngineCall::Pause);
    }

    fn seek_to(&self, position_ms: u64) {
        let mut state = self.state.lock().unwrap();
        state.position_ms = position_ms;
        state.calls.push(EngineCall::SeekTo(position_ms));
    }

    fn position_ms(&self) -> u64 {
        self.state.lock().unwrap().position_ms
    }

    fn duration_ms(&self) -> u64 {
        self.state.lock().unwrap().duration_ms
    }

    fn buffer_percent(&self) -> u8 {
        self.state.lock().unwrap().buffer_percent
    }

    fn set_volume(&self, left: f32, right: f32) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(EngineCall::SetVolume(left, right));
    }

    fn can_pause(&self) -> bool {
        self.state.lock().unwrap().can_pause
    }

    fn try_suspend(&self) -> bool {
        self.state.lock().unwrap().suspendable
    }

    fn try_resume(&self) -> bool {
        self.state.lock().unwrap().suspendable
    }

    fn metadata(&self) -> Option<MediaMetadata> {
        Some(MediaMetadata::titled("Big Buck Bunny"))
    }
}

// ============================================================================
// Surfaces
// ============================================================================

pub struct FixedAnchor(pub Bounds);

impl AnchorSurface for FixedAnchor {
    fn bounds(&self) -> Bounds {
        self.0
    }
}

#[derive(Default)]
pub struct RecordingRenderTarget {
    pub attached: Mutex<Vec<OverlayLayout>>,
    pub detach_count: Mutex<u32>,
    pub frames: Mutex<Vec<ControlsView>>,
    /// Report the overlay as already gone on removal.
    pub detach_races: bool,
}

impl RecordingRenderTarget {
    pub fn racing() -> Self {
        Self {
            detach_races: true,
            ..Default::default()
        }
    }

    pub fn attach_count(&self) -> usize {
        self.attached.lock().unwrap().len()
    }

    pub fn detach_count(&self) -> u32 {
        *self.detach_count.lock().unwrap()
    }

    pub fn last_frame(&self) -> Option<ControlsView> {
        self.frames.lock().unwrap().last().cloned()
    }
}

impl RenderTarget for RecordingRenderTarget {
    fn attach_overlay(&self, layout: &OverlayLayout) -> BridgeResult<()> {
        self.attached.lock().unwrap().push(*layout);
        Ok(())
    }

    fn detach_overlay(&self) -> BridgeResult<()> {
        *self.detach_count.lock().unwrap() += 1;
        if self.detach_races {
            return Err(BridgeError::NotAttached("decor view".to_string()));
        }
        Ok(())
    }

    fn render(&self, view: &ControlsView) {
        self.frames.lock().unwrap().push(view.clone());
    }
}

pub struct FakeWindow {
    level: Mutex<f32>,
}

impl FakeWindow {
    pub fn new(level: f32) -> Self {
        Self {
            level: Mutex::new(level),
        }
    }

    pub fn level(&self) -> f32 {
        *self.level.lock().unwrap()
    }
}

impl WindowBrightness for FakeWindow {
    fn brightness(&self) -> f32 {
        *self.level.lock().unwrap()
    }

    fn set_brightness(&self, level: f32) {
        *self.level.lock().unwrap() = level;
    }
}

pub fn tablet_bounds() -> Bounds {
    Bounds::new(0, 0, 1280, 720)
}

pub fn phone_bounds() -> Bounds {
    Bounds::new(0, 120, 640, 360)
}
