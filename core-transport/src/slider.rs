//! # Slider Adapter
//!
//! Bridges an integer-range slider widget (seek `0..=1000`, volume and
//! brightness `0..=100`) and the fractions the coordinator works in.
//!
//! Widgets typically report every value change through one callback, including
//! the ones caused by our own [`SliderAdapter::set_value`]. Acting on those
//! echoes would turn a progress refresh into a seek, so
//! [`SliderAdapter::on_widget_change`] only surfaces changes that the user made.

use serde::{Deserialize, Serialize};

/// Where a widget value change came from, as reported by the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOrigin {
    /// Direct interactive manipulation (touch, drag, trackball, d-pad).
    User,
    /// The widget echoing a value assigned in code.
    Programmatic,
}

/// Integer range slider state.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderAdapter {
    max: u32,
    value: u32,
    /// Value last assigned programmatically and not yet echoed back.
    pending_echo: Option<u32>,
    tracking: bool,
}

impl SliderAdapter {
    /// Slider over `0..=max`. A zero `max` is treated as `1`.
    pub fn new(max: u32) -> Self {
        Self {
            max: max.max(1),
            value: 0,
            pending_echo: None,
            tracking: false,
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Current value as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.value as f32 / self.max as f32
    }

    /// Assign a value from code. Never reported as a user change.
    pub fn set_value(&mut self, value: u32) {
        let value = value.min(self.max);
        self.value = value;
        self.pending_echo = Some(value);
    }

    /// Assign a fraction from code, rounded onto the integer scale.
    pub fn set_fraction(&mut self, fraction: f32) {
        self.set_value(self.to_value(fraction));
    }

    /// Map a fraction onto this slider's scale without changing state.
    pub fn to_value(&self, fraction: f32) -> u32 {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        (fraction * self.max as f32).round() as u32
    }

    /// The user put a finger on the slider.
    pub fn begin_tracking(&mut self) {
        self.tracking = true;
        self.pending_echo = None;
    }

    pub fn end_tracking(&mut self) {
        self.tracking = false;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Classify a change notification from the widget.
    ///
    /// Returns the new fraction when the change is user-originated, `None`
    /// for programmatic changes and for echoes of [`set_value`](Self::set_value)
    /// from widgets that cannot tell the two apart.
    pub fn on_widget_change(&mut self, value: u32, origin: ChangeOrigin) -> Option<f32> {
        let value = value.min(self.max);

        if origin == ChangeOrigin::Programmatic {
            if self.pending_echo == Some(value) {
                self.pending_echo = None;
            }
            return None;
        }

        if !self.tracking && self.pending_echo.take() == Some(value) {
            return None;
        }

        self.value = value;
        Some(self.fraction())
    }
}
