//! # Transport Configuration
//!
//! Tunables for the controls overlay: auto-hide timing, slider scales, size
//! variants and initial levels.
//!
//! ## Overview
//!
//! [`TransportConfig`] can be constructed three ways:
//!
//! - `TransportConfig::default()` for the stock behaviour (3 s auto-hide,
//!   0–1000 seek scale, 0–100 level scales, compact layout under 768 px)
//! - [`TransportConfig::builder`] for a validated, fluent construction
//! - [`TransportConfig::from_json`] for host-provided settings; any missing
//!   field falls back to its default
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::TransportConfig;
//!
//! let config = TransportConfig::builder()
//!     .default_timeout_ms(5_000)
//!     .initial_volume(0.8)
//!     .build()
//!     .expect("valid config");
//!
//! assert_eq!(config.default_timeout_ms, 5_000);
//! ```
//!
//! ## Error Handling
//!
//! Out-of-range values are rejected with [`Error::InvalidSetting`] naming the
//! offending field:
//!
//! ```
//! use core_runtime::config::TransportConfig;
//!
//! let result = TransportConfig::builder().seek_range_max(0).build();
//! assert!(result.is_err());
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a transport coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Auto-hide delay applied by a plain `show()`.
    ///
    /// Default: 3000 ms.
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Timeout used while a slider is being tracked. Long enough to be
    /// effectively infinite for a single gesture.
    ///
    /// Default: one hour.
    #[serde(default = "default_sticky_timeout_ms")]
    pub sticky_timeout_ms: u64,

    /// Anchors narrower than this many pixels use the compact size variant.
    ///
    /// Default: 768 px.
    #[serde(default = "default_compact_width_threshold")]
    pub compact_width_threshold: i32,

    /// Icon scale applied in the compact variant.
    ///
    /// Default: 2/3.
    #[serde(default = "default_compact_icon_scale")]
    pub compact_icon_scale: f32,

    /// Height of the volume/brightness bars relative to the anchor height.
    ///
    /// Default: 0.5.
    #[serde(default = "default_level_bar_height_ratio")]
    pub level_bar_height_ratio: f32,

    /// Integer scale of the seek bar.
    ///
    /// Default: 1000.
    #[serde(default = "default_seek_range_max")]
    pub seek_range_max: u32,

    /// Integer scale of the volume and brightness bars.
    ///
    /// Default: 100.
    #[serde(default = "default_level_range_max")]
    pub level_range_max: u32,

    /// Volume fraction applied to the engine when it is attached.
    ///
    /// Default: 0.5.
    #[serde(default = "default_initial_volume")]
    pub initial_volume: f32,

    /// Progress ticks are aligned to multiples of this many milliseconds of
    /// playback position.
    ///
    /// Default: 1000 ms.
    #[serde(default = "default_progress_tick_interval_ms")]
    pub progress_tick_interval_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_timeout_ms(),
            sticky_timeout_ms: default_sticky_timeout_ms(),
            compact_width_threshold: default_compact_width_threshold(),
            compact_icon_scale: default_compact_icon_scale(),
            level_bar_height_ratio: default_level_bar_height_ratio(),
            seek_range_max: default_seek_range_max(),
            level_range_max: default_level_range_max(),
            initial_volume: default_initial_volume(),
            progress_tick_interval_ms: default_progress_tick_interval_ms(),
        }
    }
}

impl TransportConfig {
    /// Creates a new builder seeded with the defaults.
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }

    /// Parse a JSON document, filling missing fields with defaults, and
    /// validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TransportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.default_timeout_ms == 0 {
            return Err(Error::InvalidSetting {
                field: "default_timeout_ms",
                message: "must be > 0; pass a zero timeout to show() for a persistent overlay"
                    .to_string(),
            });
        }

        if self.sticky_timeout_ms < self.default_timeout_ms {
            return Err(Error::InvalidSetting {
                field: "sticky_timeout_ms",
                message: format!(
                    "must be at least default_timeout_ms ({})",
                    self.default_timeout_ms
                ),
            });
        }

        if self.compact_width_threshold <= 0 {
            return Err(Error::InvalidSetting {
                field: "compact_width_threshold",
                message: "must be > 0".to_string(),
            });
        }

        if !(self.compact_icon_scale > 0.0 && self.compact_icon_scale <= 1.0) {
            return Err(Error::InvalidSetting {
                field: "compact_icon_scale",
                message: "must be in (0.0, 1.0]".to_string(),
            });
        }

        if !(self.level_bar_height_ratio > 0.0 && self.level_bar_height_ratio <= 1.0) {
            return Err(Error::InvalidSetting {
                field: "level_bar_height_ratio",
                message: "must be in (0.0, 1.0]".to_string(),
            });
        }

        if self.seek_range_max == 0 {
            return Err(Error::InvalidSetting {
                field: "seek_range_max",
                message: "must be > 0".to_string(),
            });
        }

        if self.level_range_max == 0 {
            return Err(Error::InvalidSetting {
                field: "level_range_max",
                message: "must be > 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(Error::InvalidSetting {
                field: "initial_volume",
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }

        if self.progress_tick_interval_ms == 0 {
            return Err(Error::InvalidSetting {
                field: "progress_tick_interval_ms",
                message: "must be > 0".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Default Functions (for serde)
// ============================================================================

fn default_timeout_ms() -> u64 {
    3_000
}

fn default_sticky_timeout_ms() -> u64 {
    3_600_000 // one hour
}

fn default_compact_width_threshold() -> i32 {
    768
}

fn default_compact_icon_scale() -> f32 {
    2.0 / 3.0
}

fn default_level_bar_height_ratio() -> f32 {
    0.5
}

fn default_seek_range_max() -> u32 {
    1_000
}

fn default_level_range_max() -> u32 {
    100
}

fn default_initial_volume() -> f32 {
    0.5
}

fn default_progress_tick_interval_ms() -> u64 {
    1_000
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for constructing [`TransportConfig`] instances.
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    config: TransportConfig,
}

impl TransportConfigBuilder {
    /// Sets the auto-hide delay used by `show()`.
    pub fn default_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.default_timeout_ms = timeout_ms;
        self
    }

    /// Sets the timeout used while a slider gesture is in progress.
    pub fn sticky_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.config.sticky_timeout_ms = timeout_ms;
        self
    }

    /// Sets the anchor width below which the compact layout is used.
    pub fn compact_width_threshold(mut self, width: i32) -> Self {
        self.config.compact_width_threshold = width;
        self
    }

    pub fn compact_icon_scale(mut self, scale: f32) -> Self {
        self.config.compact_icon_scale = scale;
        self
    }

    pub fn level_bar_height_ratio(mut self, ratio: f32) -> Self {
        self.config.level_bar_height_ratio = ratio;
        self
    }

    /// Sets the integer scale of the seek bar.
    pub fn seek_range_max(mut self, max: u32) -> Self {
        self.config.seek_range_max = max;
        self
    }

    /// Sets the integer scale of the volume and brightness bars.
    pub fn level_range_max(mut self, max: u32) -> Self {
        self.config.level_range_max = max;
        self
    }

    /// Sets the volume applied when an engine is attached.
    pub fn initial_volume(mut self, volume: f32) -> Self {
        self.config.initial_volume = volume;
        self
    }

    pub fn progress_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.config.progress_tick_interval_ms = interval_ms;
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<TransportConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
