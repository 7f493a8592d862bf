//! Overlay geometry.
//!
//! The overlay covers its anchor exactly. Narrow anchors get the compact size
//! variant so icons and level bars stay proportional on phone-sized video.

use bridge_traits::{Bounds, OverlayLayout, SizeVariant};
use core_runtime::TransportConfig;

/// Compute the overlay geometry for an anchor.
pub fn compute_layout(anchor: Bounds, config: &TransportConfig) -> OverlayLayout {
    let (variant, icon_scale) = if anchor.width < config.compact_width_threshold {
        (SizeVariant::Compact, config.compact_icon_scale)
    } else {
        (SizeVariant::Regular, 1.0)
    };

    let height = anchor.height.max(0);
    let level_bar_height = (height as f32 * config.level_bar_height_ratio).round() as i32;

    OverlayLayout {
        x: anchor.x,
        y: anchor.y,
        width: anchor.width.max(0),
        height,
        variant,
        icon_scale,
        level_bar_height,
    }
}
