// Copyright 2026 the Switchback Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trail configuration.
//!
//! Every tunable of the pipeline lives here as plain data. Each config type
//! has `const` presets and a [`Default`] matching the standard preset, so a
//! host can start from a preset and override individual fields.

use crate::easing::Easing;
use crate::time::Duration;

/// Horizontal placement of waypoints and item rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// X coordinate of the depth-0 column.
    pub base_x: f64,
    /// Horizontal distance between adjacent depth columns.
    pub indent_width: f64,
    /// Left padding of a depth-0 item label; deeper rows add `indent_width`
    /// per level.
    pub label_inset: f64,
}

impl LayoutConfig {
    /// Standard layout: 12-unit gutter, 28-unit indents.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            base_x: 12.0,
            indent_width: 28.0,
            label_inset: 24.0,
        }
    }

    /// X coordinate of the trail column for an item at `depth`.
    #[must_use]
    pub fn column_x(&self, depth: usize) -> f64 {
        self.base_x + depth as f64 * self.indent_width
    }

    /// Left padding for the label of an item at `depth`.
    #[must_use]
    pub fn label_padding(&self, depth: usize) -> f64 {
        self.label_inset + depth as f64 * self.indent_width
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Path synthesis tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathConfig {
    /// Horizontal offsets at or below this are treated as a straight drop.
    pub epsilon: f64,
    /// Share of the vertical distance a diagonal may consume.
    pub diagonal_ratio: f64,
    /// Vertical runs at or below this length are folded into the diagonal.
    pub min_run: f64,
}

impl PathConfig {
    /// Standard tolerances.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            epsilon: 0.5,
            diagonal_ratio: 0.5,
            min_run: 1.0,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Timing of the anticipation / travel / arrival sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionConfig {
    /// Delay between a retarget and the start of travel.
    pub anticipation: Duration,
    /// Marker scale reached during anticipation.
    pub anticipation_scale: f64,
    /// Seconds of travel per unit of progress distance, before clamping.
    pub travel_secs_per_unit: f64,
    /// Shortest travel.
    pub min_travel: Duration,
    /// Longest travel, however far the jump.
    pub max_travel: Duration,
    /// Positional timing curve.
    pub travel_easing: Easing,
    /// Fraction of the travel duration over which scale recovers to 1.0.
    pub recover_fraction: f64,
    /// Peak marker scale on arrival. `1.0` disables the pulse.
    pub pulse_scale: f64,
    /// Time to reach [`pulse_scale`](Self::pulse_scale).
    pub pulse_rise: Duration,
    /// Time to settle back to 1.0 after the peak.
    pub pulse_settle: Duration,
    /// Curve of the settle, usually overshooting.
    pub settle_easing: Easing,
}

impl MotionConfig {
    /// Default snappy motion.
    #[must_use]
    pub const fn snappy() -> Self {
        Self {
            anticipation: Duration::from_millis(50),
            anticipation_scale: 0.85,
            travel_secs_per_unit: 1.5,
            min_travel: Duration::from_millis(250),
            max_travel: Duration::from_millis(600),
            travel_easing: Easing::SNAPPY,
            recover_fraction: 0.3,
            pulse_scale: 1.25,
            pulse_rise: Duration::from_millis(100),
            pulse_settle: Duration::from_millis(150),
            settle_easing: Easing::BOUNCY,
        }
    }

    /// Motion for hosts that prefer reduced motion: no scale effects and a
    /// short fixed glide.
    #[must_use]
    pub const fn reduced() -> Self {
        Self {
            anticipation: Duration::ZERO,
            anticipation_scale: 1.0,
            travel_secs_per_unit: 0.0,
            min_travel: Duration::from_millis(120),
            max_travel: Duration::from_millis(120),
            travel_easing: Easing::EaseOut,
            recover_fraction: 0.0,
            pulse_scale: 1.0,
            pulse_rise: Duration::ZERO,
            pulse_settle: Duration::ZERO,
            settle_easing: Easing::Linear,
        }
    }

    /// Travel duration for a progress distance, clamped to
    /// `[min_travel, max_travel]`.
    #[must_use]
    pub fn travel_duration(&self, distance: f64) -> Duration {
        Duration::from_secs_f64(distance.abs() * self.travel_secs_per_unit)
            .clamp_to(self.min_travel, self.max_travel)
    }

    /// Returns `true` if the arrival pulse is enabled.
    #[must_use]
    pub fn has_pulse(&self) -> bool {
        self.pulse_scale != 1.0
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// Marker glyph geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerConfig {
    /// Circumradius of the hexagon marker at scale 1.0.
    pub radius: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self { radius: 5.0 }
    }
}

/// Complete trail configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TrailConfig {
    /// Waypoint columns and row indentation.
    pub layout: LayoutConfig,
    /// Path synthesis tolerances.
    pub path: PathConfig,
    /// Motion timing.
    pub motion: MotionConfig,
    /// Marker glyph.
    pub marker: MarkerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_depth() {
        let layout = LayoutConfig::standard();
        assert_eq!(layout.column_x(0), 12.0);
        assert_eq!(layout.column_x(2), 68.0);
        assert_eq!(layout.label_padding(1), 52.0);
    }

    #[test]
    fn travel_duration_is_clamped() {
        let motion = MotionConfig::snappy();
        assert_eq!(motion.travel_duration(0.0), Duration::from_millis(250), "floor");
        assert_eq!(motion.travel_duration(0.3), Duration::from_millis(450), "scaled");
        assert_eq!(motion.travel_duration(1.0), Duration::from_millis(600), "cap");
        assert_eq!(motion.travel_duration(-1.0), Duration::from_millis(600), "sign ignored");
    }

    #[test]
    fn reduced_motion_has_no_pulse() {
        let motion = MotionConfig::reduced();
        assert!(!motion.has_pulse());
        assert_eq!(motion.travel_duration(1.0), Duration::from_millis(120));
    }
}
