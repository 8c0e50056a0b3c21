//! Engine timing and behaviour configuration.

use crate::render::{FontScale, Rotation};

/// TCP port the line stream listens on.
pub const DEFAULT_STREAM_PORT: u16 = 2323;

/// Timings and thresholds of the control loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiperConfig {
    /// Idle time after which the device sleeps and powers off.
    pub idle_timeout_ms: u64,
    /// How long the sleep screen is held before power-off.
    pub sleep_hold_ms: u64,
    /// Minimum spacing between two debounced stream redraws.
    pub stream_redraw_ms: u64,
    /// Quiet period after a page or font change gesture.
    pub page_settle_ms: u64,
    /// Quiet period after a UI visibility toggle.
    pub toggle_settle_ms: u64,
    /// Delay before a rotation candidate is resampled.
    pub tilt_settle_ms: u64,
    /// Delay after a rotation commit before the next candidate.
    pub tilt_cooldown_ms: u64,
    /// Acceleration magnitude, in g, that selects an axis.
    pub tilt_threshold_g: f32,
    pub initial_rotation: Rotation,
    pub default_font_scale: FontScale,
}

impl Default for PiperConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: 180_000,
            sleep_hold_ms: 2_000,
            stream_redraw_ms: 500,
            page_settle_ms: 100,
            toggle_settle_ms: 200,
            tilt_settle_ms: 100,
            tilt_cooldown_ms: 300,
            tilt_threshold_g: 0.5,
            initial_rotation: Rotation::Deg90,
            default_font_scale: FontScale::DEFAULT,
        }
    }
}

impl PiperConfig {
    /// Returns a copy with degenerate values pulled back into range.
    pub fn sanitized(mut self) -> Self {
        self.idle_timeout_ms = self.idle_timeout_ms.max(1);
        if self.tilt_threshold_g.is_nan() || self.tilt_threshold_g <= 0.0 {
            self.tilt_threshold_g = Self::default().tilt_threshold_g;
        }
        self
    }
}
