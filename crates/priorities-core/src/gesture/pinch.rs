//! Pinch-zoom, pan and reset for the full-screen image viewer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PinchConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Scale a double tap zooms to
    pub double_tap_scale: f32,
}

impl Default for PinchConfig {
    fn default() -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 4.0,
            double_tap_scale: 2.0,
        }
    }
}

/// Transform applied to the image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// CSS `transform` value
    pub fn to_css(&self) -> String {
        format!(
            "translate({:.2}px, {:.2}px) scale({:.4})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Pinching { start_scale: f32 },
    Panning { start_x: f32, start_y: f32 },
}

#[derive(Debug, Clone)]
pub struct PinchZoom {
    config: PinchConfig,
    viewport_width: f32,
    viewport_height: f32,
    transform: ZoomTransform,
    phase: Phase,
}

impl PinchZoom {
    pub const fn new(config: PinchConfig, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            config,
            viewport_width,
            viewport_height,
            transform: ZoomTransform::IDENTITY,
            phase: Phase::Idle,
        }
    }

    pub const fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn is_zoomed(&self) -> bool {
        self.transform.scale > self.config.min_scale + f32::EPSILON
    }

    pub fn pinch_start(&mut self) {
        self.phase = Phase::Pinching {
            start_scale: self.transform.scale,
        };
    }

    /// `gesture_scale` is the finger distance relative to the start of the pinch.
    pub fn pinch_update(&mut self, gesture_scale: f32) {
        let Phase::Pinching { start_scale } = self.phase else {
            return;
        };
        // Allow undershoot while fingers are down so the reset on release is visible.
        let floor = self.config.min_scale * 0.5;
        self.transform.scale = (start_scale * gesture_scale).clamp(floor, self.config.max_scale);
        self.clamp_translation();
    }

    pub fn pinch_end(&mut self) {
        self.phase = Phase::Idle;
        if self.transform.scale < self.config.min_scale {
            tracing::debug!("Pinch ended below minimum scale; resetting");
            self.reset();
        }
    }

    pub fn pan_start(&mut self) {
        if self.is_zoomed() {
            self.phase = Phase::Panning {
                start_x: self.transform.translate_x,
                start_y: self.transform.translate_y,
            };
        }
    }

    /// `dx`/`dy` are the cumulative finger travel since `pan_start`.
    pub fn pan_update(&mut self, dx: f32, dy: f32) {
        let Phase::Panning { start_x, start_y } = self.phase else {
            return;
        };
        self.transform.translate_x = start_x + dx;
        self.transform.translate_y = start_y + dy;
        self.clamp_translation();
    }

    pub fn pan_end(&mut self) {
        if matches!(self.phase, Phase::Panning { .. }) {
            self.phase = Phase::Idle;
        }
    }

    /// Toggle between identity and the double-tap zoom.
    pub fn double_tap(&mut self) {
        if self.is_zoomed() {
            self.reset();
        } else {
            self.transform = ZoomTransform {
                scale: self.config.double_tap_scale.min(self.config.max_scale),
                ..ZoomTransform::IDENTITY
            };
        }
    }

    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
        self.phase = Phase::Idle;
    }

    /// Largest translation that keeps the scaled image covering the viewport
    pub fn max_translation(&self) -> (f32, f32) {
        let excess = (self.transform.scale - 1.0).max(0.0);
        (
            excess * self.viewport_width / 2.0,
            excess * self.viewport_height / 2.0,
        )
    }

    fn clamp_translation(&mut self) {
        let (max_x, max_y) = self.max_translation();
        self.transform.translate_x = self.transform.translate_x.clamp(-max_x, max_x);
        self.transform.translate_y = self.transform.translate_y.clamp(-max_y, max_y);
    }
}
