//! Press-and-hold shutter: tap for a photo, hold to record video.
//!
//! Timers are deadlines. The owner calls [`Shutter::tick`] from its frame or
//! timer loop and performs whatever [`ShutterAction`] comes back.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::util::clamp_unit;

/// Shutter timing and zoom mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShutterConfig {
    /// Hold time before a press turns into a recording
    pub hold_delay_ms: u64,
    /// Recordings shorter than this are extended to it
    pub min_recording_ms: u64,
    /// Upward drag distance that maps to full zoom, in px
    pub zoom_drag_range: f32,
    /// Zoom reported at full drag
    pub max_zoom: f32,
}

impl Default for ShutterConfig {
    fn default() -> Self {
        Self {
            hold_delay_ms: 250,
            min_recording_ms: 1_000,
            zoom_drag_range: 300.0,
            max_zoom: 1.0,
        }
    }
}

impl ShutterConfig {
    pub const fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }

    pub const fn min_recording(&self) -> Duration {
        Duration::from_millis(self.min_recording_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShutterState {
    Idle,
    /// Pressed; becomes a recording if still held at the deadline
    PendingRecord { pressed_at: Instant },
    Recording { started_at: Instant },
    /// Released before the minimum duration; stops at `stop_at`
    FinishingRecord { stop_at: Instant },
    /// Photo capture in flight
    Capturing,
}

/// Side effect the camera owner must perform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShutterAction {
    TakePhoto,
    StartRecording,
    StopRecording,
    SetZoom(f32),
}

impl ShutterAction {
    /// Zoom the camera must be set to after this action. Stopping a
    /// recording always drops back to no zoom.
    pub const fn device_zoom(self) -> Option<f32> {
        match self {
            Self::SetZoom(zoom) => Some(zoom),
            Self::StopRecording => Some(0.0),
            Self::TakePhoto | Self::StartRecording => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Shutter {
    config: ShutterConfig,
    state: ShutterState,
    press_y: f32,
    zoom: f32,
}

impl Shutter {
    pub const fn new(config: ShutterConfig) -> Self {
        Self {
            config,
            state: ShutterState::Idle,
            press_y: 0.0,
            zoom: 0.0,
        }
    }

    pub const fn state(&self) -> ShutterState {
        self.state
    }

    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    pub const fn is_recording(&self) -> bool {
        matches!(
            self.state,
            ShutterState::Recording { .. } | ShutterState::FinishingRecord { .. }
        )
    }

    /// Finger down on the shutter. Ignored unless idle.
    pub fn press(&mut self, now: Instant, y: f32) {
        if self.state != ShutterState::Idle {
            tracing::debug!(state = ?self.state, "Shutter press ignored");
            return;
        }
        self.press_y = y;
        self.state = ShutterState::PendingRecord { pressed_at: now };
    }

    /// Finger moved; while recording, upward travel maps to zoom.
    pub fn drag(&mut self, y: f32) -> Option<ShutterAction> {
        if !matches!(self.state, ShutterState::Recording { .. }) {
            return None;
        }
        let zoom = clamp_unit((self.press_y - y) / self.config.zoom_drag_range) * self.config.max_zoom;
        if (zoom - self.zoom).abs() < f32::EPSILON {
            return None;
        }
        self.zoom = zoom;
        Some(ShutterAction::SetZoom(zoom))
    }

    /// Finger up.
    pub fn release(&mut self, now: Instant) -> Option<ShutterAction> {
        match self.state {
            ShutterState::PendingRecord { .. } => {
                self.state = ShutterState::Capturing;
                tracing::debug!("Shutter tap: capturing photo");
                Some(ShutterAction::TakePhoto)
            }
            ShutterState::Recording { started_at } => {
                self.zoom = 0.0;
                let stop_at = started_at + self.config.min_recording();
                if now >= stop_at {
                    self.state = ShutterState::Idle;
                    Some(ShutterAction::StopRecording)
                } else {
                    tracing::debug!("Recording released early; extending to minimum duration");
                    self.state = ShutterState::FinishingRecord { stop_at };
                    Some(ShutterAction::SetZoom(0.0))
                }
            }
            ShutterState::Idle | ShutterState::FinishingRecord { .. } | ShutterState::Capturing => {
                None
            }
        }
    }

    /// Fire any deadline that has passed at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<ShutterAction> {
        match self.state {
            ShutterState::PendingRecord { pressed_at }
                if now.saturating_duration_since(pressed_at) >= self.config.hold_delay() =>
            {
                self.state = ShutterState::Recording { started_at: now };
                tracing::debug!("Shutter held: recording started");
                Some(ShutterAction::StartRecording)
            }
            ShutterState::FinishingRecord { stop_at } if now >= stop_at => {
                self.state = ShutterState::Idle;
                Some(ShutterAction::StopRecording)
            }
            _ => None,
        }
    }

    /// Next instant at which [`tick`](Self::tick) would act
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            ShutterState::PendingRecord { pressed_at } => Some(pressed_at + self.config.hold_delay()),
            ShutterState::FinishingRecord { stop_at } => Some(stop_at),
            _ => None,
        }
    }

    /// The photo capture finished, successfully or not.
    pub fn capture_finished(&mut self) {
        if self.state == ShutterState::Capturing {
            self.state = ShutterState::Idle;
        }
    }

    /// The camera reported a failure; drop back to idle.
    pub fn abort(&mut self) {
        self.state = ShutterState::Idle;
        self.zoom = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn quick_tap_takes_a_photo() {
        let t0 = Instant::now();
        let mut shutter = Shutter::new(ShutterConfig::default());

        shutter.press(t0, 500.0);
        assert_eq!(shutter.tick(t0 + ms(100)), None);
        assert_eq!(shutter.release(t0 + ms(120)), Some(ShutterAction::TakePhoto));
        assert_eq!(shutter.state(), ShutterState::Capturing);

        // A second press while the capture is in flight does nothing.
        shutter.press(t0 + ms(150), 500.0);
        assert_eq!(shutter.state(), ShutterState::Capturing);

        shutter.capture_finished();
        assert_eq!(shutter.state(), ShutterState::Idle);
    }

    #[test]
    fn hold_records_and_drag_zooms() {
        let t0 = Instant::now();
        let mut shutter = Shutter::new(ShutterConfig::default());

        shutter.press(t0, 500.0);
        assert_eq!(shutter.next_deadline(), Some(t0 + ms(250)));
        assert_eq!(shutter.tick(t0 + ms(260)), Some(ShutterAction::StartRecording));
        assert!(shutter.is_recording());

        assert_eq!(shutter.drag(350.0), Some(ShutterAction::SetZoom(0.5)));
        assert_eq!(shutter.drag(-400.0), Some(ShutterAction::SetZoom(1.0)));
        assert_eq!(shutter.drag(900.0), Some(ShutterAction::SetZoom(0.0)));

        shutter.press(t0 + ms(400), 500.0);
        assert!(matches!(shutter.state(), ShutterState::Recording { .. }));

        assert_eq!(shutter.release(t0 + ms(1_500)), Some(ShutterAction::StopRecording));
        assert_eq!(shutter.state(), ShutterState::Idle);
    }

    #[test]
    fn early_release_waits_for_minimum_duration() {
        let t0 = Instant::now();
        let mut shutter = Shutter::new(ShutterConfig::default());

        shutter.press(t0, 500.0);
        shutter.tick(t0 + ms(250));
        shutter.drag(200.0);
        assert!(shutter.zoom() > 0.0);

        assert_eq!(shutter.release(t0 + ms(600)), Some(ShutterAction::SetZoom(0.0)));
        assert!(shutter.zoom().abs() < f32::EPSILON);
        assert_eq!(shutter.next_deadline(), Some(t0 + ms(1_250)));

        assert_eq!(shutter.tick(t0 + ms(1_000)), None);
        shutter.press(t0 + ms(1_100), 500.0);
        assert!(shutter.is_recording());

        assert_eq!(shutter.tick(t0 + ms(1_250)), Some(ShutterAction::StopRecording));
        assert_eq!(shutter.state(), ShutterState::Idle);
    }

    #[test]
    fn full_length_release_resets_device_zoom() {
        let t0 = Instant::now();
        let mut shutter = Shutter::new(ShutterConfig::default());

        shutter.press(t0, 500.0);
        assert_eq!(shutter.tick(t0 + ms(250)), Some(ShutterAction::StartRecording));
        let zoom_in = shutter.drag(350.0);
        assert_eq!(zoom_in, Some(ShutterAction::SetZoom(0.5)));
        assert_eq!(zoom_in.and_then(ShutterAction::device_zoom), Some(0.5));

        let release = shutter.release(t0 + ms(2_000));
        assert_eq!(release, Some(ShutterAction::StopRecording));
        assert_eq!(release.and_then(ShutterAction::device_zoom), Some(0.0));
        assert!(shutter.zoom().abs() < f32::EPSILON);

        assert_eq!(ShutterAction::TakePhoto.device_zoom(), None);
        assert_eq!(ShutterAction::StartRecording.device_zoom(), None);
    }

    #[test]
    fn drag_before_recording_is_ignored() {
        let t0 = Instant::now();
        let mut shutter = Shutter::new(ShutterConfig::default());
        shutter.press(t0, 500.0);
        assert_eq!(shutter.drag(100.0), None);
        assert!(shutter.zoom().abs() < f32::EPSILON);
    }

    #[test]
    fn abort_resets_everything() {
        let t0 = Instant::now();
        let mut shutter = Shutter::new(ShutterConfig::default());
        shutter.press(t0, 500.0);
        shutter.tick(t0 + ms(300));
        shutter.drag(0.0);
        shutter.abort();
        assert_eq!(shutter.state(), ShutterState::Idle);
        assert!(shutter.zoom().abs() < f32::EPSILON);
    }
}
