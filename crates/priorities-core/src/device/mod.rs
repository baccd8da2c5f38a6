//! Contracts for device capabilities.
//!
//! Camera, permissions, media library, image processing and haptics live
//! behind these traits so the capture flow can be driven by the mobile
//! platform layer or by test doubles. Platform errors are plain strings.

mod capture;

use serde::{Deserialize, Serialize};

pub use capture::{CaptureConfig, CaptureError, CaptureFlow, SavedMedia};

/// Result type for platform calls
pub type PlatformResult<T> = std::result::Result<T, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    Camera,
    Microphone,
    MediaLibrary,
}

impl PermissionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Microphone => "microphone",
            Self::MediaLibrary => "photo library",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    /// Never asked; a request will prompt the user
    Undetermined,
    /// Refused; only the system settings can change it
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    Front,
    Back,
}

impl CameraFacing {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Haptic feedback patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticPattern {
    Light,
    Medium,
    Heavy,
    Selection,
    Success,
    Warning,
    Error,
}

impl HapticPattern {
    /// Vibration pattern in ms (on/off/on...) for platforms without a haptic engine
    pub const fn vibration_ms(self) -> &'static [u32] {
        match self {
            Self::Selection => &[8],
            Self::Light => &[12],
            Self::Medium => &[20],
            Self::Heavy => &[35],
            Self::Success => &[15, 60, 25],
            Self::Warning => &[30, 50, 30],
            Self::Error => &[40, 40, 40, 40, 40],
        }
    }
}

/// Runtime permission prompts
#[allow(async_fn_in_trait)]
pub trait PermissionGate {
    async fn status(&self, kind: PermissionKind) -> PermissionStatus;

    /// Prompt the user when the permission is undetermined
    async fn request(&self, kind: PermissionKind) -> PermissionStatus;
}

/// Still and video capture; every method returns a local file URI
#[allow(async_fn_in_trait)]
pub trait Camera {
    async fn take_picture(&self, facing: CameraFacing) -> PlatformResult<String>;

    async fn start_recording(&self, facing: CameraFacing) -> PlatformResult<()>;

    async fn stop_recording(&self) -> PlatformResult<String>;

    /// Zoom in [0, 1]
    fn set_zoom(&self, zoom: f32);
}

#[allow(async_fn_in_trait)]
pub trait MediaLibrary {
    /// Save a local file into the device library; returns the asset id
    async fn save(&self, uri: &str) -> PlatformResult<String>;
}

#[allow(async_fn_in_trait)]
pub trait ImageProcessor {
    async fn flip_horizontal(&self, uri: &str) -> PlatformResult<String>;

    /// Re-encode as JPEG with `quality` in [0, 1]
    async fn compress(&self, uri: &str, quality: f32) -> PlatformResult<String>;
}

pub trait Haptics {
    fn trigger(&self, pattern: HapticPattern);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_flips() {
        assert_eq!(CameraFacing::Front.flipped(), CameraFacing::Back);
        assert_eq!(CameraFacing::Back.flipped().flipped(), CameraFacing::Back);
    }

    #[test]
    fn vibration_patterns_are_non_empty() {
        for pattern in [
            HapticPattern::Light,
            HapticPattern::Medium,
            HapticPattern::Heavy,
            HapticPattern::Selection,
            HapticPattern::Success,
            HapticPattern::Warning,
            HapticPattern::Error,
        ] {
            assert!(!pattern.vibration_ms().is_empty());
        }
    }
}
