//! Tunable layout, gesture and animation constants.
//!
//! Every section has defaults, so a config file only needs the values it
//! changes. A missing or broken file never stops the app: it logs a warning
//! and runs with the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::{CrossfadeConfig, PullRevealConfig, TabBarConfig};
use crate::device::CaptureConfig;
use crate::error::{Error, Result};
use crate::gesture::{PinchConfig, ShutterConfig, SwipeConfig};
use crate::layout::{AngleConfig, GridConfig, StickyConfig};

pub const CONFIG_FILE_NAME: &str = "priorities-config.json";
const APP_DIR_NAME: &str = "priorities";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub grid: GridConfig,
    pub angle: AngleConfig,
    pub sticky: StickyConfig,
    pub shutter: ShutterConfig,
    pub swipe: SwipeConfig,
    pub pinch: PinchConfig,
    pub crossfade: CrossfadeConfig,
    pub tab_bar: TabBarConfig,
    pub pull_reveal: PullRevealConfig,
    pub capture: CaptureConfig,
}

/// Per-user data directory for Priorities
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .map(|dir| dir.join(APP_DIR_NAME))
}

pub fn default_config_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

impl AppConfig {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match default_config_path() {
            Some(path) => Self::load_from_path(&path),
            None => {
                tracing::warn!("No data directory available; using default config");
                Self::default()
            }
        }
    }

    /// Load `path`. Missing, unreadable, unparsable or invalid files yield defaults.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file; using defaults");
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(
                    path = %path.display(),
                    "Ignoring config file: {error}"
                );
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Reject values that would make the layout or gesture math degenerate.
    pub fn validate(&self) -> Result<()> {
        let grid = &self.grid;
        ensure(grid.gap >= 0.0, "grid.gap must not be negative")?;
        ensure(
            grid.single_ratio > 0.0 && grid.single_ratio <= 1.0,
            "grid.single_ratio must be in (0, 1]",
        )?;
        ensure(
            grid.double_tall_ratio > 0.0
                && grid.double_short_ratio > 0.0
                && grid.triple_middle_ratio > 0.0,
            "grid ratios must be positive",
        )?;

        ensure(
            self.angle.min_deg < self.angle.max_deg,
            "angle.min_deg must be below angle.max_deg",
        )?;

        let sticky = &self.sticky;
        ensure(
            sticky.card_spacing > sticky.sticky_step,
            "sticky.card_spacing must exceed sticky.sticky_step",
        )?;
        ensure(
            sticky.scale_distance > 0.0,
            "sticky.scale_distance must be positive",
        )?;
        ensure(
            sticky.min_scale > 0.0 && sticky.min_scale <= 1.0,
            "sticky.min_scale must be in (0, 1]",
        )?;

        let shutter = &self.shutter;
        ensure(
            shutter.hold_delay_ms > 0 && shutter.min_recording_ms > 0,
            "shutter durations must be positive",
        )?;
        ensure(
            shutter.zoom_drag_range > 0.0,
            "shutter.zoom_drag_range must be positive",
        )?;

        ensure(
            self.swipe.long_press_ms > 0 && self.swipe.bounce_ms > 0,
            "swipe durations must be positive",
        )?;
        ensure(self.swipe.threshold > 0.0, "swipe.threshold must be positive")?;

        let pinch = &self.pinch;
        ensure(
            pinch.min_scale > 0.0
                && pinch.min_scale <= pinch.double_tap_scale
                && pinch.double_tap_scale <= pinch.max_scale,
            "pinch scales must satisfy 0 < min <= double_tap <= max",
        )?;

        ensure(
            self.crossfade.duration_ms > 0,
            "crossfade.duration_ms must be positive",
        )?;
        ensure(
            self.tab_bar.hide_threshold >= 0.0,
            "tab_bar.hide_threshold must not be negative",
        )?;
        ensure(
            self.pull_reveal.threshold > 0.0
                && self.pull_reveal.max_pull >= self.pull_reveal.threshold,
            "pull_reveal.max_pull must be at least the positive threshold",
        )?;
        ensure(
            self.capture.jpeg_quality > 0.0 && self.capture.jpeg_quality <= 1.0,
            "capture.jpeg_quality must be in (0, 1]",
        )
    }
}

fn ensure(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(Error::Config(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempdir().unwrap();
        let config = AppConfig::load_from_path(&tmp.path().join(CONFIG_FILE_NAME));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_values() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{ "swipe": { "threshold": 120.0 }, "crossfade": { "duration_ms": 250 } }"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path);
        assert!((config.swipe.threshold - 120.0).abs() < f32::EPSILON);
        assert_eq!(config.swipe.long_press_ms, 300);
        assert_eq!(config.crossfade.duration_ms, 250);
        assert_eq!(config.sticky, StickyConfig::default());
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "{ grid: nope").unwrap();
        assert_eq!(AppConfig::load_from_path(&path), AppConfig::default());

        std::fs::write(&path, r#"{ "unknown_section": {} }"#).unwrap();
        assert_eq!(AppConfig::load_from_path(&path), AppConfig::default());
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{ "sticky": { "card_spacing": 10.0, "sticky_step": 16.0 } }"#,
        )
        .unwrap();
        assert_eq!(AppConfig::load_from_path(&path), AppConfig::default());
    }

    #[test]
    fn validate_rejects_sticky_step_at_spacing() {
        let mut config = AppConfig::default();
        config.sticky.sticky_step = config.sticky.card_spacing;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(message) if message.contains("card_spacing")));
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join(CONFIG_FILE_NAME);
        let mut config = AppConfig::default();
        config.grid.gap = 8.0;
        config.pinch.max_scale = 6.0;

        config.save_to_path(&path).unwrap();
        assert_eq!(AppConfig::load_from_path(&path), config);
    }

    #[test]
    fn save_refuses_invalid_config() {
        let tmp = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.capture.jpeg_quality = 0.0;
        assert!(config.save_to_path(&tmp.path().join(CONFIG_FILE_NAME)).is_err());
    }
}
