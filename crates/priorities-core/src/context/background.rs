//! Screen background that crossfades between dominant colors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::animation::{ease_out, Animation, Fade};
use crate::models::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrossfadeConfig {
    pub duration_ms: u64,
}

impl Default for CrossfadeConfig {
    fn default() -> Self {
        Self { duration_ms: 400 }
    }
}

impl CrossfadeConfig {
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundColor {
    current: Color,
    previous: Color,
    fade: Fade,
}

impl BackgroundColor {
    pub fn new(initial: Color, config: CrossfadeConfig) -> Self {
        Self {
            current: initial,
            previous: initial,
            fade: Fade::new(config.duration()).easing(ease_out).completed(),
        }
    }

    pub const fn current(&self) -> Color {
        self.current
    }

    pub const fn previous(&self) -> Color {
        self.previous
    }

    /// Eased crossfade progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.fade.value()
    }

    pub fn is_animating(&self) -> bool {
        !self.fade.is_complete()
    }

    /// Start a crossfade to `color`. Returns `false` when it is already current.
    ///
    /// A change during a running crossfade restarts from the current target;
    /// the partially blended color is not carried over.
    pub fn handle_color_change(&mut self, color: Color) -> bool {
        if color == self.current {
            return false;
        }
        tracing::debug!(from = %self.current, to = %color, "Background crossfade");
        self.previous = self.current;
        self.current = color;
        self.fade.reset();
        true
    }

    pub fn tick(&mut self, dt: Duration) {
        self.fade.tick(dt);
    }

    /// Color to paint this frame
    pub fn displayed(&self) -> Color {
        self.previous.mix(self.current, self.progress())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const RED: Color = Color::rgb(0xff, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 0xff);

    #[test]
    fn same_color_is_a_no_op() {
        let mut background = BackgroundColor::new(RED, CrossfadeConfig::default());
        assert!(!background.handle_color_change(RED));
        assert!(!background.is_animating());
        assert_eq!(background.previous(), RED);
        assert!((background.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn repeating_the_target_keeps_the_running_fade() {
        let mut background = BackgroundColor::new(RED, CrossfadeConfig::default());
        assert!(background.handle_color_change(BLUE));
        background.tick(Duration::from_millis(100));
        let progress = background.progress();
        assert!(progress > 0.0 && background.is_animating());

        assert!(!background.handle_color_change(BLUE));
        assert_eq!(background.previous(), RED);
        assert_eq!(background.current(), BLUE);
        assert!((background.progress() - progress).abs() < f32::EPSILON);
        assert!(background.is_animating());
    }

    #[test]
    fn crossfade_runs_to_completion() {
        let mut background = BackgroundColor::new(RED, CrossfadeConfig::default());
        assert!(background.handle_color_change(BLUE));
        assert_eq!(background.previous(), RED);
        assert_eq!(background.current(), BLUE);
        assert!(background.progress().abs() < f32::EPSILON);
        assert_eq!(background.displayed(), RED);

        background.tick(Duration::from_millis(200));
        assert!(background.progress() > 0.5);
        assert!(background.is_animating());

        background.tick(Duration::from_millis(200));
        assert!(!background.is_animating());
        assert_eq!(background.displayed(), BLUE);
    }

    #[test]
    fn rapid_changes_overwrite_previous() {
        let green = Color::rgb(0, 0xff, 0);
        let mut background = BackgroundColor::new(RED, CrossfadeConfig::default());
        background.handle_color_change(BLUE);
        background.tick(Duration::from_millis(100));
        background.handle_color_change(green);

        assert_eq!(background.previous(), BLUE);
        assert_eq!(background.current(), green);
        assert!(background.progress().abs() < f32::EPSILON);
    }
}
