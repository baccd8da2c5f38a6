//! Tab bar that slides away while scrolling down through content.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TabBarConfig {
    /// Downward travel since the last direction change before hiding, in px
    pub hide_threshold: f32,
    /// The bar is always shown above this offset
    pub top_zone: f32,
}

impl Default for TabBarConfig {
    fn default() -> Self {
        Self {
            hide_threshold: 10.0,
            top_zone: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct TabBarVisibility {
    config: TabBarConfig,
    visible: bool,
    last_offset: f32,
    /// Offset where the current scroll direction began
    anchor: f32,
    direction: Option<Direction>,
}

impl TabBarVisibility {
    pub const fn new(config: TabBarConfig) -> Self {
        Self {
            config,
            visible: true,
            last_offset: 0.0,
            anchor: 0.0,
            direction: None,
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Feed the latest scroll offset. Returns `true` when visibility changed.
    pub fn on_scroll(&mut self, offset: f32) -> bool {
        let was_visible = self.visible;
        let delta = offset - self.last_offset;
        let direction = if delta > 0.0 {
            Some(Direction::Down)
        } else if delta < 0.0 {
            Some(Direction::Up)
        } else {
            self.direction
        };

        if direction != self.direction {
            self.anchor = self.last_offset;
            self.direction = direction;
        }
        self.last_offset = offset;

        if offset <= self.config.top_zone {
            self.visible = true;
        } else {
            match direction {
                Some(Direction::Down) if offset - self.anchor > self.config.hide_threshold => {
                    self.visible = false;
                }
                Some(Direction::Up) => self.visible = true,
                _ => {}
            }
        }

        self.visible != was_visible
    }
}

impl Default for TabBarVisibility {
    fn default() -> Self {
        Self::new(TabBarConfig::default())
    }
}
