//! Pull-down gesture that reveals the timeline above a profile.

use serde::{Deserialize, Serialize};

use crate::util::clamp_unit;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PullRevealConfig {
    /// Pull distance that toggles the timeline on release, in px
    pub threshold: f32,
    /// Rubber-band limit for the pull distance
    pub max_pull: f32,
}

impl Default for PullRevealConfig {
    fn default() -> Self {
        Self {
            threshold: 120.0,
            max_pull: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRelease {
    /// Crossed the threshold; `revealed` is the new state
    Toggled { revealed: bool },
    SnapBack,
}

#[derive(Debug, Clone)]
pub struct PullReveal {
    config: PullRevealConfig,
    revealed: bool,
    distance: f32,
}

impl PullReveal {
    pub const fn new(config: PullRevealConfig) -> Self {
        Self {
            config,
            revealed: false,
            distance: 0.0,
        }
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn distance(&self) -> f32 {
        self.distance
    }

    pub fn pull(&mut self, distance: f32) {
        self.distance = distance.clamp(0.0, self.config.max_pull);
    }

    /// Pull progress towards the threshold, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.config.threshold <= 0.0 {
            return 1.0;
        }
        clamp_unit(self.distance / self.config.threshold)
    }

    pub fn release(&mut self) -> PullRelease {
        let crossed = self.distance >= self.config.threshold;
        self.distance = 0.0;
        if crossed {
            self.revealed = !self.revealed;
            tracing::debug!(revealed = self.revealed, "Timeline reveal toggled");
            PullRelease::Toggled {
                revealed: self.revealed,
            }
        } else {
            PullRelease::SnapBack
        }
    }
}
