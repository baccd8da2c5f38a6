//! Voice-note hold-and-swipe gesture.
//!
//! Holding the mic arms a recording session; on release the horizontal
//! displacement decides between delete (left), send (right) and cancel.
//! Only one session may be armed at a time across the whole app, enforced by
//! [`VoiceSessionLock`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::animation::Tween;
use crate::device::HapticPattern;

/// Voice-note gesture thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwipeConfig {
    /// Hold time before the gesture arms
    pub long_press_ms: u64,
    /// Horizontal displacement that must be exceeded to delete or send, in px
    pub threshold: f32,
    /// Duration of the bounce back to the origin
    pub bounce_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            long_press_ms: 300,
            threshold: 80.0,
            bounce_ms: 350,
        }
    }
}

impl SwipeConfig {
    pub const fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub const fn bounce(&self) -> Duration {
        Duration::from_millis(self.bounce_ms)
    }
}

/// How a released swipe resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeOutcome {
    Delete,
    Send,
    Cancel,
}

impl SwipeOutcome {
    pub const fn haptic(self) -> HapticPattern {
        match self {
            Self::Delete => HapticPattern::Warning,
            Self::Send => HapticPattern::Success,
            Self::Cancel => HapticPattern::Light,
        }
    }
}

/// Resolve a release displacement; exactly `±threshold` cancels.
pub fn resolve_swipe(dx: f32, threshold: f32) -> SwipeOutcome {
    if dx < -threshold {
        SwipeOutcome::Delete
    } else if dx > threshold {
        SwipeOutcome::Send
    } else {
        SwipeOutcome::Cancel
    }
}

/// Shared flag guaranteeing a single active voice-note session.
///
/// Clones share the flag; hand one clone to every gesture that may record.
#[derive(Debug, Clone, Default)]
pub struct VoiceSessionLock {
    active: Arc<AtomicBool>,
}

impl VoiceSessionLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the session; `None` while another guard is alive.
    pub fn try_acquire(&self) -> Option<VoiceSessionGuard> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| VoiceSessionGuard {
                active: Arc::clone(&self.active),
            })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Releases the session when dropped
#[derive(Debug)]
pub struct VoiceSessionGuard {
    active: Arc<AtomicBool>,
}

impl Drop for VoiceSessionGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoiceNoteState {
    Idle,
    Pressing { since: Instant, origin_x: f32 },
    Armed { origin_x: f32, offset: f32 },
}

/// Result of the long-press deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmResult {
    Armed,
    /// Another session is active; the press was dropped
    Busy,
}

/// Everything the UI needs to finish a released swipe
#[derive(Debug, Clone, Copy)]
pub struct SwipeRelease {
    pub outcome: SwipeOutcome,
    pub haptic: HapticPattern,
    pub bounce: Tween,
}

#[derive(Debug)]
pub struct VoiceNoteGesture {
    config: SwipeConfig,
    lock: VoiceSessionLock,
    state: VoiceNoteState,
    session: Option<VoiceSessionGuard>,
}

impl VoiceNoteGesture {
    pub fn new(config: SwipeConfig, lock: VoiceSessionLock) -> Self {
        Self {
            config,
            lock,
            state: VoiceNoteState::Idle,
            session: None,
        }
    }

    pub const fn state(&self) -> VoiceNoteState {
        self.state
    }

    pub const fn is_armed(&self) -> bool {
        matches!(self.state, VoiceNoteState::Armed { .. })
    }

    /// Whether this gesture currently owns the shared session
    pub const fn holds_session(&self) -> bool {
        self.session.is_some()
    }

    /// Live horizontal offset of the dragged element
    pub const fn offset(&self) -> f32 {
        match self.state {
            VoiceNoteState::Armed { offset, .. } => offset,
            _ => 0.0,
        }
    }

    /// Outcome the current offset would resolve to on release
    pub fn pending_outcome(&self) -> Option<SwipeOutcome> {
        self.is_armed()
            .then(|| resolve_swipe(self.offset(), self.config.threshold))
    }

    pub fn press(&mut self, now: Instant, x: f32) {
        if self.state == VoiceNoteState::Idle {
            self.state = VoiceNoteState::Pressing {
                since: now,
                origin_x: x,
            };
        }
    }

    /// Arm once the long-press threshold has elapsed.
    pub fn tick(&mut self, now: Instant) -> Option<ArmResult> {
        let VoiceNoteState::Pressing { since, origin_x } = self.state else {
            return None;
        };
        if now.saturating_duration_since(since) < self.config.long_press() {
            return None;
        }

        if let Some(guard) = self.lock.try_acquire() {
            self.session = Some(guard);
            self.state = VoiceNoteState::Armed {
                origin_x,
                offset: 0.0,
            };
            tracing::debug!("Voice note armed");
            Some(ArmResult::Armed)
        } else {
            self.state = VoiceNoteState::Idle;
            tracing::debug!("Voice note press dropped: another session is active");
            Some(ArmResult::Busy)
        }
    }

    pub fn drag(&mut self, x: f32) {
        if let VoiceNoteState::Armed { origin_x, .. } = self.state {
            self.state = VoiceNoteState::Armed {
                origin_x,
                offset: x - origin_x,
            };
        }
    }

    /// Finger up. Returns `None` when the press never armed.
    pub fn release(&mut self) -> Option<SwipeRelease> {
        let state = std::mem::replace(&mut self.state, VoiceNoteState::Idle);
        self.session = None;

        let VoiceNoteState::Armed { offset, .. } = state else {
            return None;
        };
        let outcome = resolve_swipe(offset, self.config.threshold);
        tracing::debug!(?outcome, offset, "Voice note released");
        Some(SwipeRelease {
            outcome,
            haptic: outcome.haptic(),
            bounce: Tween::bounce_back(offset, self.config.bounce()),
        })
    }

    /// Gesture interrupted by the system; drops the session without an outcome.
    pub fn cancel(&mut self) {
        self.state = VoiceNoteState::Idle;
        self.session = None;
    }
}
