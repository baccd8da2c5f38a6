//! Full-screen overlay shown while a voice note is being recorded.

use std::time::Instant;

use crate::gesture::{
    ArmResult, SwipeConfig, SwipeOutcome, SwipeRelease, VoiceNoteGesture, VoiceSessionLock,
};
use crate::models::UserId;

#[derive(Debug)]
struct ActiveNote {
    target: UserId,
    gesture: VoiceNoteGesture,
}

/// Owns the in-flight voice-note gesture and, through it, the session guard.
#[derive(Debug)]
pub struct VoiceOverlay {
    config: SwipeConfig,
    lock: VoiceSessionLock,
    active: Option<ActiveNote>,
}

impl VoiceOverlay {
    pub fn new(config: SwipeConfig, lock: VoiceSessionLock) -> Self {
        Self {
            config,
            lock,
            active: None,
        }
    }

    /// Visible only once the long press armed a session
    pub fn is_visible(&self) -> bool {
        self.active.as_ref().is_some_and(|note| note.gesture.is_armed())
    }

    /// Held but not yet armed; the long-press deadline still needs ticks
    pub fn is_pressing(&self) -> bool {
        self.active.is_some() && !self.is_visible()
    }

    pub fn target(&self) -> Option<UserId> {
        self.active
            .as_ref()
            .filter(|note| note.gesture.is_armed())
            .map(|note| note.target)
    }

    pub fn offset(&self) -> f32 {
        self.active.as_ref().map_or(0.0, |note| note.gesture.offset())
    }

    pub fn pending_outcome(&self) -> Option<SwipeOutcome> {
        self.active
            .as_ref()
            .and_then(|note| note.gesture.pending_outcome())
    }

    /// Finger down on `target`'s card. Ignored while another note is in progress.
    pub fn press(&mut self, target: UserId, now: Instant, x: f32) -> bool {
        if self.active.is_some() {
            return false;
        }
        let mut gesture = VoiceNoteGesture::new(self.config, self.lock.clone());
        gesture.press(now, x);
        self.active = Some(ActiveNote { target, gesture });
        true
    }

    pub fn tick(&mut self, now: Instant) -> Option<ArmResult> {
        let result = self.active.as_mut()?.gesture.tick(now);
        if result == Some(ArmResult::Busy) {
            self.active = None;
        }
        result
    }

    pub fn drag(&mut self, x: f32) {
        if let Some(note) = self.active.as_mut() {
            note.gesture.drag(x);
        }
    }

    /// Finger up; yields the target and outcome when the press had armed.
    pub fn release(&mut self) -> Option<(UserId, SwipeRelease)> {
        let mut note = self.active.take()?;
        note.gesture.release().map(|release| (note.target, release))
    }

    pub fn cancel(&mut self) {
        if let Some(mut note) = self.active.take() {
            note.gesture.cancel();
        }
    }
}
