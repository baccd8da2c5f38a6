//! Gesture state machines driven by continuous position updates.

pub mod pinch;
pub mod shutter;
pub mod voice_note;

pub use pinch::{PinchConfig, PinchZoom, ZoomTransform};
pub use shutter::{Shutter, ShutterAction, ShutterConfig, ShutterState};
pub use voice_note::{
    resolve_swipe, ArmResult, SwipeConfig, SwipeOutcome, SwipeRelease, VoiceNoteGesture,
    VoiceNoteState, VoiceSessionGuard, VoiceSessionLock,
};
