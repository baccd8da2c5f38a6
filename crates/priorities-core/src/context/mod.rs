//! App-wide services shared through the component tree.
//!
//! Each context is a plain object; the mobile shell hands them out with
//! `use_context_provider` so no module reaches for a global.

mod background;
mod mounted;
mod pull_reveal;
mod selection;
mod tab_bar;
mod voice_overlay;

pub use background::{BackgroundColor, CrossfadeConfig};
pub use mounted::MountedFlag;
pub use pull_reveal::{PullRelease, PullReveal, PullRevealConfig};
pub use selection::{SelectionStore, Subscription};
pub use tab_bar::{TabBarConfig, TabBarVisibility};
pub use voice_overlay::VoiceOverlay;
