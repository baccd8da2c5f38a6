//! Application state shared through Dioxus context providers.

use std::sync::Arc;

use dioxus::prelude::*;
use priorities_core::animation::{Animation, Tween};
use priorities_core::config::AppConfig;
use priorities_core::context::{BackgroundColor, TabBarVisibility, VoiceOverlay};
use priorities_core::fixtures::Fixtures;
use priorities_core::gesture::VoiceSessionLock;
use priorities_core::models::MediaSource;
use priorities_core::{Color, User, UserId};

use crate::data::MobilePriorityStore;

/// Typical phone viewport until the webview reports its size
pub const DEFAULT_VIEWPORT: (f32, f32) = (390.0, 844.0);
pub const SCREEN_PADDING: f32 = 16.0;

/// Screens reachable from the tab bar and from each other
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Grid,
    Selection,
    Profile(UserId),
    Timeline(UserId),
    Viewer {
        user: UserId,
        source: MediaSource,
        page: usize,
    },
    Camera,
}

impl Screen {
    /// Screens that show the tab bar
    pub const fn has_tab_bar(self) -> bool {
        matches!(self, Self::Grid | Self::Selection | Self::Profile(_))
    }
}

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    pub screen: Signal<Screen>,
    /// Persisted priorities, once the database is open
    pub store: Signal<Option<Arc<MobilePriorityStore>>>,
    pub priorities: Signal<Vec<User>>,
    pub fixtures: Signal<Arc<Fixtures>>,
    pub config: Signal<AppConfig>,
    pub background: Signal<BackgroundColor>,
    pub tab_bar: Signal<TabBarVisibility>,
    pub voice: Signal<VoiceOverlay>,
    /// Released voice-note card springing back to its origin
    pub bounce: Signal<Option<(UserId, Tween)>>,
    /// Webview size in CSS px
    pub viewport: Signal<(f32, f32)>,
}

impl AppState {
    pub fn new(config: AppConfig, fixtures: Arc<Fixtures>) -> Self {
        Self {
            screen: Signal::new(Screen::Grid),
            store: Signal::new(None),
            priorities: Signal::new(Vec::new()),
            fixtures: Signal::new(fixtures),
            background: Signal::new(BackgroundColor::new(Color::WHITE, config.crossfade)),
            tab_bar: Signal::new(TabBarVisibility::new(config.tab_bar)),
            voice: Signal::new(VoiceOverlay::new(config.swipe, VoiceSessionLock::new())),
            config: Signal::new(config),
            bounce: Signal::new(None),
            viewport: Signal::new(DEFAULT_VIEWPORT),
        }
    }

    pub fn navigate(mut self, screen: Screen) {
        tracing::debug!(?screen, "Navigating");
        self.tab_bar.write().show();
        self.screen.set(screen);
    }

    /// Crossfade the ambient background; a repeat of the current color is a no-op.
    pub fn set_background(mut self, color: Color) {
        if self.background.peek().current() != color {
            self.background.write().handle_color_change(color);
        }
    }

    /// Horizontal drag offset of `id`'s card, live or bouncing back
    pub fn card_offset(self, id: UserId) -> f32 {
        let voice = self.voice.read();
        if voice.target() == Some(id) {
            return voice.offset();
        }
        match *self.bounce.read() {
            Some((target, tween)) if target == id => tween.value(),
            _ => 0.0,
        }
    }

    /// Usable content width inside the screen padding
    pub fn content_width(self) -> f32 {
        (self.viewport.read().0 - 2.0 * SCREEN_PADDING).max(1.0)
    }
}

/// Access the global app state.
pub fn use_app_state() -> AppState {
    use_context::<AppState>()
}
