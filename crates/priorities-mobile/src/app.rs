use std::sync::Arc;
use std::time::{Duration, Instant};

use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions, ToastProvider};
use priorities_core::animation::Animation;
use priorities_core::config::{AppConfig, CONFIG_FILE_NAME};
use priorities_core::context::SelectionStore;
use priorities_core::device::{HapticPattern, Haptics};
use priorities_core::fixtures::Fixtures;
use priorities_core::gesture::{ArmResult, SwipeOutcome};

use crate::data::MobilePriorityStore;
use crate::platform::WebHaptics;
use crate::state::{use_app_state, AppState, Screen};
use crate::style::{background_style, swipe_style, tab_bar_style};
use crate::ui::{ButtonVariant, UiButton, MOBILE_UI_STYLES};
use crate::views::{
    pointer_x, CameraScreen, GridScreen, ProfileScreen, SelectionScreen, TimelineScreen,
    ViewerScreen,
};

/// Frame loop period for deadlines and animations
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const TOAST_STYLES: &str = r"
.toast-container {
    position: fixed;
    inset: 12px 12px auto 12px;
    z-index: 9999;
    pointer-events: none;
}
.toast-list {
    margin: 0;
    padding: 0;
    list-style: none;
    display: flex;
    flex-direction: column;
    gap: 8px;
}
.toast {
    pointer-events: auto;
    border-radius: 14px;
    background: #111827;
    color: #ffffff;
    box-shadow: 0 10px 30px rgba(17, 24, 39, 0.2);
    padding: 10px 12px;
    display: flex;
    gap: 10px;
    align-items: flex-start;
}
.toast[data-type='error'] { background: #b91c1c; }
.toast-content { flex: 1; }
.toast-title { font-size: 13px; font-weight: 700; }
.toast-description { font-size: 12px; opacity: 0.85; margin-top: 2px; }
.toast-close {
    border: 0;
    background: transparent;
    color: inherit;
    font-size: 16px;
    line-height: 1;
    padding: 0;
}
";

#[component]
pub fn App() -> Element {
    rsx! {
        ToastProvider {
            AppShell {}
        }
    }
}

fn load_fixtures() -> Arc<Fixtures> {
    let fixtures = Fixtures::bundled().unwrap_or_else(|error| {
        tracing::error!("Failed to load bundled fixtures: {}", error);
        Fixtures::default()
    });
    Arc::new(fixtures)
}

#[component]
fn AppShell() -> Element {
    let state = use_context_provider(|| {
        let config = AppConfig::load_from_path(&crate::paths::data_dir().join(CONFIG_FILE_NAME));
        AppState::new(config, load_fixtures())
    });
    use_context_provider(SelectionStore::new);
    let toasts = use_toast();

    let mut store = state.store;
    let mut priorities = state.priorities;
    let mut viewport = state.viewport;
    let mut background = state.background;
    let mut voice = state.voice;
    let mut bounce = state.bounce;

    use_future(move || async move {
        match crate::platform::viewport_size().await {
            Ok(size) => viewport.set(size),
            Err(error) => tracing::warn!("Using default viewport: {}", error),
        }

        let fixtures = state.fixtures.peek().clone();
        match MobilePriorityStore::open_default(fixtures).await {
            Ok(opened) => {
                let opened = Arc::new(opened);
                match opened.list().await {
                    Ok(users) => {
                        tracing::info!(count = users.len(), "Loaded priorities");
                        priorities.set(users);
                    }
                    Err(error) => {
                        tracing::error!("Failed to load priorities: {}", error);
                        toasts.error(
                            "Could not load priorities".to_string(),
                            ToastOptions::new().description(error.to_string()),
                        );
                    }
                }
                store.set(Some(opened));
            }
            Err(error) => {
                tracing::error!("Database initialization failed: {}", error);
                toasts.error(
                    "Database initialization failed".to_string(),
                    ToastOptions::new().description(error.to_string()),
                );
            }
        }
    });

    use_future(move || async move {
        let mut last = Instant::now();
        loop {
            tokio::time::sleep(FRAME_INTERVAL).await;
            let now = Instant::now();
            let dt = now.saturating_duration_since(last);
            last = now;

            if background.peek().is_animating() {
                background.write().tick(dt);
            }

            if voice.peek().is_pressing() {
                let result = voice.write().tick(now);
                if result == Some(ArmResult::Armed) {
                    WebHaptics.trigger(HapticPattern::Medium);
                }
            }

            let finished = bounce.peek().as_ref().map(|(_, tween)| {
                let mut tween = *tween;
                tween.tick(dt);
                tween
            });
            if let Some(tween) = finished {
                let mut current = bounce.write();
                if tween.is_complete() {
                    *current = None;
                } else if let Some((_, active)) = current.as_mut() {
                    *active = tween;
                }
            }
        }
    });

    let on_release = move |_| {
        let released = voice.write().release();
        let Some((target, release)) = released else {
            return;
        };
        WebHaptics.trigger(release.haptic);
        bounce.set(Some((target, release.bounce)));

        let name = state
            .fixtures
            .peek()
            .user(target)
            .map(|user| user.first_name().to_string())
            .unwrap_or_default();
        match release.outcome {
            SwipeOutcome::Send => toasts.success(
                "Voice note sent".to_string(),
                ToastOptions::new().description(format!("Delivered to {name}")),
            ),
            SwipeOutcome::Delete => toasts.info(
                "Voice note discarded".to_string(),
                ToastOptions::new(),
            ),
            SwipeOutcome::Cancel => {}
        }
    };

    let screen = (state.screen)();
    let backdrop = background_style(background.read().displayed());

    rsx! {
        style {
            "{MOBILE_UI_STYLES}"
        }
        style {
            "{TOAST_STYLES}"
        }

        div {
            style: "min-height: 100vh; {backdrop}",
            onpointermove: move |event: PointerEvent| {
                if voice.peek().is_visible() {
                    voice.write().drag(pointer_x(&event));
                }
            },
            onpointerup: on_release,
            onpointercancel: move |_| voice.write().cancel(),

            match screen {
                Screen::Grid => rsx! { GridScreen {} },
                Screen::Selection => rsx! { SelectionScreen {} },
                Screen::Profile(user) => rsx! { ProfileScreen { key: "{user}", user } },
                Screen::Timeline(user) => rsx! { TimelineScreen { key: "{user}", user } },
                Screen::Viewer { user, source, page } => rsx! { ViewerScreen { user, source, page } },
                Screen::Camera => rsx! { CameraScreen {} },
            }

            VoiceNoteOverlay {}

            if screen.has_tab_bar() {
                TabBar { screen }
            }
        }
    }
}

#[component]
fn TabBar(screen: Screen) -> Element {
    let state = use_app_state();
    let visible = state.tab_bar.read().is_visible();
    let tab = |target: Screen| {
        if screen == target {
            ButtonVariant::Primary
        } else {
            ButtonVariant::Ghost
        }
    };

    rsx! {
        nav {
            class: "tab-bar",
            style: "{tab_bar_style(visible)}",
            UiButton {
                type: "button",
                variant: tab(Screen::Grid),
                onclick: move |_| state.navigate(Screen::Grid),
                "Priorities"
            }
            UiButton {
                type: "button",
                variant: tab(Screen::Selection),
                onclick: move |_| state.navigate(Screen::Selection),
                "Choose"
            }
            UiButton {
                type: "button",
                variant: ButtonVariant::Ghost,
                onclick: move |_| state.navigate(Screen::Camera),
                "Camera"
            }
        }
    }
}

#[component]
fn VoiceNoteOverlay() -> Element {
    let state = use_app_state();
    let voice = state.voice.read();
    if !voice.is_visible() {
        return rsx! {};
    }

    let name = voice
        .target()
        .and_then(|id| state.fixtures.read().user(id).map(|user| user.first_name().to_string()))
        .unwrap_or_default();
    let pending = voice.pending_outcome();
    let hint = match pending {
        Some(SwipeOutcome::Send) => "Release to send",
        Some(SwipeOutcome::Delete) => "Release to delete",
        Some(SwipeOutcome::Cancel) | None => "Swipe right to send, left to delete",
    };
    let pill = swipe_style(voice.offset(), pending);

    rsx! {
        div {
            class: "voice-overlay",
            p {
                style: "margin: 0; font-size: 14px; opacity: 0.8;",
                "Recording for {name}"
            }
            div {
                style: "
                    {pill}
                    color: #111827;
                    border-radius: 999px;
                    padding: 16px 28px;
                    font-size: 16px;
                    font-weight: 700;
                ",
                "{hint}"
            }
        }
    }
}
