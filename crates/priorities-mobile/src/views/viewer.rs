use std::collections::HashMap;

use dioxus::prelude::*;
use priorities_core::gesture::PinchZoom;
use priorities_core::models::{format_duration, MediaSource};
use priorities_core::{MediaItem, UserId};

use super::{pointer_x, pointer_y};
use crate::state::{use_app_state, Screen};
use crate::ui::{ButtonVariant, UiButton};

/// Active pointers by id, in client coordinates
type Pointers = HashMap<i32, (f32, f32)>;

fn spread(pointers: &Pointers) -> Option<f32> {
    let mut points = pointers.values();
    let (ax, ay) = points.next()?;
    let (bx, by) = points.next()?;
    Some((ax - bx).hypot(ay - by))
}

#[component]
pub fn ViewerScreen(user: UserId, source: MediaSource, page: usize) -> Element {
    let state = use_app_state();
    let (width, height) = *state.viewport.read();
    let pinch_config = state.config.read().pinch;
    let mut zoom = use_signal(move || PinchZoom::new(pinch_config, width, height));
    let mut pointers = use_signal(Pointers::new);
    let mut pinch_start = use_signal(|| None::<f32>);
    let mut pan_origin = use_signal(|| None::<(f32, f32)>);

    let fixtures = state.fixtures.read().clone();
    let pages = fixtures
        .user(user)
        .map(|profile| fixtures.media_for(&profile.unique_user_id, source))
        .unwrap_or_default();
    let count = pages.len();
    let back = match source {
        MediaSource::Timeline => Screen::Timeline(user),
        MediaSource::Profile => Screen::Profile(user),
    };
    let Some(item) = pages.get(page).cloned() else {
        return rsx! {
            div {
                class: "screen",
                p { style: "padding: 24px;", "This moment is no longer available." }
                UiButton {
                    type: "button",
                    onclick: move |_| state.navigate(back),
                    "Back"
                }
            }
        };
    };

    let go_to = move |target: usize| {
        zoom.write().reset();
        state.navigate(Screen::Viewer {
            user,
            source,
            page: target,
        });
    };

    let on_down = move |event: PointerEvent| {
        let point = (pointer_x(&event), pointer_y(&event));
        pointers.write().insert(event.pointer_id(), point);
        if let Some(distance) = spread(&pointers.read()) {
            pan_origin.set(None);
            zoom.write().pan_end();
            pinch_start.set(Some(distance));
            zoom.write().pinch_start();
        } else if zoom.read().is_zoomed() {
            pan_origin.set(Some(point));
            zoom.write().pan_start();
        }
    };
    let on_move = move |event: PointerEvent| {
        let point = (pointer_x(&event), pointer_y(&event));
        if pointers.read().contains_key(&event.pointer_id()) {
            pointers.write().insert(event.pointer_id(), point);
        } else {
            return;
        }

        if let (Some(start), Some(distance)) = (pinch_start(), spread(&pointers.read())) {
            if start > 0.0 {
                zoom.write().pinch_update(distance / start);
            }
        } else if let Some((x, y)) = pan_origin() {
            zoom.write().pan_update(point.0 - x, point.1 - y);
        }
    };
    let on_up = move |event: PointerEvent| {
        pointers.write().remove(&event.pointer_id());
        if pinch_start().is_some() && pointers.read().len() < 2 {
            pinch_start.set(None);
            zoom.write().pinch_end();
        }
        if pointers.read().is_empty() {
            pan_origin.set(None);
            zoom.write().pan_end();
        }
    };

    let transform = zoom.read().transform().to_css();
    let position = page + 1;

    rsx! {
        div {
            style: "
                position: fixed;
                inset: 0;
                background: #000000;
                color: #ffffff;
                display: flex;
                flex-direction: column;
                touch-action: none;
            ",

            div {
                style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 16px;",
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| state.navigate(back),
                    "Close"
                }
                span { style: "font-size: 13px; opacity: 0.8;", "{position} / {count}" }
            }

            div {
                style: "flex: 1; overflow: hidden; display: flex; align-items: center; justify-content: center;",
                match item {
                    MediaItem::Photo { uri, caption, .. } => rsx! {
                        img {
                            src: "{uri}",
                            alt: caption.clone().unwrap_or_default(),
                            draggable: "false",
                            style: "max-width: 100%; max-height: 100%; transform: {transform}; transition: transform 60ms linear;",
                            onpointerdown: on_down,
                            onpointermove: on_move,
                            onpointerup: on_up,
                            onpointercancel: on_up,
                            ondoubleclick: move |_| zoom.write().double_tap(),
                        }
                    },
                    MediaItem::Video { uri, thumb_uri, .. } => rsx! {
                        video {
                            src: "{uri}",
                            poster: thumb_uri.unwrap_or_default(),
                            controls: true,
                            playsinline: true,
                            style: "max-width: 100%; max-height: 100%;",
                        }
                    },
                    MediaItem::Audio { uri, duration_sec, title, .. } => {
                        let label = match (title, duration_sec) {
                            (Some(title), Some(secs)) => format!("{title} · {}", format_duration(secs)),
                            (Some(title), None) => title,
                            (None, Some(secs)) => format!("Voice note · {}", format_duration(secs)),
                            (None, None) => "Voice note".to_string(),
                        };
                        rsx! {
                            div {
                                style: "display: flex; flex-direction: column; gap: 12px; align-items: center;",
                                p { style: "margin: 0; font-size: 16px;", "{label}" }
                                audio { src: "{uri}", controls: true }
                            }
                        }
                    }
                }
            }

            div {
                style: "display: flex; justify-content: space-between; padding: 12px 16px 24px 16px;",
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    disabled: page == 0,
                    onclick: move |_| go_to(page.saturating_sub(1)),
                    "Previous"
                }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    disabled: position >= count,
                    onclick: move |_| go_to(position),
                    "Next"
                }
            }
        }
    }
}
