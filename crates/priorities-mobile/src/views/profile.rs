use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use priorities_core::animation::SharedValue;
use priorities_core::context::{PullRelease, PullReveal};
use priorities_core::device::{HapticPattern, Haptics};
use priorities_core::layout::{color_at_offset, StickyStack};
use priorities_core::models::{find_partner, format_duration, MediaSource, UserFilm};
use priorities_core::{Color, MediaItem, UserId};

use super::{pointer_y, today};
use crate::platform::WebHaptics;
use crate::state::{use_app_state, Screen};
use crate::style::{pull_reveal_style, sticky_card_style};
use crate::ui::{ButtonVariant, UiButton};

const PROFILE_SCROLL_ID: &str = "priorities-profile";

/// Gap between a card's bottom and the next card's natural top
const CARD_GAP: f32 = 16.0;

/// Timeline events previewed in the pull-to-reveal drawer
const PREVIEW_EVENTS: usize = 3;

#[component]
pub fn ProfileScreen(user: UserId) -> Element {
    let state = use_app_state();
    let toasts = use_toast();
    let mut tab_bar = state.tab_bar;
    let mut priorities = state.priorities;

    // `scroll` is read without subscribing; only the stack cards and the
    // color band subscribe to `offset`, so scrolling never re-renders this screen.
    let scroll = use_hook(|| SharedValue::new(0.0_f32));
    let mut offset = use_signal(|| 0.0_f32);
    let pull_config = state.config.read().pull_reveal;
    let mut pull = use_signal(move || PullReveal::new(pull_config));
    let mut pull_origin = use_signal(|| None::<f32>);
    let mut busy = use_signal(|| false);

    let fixtures = state.fixtures.read().clone();
    let accent = fixtures
        .user(user)
        .map_or(Color::WHITE, |profile| profile.dominant_color);
    use_effect(move || state.set_background(accent));

    let Some(profile) = fixtures.user(user).cloned() else {
        return rsx! {
            div {
                class: "screen",
                p { style: "padding: 24px;", "This person is no longer available." }
                UiButton {
                    type: "button",
                    onclick: move |_| state.navigate(Screen::Grid),
                    "Back"
                }
            }
        };
    };

    let films: Vec<UserFilm> = fixtures
        .films_for(&profile.unique_user_id)
        .into_iter()
        .cloned()
        .collect();
    let sticky = state.config.read().sticky;
    let stack = StickyStack::new(films.len(), sticky);
    let card_height = (sticky.card_spacing - CARD_GAP).max(1.0);
    let stack_height = stack.content_height(card_height);
    let card_colors: Vec<Color> = (0..films.len())
        .map(|index| accent.mix(Color::WHITE, 0.12 * index as f32))
        .collect();
    let header_media: Vec<MediaItem> =
        fixtures.media_for(&profile.unique_user_id, MediaSource::Profile);

    let today = today();
    let partner = find_partner(&profile, &fixtures.users).map(|partner| partner.name.clone());
    let relationship = profile.relationship.clone().unwrap_or_default();
    let age = profile.age_on(today);
    let days = profile.days_until_birthday(today);
    let birthday_label = match days {
        0 => "Birthday today".to_string(),
        1 => "Birthday tomorrow".to_string(),
        days => format!("Birthday in {days} days"),
    };
    let is_priority = priorities.read().iter().any(|entry| entry.id == user);
    let preview: Vec<String> = {
        let mut events = fixtures.timeline_for(&profile.unique_user_id);
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events
            .into_iter()
            .take(PREVIEW_EVENTS)
            .map(|event| format!("{} · {}", event.sender.label(), event.summary()))
            .collect()
    };

    let scroll_reader = scroll.clone();
    let on_scroll = move |_| {
        let scroll = scroll_reader.clone();
        spawn(async move {
            match crate::platform::scroll_offset(PROFILE_SCROLL_ID).await {
                Ok(value) => {
                    if scroll.set(value) {
                        offset.set(value);
                    }
                    tab_bar.write().on_scroll(value);
                }
                Err(error) => tracing::debug!("Scroll offset unavailable: {}", error),
            }
        });
    };

    let toggle_priority = move |_| {
        if busy() {
            return;
        }
        let Some(store) = state.store.read().clone() else {
            toasts.error("Database is not ready yet".to_string(), ToastOptions::new());
            return;
        };
        busy.set(true);
        spawn(async move {
            let result = if is_priority {
                store.remove(user).await
            } else {
                store.add(user).await
            };
            match result {
                Ok(_) => match store.list().await {
                    Ok(users) => {
                        priorities.set(users);
                        WebHaptics.trigger(HapticPattern::Light);
                    }
                    Err(error) => tracing::error!("Failed to reload priorities: {}", error),
                },
                Err(error) => {
                    tracing::error!("Failed to update priorities: {}", error);
                    toasts.error(
                        "Could not update priorities".to_string(),
                        ToastOptions::new().description(error.to_string()),
                    );
                }
            }
            busy.set(false);
        });
    };

    let pull_scroll = scroll.clone();
    let on_pull_start = move |event: PointerEvent| {
        if pull_scroll.get() <= 0.0 {
            pull_origin.set(Some(pointer_y(&event)));
        }
    };
    let on_pull_move = move |event: PointerEvent| {
        let Some(origin) = pull_origin() else {
            return;
        };
        pull.write().pull(pointer_y(&event) - origin);
    };
    let on_pull_end = move |_| {
        if pull_origin.take().is_none() {
            return;
        }
        match pull.write().release() {
            PullRelease::Toggled { revealed } => {
                tracing::debug!(revealed, "Timeline drawer toggled");
                WebHaptics.trigger(HapticPattern::Medium);
            }
            PullRelease::SnapBack => {}
        }
    };

    let drawer = pull_reveal_style(pull.read().progress(), pull.read().is_revealed());
    let revealed = pull.read().is_revealed();
    let priority_label = if is_priority {
        "Remove from priorities"
    } else {
        "Add to priorities"
    };

    rsx! {
        div {
            id: PROFILE_SCROLL_ID,
            class: "screen",
            onscroll: on_scroll,

            div {
                style: "padding: 16px;",
                onpointerdown: on_pull_start,
                onpointermove: on_pull_move,
                onpointerup: on_pull_end,
                onpointercancel: move |_| pull_origin.set(None),

                UiButton {
                    type: "button",
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| state.navigate(Screen::Grid),
                    "‹ Back"
                }
                div {
                    style: "display: flex; gap: 16px; align-items: center; margin-top: 8px;",
                    img {
                        src: "{profile.profile_picture}",
                        alt: "{profile.name}",
                        style: "width: 88px; height: 88px; border-radius: 50%; object-fit: cover;",
                    }
                    div {
                        h1 {
                            class: "screen-title",
                            "{profile.name}"
                        }
                        if !relationship.is_empty() {
                            p { style: "margin: 4px 0 0 0; font-size: 14px;", "{relationship}" }
                        }
                        p { style: "margin: 4px 0 0 0; font-size: 13px; opacity: 0.8;", "{age} · {birthday_label}" }
                        if let Some(partner) = partner {
                            p { style: "margin: 4px 0 0 0; font-size: 13px; opacity: 0.8;", "With {partner}" }
                        }
                    }
                }
                div {
                    style: "display: flex; gap: 8px; margin-top: 16px; flex-wrap: wrap;",
                    UiButton {
                        type: "button",
                        disabled: busy(),
                        onclick: toggle_priority,
                        "{priority_label}"
                    }
                    UiButton {
                        type: "button",
                        variant: ButtonVariant::Outline,
                        onclick: move |_| state.navigate(Screen::Timeline(user)),
                        "Timeline"
                    }
                }
                if !header_media.is_empty() {
                    div {
                        style: "display: flex; gap: 8px; margin-top: 16px; overflow-x: auto;",
                        for (page, item) in header_media.iter().enumerate() {
                            HeaderMedia {
                                key: "{item.id()}",
                                item: item.clone(),
                                onopen: move |()| state.navigate(Screen::Viewer {
                                    user,
                                    source: MediaSource::Profile,
                                    page,
                                }),
                            }
                        }
                    }
                }
                p {
                    style: "margin: 12px 0 0 0; font-size: 12px; opacity: 0.7;",
                    if revealed { "Pull down to hide recent moments" } else { "Pull down for recent moments" }
                }
            }

            div {
                style: "overflow: hidden; padding: 0 16px; {drawer}",
                for (index, line) in preview.iter().enumerate() {
                    p {
                        key: "{index}",
                        style: "margin: 8px 0; font-size: 14px;",
                        "{line}"
                    }
                }
                if revealed {
                    UiButton {
                        type: "button",
                        variant: ButtonVariant::Outline,
                        onclick: move |_| state.navigate(Screen::Timeline(user)),
                        "Open timeline"
                    }
                }
            }

            ColorBand {
                offset,
                extent: sticky.card_spacing,
                colors: card_colors.clone(),
                fallback: accent,
            }

            div {
                style: "position: relative; height: {stack_height:.1}px;",
                for (index, (film, color)) in films.iter().zip(card_colors.iter()).enumerate() {
                    FilmCard {
                        key: "{film.id}",
                        film: film.clone(),
                        index,
                        stack,
                        height: card_height,
                        color: *color,
                        offset,
                    }
                }
            }
        }
    }
}

/// Strip tinted by the film under the stack's sticky line.
#[component]
fn ColorBand(
    offset: ReadOnlySignal<f32>,
    extent: f32,
    colors: Vec<Color>,
    fallback: Color,
) -> Element {
    let band = color_at_offset(offset(), extent, &colors).unwrap_or(fallback);

    rsx! {
        div {
            style: "position: sticky; top: 0; z-index: 2; height: 6px; background: {band}; transition: background-color 120ms linear;",
        }
    }
}

#[component]
fn HeaderMedia(item: MediaItem, onopen: EventHandler<()>) -> Element {
    let thumbnail = item.thumbnail().map(str::to_string);
    let label = if item.is_playable() { "▶" } else { "" };

    rsx! {
        button {
            type: "button",
            style: "
                position: relative;
                width: 64px;
                height: 64px;
                flex: none;
                border: 0;
                border-radius: 12px;
                padding: 0;
                overflow: hidden;
                background: rgba(17, 24, 39, 0.2);
                color: #ffffff;
            ",
            onclick: move |_| onopen.call(()),
            if let Some(src) = thumbnail {
                img {
                    src: "{src}",
                    alt: "",
                    draggable: "false",
                    style: "width: 100%; height: 100%; object-fit: cover;",
                }
            }
            span {
                style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; font-size: 18px;",
                "{label}"
            }
        }
    }
}

/// One card of the sticky stack; the only part of the profile that
/// re-renders while scrolling.
#[component]
fn FilmCard(
    film: UserFilm,
    index: usize,
    stack: StickyStack,
    height: f32,
    color: Color,
    offset: ReadOnlySignal<f32>,
) -> Element {
    let transform = stack.transform(index, offset());
    let base_top = stack.natural_top(index) - stack.config().top_inset;
    let style = sticky_card_style(base_top, &transform, color);
    let duration = format_duration(film.duration_sec);
    let created = film.created_at.format("%B %-d, %Y").to_string();

    rsx! {
        article {
            style: "{style} height: {height:.1}px; overflow: hidden; box-shadow: 0 12px 32px rgba(0, 0, 0, 0.18);",
            img {
                src: "{film.thumb_uri}",
                alt: "{film.title}",
                style: "width: 100%; height: 70%; object-fit: cover;",
            }
            div {
                style: "padding: 12px 16px;",
                p { style: "margin: 0; font-size: 16px; font-weight: 700;", "{film.title}" }
                p { style: "margin: 4px 0 0 0; font-size: 12px; opacity: 0.75;", "{duration} · {created}" }
            }
        }
    }
}
