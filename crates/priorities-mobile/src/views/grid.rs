use std::time::Instant;

use dioxus::prelude::*;
use priorities_core::layout::grid::content_height;
use priorities_core::layout::{decoration_anchor, decoration_seed, pack_rows, Ellipse, ItemFrame};
use priorities_core::{Color, User};

use super::{pointer_x, today};
use crate::state::{use_app_state, Screen, SCREEN_PADDING};
use crate::style::{decoration_style, grid_cell_style, grid_row_style};
use crate::ui::{ButtonVariant, UiButton};

const GRID_SCROLL_ID: &str = "priorities-grid";

/// Birthday countdowns shown on the decoration within this many days
const BIRTHDAY_BADGE_DAYS: i64 = 30;

#[component]
pub fn GridScreen() -> Element {
    let state = use_app_state();
    let mut tab_bar = state.tab_bar;

    use_effect(move || state.set_background(Color::WHITE));

    let users = state.priorities.read().clone();
    let grid = state.config.read().grid;
    let rows = pack_rows(users.len(), state.content_width(), &grid);
    let height = content_height(&rows);

    let on_scroll = move |_| {
        spawn(async move {
            match crate::platform::scroll_offset(GRID_SCROLL_ID).await {
                Ok(offset) => {
                    tab_bar.write().on_scroll(offset);
                }
                Err(error) => tracing::debug!("Scroll offset unavailable: {}", error),
            }
        });
    };

    rsx! {
        div {
            id: GRID_SCROLL_ID,
            class: "screen",
            onscroll: on_scroll,

            div {
                class: "screen-header",
                h1 {
                    class: "screen-title",
                    "Priorities"
                }
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Outline,
                    onclick: move |_| state.navigate(Screen::Selection),
                    "Edit"
                }
            }

            if users.is_empty() {
                div {
                    style: "padding: 48px 24px; text-align: center; color: #6b7280;",
                    p {
                        style: "margin: 0 0 16px 0; font-size: 15px;",
                        "Pick the people who matter most to you."
                    }
                    UiButton {
                        type: "button",
                        onclick: move |_| state.navigate(Screen::Selection),
                        "Choose priorities"
                    }
                }
            } else {
                div {
                    style: "position: relative; margin: 0 {SCREEN_PADDING}px; height: {height:.1}px;",
                    for row in rows {
                        div {
                            key: "{row.index}",
                            style: "{grid_row_style(&row)}",
                            for (frame, user) in row.items.iter().zip(row.slice(&users)) {
                                GridCell {
                                    key: "{user.id}",
                                    user: user.clone(),
                                    frame: *frame,
                                    row_index: row.index,
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn GridCell(user: User, frame: ItemFrame, row_index: usize) -> Element {
    let state = use_app_state();
    let mut voice = state.voice;
    let id = user.id;

    let angle = state.config.read().angle;
    let anchor = decoration_anchor(
        &decoration_seed(id, row_index),
        &Ellipse::inscribed(frame.width, frame.height),
        &angle,
    );
    let days = user.days_until_birthday(today());
    let badge = if days <= BIRTHDAY_BADGE_DAYS {
        format!("{days}d")
    } else {
        "♥".to_string()
    };
    let offset = state.card_offset(id);
    let cell_style = grid_cell_style(&frame, user.dominant_color);

    rsx! {
        div {
            style: "{cell_style} transform: translateX({offset:.1}px);",
            onpointerdown: move |event: PointerEvent| {
                voice.write().press(id, Instant::now(), pointer_x(&event));
            },
            onclick: move |_| {
                let just_released = state
                    .bounce
                    .peek()
                    .as_ref()
                    .is_some_and(|(target, _)| *target == id);
                if !just_released {
                    state.navigate(Screen::Profile(id));
                }
            },

            img {
                class: "avatar",
                src: "{user.profile_picture}",
                alt: "{user.name}",
                draggable: "false",
            }
            span {
                class: "cell-label",
                "{user.first_name()}"
            }
            div {
                style: "{decoration_style(&anchor)} display: flex; align-items: center; justify-content: center; font-size: 11px; font-weight: 700; color: #111827;",
                "{badge}"
            }
        }
    }
}
