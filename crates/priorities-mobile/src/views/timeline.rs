use dioxus::prelude::*;
use priorities_core::models::{MediaSource, Sender};
use priorities_core::timeline::{group_by_month, media_pages, page_index};
use priorities_core::{TimelineEvent, UserId};

use crate::state::{use_app_state, Screen};
use crate::ui::{ButtonVariant, UiButton};

#[component]
pub fn TimelineScreen(user: UserId) -> Element {
    let state = use_app_state();
    let fixtures = state.fixtures.read().clone();
    let Some(profile) = fixtures.user(user) else {
        return rsx! {
            div {
                class: "screen",
                p { style: "padding: 24px;", "Nothing to show." }
            }
        };
    };

    let events = fixtures.timeline_for(&profile.unique_user_id);
    let months = group_by_month(events.iter().copied());
    let pages = media_pages(events.iter().copied());
    let name = profile.first_name().to_string();

    rsx! {
        div {
            class: "screen",
            style: "background: #ffffff; color: #111827;",

            div {
                class: "screen-header",
                UiButton {
                    type: "button",
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| state.navigate(Screen::Profile(user)),
                    "‹ {name}"
                }
            }

            if months.is_empty() {
                p {
                    style: "padding: 24px; color: #6b7280;",
                    "No moments with {name} yet."
                }
            }

            for month in months.iter() {
                section {
                    key: "{month.year}-{month.month}",
                    style: "padding: 0 16px 16px 16px;",
                    h2 {
                        style: "margin: 16px 0 8px 0; font-size: 20px;",
                        "{month.label}"
                    }
                    for day in month.days.iter() {
                        div {
                            key: "{day.date}",
                            p {
                                style: "margin: 12px 0 6px 0; font-size: 12px; color: #6b7280; text-transform: uppercase;",
                                "{day.label}"
                            }
                            for event in day.events.iter() {
                                TimelineRow {
                                    key: "{event.id}",
                                    user,
                                    page: page_index(&pages, &event.id),
                                    event: event.clone(),
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
fn TimelineRow(user: UserId, page: Option<usize>, event: TimelineEvent) -> Element {
    let state = use_app_state();
    let summary = event.summary();
    let time = event.timestamp.format("%H:%M").to_string();
    let align = if event.sender == Sender::Me {
        "flex-end"
    } else {
        "flex-start"
    };
    let bubble = if page.is_some() { "#eef2ff" } else { "#f3f4f6" };

    rsx! {
        div {
            style: "display: flex; justify-content: {align}; margin: 4px 0;",
            button {
                type: "button",
                disabled: page.is_none(),
                style: "
                    max-width: 80%;
                    border: 0;
                    border-radius: 16px;
                    padding: 10px 14px;
                    background: {bubble};
                    color: #111827;
                    text-align: left;
                    font-size: 14px;
                ",
                onclick: move |_| {
                    if let Some(page) = page {
                        state.navigate(Screen::Viewer {
                            user,
                            source: MediaSource::Timeline,
                            page,
                        });
                    }
                },
                "{summary}"
                span {
                    style: "display: block; margin-top: 4px; font-size: 11px; color: #9ca3af;",
                    "{time}"
                }
            }
        }
    }
}
