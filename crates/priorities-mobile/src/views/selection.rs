use dioxus::prelude::*;
use dioxus_primitives::toast::{use_toast, ToastOptions};
use priorities_core::context::{SelectionStore, Subscription};
use priorities_core::device::{HapticPattern, Haptics};
use priorities_core::layout::grid::content_height;
use priorities_core::layout::{pack_rows, ItemFrame};
use priorities_core::{Color, User, UserId};

use crate::data::merge_selection;
use crate::platform::WebHaptics;
use crate::state::{use_app_state, Screen, SCREEN_PADDING};
use crate::style::{grid_cell_style, grid_row_style, selection_ring_style};
use crate::ui::{ButtonVariant, UiButton};

/// Every bundled user laid out with the same packer as the priorities grid,
/// so both screens share the row rhythm.
#[component]
pub fn SelectionScreen() -> Element {
    let state = use_app_state();
    let selection = use_context::<SelectionStore>();
    let toasts = use_toast();
    let mut priorities = state.priorities;

    let initial = selection.clone();
    let initial_count = use_hook(move || {
        let ids: Vec<UserId> = priorities.peek().iter().map(|user| user.id).collect();
        initial.clear();
        if !ids.is_empty() {
            initial.select_all(&ids);
        }
        initial.len()
    });
    let mut selected_count = use_signal(|| initial_count);
    let mut saving = use_signal(|| false);
    use_effect(move || state.set_background(Color::WHITE));

    let users = state.fixtures.read().users.clone();
    let all_ids: Vec<UserId> = users.iter().map(|user| user.id).collect();
    let grid = state.config.read().grid;
    let rows = pack_rows(users.len(), state.content_width(), &grid);
    let height = content_height(&rows);

    let select_all_store = selection.clone();
    let on_select_all = move |_| {
        select_all_store.select_all(&all_ids);
        selected_count.set(select_all_store.len());
        WebHaptics.trigger(HapticPattern::Selection);
    };

    let save_store = selection.clone();
    let on_save = move |_| {
        if saving() {
            return;
        }
        let Some(store) = state.store.read().clone() else {
            toasts.error(
                "Database is not ready yet".to_string(),
                ToastOptions::new(),
            );
            return;
        };

        let current: Vec<UserId> = priorities.peek().iter().map(|user| user.id).collect();
        let ids = merge_selection(&current, &save_store.selected());
        saving.set(true);

        spawn(async move {
            match store.replace(&ids).await {
                Ok(saved) => {
                    priorities.set(saved);
                    WebHaptics.trigger(HapticPattern::Success);
                    state.navigate(Screen::Grid);
                }
                Err(error) => {
                    tracing::error!("Failed to save priorities: {}", error);
                    toasts.error(
                        "Could not save priorities".to_string(),
                        ToastOptions::new().description(error.to_string()),
                    );
                }
            }
            saving.set(false);
        });
    };

    let count = selected_count();

    rsx! {
        div {
            class: "screen",

            div {
                class: "screen-header",
                h1 {
                    class: "screen-title",
                    "Choose"
                }
                div {
                    style: "display: flex; gap: 8px; align-items: center;",
                    UiButton {
                        type: "button",
                        variant: ButtonVariant::Outline,
                        onclick: on_select_all,
                        "All"
                    }
                    UiButton {
                        type: "button",
                        disabled: saving(),
                        onclick: on_save,
                        "Save ({count})"
                    }
                }
            }

            div {
                style: "position: relative; margin: 0 {SCREEN_PADDING}px; height: {height:.1}px;",
                for row in rows {
                    div {
                        key: "{row.index}",
                        style: "{grid_row_style(&row)}",
                        for (frame, user) in row.items.iter().zip(row.slice(&users)) {
                            SelectionCell {
                                key: "{user.id}",
                                user: user.clone(),
                                frame: *frame,
                                on_toggle: move |count| selected_count.set(count),
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Repaints only when its own membership flips.
#[component]
fn SelectionCell(user: User, frame: ItemFrame, on_toggle: EventHandler<usize>) -> Element {
    let selection = use_context::<SelectionStore>();
    let id = user.id;
    let selected = use_signal(|| selection.is_selected(id));
    let mut subscription = use_signal(|| None::<Subscription>);

    let subscriber = selection.clone();
    use_effect(move || {
        let listener = move |is_selected: bool| {
            let mut selected = selected;
            selected.set(is_selected);
        };
        subscription.set(Some(subscriber.subscribe(id, listener)));
    });

    let is_selected = selected();
    let ring = selection_ring_style(is_selected, user.dominant_color);
    let cell_style = grid_cell_style(&frame, user.dominant_color);
    let opacity = if is_selected { "1" } else { "0.55" };

    rsx! {
        div {
            style: "{cell_style} {ring} opacity: {opacity};",
            onclick: move |_| {
                selection.toggle(id);
                WebHaptics.trigger(HapticPattern::Selection);
                on_toggle.call(selection.len());
            },
            img {
                class: "avatar",
                src: "{user.profile_picture}",
                alt: "{user.name}",
                draggable: "false",
            }
            span {
                class: "cell-label",
                if is_selected { "✓ " }
                "{user.first_name()}"
            }
        }
    }
}
