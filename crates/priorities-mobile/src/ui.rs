//! Shared mobile UI primitives.

use dioxus::prelude::*;

/// Shared styles for buttons, screens and overlays.
pub const MOBILE_UI_STYLES: &str = r"
* {
    box-sizing: border-box;
}

body {
    margin: 0;
    font-family: system-ui, sans-serif;
    -webkit-user-select: none;
    user-select: none;
    touch-action: manipulation;
}

.ui-button {
    border-radius: 999px;
    padding: 10px 16px;
    font-size: 14px;
    font-weight: 600;
    border: 1px solid transparent;
    transition: background-color 120ms ease, color 120ms ease, border-color 120ms ease;
}

.ui-button:disabled {
    opacity: 0.55;
}

.ui-button--block {
    width: 100%;
}

.ui-button--primary {
    background: #111827;
    color: #ffffff;
    border-color: #111827;
}

.ui-button--outline {
    background: rgba(255, 255, 255, 0.85);
    color: #111827;
    border-color: rgba(17, 24, 39, 0.2);
}

.ui-button--ghost {
    background: transparent;
    color: inherit;
    border-color: transparent;
}

.screen {
    position: relative;
    height: 100vh;
    overflow-y: auto;
    padding-bottom: 88px;
    transition: background-color 400ms ease-out;
}

.screen-header {
    display: flex;
    align-items: center;
    justify-content: space-between;
    padding: 16px;
}

.screen-title {
    margin: 0;
    font-size: 26px;
    font-weight: 800;
}

.avatar {
    width: 100%;
    height: 100%;
    object-fit: cover;
    border-radius: inherit;
    pointer-events: none;
}

.cell-label {
    position: absolute;
    left: 10px;
    bottom: 8px;
    color: #ffffff;
    font-size: 13px;
    font-weight: 700;
    text-shadow: 0 1px 4px rgba(0, 0, 0, 0.5);
}

.tab-bar {
    display: flex;
    justify-content: space-around;
    padding: 10px 16px 18px 16px;
    background: rgba(255, 255, 255, 0.92);
    border-top: 1px solid #e5e7eb;
}

.voice-overlay {
    position: fixed;
    inset: 0;
    display: flex;
    flex-direction: column;
    align-items: center;
    justify-content: center;
    gap: 16px;
    background: rgba(17, 24, 39, 0.72);
    color: #ffffff;
    z-index: 50;
}

.status-banner {
    position: fixed;
    left: 12px;
    right: 12px;
    top: 12px;
    border-radius: 12px;
    padding: 10px 12px;
    background: #111827;
    color: #ffffff;
    font-size: 13px;
    z-index: 60;
}
";

/// Button variant mapping.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Outline,
    Ghost,
}

impl ButtonVariant {
    const fn class(self) -> &'static str {
        match self {
            Self::Primary => "ui-button--primary",
            Self::Outline => "ui-button--outline",
            Self::Ghost => "ui-button--ghost",
        }
    }
}

#[component]
pub fn UiButton(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] block: bool,
    #[props(default)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    #[props(extends = GlobalAttributes)]
    #[props(extends = button)]
    attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut class_name = format!("ui-button {}", variant.class());
    if block {
        class_name.push_str(" ui-button--block");
    }

    rsx! {
        button {
            class: "{class_name}",
            disabled,
            onclick: move |event| {
                if let Some(handler) = &onclick {
                    handler.call(event);
                }
            },
            ..attributes,
            {children}
        }
    }
}
