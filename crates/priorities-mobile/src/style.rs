//! Inline style builders for geometry computed in `priorities-core`.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use priorities_core::gesture::SwipeOutcome;
use priorities_core::layout::{Anchor, CardTransform, ItemFrame, RowData};
use priorities_core::Color;

/// Diameter of the decorative badge placed on a grid avatar
pub const DECORATION_SIZE: f32 = 28.0;

/// Absolutely positioned grid cell inside its row.
pub fn grid_cell_style(frame: &ItemFrame, color: Color) -> String {
    format!(
        "position: absolute; left: {:.1}px; top: 0; width: {:.1}px; height: {:.1}px; \
         border-radius: 18px; background: {};",
        frame.x, frame.width, frame.height, color
    )
}

pub fn grid_row_style(row: &RowData) -> String {
    format!(
        "position: absolute; left: 0; right: 0; top: {:.1}px; height: {:.1}px;",
        row.y, row.height
    )
}

/// Decoration centered on `anchor`, relative to its cell.
pub fn decoration_style(anchor: &Anchor) -> String {
    let half = DECORATION_SIZE / 2.0;
    format!(
        "position: absolute; left: {:.1}px; top: {:.1}px; width: {DECORATION_SIZE}px; \
         height: {DECORATION_SIZE}px; border-radius: 50%; background: #ffffff; \
         box-shadow: 0 2px 6px rgba(0, 0, 0, 0.2); transform: rotate({:.1}deg);",
        anchor.x - half,
        anchor.y - half,
        anchor.angle_deg
    )
}

/// Sticky profile card at its natural offset plus the scroll transform.
pub fn sticky_card_style(natural_top: f32, transform: &CardTransform, color: Color) -> String {
    format!(
        "position: absolute; left: 16px; right: 16px; top: {natural_top:.1}px; \
         transform: translateY({:.2}px) scale({:.4}); transform-origin: top center; \
         background: {color}; border-radius: 24px;",
        transform.translate_y, transform.scale
    )
}

pub fn background_style(color: Color) -> String {
    let text = if color.prefers_dark_text() {
        "#111827"
    } else {
        "#ffffff"
    };
    format!("background: {color}; color: {text};")
}

/// Row under a held voice note, shifted by the live drag offset.
pub fn swipe_style(offset: f32, pending: Option<SwipeOutcome>) -> String {
    let tint = match pending {
        Some(SwipeOutcome::Delete) => "#fee2e2",
        Some(SwipeOutcome::Send) => "#dcfce7",
        Some(SwipeOutcome::Cancel) | None => "#ffffff",
    };
    format!("transform: translateX({offset:.1}px); background: {tint};")
}

/// Timeline drawer peeking in while pulled.
pub fn pull_reveal_style(progress: f32, revealed: bool) -> String {
    let visible = if revealed { 1.0 } else { progress.clamp(0.0, 1.0) };
    format!(
        "transform: translateY({:.1}%); opacity: {visible:.3};",
        (visible - 1.0) * 100.0
    )
}

pub fn tab_bar_style(visible: bool) -> &'static str {
    if visible {
        "position: fixed; left: 0; right: 0; bottom: 0; transform: translateY(0); \
         transition: transform 200ms ease-out;"
    } else {
        "position: fixed; left: 0; right: 0; bottom: 0; transform: translateY(100%); \
         transition: transform 200ms ease-out;"
    }
}

pub fn selection_ring_style(selected: bool, color: Color) -> String {
    if selected {
        format!("outline: 4px solid {color}; outline-offset: -4px;")
    } else {
        "outline: none;".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cell_uses_frame_geometry() {
        let frame = ItemFrame {
            x: 12.0,
            y: 0.0,
            width: 100.5,
            height: 120.0,
        };
        let style = grid_cell_style(&frame, Color::rgb(0x41, 0xb3, 0xa3));
        assert!(style.contains("left: 12.0px"));
        assert!(style.contains("width: 100.5px"));
        assert!(style.contains("height: 120.0px"));
        assert!(style.contains("#41b3a3"));
    }

    #[test]
    fn decoration_is_centered_on_anchor() {
        let anchor = Anchor {
            angle_deg: 270.0,
            x: 50.0,
            y: 0.0,
        };
        let style = decoration_style(&anchor);
        assert!(style.contains("left: 36.0px"));
        assert!(style.contains("top: -14.0px"));
        assert!(style.contains("rotate(270.0deg)"));
    }

    #[test]
    fn sticky_card_applies_transform() {
        let transform = CardTransform {
            translate_y: 40.0,
            scale: 0.975,
            screen_y: 0.0,
        };
        let style = sticky_card_style(96.0, &transform, Color::WHITE);
        assert!(style.contains("top: 96.0px"));
        assert!(style.contains("translateY(40.00px) scale(0.9750)"));
    }

    #[test]
    fn pull_reveal_tracks_progress() {
        assert_eq!(
            pull_reveal_style(0.5, false),
            "transform: translateY(-50.0%); opacity: 0.500;"
        );
        assert_eq!(
            pull_reveal_style(0.0, true),
            "transform: translateY(0.0%); opacity: 1.000;"
        );
    }

    #[test]
    fn swipe_tint_follows_pending_outcome() {
        assert!(swipe_style(-90.0, Some(SwipeOutcome::Delete)).contains("#fee2e2"));
        assert!(swipe_style(90.0, Some(SwipeOutcome::Send)).contains("#dcfce7"));
        assert!(swipe_style(0.0, None).contains("translateX(0.0px)"));
    }
}
