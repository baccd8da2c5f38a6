//! Scroll-linked color interpolation breakpoints.

use crate::models::Color;

/// Scroll offsets at which each color is fully shown
pub fn color_breakpoints(count: usize, item_extent: f32) -> Vec<f32> {
    (0..count).map(|index| index as f32 * item_extent).collect()
}

/// Color for `scroll_offset`, interpolated between neighbouring breakpoints.
///
/// Offsets before the first or after the last breakpoint clamp to the end
/// colors. Returns `None` when `colors` is empty.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn color_at_offset(scroll_offset: f32, item_extent: f32, colors: &[Color]) -> Option<Color> {
    let (first, rest) = colors.split_first()?;
    if rest.is_empty() || item_extent <= 0.0 || scroll_offset <= 0.0 {
        return Some(*first);
    }

    let position = scroll_offset / item_extent;
    let last_index = colors.len() - 1;
    if position >= last_index as f32 {
        return colors.last().copied();
    }

    let index = position.floor() as usize;
    let t = position - index as f32;
    Some(colors[index].mix(colors[index + 1], t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn breakpoints_are_multiples_of_extent() {
        assert_eq!(color_breakpoints(3, 400.0), vec![0.0, 400.0, 800.0]);
    }

    #[test]
    fn interpolates_between_neighbours() {
        let colors = [RED, BLUE, RED];
        assert_eq!(color_at_offset(200.0, 400.0, &colors), Some(Color::rgb(128, 0, 128)));
        assert_eq!(color_at_offset(400.0, 400.0, &colors), Some(BLUE));
    }

    #[test]
    fn clamps_at_both_ends() {
        let colors = [RED, BLUE];
        assert_eq!(color_at_offset(-50.0, 400.0, &colors), Some(RED));
        assert_eq!(color_at_offset(5_000.0, 400.0, &colors), Some(BLUE));
        assert_eq!(color_at_offset(10.0, 400.0, &[]), None);
    }
}
