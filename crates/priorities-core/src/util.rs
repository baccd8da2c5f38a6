//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Linear interpolation between `from` and `to` at `t` (unclamped).
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    (to - from).mul_add(t, from)
}

/// Clamp `value` into [0, 1].
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" u-102 ".to_string())),
            Some("u-102".to_string())
        );
    }

    #[test]
    fn lerp_hits_both_ends() {
        assert!((lerp(10.0, 20.0, 0.0) - 10.0).abs() < f32::EPSILON);
        assert!((lerp(10.0, 20.0, 1.0) - 20.0).abs() < f32::EPSILON);
        assert!((lerp(10.0, 20.0, 0.5) - 15.0).abs() < f32::EPSILON);
    }
}
