//! Seeded decorative placement.
//!
//! Each grid tile carries a small control placed somewhere along its
//! elliptical border. The position is derived from a hash of the user id and
//! row index so it stays put across renders without storing anything.

use serde::{Deserialize, Serialize};

use crate::models::UserId;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// Angle range, in degrees, the decoration may land in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AngleConfig {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl Default for AngleConfig {
    fn default() -> Self {
        Self {
            min_deg: 200.0,
            max_deg: 340.0,
        }
    }
}

/// FNV-1a over the UTF-16 code units of `seed`.
pub fn fnv1a32(seed: &str) -> u32 {
    seed.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic pseudo-random value in [0, 1] for `seed`.
pub fn seeded_unit(seed: &str) -> f64 {
    f64::from(fnv1a32(seed)) / f64::from(u32::MAX)
}

/// Seed string for a tile decoration
pub fn decoration_seed(user_id: UserId, row_index: usize) -> String {
    format!("{user_id}-{row_index}")
}

/// Ellipse inscribed in a tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub cx: f32,
    pub cy: f32,
    pub rx: f32,
    pub ry: f32,
}

impl Ellipse {
    /// Ellipse inscribed in a `width` × `height` box at the origin
    pub fn inscribed(width: f32, height: f32) -> Self {
        Self {
            cx: width / 2.0,
            cy: height / 2.0,
            rx: width / 2.0,
            ry: height / 2.0,
        }
    }

    /// Point on the boundary at `angle_deg` (0° = +x, growing clockwise in screen space)
    pub fn point_at(&self, angle_deg: f32) -> (f32, f32) {
        let radians = angle_deg.to_radians();
        (
            self.rx.mul_add(radians.cos(), self.cx),
            self.ry.mul_add(radians.sin(), self.cy),
        )
    }
}

/// Resolved decoration placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    pub angle_deg: f32,
    pub x: f32,
    pub y: f32,
}

/// Map `seed` into the configured angle range and onto `ellipse`.
#[allow(clippy::cast_possible_truncation)]
pub fn decoration_anchor(seed: &str, ellipse: &Ellipse, config: &AngleConfig) -> Anchor {
    let unit = seeded_unit(seed) as f32;
    let angle_deg = (config.max_deg - config.min_deg).mul_add(unit, config.min_deg);
    let (x, y) = ellipse.point_at(angle_deg);
    Anchor { angle_deg, x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_fnv1a_vectors() {
        assert_eq!(fnv1a32(""), 0x811c_9dc5);
        assert_eq!(fnv1a32("a"), 0xe40c_292c);
        assert_eq!(fnv1a32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn same_seed_same_value() {
        let seed = decoration_seed(UserId::new(4), 2);
        assert_eq!(seed, "4-2");
        assert!((seeded_unit(&seed) - seeded_unit("4-2")).abs() < f64::EPSILON);
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(fnv1a32("a"), fnv1a32("b"));
        let values: Vec<u32> = (0..50)
            .map(|row| fnv1a32(&decoration_seed(UserId::new(1), row)))
            .collect();
        let mut unique = values.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), values.len());
    }

    #[test]
    fn unit_value_stays_in_range() {
        for row in 0..200 {
            let unit = seeded_unit(&decoration_seed(UserId::new(9), row));
            assert!((0.0..=1.0).contains(&unit));
        }
    }

    #[test]
    fn anchor_lies_on_ellipse_within_range() {
        let config = AngleConfig::default();
        let ellipse = Ellipse::inscribed(120.0, 160.0);
        let anchor = decoration_anchor("12-0", &ellipse, &config);

        assert!(anchor.angle_deg >= config.min_deg && anchor.angle_deg <= config.max_deg);
        let nx = (anchor.x - ellipse.cx) / ellipse.rx;
        let ny = (anchor.y - ellipse.cy) / ellipse.ry;
        assert!((nx.mul_add(nx, ny * ny) - 1.0).abs() < 1e-4);
        assert_eq!(anchor, decoration_anchor("12-0", &ellipse, &config));
    }
}
