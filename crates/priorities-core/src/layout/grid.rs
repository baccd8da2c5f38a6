//! Mixed-ratio grid packing.
//!
//! Users are bucketed into single, double and triple rows following an
//! eight-row rhythm. The grid screen and the selection screen both call
//! [`pack_rows`] so they stay visually identical.

use serde::{Deserialize, Serialize};

/// Row rhythm indexed by `row_index % 8`
const ROW_PATTERN: [RowKind; 8] = [
    RowKind::Single,
    RowKind::Double,
    RowKind::Triple,
    RowKind::Triple,
    RowKind::Double,
    RowKind::Single,
    RowKind::Double,
    RowKind::Triple,
];

/// Sizing ratios for the grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Horizontal and vertical gap between items, in px
    pub gap: f32,
    /// Side of the single-row square as a fraction of content width
    pub single_ratio: f32,
    /// Height/width ratio of the taller double-row item
    pub double_tall_ratio: f32,
    /// Height/width ratio of the shorter double-row item
    pub double_short_ratio: f32,
    /// Height/width ratio of the middle triple-row item
    pub triple_middle_ratio: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 12.0,
            single_ratio: 0.75,
            double_tall_ratio: 1.15,
            double_short_ratio: 0.95,
            triple_middle_ratio: 1.2,
        }
    }
}

/// Visual pattern of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Single,
    Double,
    Triple,
}

impl RowKind {
    pub const fn capacity(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Item rectangle relative to its row's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemFrame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One packed row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowData {
    pub index: usize,
    pub kind: RowKind,
    /// Index of the first item of this row in the input list
    pub start: usize,
    /// Top of the row within the grid content
    pub y: f32,
    pub height: f32,
    pub items: Vec<ItemFrame>,
}

impl RowData {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.items.len()
    }

    /// The slice of `all` this row displays
    pub fn slice<'a, T>(&self, all: &'a [T]) -> &'a [T] {
        &all[self.range()]
    }
}

/// Pattern for a row position, before degrading for a short tail.
pub const fn pattern_for(row_index: usize) -> RowKind {
    ROW_PATTERN[row_index % ROW_PATTERN.len()]
}

/// Pattern actually used when `remaining` items are left.
pub fn kind_for(row_index: usize, remaining: usize) -> RowKind {
    match (pattern_for(row_index), remaining) {
        (_, 0 | 1) | (RowKind::Single, _) => RowKind::Single,
        (RowKind::Double, _) | (RowKind::Triple, 2) => RowKind::Double,
        (RowKind::Triple, _) => RowKind::Triple,
    }
}

/// Bucket `count` items into rows for a grid of `content_width` px.
pub fn pack_rows(count: usize, content_width: f32, config: &GridConfig) -> Vec<RowData> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut y = 0.0;

    while start < count {
        let index = rows.len();
        let kind = kind_for(index, count - start);
        let items = row_items(kind, index, content_width, config);
        let height = items.iter().map(|item| item.height).fold(0.0, f32::max);
        let items = center_vertically(items, height);

        rows.push(RowData {
            index,
            kind,
            start,
            y,
            height,
            items,
        });

        start += kind.capacity();
        y += height + config.gap;
    }

    rows
}

/// Total content height of packed rows, without trailing gap.
pub fn content_height(rows: &[RowData]) -> f32 {
    rows.last().map_or(0.0, |row| row.y + row.height)
}

fn row_items(
    kind: RowKind,
    row_index: usize,
    width: f32,
    config: &GridConfig,
) -> Vec<ItemFrame> {
    match kind {
        RowKind::Single => {
            let side = width * config.single_ratio;
            vec![ItemFrame {
                x: (width - side) / 2.0,
                y: 0.0,
                width: side,
                height: side,
            }]
        }
        RowKind::Double => {
            let item_width = (width - config.gap) / 2.0;
            let tall = item_width * config.double_tall_ratio;
            let short = item_width * config.double_short_ratio;
            // Only the fourth row of the rhythm puts the tall item on the right.
            let tall_on_right = row_index % ROW_PATTERN.len() == 4;
            let (left, right) = if tall_on_right {
                (short, tall)
            } else {
                (tall, short)
            };
            vec![
                ItemFrame {
                    x: 0.0,
                    y: 0.0,
                    width: item_width,
                    height: left,
                },
                ItemFrame {
                    x: item_width + config.gap,
                    y: 0.0,
                    width: item_width,
                    height: right,
                },
            ]
        }
        RowKind::Triple => {
            let item_width = config.gap.mul_add(-2.0, width) / 3.0;
            let middle = item_width * config.triple_middle_ratio;
            (0..3)
                .map(|slot| ItemFrame {
                    x: slot as f32 * (item_width + config.gap),
                    y: 0.0,
                    width: item_width,
                    height: if slot == 1 { middle } else { item_width },
                })
                .collect()
        }
    }
}

fn center_vertically(items: Vec<ItemFrame>, row_height: f32) -> Vec<ItemFrame> {
    items
        .into_iter()
        .map(|item| ItemFrame {
            y: (row_height - item.height) / 2.0,
            ..item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const WIDTH: f32 = 400.0;

    fn kinds(count: usize) -> Vec<RowKind> {
        pack_rows(count, WIDTH, &GridConfig::default())
            .iter()
            .map(|row| row.kind)
            .collect()
    }

    #[test]
    fn full_rhythm_consumes_seventeen_users() {
        use RowKind::{Double, Single, Triple};
        let rows = pack_rows(17, WIDTH, &GridConfig::default());
        assert_eq!(
            rows.iter().map(|row| row.kind).collect::<Vec<_>>(),
            vec![Single, Double, Triple, Triple, Double, Single, Double, Triple]
        );
        assert_eq!(rows.last().unwrap().range(), 14..17);
    }

    #[test]
    fn short_tail_degrades_to_double_then_single() {
        use RowKind::{Double, Single};
        // Single(1) + Double(2) + tail of 2 at a triple position.
        assert_eq!(kinds(5), vec![Single, Double, Double]);
        // Tail of 1 at a triple position.
        assert_eq!(kinds(4), vec![Single, Double, Single]);
        // Tail of 1 at a double position.
        assert_eq!(kinds(2), vec![Single, Single]);
        assert!(kinds(0).is_empty());
    }

    #[test]
    fn row_sizes_follow_ratios() {
        let config = GridConfig::default();
        let rows = pack_rows(6, WIDTH, &config);

        let single = &rows[0];
        assert!((single.height - 300.0).abs() < 1e-3);
        assert!((single.items[0].x - 50.0).abs() < 1e-3);

        let double = &rows[1];
        let item_width = (WIDTH - config.gap) / 2.0;
        assert!((double.items[0].height - item_width * 1.15).abs() < 1e-3);
        assert!((double.items[1].height - item_width * 0.95).abs() < 1e-3);
        assert!((double.height - item_width * 1.15).abs() < 1e-3);
        assert!((double.y - (300.0 + config.gap)).abs() < 1e-3);

        let triple = &rows[2];
        let item_width = (WIDTH - 2.0 * config.gap) / 3.0;
        assert!((triple.height - item_width * 1.2).abs() < 1e-3);
        assert!((triple.items[0].y - (triple.height - item_width) / 2.0).abs() < 1e-3);
        assert!((content_height(&rows) - (triple.y + triple.height)).abs() < 1e-3);
    }

    #[test]
    fn fourth_row_puts_tall_item_on_the_right() {
        let rows = pack_rows(17, WIDTH, &GridConfig::default());
        let row = &rows[4];
        assert_eq!(row.kind, RowKind::Double);
        assert!(row.items[1].height > row.items[0].height);
        assert!(rows[6].items[0].height > rows[6].items[1].height);
    }

    #[test]
    fn slice_returns_row_members() {
        let users = ["a", "b", "c", "d", "e", "f"];
        let rows = pack_rows(users.len(), WIDTH, &GridConfig::default());
        assert_eq!(rows[1].slice(&users), &["b", "c"]);
        assert_eq!(rows[2].slice(&users), &["d", "e", "f"]);
    }

    proptest! {
        #[test]
        fn rows_consume_every_item_exactly_once(count in 0usize..200) {
            let rows = pack_rows(count, WIDTH, &GridConfig::default());
            let total: usize = rows.iter().map(RowData::len).sum();
            prop_assert_eq!(total, count);

            let mut expected_start = 0;
            for row in &rows {
                prop_assert_eq!(row.start, expected_start);
                prop_assert_eq!(row.kind, kind_for(row.index, count - row.start));
                if count - row.start >= pattern_for(row.index).capacity() {
                    prop_assert_eq!(row.kind, pattern_for(row.index));
                }
                expected_start += row.len();
            }
        }

        #[test]
        fn packing_is_deterministic(count in 0usize..64, width in 200.0f32..900.0) {
            let config = GridConfig::default();
            prop_assert_eq!(pack_rows(count, width, &config), pack_rows(count, width, &config));
        }
    }
}
