//! Pure layout math shared by the grid, selection and film screens.

pub mod grid;
pub mod scroll_color;
pub mod seeded;
pub mod sticky;

pub use grid::{pack_rows, GridConfig, ItemFrame, RowData, RowKind};
pub use scroll_color::{color_at_offset, color_breakpoints};
pub use seeded::{decoration_anchor, decoration_seed, seeded_unit, AngleConfig, Anchor, Ellipse};
pub use sticky::{CardTransform, StickyConfig, StickyStack};
