//! Screens of the mobile shell.

mod camera;
mod grid;
mod profile;
mod selection;
mod timeline;
mod viewer;

pub use camera::CameraScreen;
pub use grid::GridScreen;
pub use profile::ProfileScreen;
pub use selection::SelectionScreen;
pub use timeline::TimelineScreen;
pub use viewer::ViewerScreen;

use dioxus::prelude::*;

#[allow(clippy::cast_possible_truncation)]
pub fn pointer_x(event: &PointerEvent) -> f32 {
    event.client_coordinates().x as f32
}

#[allow(clippy::cast_possible_truncation)]
pub fn pointer_y(event: &PointerEvent) -> f32 {
    event.client_coordinates().y as f32
}

/// Local calendar date for birthday and age labels
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
