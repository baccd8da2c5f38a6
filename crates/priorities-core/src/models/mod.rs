//! Data models for Priorities

mod color;
mod film;
mod media;
mod timeline;
mod user;

pub use color::Color;
pub use film::{ProfileFilm, ProfileFilmKind, UserFilm};
pub use media::{MediaItem, MediaSource};
pub use timeline::{format_duration, EventKind, Sender, TimelineEvent};
pub use user::{find_partner, User, UserId};
