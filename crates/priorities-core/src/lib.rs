//! priorities-core - Core library for Priorities
//!
//! This crate contains the shared models, fixture data, layout math, gesture
//! state machines, ambient contexts and local persistence used by the mobile
//! shell and the CLI.

pub mod animation;
pub mod config;
pub mod context;
pub mod db;
pub mod device;
pub mod error;
pub mod fixtures;
pub mod gesture;
pub mod layout;
pub mod models;
pub mod priorities;
pub mod timeline;
pub mod util;

pub use error::{Error, Result};
pub use models::{Color, MediaItem, TimelineEvent, User, UserId};
