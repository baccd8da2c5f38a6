pub mod common;
pub mod config;
pub mod grid;
pub mod layout;
pub mod priorities;
pub mod timeline;
pub mod users;
