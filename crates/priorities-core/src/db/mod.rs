//! Local libSQL storage for Priorities

mod connection;
mod kv_repository;
mod migrations;

pub use connection::{Database, DATABASE_FILE};
pub use kv_repository::{KeyValueRepository, LibSqlKeyValueRepository};
