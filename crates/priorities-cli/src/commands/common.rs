use std::env;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use priorities_core::config::{app_data_dir, AppConfig, CONFIG_FILE_NAME};
use priorities_core::db::{Database, DATABASE_FILE};
use priorities_core::fixtures::Fixtures;
use priorities_core::util::normalize_text_option;
use priorities_core::{User, UserId};

use crate::error::CliError;

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    cli_db_path
        .or_else(|| env::var_os("PRIORITIES_DB_PATH").map(PathBuf::from))
        .or_else(|| app_data_dir().map(|dir| dir.join(DATABASE_FILE)))
        .ok_or(CliError::NoDataDir)
}

pub fn resolve_config_path(cli_config_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    cli_config_path
        .or_else(|| env::var_os("PRIORITIES_CONFIG").map(PathBuf::from))
        .or_else(|| app_data_dir().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .ok_or(CliError::NoDataDir)
}

pub fn load_config(config_path: &Path) -> AppConfig {
    AppConfig::load_from_path(config_path)
}

pub async fn open_database(db_path: &Path) -> Result<Database, CliError> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Database::open(db_path).await?)
}

pub fn load_fixtures() -> Result<Fixtures, CliError> {
    Ok(Fixtures::bundled()?)
}

/// Look a user up by numeric id or unique user id.
pub fn resolve_user<'a>(fixtures: &'a Fixtures, identifier: &str) -> Result<&'a User, CliError> {
    let identifier =
        normalize_text_option(Some(identifier.to_string())).ok_or(CliError::EmptyUserId)?;

    let found = match identifier.parse::<UserId>() {
        Ok(id) => fixtures.user(id),
        Err(_) => fixtures.user_by_unique_id(&identifier),
    };
    found.ok_or(CliError::UserNotFound(identifier))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_user_line(user: &User, today: NaiveDate) -> String {
    let relationship = user
        .relationship
        .as_deref()
        .map_or_else(String::new, |label| format!(" · {label}"));
    let birthday = match user.days_until_birthday(today) {
        0 => "birthday today".to_string(),
        1 => "birthday tomorrow".to_string(),
        days => format!("birthday in {days} days"),
    };
    format!(
        "{:>3}  {:<8}  {}{relationship}  ({}, {birthday})",
        user.id.get(),
        user.unique_user_id,
        user.name,
        user.age_on(today)
    )
}
