use std::path::Path;

use priorities_core::config::AppConfig;

use crate::commands::common::load_config;
use crate::error::CliError;

pub fn run_config_show(config_path: &Path) -> Result<(), CliError> {
    let config = load_config(config_path);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn run_config_path(config_path: &Path) {
    let status = if config_path.exists() {
        "exists"
    } else {
        "not created"
    };
    println!("{} ({status})", config_path.display());
}

pub fn run_config_init(config_path: &Path, force: bool) -> Result<(), CliError> {
    if config_path.exists() && !force {
        return Err(CliError::ConfigExists(config_path.display().to_string()));
    }
    AppConfig::default().save_to_path(config_path)?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}
