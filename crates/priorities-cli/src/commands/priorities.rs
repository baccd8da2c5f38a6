use std::path::Path;

use priorities_core::db::{KeyValueRepository, LibSqlKeyValueRepository};
use priorities_core::fixtures::Fixtures;
use priorities_core::priorities::PrioritiesStore;
use priorities_core::UserId;

use crate::commands::common::{format_user_line, load_fixtures, open_database, resolve_user, today};
use crate::error::CliError;

pub async fn run_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let fixtures = load_fixtures()?;
    let db = open_database(db_path).await?;
    let repo = LibSqlKeyValueRepository::new(db.connection());
    let store = PrioritiesStore::load(&repo, &fixtures).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(store.users())?);
    } else if store.is_empty() {
        println!("No priorities yet. Add someone with `priorities priorities add <user>`.");
    } else {
        let today = today();
        for (position, user) in store.users().iter().enumerate() {
            println!("{:>2}. {}", position + 1, format_user_line(user, today));
        }
    }

    Ok(())
}

pub async fn run_add(identifier: &str, db_path: &Path) -> Result<(), CliError> {
    let fixtures = load_fixtures()?;
    let db = open_database(db_path).await?;
    let repo = LibSqlKeyValueRepository::new(db.connection());

    let message = add_priority(&repo, &fixtures, identifier).await?;
    println!("{message}");
    Ok(())
}

pub async fn run_remove(identifier: &str, db_path: &Path) -> Result<(), CliError> {
    let fixtures = load_fixtures()?;
    let db = open_database(db_path).await?;
    let repo = LibSqlKeyValueRepository::new(db.connection());

    let message = remove_priority(&repo, &fixtures, identifier).await?;
    println!("{message}");
    Ok(())
}

pub async fn run_clear(db_path: &Path) -> Result<(), CliError> {
    let db = open_database(db_path).await?;
    let repo = LibSqlKeyValueRepository::new(db.connection());
    PrioritiesStore::default().save(&repo).await?;
    println!("Cleared priorities");
    Ok(())
}

pub async fn add_priority(
    repo: &impl KeyValueRepository,
    fixtures: &Fixtures,
    identifier: &str,
) -> Result<String, CliError> {
    let user = resolve_user(fixtures, identifier)?;
    let mut store = PrioritiesStore::load(repo, fixtures).await?;

    if !store.add(user.clone()) {
        return Ok(format!("{} is already a priority", user.name));
    }
    store.save(repo).await?;
    tracing::debug!(user = %user.id, "Added priority");
    Ok(format!("Added {} ({} total)", user.name, store.len()))
}

/// Resolves through the fixtures first; a bare numeric id also removes
/// saved entries the fixtures no longer know.
pub async fn remove_priority(
    repo: &impl KeyValueRepository,
    fixtures: &Fixtures,
    identifier: &str,
) -> Result<String, CliError> {
    let id = match resolve_user(fixtures, identifier) {
        Ok(user) => user.id,
        Err(error) => identifier.parse::<UserId>().map_err(|_| error)?,
    };
    let mut store = PrioritiesStore::load(repo, fixtures).await?;

    let removed = store
        .remove(id)
        .ok_or_else(|| CliError::NotAPriority(identifier.trim().to_string()))?;
    store.save(repo).await?;
    tracing::debug!(user = %removed.id, "Removed priority");
    Ok(format!("Removed {} ({} left)", removed.name, store.len()))
}
