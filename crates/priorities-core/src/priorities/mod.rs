//! The user's saved priorities list.
//!
//! Stored as one JSON array under [`PRIORITIES_KEY`] and rewritten whole on
//! every save. On load each saved entry is refreshed from the bundled
//! fixtures so profile edits there show up without re-adding anyone.

use crate::db::KeyValueRepository;
use crate::error::Result;
use crate::fixtures::Fixtures;
use crate::models::{User, UserId};

/// Storage key of the persisted list
pub const PRIORITIES_KEY: &str = "@priorities";

/// Refresh saved entries from `fixture` by id, keeping order.
///
/// Fixture fields win. Entries whose id is gone from the fixture are kept
/// as saved.
pub fn merge_with_fixture(saved: Vec<User>, fixture: &[User]) -> Vec<User> {
    saved
        .into_iter()
        .map(|user| {
            fixture
                .iter()
                .find(|candidate| candidate.id == user.id)
                .cloned()
                .unwrap_or(user)
        })
        .collect()
}

/// In-memory priorities list; persist with [`save`](Self::save) after
/// every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrioritiesStore {
    users: Vec<User>,
}

impl PrioritiesStore {
    pub const fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Read the saved list and merge it with `fixtures`. A missing key is an
    /// empty list.
    pub async fn load(repo: &impl KeyValueRepository, fixtures: &Fixtures) -> Result<Self> {
        let Some(raw) = repo.get(PRIORITIES_KEY).await? else {
            tracing::debug!("No saved priorities");
            return Ok(Self::default());
        };

        let saved: Vec<User> = serde_json::from_str(&raw)
            .inspect_err(|e| tracing::error!("Saved priorities are corrupt: {e}"))?;
        let users = merge_with_fixture(saved, &fixtures.users);
        tracing::debug!(count = users.len(), "Loaded priorities");
        Ok(Self { users })
    }

    /// Overwrite the stored list with the current one
    pub async fn save(&self, repo: &impl KeyValueRepository) -> Result<()> {
        let raw = serde_json::to_string(&self.users)?;
        repo.set(PRIORITIES_KEY, &raw).await?;
        tracing::debug!(count = self.users.len(), "Saved priorities");
        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn ids(&self) -> Vec<UserId> {
        self.users.iter().map(|user| user.id).collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.users.iter().any(|user| user.id == id)
    }

    /// Append `user`; returns `false` when the id is already present.
    pub fn add(&mut self, user: User) -> bool {
        if self.contains(user.id) {
            return false;
        }
        self.users.push(user);
        true
    }

    pub fn remove(&mut self, id: UserId) -> Option<User> {
        let index = self.users.iter().position(|user| user.id == id)?;
        Some(self.users.remove(index))
    }
}
