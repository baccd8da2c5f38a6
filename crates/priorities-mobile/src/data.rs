//! Data access layer for the mobile app.

#[cfg(target_os = "android")]
use std::path::PathBuf;
use std::sync::Arc;

use priorities_core::db::{Database, LibSqlKeyValueRepository};
#[cfg(target_os = "android")]
use priorities_core::db::DATABASE_FILE;
use priorities_core::fixtures::Fixtures;
use priorities_core::priorities::PrioritiesStore;
use priorities_core::{Error, Result, User, UserId};
use tokio::sync::Mutex;

/// Thin async wrapper around the persisted priorities list.
///
/// Every mutation reloads, applies and saves under the database lock so the
/// stored list is always the last write.
#[derive(Clone)]
pub struct MobilePriorityStore {
    db: Arc<Mutex<Database>>,
    fixtures: Arc<Fixtures>,
}

impl MobilePriorityStore {
    /// Open the default local mobile database path.
    #[cfg(target_os = "android")]
    pub async fn open_default(fixtures: Arc<Fixtures>) -> Result<Self> {
        let db_path = default_db_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(db_path).await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            fixtures,
        })
    }

    /// Open an in-memory database for tests.
    #[cfg(test)]
    pub async fn open_in_memory(fixtures: Arc<Fixtures>) -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            fixtures,
        })
    }

    /// Saved priorities, refreshed from the bundled users.
    pub async fn list(&self) -> Result<Vec<User>> {
        let db = self.db.lock().await;
        let repo = LibSqlKeyValueRepository::new(db.connection());
        let store = PrioritiesStore::load(&repo, &self.fixtures).await?;
        Ok(store.users().to_vec())
    }

    /// Append a user; returns `false` when already present.
    pub async fn add(&self, id: UserId) -> Result<bool> {
        let user = self.lookup(id)?;
        let db = self.db.lock().await;
        let repo = LibSqlKeyValueRepository::new(db.connection());
        let mut store = PrioritiesStore::load(&repo, &self.fixtures).await?;
        if !store.add(user) {
            return Ok(false);
        }
        store.save(&repo).await?;
        Ok(true)
    }

    /// Returns `false` when the user was not a priority.
    pub async fn remove(&self, id: UserId) -> Result<bool> {
        let db = self.db.lock().await;
        let repo = LibSqlKeyValueRepository::new(db.connection());
        let mut store = PrioritiesStore::load(&repo, &self.fixtures).await?;
        if store.remove(id).is_none() {
            return Ok(false);
        }
        store.save(&repo).await?;
        Ok(true)
    }

    /// Replace the whole list with `ids`, in order.
    ///
    /// Ids missing from the fixtures keep their saved record.
    pub async fn replace(&self, ids: &[UserId]) -> Result<Vec<User>> {
        let db = self.db.lock().await;
        let repo = LibSqlKeyValueRepository::new(db.connection());
        let saved = PrioritiesStore::load(&repo, &self.fixtures).await?;

        let mut store = PrioritiesStore::default();
        for id in ids {
            let user = match self.fixtures.user(*id) {
                Some(user) => user.clone(),
                None => saved
                    .users()
                    .iter()
                    .find(|user| user.id == *id)
                    .cloned()
                    .ok_or_else(|| Error::NotFound(format!("user {id}")))?,
            };
            store.add(user);
        }

        store.save(&repo).await?;
        tracing::info!(count = store.len(), "Saved priorities selection");
        Ok(store.users().to_vec())
    }

    fn lookup(&self, id: UserId) -> Result<User> {
        self.fixtures
            .user(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("user {id}")))
    }
}

/// Order a new selection: kept priorities first in their saved order, then
/// newly selected ids in selection order.
pub fn merge_selection(current: &[UserId], selected: &[UserId]) -> Vec<UserId> {
    let mut ordered: Vec<UserId> = current
        .iter()
        .copied()
        .filter(|id| selected.contains(id))
        .collect();
    for id in selected {
        if !ordered.contains(id) {
            ordered.push(*id);
        }
    }
    ordered
}

/// Build a mobile-friendly local DB path.
#[cfg(target_os = "android")]
pub fn default_db_path() -> PathBuf {
    crate::paths::data_dir().join(DATABASE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn store() -> MobilePriorityStore {
        let fixtures = Arc::new(Fixtures::bundled().unwrap());
        MobilePriorityStore::open_in_memory(fixtures).await.unwrap()
    }

    fn ids(users: &[User]) -> Vec<u64> {
        users.iter().map(|user| user.id.get()).collect()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn add_remove_roundtrip() {
        let store = store().await;
        assert!(store.list().await.unwrap().is_empty());

        assert!(store.add(UserId::new(2)).await.unwrap());
        assert!(store.add(UserId::new(4)).await.unwrap());
        assert!(!store.add(UserId::new(2)).await.unwrap());
        assert_eq!(ids(&store.list().await.unwrap()), vec![2, 4]);

        assert!(store.remove(UserId::new(2)).await.unwrap());
        assert!(!store.remove(UserId::new(2)).await.unwrap());
        assert_eq!(ids(&store.list().await.unwrap()), vec![4]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn replace_overwrites_in_order() {
        let store = store().await;
        store.add(UserId::new(1)).await.unwrap();

        let saved = store
            .replace(&[UserId::new(5), UserId::new(3), UserId::new(5)])
            .await
            .unwrap();
        assert_eq!(ids(&saved), vec![5, 3]);
        assert_eq!(ids(&store.list().await.unwrap()), vec![5, 3]);
    }

    #[test]
    fn selection_keeps_saved_order_then_appends() {
        let current = [UserId::new(4), UserId::new(1), UserId::new(7)];
        let selected = [UserId::new(1), UserId::new(3), UserId::new(4), UserId::new(9)];
        assert_eq!(
            merge_selection(&current, &selected),
            vec![UserId::new(4), UserId::new(1), UserId::new(3), UserId::new(9)]
        );
        assert!(merge_selection(&current, &[]).is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn replace_keeps_saved_users_missing_from_fixtures() {
        let store = store().await;
        let mut retired = Fixtures::bundled().unwrap().users[0].clone();
        retired.id = UserId::new(999);
        retired.name = "Retired Contact".to_string();
        {
            let db = store.db.lock().await;
            let repo = LibSqlKeyValueRepository::new(db.connection());
            let kept = store.fixtures.user(UserId::new(2)).unwrap().clone();
            PrioritiesStore::new(vec![kept, retired])
                .save(&repo)
                .await
                .unwrap();
        }

        let listed = store.list().await.unwrap();
        assert_eq!(ids(&listed), vec![2, 999]);

        let current: Vec<UserId> = listed.iter().map(|user| user.id).collect();
        let saved = store
            .replace(&merge_selection(&current, &current))
            .await
            .unwrap();
        assert_eq!(ids(&saved), vec![2, 999]);
        assert_eq!(saved[1].name, "Retired Contact");

        let saved = store.replace(&[UserId::new(2)]).await.unwrap();
        assert_eq!(ids(&saved), vec![2]);
        assert!(store.replace(&[UserId::new(999)]).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unknown_user_is_rejected() {
        let store = store().await;
        let error = store.add(UserId::new(999)).await.unwrap_err();
        assert!(matches!(error, Error::NotFound(_)));
        assert!(store.list().await.unwrap().is_empty());
    }
}
