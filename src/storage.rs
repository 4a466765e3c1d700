//! key-value storage behind the quote store.
//!
//! [`SqliteStorage`] is the durable side and outlives the process.
//! [`SessionStorage`] only lives as long as the process does.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::error::QuoteResult;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> QuoteResult<Option<String>>;

    /// overwrites any previous value under `key`.
    async fn set(&self, key: &str, value: &str) -> QuoteResult<()>;

    /// removing a missing key is not an error.
    async fn remove(&self, key: &str) -> QuoteResult<()>;
}

#[derive(Clone)]
pub struct SqliteStorage {
    db: Pool<Sqlite>,
}

impl SqliteStorage {
    pub fn new(db: Pool<Sqlite>) -> Self {
        SqliteStorage { db }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStorage {
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> QuoteResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            r#"
                SELECT
                    value
                FROM storage
                WHERE key = $1;
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, key = %key, "an error occurred when reading from storage"))?;

        Ok(value)
    }

    #[tracing::instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> QuoteResult<()> {
        sqlx::query(
            r#"
                INSERT INTO
                    storage (key, value)
                VALUES
                    ($1, $2)
                ON CONFLICT (key)
                DO UPDATE SET
                    value = excluded.value;
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.db)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, key = %key, "an error occurred when writing to storage"))?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, key: &str) -> QuoteResult<()> {
        sqlx::query(
            r#"
                DELETE FROM storage
                WHERE key = $1;
            "#,
        )
        .bind(key)
        .execute(&self.db)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, key = %key, "an error occurred when removing from storage"))?;

        Ok(())
    }
}

#[derive(Default)]
pub struct SessionStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for SessionStorage {
    async fn get(&self, key: &str) -> QuoteResult<Option<String>> {
        Ok(self.entries.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> QuoteResult<()> {
        self.entries
            .lock()?
            .insert(key.to_string(), value.to_string());

        Ok(())
    }

    async fn remove(&self, key: &str) -> QuoteResult<()> {
        self.entries.lock()?.remove(key);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::memory_database;

    #[tokio::test]
    async fn sqlite_set_overwrites() {
        let storage = SqliteStorage::new(memory_database().await);

        assert_eq!(storage.get("quotes").await.unwrap(), None);

        storage.set("quotes", "[]").await.unwrap();
        storage.set("quotes", "[1]").await.unwrap();

        assert_eq!(storage.get("quotes").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn sqlite_keys_are_independent() {
        let storage = SqliteStorage::new(memory_database().await);

        storage.set("quotes", "[]").await.unwrap();
        storage.set("selectedCategory", "Life").await.unwrap();

        assert_eq!(storage.get("quotes").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(
            storage.get("selectedCategory").await.unwrap().as_deref(),
            Some("Life")
        );
    }

    #[tokio::test]
    async fn sqlite_remove_deletes_only_that_key() {
        let storage = SqliteStorage::new(memory_database().await);

        storage.set("quotes", "[]").await.unwrap();
        storage.set("selectedCategory", "Life").await.unwrap();

        storage.remove("selectedCategory").await.unwrap();
        storage.remove("selectedCategory").await.unwrap();

        assert_eq!(storage.get("selectedCategory").await.unwrap(), None);
        assert_eq!(storage.get("quotes").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn session_storage_remove() {
        let storage = SessionStorage::new();

        storage.set("lastViewedQuote", "{}").await.unwrap();
        storage.remove("lastViewedQuote").await.unwrap();
        storage.remove("missing").await.unwrap();

        assert_eq!(storage.get("lastViewedQuote").await.unwrap(), None);
    }

    #[tokio::test]
    async fn session_storage_round_trip() {
        let storage = SessionStorage::new();

        assert_eq!(storage.get("lastViewedQuote").await.unwrap(), None);
        storage.set("lastViewedQuote", "{}").await.unwrap();
        assert_eq!(
            storage.get("lastViewedQuote").await.unwrap().as_deref(),
            Some("{}")
        );
    }
}
