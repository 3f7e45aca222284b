use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use super::{KeyValueStore, StoreKey};
use crate::error::Result;

/// Durable store backed by a single SQLite table
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url` and apply migrations
    pub async fn connect(database_url: &str) -> Result<Self> {
        if !sqlx::Sqlite::database_exists(database_url).await? {
            info!(database_url, "creating database");
            sqlx::Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, applying migrations
    pub async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;

        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn load(&self, key: StoreKey) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn save(&self, key: StoreKey, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_fixtures::test_db;
    use rstest::*;

    #[rstest]
    #[tokio::test]
    async fn test_load_missing_key(#[future] test_db: SqlitePool) {
        let store = SqliteStore::from_pool(test_db.await)
            .await
            .expect("Failed to open store");

        let value = store
            .load(StoreKey::GroceryList)
            .await
            .expect("Failed to load");

        assert_eq!(value, None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_then_load(#[future] test_db: SqlitePool) {
        let store = SqliteStore::from_pool(test_db.await)
            .await
            .expect("Failed to open store");

        store
            .save(StoreKey::SavedRecipes, "[]")
            .await
            .expect("Failed to save");

        let value = store
            .load(StoreKey::SavedRecipes)
            .await
            .expect("Failed to load");

        assert_eq!(value, Some("[]".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_replaces_whole_value(#[future] test_db: SqlitePool) {
        let pool = test_db.await;
        let store = SqliteStore::from_pool(pool.clone())
            .await
            .expect("Failed to open store");

        store.save(StoreKey::Theme, "dark").await.expect("Failed to save");
        store.save(StoreKey::Theme, "light").await.expect("Failed to save");

        assert_eq!(
            store.load(StoreKey::Theme).await.expect("Failed to load"),
            Some("light".to_string())
        );

        // Still a single row for the key
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store WHERE key = ?")
            .bind("theme")
            .fetch_one(&pool)
            .await
            .expect("Failed to count rows");

        assert_eq!(count, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn test_keys_are_independent(#[future] test_db: SqlitePool) {
        let store = SqliteStore::from_pool(test_db.await)
            .await
            .expect("Failed to open store");

        store.save(StoreKey::Theme, "dark").await.expect("Failed to save");

        assert_eq!(
            store.load(StoreKey::GroceryList).await.expect("Failed to load"),
            None
        );
    }
}
