//! Content store: the rows rendered on the public page and managed in the
//! admin area.
//!
//! Rows are grouped by a free-text `section` tag ("about", "services", ...).
//! The edit path deliberately never touches `section`; only the add form
//! chooses it.

use crate::db::{DbPool, DbRow};
use crate::sql;
use anyhow::{Context, Result};
use sqlx::Row;

/// One content row.
#[derive(Debug, Clone)]
pub struct ContentRow {
    pub id: i64,
    pub section: String,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Filename only, relative to the image directory.
    pub image_path: Option<String>,
}

impl ContentRow {
    fn from_row(row: &DbRow) -> Self {
        Self {
            id: row.get("id"),
            section: row.get("section"),
            title: row.get("title"),
            content: row.get("content"),
            image_path: row.get("image_path"),
        }
    }
}

/// Database-backed storage for content rows.
pub struct ContentStore {
    pool: DbPool,
}

impl ContentStore {
    /// Create a new ContentStore using the given database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// List all content rows in insertion order.
    pub async fn list_all(&self) -> Result<Vec<ContentRow>> {
        let rows = sqlx::query(sql::SELECT_ALL_CONTENT)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list content")?;

        Ok(rows.iter().map(ContentRow::from_row).collect())
    }

    /// Get a content row by id.
    pub async fn get(&self, id: i64) -> Result<Option<ContentRow>> {
        let row = sqlx::query(sql::SELECT_CONTENT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to query content")?;

        Ok(row.as_ref().map(ContentRow::from_row))
    }

    /// Insert a new content row and return its id.
    pub async fn insert(
        &self,
        section: &str,
        title: Option<&str>,
        content: Option<&str>,
        image_path: Option<&str>,
    ) -> Result<i64> {
        let result = sqlx::query(sql::INSERT_CONTENT)
            .bind(section)
            .bind(title)
            .bind(content)
            .bind(image_path)
            .execute(&self.pool)
            .await
            .context("Failed to insert content")?;

        Ok(result.last_insert_rowid())
    }

    /// Update a row's title and content, and its image when a new one was
    /// uploaded. `section` is never changed here.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
        image_path: Option<&str>,
    ) -> Result<()> {
        sqlx::query(sql::UPDATE_CONTENT_TEXT)
            .bind(title)
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update content")?;

        if let Some(image_path) = image_path {
            sqlx::query(sql::UPDATE_CONTENT_IMAGE)
                .bind(image_path)
                .bind(id)
                .execute(&self.pool)
                .await
                .context("Failed to update content image")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::Database;
    use tempfile::TempDir;

    async fn test_store(temp: &TempDir) -> ContentStore {
        let config = DatabaseConfig {
            path: temp.path().join("site.db"),
        };
        let db = Database::new(&config).await.unwrap();
        ContentStore::new(db.pool())
    }

    #[tokio::test]
    async fn test_insert_get_list() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp).await;

        let id = store
            .insert("services", Some("Towing"), Some("We tow."), None)
            .await
            .unwrap();

        let row = store.get(id).await.unwrap().unwrap();
        assert_eq!(row.section, "services");
        assert_eq!(row.title.as_deref(), Some("Towing"));
        assert_eq!(row.content.as_deref(), Some("We tow."));
        assert_eq!(row.image_path, None);

        assert_eq!(store.list_all().await.unwrap().len(), 1);
        assert!(store.get(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_leaves_section_alone() {
        let temp = TempDir::new().unwrap();
        let store = test_store(&temp).await;

        let id = store
            .insert("about", Some("Old"), Some("old text"), None)
            .await
            .unwrap();

        store
            .update(id, Some("New"), Some("new text"), Some("photo.png"))
            .await
            .unwrap();

        let row = store.get(id).await.unwrap().unwrap();
        assert_eq!(row.section, "about");
        assert_eq!(row.title.as_deref(), Some("New"));
        assert_eq!(row.content.as_deref(), Some("new text"));
        assert_eq!(row.image_path.as_deref(), Some("photo.png"));

        // No new upload keeps the stored image
        store.update(id, Some("Newer"), None, None).await.unwrap();
        let row = store.get(id).await.unwrap().unwrap();
        assert_eq!(row.image_path.as_deref(), Some("photo.png"));
        assert_eq!(row.content, None);
    }
}
