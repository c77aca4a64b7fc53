//! Database management for the site.
//!
//! Provides a shared SQLite connection pool that is handed to the auth and
//! content stores.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub use sqlx::{SqlitePool as DbPool, sqlite::SqliteRow as DbRow};

/// Shared database handle.
///
/// Owns the connection pool and runs migrations. Created once at startup;
/// components receive cloned pools via [`Database::pool`].
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open (or create) the database file and run all pending migrations.
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        use std::fs;

        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", config.path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        info!(path = %config.path.display(), "Database connected");

        Ok(Self { pool })
    }

    /// Get a clone of the connection pool.
    ///
    /// The pool is cheap to clone (internally Arc-based).
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_sqlite_connection() {
        let temp = TempDir::new().unwrap();
        let config = DatabaseConfig {
            path: temp.path().join("site.db"),
        };
        let db = Database::new(&config).await.unwrap();

        // Just verify we can get a pool
        let _pool = db.pool();
    }

    #[tokio::test]
    async fn test_reopen_existing_database() {
        let temp = TempDir::new().unwrap();
        let config = DatabaseConfig {
            path: temp.path().join("site.db"),
        };

        // First open creates the file, second open reuses it (migrations are
        // idempotent).
        drop(Database::new(&config).await.unwrap());
        let _db = Database::new(&config).await.unwrap();
    }
}
