//! Admin authentication: users and sessions.
//!
//! Handles password hashing (argon2), session creation/validation, and
//! admin user management.

use crate::db::DbPool;
use crate::sql;
use anyhow::{Context, Result, anyhow};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use sqlx::Row;

/// Admin user record
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub username: String,
    pub password_hash: String,
}

/// Admin session record
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub session_id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Database-backed storage for admin users and sessions.
pub struct AuthStore {
    pool: DbPool,
}

impl AuthStore {
    /// Create a new AuthStore using the given database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Hash a password using Argon2id.
    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow!("Failed to hash password: {e}"))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash.
    pub fn verify_password(password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Generate a cryptographically secure session ID.
    fn generate_session_id() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }

    /// Create a new admin user.
    pub async fn create_user(&self, username: &str, password: &str) -> Result<()> {
        let password_hash = Self::hash_password(password)?;

        sqlx::query(sql::INSERT_USER)
            .bind(username)
            .bind(&password_hash)
            .execute(&self.pool)
            .await
            .context("Failed to create admin user")?;

        Ok(())
    }

    /// Get an admin user by username.
    pub async fn get_user(&self, username: &str) -> Result<Option<AdminUser>> {
        let row = sqlx::query(sql::SELECT_USER)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to query admin user")?;

        Ok(row.map(|row| AdminUser {
            username: row.get("username"),
            password_hash: row.get("password_hash"),
        }))
    }

    /// Update a user's password.
    pub async fn update_password(&self, username: &str, new_password: &str) -> Result<()> {
        let password_hash = Self::hash_password(new_password)?;

        let result = sqlx::query(sql::UPDATE_USER_PASSWORD)
            .bind(&password_hash)
            .bind(username)
            .execute(&self.pool)
            .await
            .context("Failed to update password")?;

        if result.rows_affected() == 0 {
            return Err(anyhow!("User not found: {username}"));
        }

        Ok(())
    }

    /// Authenticate a user and create a session.
    ///
    /// Returns the session ID if authentication succeeds, None otherwise.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        session_timeout_secs: u64,
    ) -> Result<Option<String>> {
        let user = match self.get_user(username).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !Self::verify_password(password, &user.password_hash) {
            return Ok(None);
        }

        let session_id = Self::generate_session_id();
        let now = Utc::now();
        let expires_at = now + Duration::seconds(session_timeout_secs as i64);

        sqlx::query(sql::INSERT_SESSION)
            .bind(&session_id)
            .bind(username)
            .bind(now.to_rfc3339())
            .bind(expires_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .context("Failed to create session")?;

        Ok(Some(session_id))
    }

    /// Validate a session and return the associated user.
    ///
    /// Expired sessions are deleted on sight and reported as absent.
    pub async fn validate_session(&self, session_id: &str) -> Result<Option<AdminSession>> {
        let row = sqlx::query(sql::SELECT_SESSION)
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to query session")?;

        let session = match row {
            Some(row) => {
                let expires_at = DateTime::parse_from_rfc3339(row.get("expires_at"))
                    .context("Invalid expires_at timestamp")?
                    .with_timezone(&Utc);

                if expires_at < Utc::now() {
                    self.delete_session(session_id).await.ok();
                    return Ok(None);
                }

                Some(AdminSession {
                    session_id: row.get("session_id"),
                    username: row.get("username"),
                    created_at: DateTime::parse_from_rfc3339(row.get("created_at"))
                        .context("Invalid created_at timestamp")?
                        .with_timezone(&Utc),
                    expires_at,
                })
            }
            None => None,
        };

        Ok(session)
    }

    /// Delete a session (logout).
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        sqlx::query(sql::DELETE_SESSION)
            .bind(session_id)
            .execute(&self.pool)
            .await
            .context("Failed to delete session")?;

        Ok(())
    }

    /// Delete all expired sessions (background cleanup task).
    pub async fn cleanup_expired_sessions(&self) -> Result<u64> {
        let result = sqlx::query(sql::DELETE_EXPIRED_SESSIONS)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .context("Failed to delete expired sessions")?;

        Ok(result.rows_affected())
    }
}
