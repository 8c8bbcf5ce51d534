//! # User Repository
//!
//! The local user directory behind the identity provider.
//!
//! Password accounts carry an argon2 PHC hash; accounts created by
//! federated sign-in have none and can only sign in that way.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

// =============================================================================
// Password Hashes
// =============================================================================

/// Hashes a password into an argon2id PHC string for storage.
pub fn hash_password(password: &str) -> DbResult<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))?;

    Ok(hash.to_string())
}

/// Checks a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// =============================================================================
// Records
// =============================================================================

/// How an account was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum AuthProvider {
    Password,
    Federated,
}

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub provider: AuthProvider,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to create an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    pub provider: AuthProvider,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates an account. Emails are unique, case-insensitively.
    pub async fn insert(&self, user: &NewUser) -> DbResult<UserRecord> {
        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            display_name: user.display_name.clone(),
            provider: user.provider,
            created_at: Utc::now(),
        };

        debug!(id = %record.id, email = %record.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, display_name, provider, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&record.id)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.display_name)
        .bind(record.provider)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &user.email),
            other => other,
        })?;

        Ok(record)
    }

    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, display_name, provider, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn count(&self) -> DbResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn desk_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: Some("$argon2id$v=19$stub".to_string()),
            display_name: Some("Front Desk".to_string()),
            provider: AuthProvider::Password,
        }
    }

    #[test]
    fn test_password_hash_verifies() {
        let hash = hash_password("front-desk-1").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("front-desk-1", &hash));
        assert!(!verify_password("front-desk-2", &hash));
        assert!(!verify_password("front-desk-1", "not-a-hash"));
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let users = Database::new(DbConfig::in_memory()).await.unwrap().users();
        let created = users.insert(&desk_user("desk@rch.in")).await.unwrap();

        let found = users.find_by_email("desk@rch.in").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.provider, AuthProvider::Password);
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_email_lookup_ignores_case() {
        let users = Database::new(DbConfig::in_memory()).await.unwrap().users();
        users.insert(&desk_user("desk@rch.in")).await.unwrap();

        assert!(users.find_by_email("DESK@rch.in").await.unwrap().is_some());
        assert!(users.find_by_email("other@rch.in").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let users = Database::new(DbConfig::in_memory()).await.unwrap().users();
        users.insert(&desk_user("desk@rch.in")).await.unwrap();

        let err = users.insert(&desk_user("Desk@RCH.in")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_federated_user_has_no_hash() {
        let users = Database::new(DbConfig::in_memory()).await.unwrap().users();
        let created = users
            .insert(&NewUser {
                email: "guest@gmail.com".to_string(),
                password_hash: None,
                display_name: None,
                provider: AuthProvider::Federated,
            })
            .await
            .unwrap();

        assert!(created.password_hash.is_none());
        let found = users.find_by_email("guest@gmail.com").await.unwrap().unwrap();
        assert_eq!(found.provider, AuthProvider::Federated);
    }
}
