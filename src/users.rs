//! User directory
//!
//! Maps recipient-facing contact keys (phone numbers) to internal user
//! ids. Signup and profile management live in the web layer; this module
//! only covers the lookups and the row creation the ledger needs.

use crate::core_types::UserId;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

/// Wallet user
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub phone: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User directory lookups
pub struct UserDirectory;

impl UserDirectory {
    /// Get user by ID
    pub async fn get_by_id(pool: &PgPool, user_id: UserId) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT user_id, phone, email, name, created_at
               FROM users WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| User {
            user_id: r.get("user_id"),
            phone: r.get("phone"),
            email: r.get("email"),
            name: r.get("name"),
            created_at: r.get("created_at"),
        }))
    }

    /// Resolve a contact key (phone number) to a user
    pub async fn get_by_phone(pool: &PgPool, phone: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            r#"SELECT user_id, phone, email, name, created_at
               FROM users WHERE phone = $1"#,
        )
        .bind(phone)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| User {
            user_id: r.get("user_id"),
            phone: r.get("phone"),
            email: r.get("email"),
            name: r.get("name"),
            created_at: r.get("created_at"),
        }))
    }

    /// Create a new user row
    pub async fn create(
        pool: &PgPool,
        phone: &str,
        email: &str,
        name: Option<&str>,
    ) -> Result<UserId, sqlx::Error> {
        let row = sqlx::query(
            r#"INSERT INTO users (phone, email, name) VALUES ($1, $2, $3) RETURNING user_id"#,
        )
        .bind(phone)
        .bind(email)
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(row.get("user_id"))
    }
}
