//! Persistence gateway: account reads and the mutations the lockout state
//! machine needs. The database owns the authoritative copy of this state.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::foyer::error::Error;

#[derive(Clone, Debug)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub login_attempts: i32,
    pub is_locked: bool,
    pub phone_id: Option<i64>,
}

/// Account plus the phone joined in for recovery lookups.
#[derive(Clone, Debug)]
pub struct RecoveryAccount {
    pub user: User,
    pub phone: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    /// Look up an account by email or phone number (phones LEFT JOIN).
    async fn find_by_identifier(&self, identifier: &str)
        -> Result<Option<RecoveryAccount>, Error>;

    async fn email_exists(&self, email: &str) -> Result<bool, Error>;

    async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), Error>;

    /// Atomically increment the attempt counter and return the new value.
    /// Single statement, so concurrent failures for the same account each
    /// observe a distinct count.
    async fn increment_login_attempts(&self, user_id: i64) -> Result<i32, Error>;

    async fn reset_login_attempts(&self, user_id: i64) -> Result<(), Error>;

    /// Locking is one-way: nothing in this service clears the flag.
    async fn lock_account(&self, user_id: i64) -> Result<(), Error>;

    async fn is_locked(&self, user_id: i64) -> Result<bool, Error>;
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        user_id: row.get("user_id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password"),
        login_attempts: row.get("login_attempts"),
        is_locked: row.get("is_locked"),
        phone_id: row.get("phone_id"),
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let row = sqlx::query(
            "SELECT user_id, username, email, password, login_attempts, is_locked, phone_id \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<RecoveryAccount>, Error> {
        let row = sqlx::query(
            "SELECT users.user_id, users.username, users.email, users.password, \
                    users.login_attempts, users.is_locked, users.phone_id, phones.phone \
             FROM users LEFT JOIN phones ON users.phone_id = phones.phone_id \
             WHERE users.email = $1 OR phones.phone = $1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(|row| RecoveryAccount {
            user: user_from_row(row),
            phone: row.get("phone"),
        }))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, Error> {
        let row = sqlx::query("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get::<i64, _>(0) > 0)
    }

    async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<(), Error> {
        sqlx::query("INSERT INTO users(username, email, password) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn increment_login_attempts(&self, user_id: i64) -> Result<i32, Error> {
        let row = sqlx::query(
            "UPDATE users SET login_attempts = login_attempts + 1 \
             WHERE user_id = $1 RETURNING login_attempts",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("login_attempts"))
    }

    async fn reset_login_attempts(&self, user_id: i64) -> Result<(), Error> {
        sqlx::query("UPDATE users SET login_attempts = 0 WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn lock_account(&self, user_id: i64) -> Result<(), Error> {
        sqlx::query("UPDATE users SET is_locked = TRUE WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn is_locked(&self, user_id: i64) -> Result<bool, Error> {
        let row = sqlx::query("SELECT is_locked FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("is_locked"))
    }
}
