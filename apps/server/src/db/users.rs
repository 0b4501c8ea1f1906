//! User repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    models::{RegisterInput, User},
    Result,
};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, created_at";

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, input: &RegisterInput, password_hash: &str) -> Result<User> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, first_name, last_name) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(&input.email)
            .bind(password_hash)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(&self.pool)
            .await
            .map_err(crate::Error::Database)?;
        Ok(user)
    }

    /// Emails are matched case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::Error::Database)?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::Error::Database)?;
        Ok(user)
    }
}
