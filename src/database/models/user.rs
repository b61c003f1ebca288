use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::Entity;

/// Account row. `password` holds the argon2 PHC string, never the plain text.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const NAME: &'static str = "user";
}

impl User {
    pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?)
    }
}

#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<User, DatabaseError> {
        Ok(sqlx::query_as::<_, User>(
            "INSERT INTO users (email, password) VALUES (?, ?) RETURNING *",
        )
        .bind(&self.email)
        .bind(&self.password_hash)
        .fetch_one(pool)
        .await?)
    }
}
