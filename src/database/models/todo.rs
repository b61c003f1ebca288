use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_COMPLETED: &str = "Completed";

#[derive(Debug, Clone, FromRow)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub is_complete: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for Todo {
    const TABLE: &'static str = "todos";
    const NAME: &'static str = "todo";
}

/// `status` always mirrors `is_complete`.
pub fn status_for(is_complete: bool) -> &'static str {
    if is_complete {
        STATUS_COMPLETED
    } else {
        STATUS_ACTIVE
    }
}

impl Todo {
    pub fn set_complete(&mut self, is_complete: bool) {
        self.is_complete = is_complete;
        self.status = status_for(is_complete).to_string();
    }

    pub async fn save(&self, pool: &SqlitePool) -> Result<Todo, DatabaseError> {
        sqlx::query_as::<_, Todo>(
            "UPDATE todos SET text = ?, is_complete = ?, status = ? WHERE id = ? RETURNING *",
        )
        .bind(&self.text)
        .bind(self.is_complete)
        .bind(&self.status)
        .bind(self.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<Todo>(self.id))
    }
}

#[derive(Debug)]
pub struct NewTodo {
    pub text: String,
    pub is_complete: bool,
}

impl NewTodo {
    pub fn new(text: impl Into<String>, is_complete: bool) -> Self {
        Self {
            text: text.into(),
            is_complete,
        }
    }

    pub async fn insert(&self, pool: &SqlitePool) -> Result<Todo, DatabaseError> {
        Ok(sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (text, is_complete, status, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(&self.text)
        .bind(self.is_complete)
        .bind(status_for(self.is_complete))
        .bind(Utc::now())
        .fetch_one(pool)
        .await?)
    }
}
