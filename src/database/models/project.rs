use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

/// A project owned by a contact (`user_id` references `contacts`).
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Project {
    const TABLE: &'static str = "projects";
    const NAME: &'static str = "project";
}

impl Project {
    pub async fn save(&self, pool: &SqlitePool) -> Result<Project, DatabaseError> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects SET user_id = ?, name = ?, description = ? WHERE id = ? RETURNING *",
        )
        .bind(self.user_id)
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<Project>(self.id))
    }
}

#[derive(Debug)]
pub struct NewProject {
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl NewProject {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<Project, DatabaseError> {
        Ok(sqlx::query_as::<_, Project>(
            "INSERT INTO projects (user_id, name, description, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(self.user_id)
        .bind(&self.name)
        .bind(&self.description)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?)
    }
}
