use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

pub const DEFAULT_MILESTONE_STATUS: &str = "Active";

#[derive(Debug, Clone, FromRow)]
pub struct Milestone {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
}

impl Entity for Milestone {
    const TABLE: &'static str = "milestones";
    const NAME: &'static str = "milestone";
}

impl Milestone {
    pub async fn save(&self, pool: &SqlitePool) -> Result<Milestone, DatabaseError> {
        sqlx::query_as::<_, Milestone>(
            "UPDATE milestones SET name = ?, description = ?, due_date = ?, status = ? WHERE id = ? RETURNING *",
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.due_date)
        .bind(&self.status)
        .bind(self.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<Milestone>(self.id))
    }
}

#[derive(Debug)]
pub struct NewMilestone {
    pub name: String,
    pub description: Option<String>,
    pub due_date: DateTime<Utc>,
    pub status: String,
}

impl NewMilestone {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<Milestone, DatabaseError> {
        Ok(sqlx::query_as::<_, Milestone>(
            "INSERT INTO milestones (name, description, due_date, status) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.due_date)
        .bind(&self.status)
        .fetch_one(pool)
        .await?)
    }
}
