use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

/// Lane an issue lands in when none is given.
pub const DEFAULT_COLUMN_ID: i64 = 1;

#[derive(Debug, Clone, FromRow)]
pub struct Issue {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub column_id: i64,
    pub tag_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub effort_id: Option<i64>,
    pub assigned_to_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Issue {
    const TABLE: &'static str = "issues";
    const NAME: &'static str = "issue";
}

impl Issue {
    pub async fn select_for_column(pool: &SqlitePool, column_id: i64) -> Result<Vec<Issue>, DatabaseError> {
        Ok(sqlx::query_as::<_, Issue>("SELECT * FROM issues WHERE column_id = ? ORDER BY id")
            .bind(column_id)
            .fetch_all(pool)
            .await?)
    }

    pub async fn save(&self, pool: &SqlitePool) -> Result<Issue, DatabaseError> {
        sqlx::query_as::<_, Issue>(
            "UPDATE issues SET title = ?, description = ?, project_id = ?, column_id = ?, tag_id = ?, \
             milestone_id = ?, effort_id = ?, assigned_to_id = ? WHERE id = ? RETURNING *",
        )
        .bind(&self.title)
        .bind(&self.description)
        .bind(self.project_id)
        .bind(self.column_id)
        .bind(self.tag_id)
        .bind(self.milestone_id)
        .bind(self.effort_id)
        .bind(self.assigned_to_id)
        .bind(self.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<Issue>(self.id))
    }
}

#[derive(Debug)]
pub struct NewIssue {
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub column_id: i64,
    pub tag_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub effort_id: Option<i64>,
    pub assigned_to_id: Option<i64>,
}

impl NewIssue {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<Issue, DatabaseError> {
        Ok(sqlx::query_as::<_, Issue>(
            "INSERT INTO issues (title, description, project_id, column_id, tag_id, milestone_id, \
             effort_id, assigned_to_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&self.title)
        .bind(&self.description)
        .bind(self.project_id)
        .bind(self.column_id)
        .bind(self.tag_id)
        .bind(self.milestone_id)
        .bind(self.effort_id)
        .bind(self.assigned_to_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?)
    }
}
