use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::issue::Issue;
use crate::database::repository::{not_found, Entity, Repository};

/// A Kanban lane. Stored in `board_columns`.
#[derive(Debug, Clone, FromRow)]
pub struct BoardColumn {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for BoardColumn {
    const TABLE: &'static str = "board_columns";
    const NAME: &'static str = "column";
}

impl BoardColumn {
    /// Every lane with its issues, both in insertion order.
    pub async fn select_all_with_issues(pool: &SqlitePool) -> Result<Vec<(BoardColumn, Vec<Issue>)>, DatabaseError> {
        let columns = Repository::<BoardColumn>::new(pool).select_all().await?;
        let mut by_column: HashMap<i64, Vec<Issue>> = HashMap::new();
        for issue in Repository::<Issue>::new(pool).select_all().await? {
            by_column.entry(issue.column_id).or_default().push(issue);
        }

        Ok(columns
            .into_iter()
            .map(|column| {
                let issues = by_column.remove(&column.id).unwrap_or_default();
                (column, issues)
            })
            .collect())
    }

    pub async fn save(&self, pool: &SqlitePool) -> Result<BoardColumn, DatabaseError> {
        sqlx::query_as::<_, BoardColumn>(
            "UPDATE board_columns SET name = ?, description = ? WHERE id = ? RETURNING *",
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(self.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<BoardColumn>(self.id))
    }
}

#[derive(Debug)]
pub struct NewColumn {
    pub name: String,
    pub description: Option<String>,
}

impl NewColumn {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<BoardColumn, DatabaseError> {
        Ok(sqlx::query_as::<_, BoardColumn>(
            "INSERT INTO board_columns (name, description, created_at) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?)
    }
}
