use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

pub const DEFAULT_TAG_COLOR: &str = "ffffff";

#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

impl Entity for Tag {
    const TABLE: &'static str = "tags";
    const NAME: &'static str = "tag";
}

impl Tag {
    pub async fn save(&self, pool: &SqlitePool) -> Result<Tag, DatabaseError> {
        sqlx::query_as::<_, Tag>("UPDATE tags SET name = ?, description = ?, color = ? WHERE id = ? RETURNING *")
            .bind(&self.name)
            .bind(&self.description)
            .bind(&self.color)
            .bind(self.id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Tag>(self.id))
    }
}

#[derive(Debug)]
pub struct NewTag {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

impl NewTag {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<Tag, DatabaseError> {
        Ok(sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (name, description, color) VALUES (?, ?, ?) RETURNING *",
        )
        .bind(&self.name)
        .bind(&self.description)
        .bind(&self.color)
        .fetch_one(pool)
        .await?)
    }
}
