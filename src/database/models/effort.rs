use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

#[derive(Debug, Clone, FromRow)]
pub struct Effort {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl Entity for Effort {
    const TABLE: &'static str = "efforts";
    const NAME: &'static str = "effort";
}

impl Effort {
    pub async fn save(&self, pool: &SqlitePool) -> Result<Effort, DatabaseError> {
        sqlx::query_as::<_, Effort>("UPDATE efforts SET name = ?, description = ? WHERE id = ? RETURNING *")
            .bind(&self.name)
            .bind(&self.description)
            .bind(self.id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Effort>(self.id))
    }
}

#[derive(Debug)]
pub struct NewEffort {
    pub name: String,
    pub description: Option<String>,
}

impl NewEffort {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<Effort, DatabaseError> {
        Ok(sqlx::query_as::<_, Effort>("INSERT INTO efforts (name, description) VALUES (?, ?) RETURNING *")
            .bind(&self.name)
            .bind(&self.description)
            .fetch_one(pool)
            .await?)
    }
}
