use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

#[derive(Debug, Clone, FromRow)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub text: String,
    pub icon_url: Option<String>,
    pub is_selected: bool,
    pub created_at: DateTime<Utc>,
}

impl Entity for Contact {
    const TABLE: &'static str = "contacts";
    const NAME: &'static str = "contact";
}

impl Contact {
    pub async fn save(&self, pool: &SqlitePool) -> Result<Contact, DatabaseError> {
        sqlx::query_as::<_, Contact>(
            "UPDATE contacts SET first_name = ?, last_name = ?, text = ?, icon_url = ?, is_selected = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.text)
        .bind(&self.icon_url)
        .bind(self.is_selected)
        .bind(self.id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found::<Contact>(self.id))
    }
}

#[derive(Debug)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub text: String,
    pub icon_url: Option<String>,
    pub is_selected: bool,
}

impl NewContact {
    pub async fn insert(&self, pool: &SqlitePool) -> Result<Contact, DatabaseError> {
        Ok(sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (first_name, last_name, text, icon_url, is_selected, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.text)
        .bind(&self.icon_url)
        .bind(self.is_selected)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?)
    }
}
