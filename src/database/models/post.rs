use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{not_found, Entity};

#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Post {
    const TABLE: &'static str = "posts";
    const NAME: &'static str = "post";
}

/// A post joined with its author's email, enough to render the nested user.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    #[sqlx(flatten)]
    pub post: Post,
    pub author_email: Option<String>,
}

const SELECT_WITH_AUTHOR: &str = "SELECT posts.*, users.email AS author_email \
     FROM posts LEFT JOIN users ON users.id = posts.user_id";

impl PostWithAuthor {
    pub async fn select_all(pool: &SqlitePool) -> Result<Vec<Self>, DatabaseError> {
        let sql = format!("{SELECT_WITH_AUTHOR} ORDER BY posts.id");
        Ok(sqlx::query_as::<_, Self>(&sql).fetch_all(pool).await?)
    }

    pub async fn select_404(pool: &SqlitePool, id: i64) -> Result<Self, DatabaseError> {
        let sql = format!("{SELECT_WITH_AUTHOR} WHERE posts.id = ?");
        sqlx::query_as::<_, Self>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Post>(id))
    }
}

impl Post {
    pub async fn save(&self, pool: &SqlitePool) -> Result<Post, DatabaseError> {
        sqlx::query_as::<_, Post>("UPDATE posts SET title = ?, body = ? WHERE id = ? RETURNING *")
            .bind(&self.title)
            .bind(&self.body)
            .bind(self.id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| not_found::<Post>(self.id))
    }
}

#[derive(Debug)]
pub struct NewPost {
    pub title: String,
    pub body: String,
}

impl NewPost {
    /// Insert on behalf of `user_id`, the authenticated caller.
    pub async fn insert(&self, pool: &SqlitePool, user_id: i64) -> Result<Post, DatabaseError> {
        Ok(sqlx::query_as::<_, Post>(
            "INSERT INTO posts (title, body, user_id, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(&self.title)
        .bind(&self.body)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?)
    }
}
