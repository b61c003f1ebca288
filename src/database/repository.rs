use sqlx::{sqlite::SqliteRow, FromRow, SqlitePool};

use crate::database::manager::DatabaseError;

/// A row type stored in its own table with an integer `id` primary key.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin {
    /// Table name; a fixed identifier, never user input
    const TABLE: &'static str;
    /// Human readable name used in not-found messages
    const NAME: &'static str;
}

/// Generic read and delete access shared by every entity. Inserts and updates
/// are entity specific and live next to each model.
pub struct Repository<'a, T> {
    pool: &'a SqlitePool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T: Entity> Repository<'a, T> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// All rows in insertion order
    pub async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY id", T::TABLE);
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(self.pool).await?)
    }

    pub async fn select_one(&self, id: i64) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = ?", T::TABLE);
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?)
    }

    pub async fn select_404(&self, id: i64) -> Result<T, DatabaseError> {
        self.select_one(id)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)", T::TABLE);
        let (found,): (i64,) = sqlx::query_as(&sql).bind(id).fetch_one(self.pool).await?;
        Ok(found != 0)
    }

    pub async fn delete_404(&self, id: i64) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(not_found::<T>(id));
        }
        Ok(())
    }

    /// Delete every row whose boolean `flag` column is set, in one statement.
    /// Returns the number of rows removed.
    pub async fn delete_flagged(&self, flag: &'static str) -> Result<u64, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE {} = 1", T::TABLE, flag);
        let result = sqlx::query(&sql).execute(self.pool).await?;
        Ok(result.rows_affected())
    }
}

pub fn not_found<T: Entity>(id: i64) -> DatabaseError {
    DatabaseError::NotFound(format!("{} {} not found", T::NAME, id))
}
