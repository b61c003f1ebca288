// Route handlers, one module per resource. Every handler follows the same
// path: validate the form, touch the store once, render the view.

pub mod columns;
pub mod contacts;
pub mod efforts;
pub mod health;
pub mod issues;
pub mod milestones;
pub mod posts;
pub mod projects;
pub mod sessions;
pub mod tags;
pub mod todos;
pub mod users;

use sqlx::SqlitePool;

use crate::api::views::many;
use crate::database::{Entity, Repository};
use crate::error::ApiError;

/// Every row of `T` rendered as `V`, the body returned after a delete
pub(crate) async fn remaining<T, V>(pool: &SqlitePool) -> Result<Vec<V>, ApiError>
where
    T: Entity,
    V: for<'a> From<&'a T>,
{
    let rows = Repository::<T>::new(pool).select_all().await?;
    Ok(many(&rows))
}
