use axum::extract::{Path, State};

use super::remaining;
use crate::api::views::{many, TodoView};
use crate::app::AppState;
use crate::database::models::{NewTodo, Todo};
use crate::database::Repository;
use crate::forms::{todo::TodoChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/todos
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<TodoView>> {
    let todos = Repository::<Todo>::new(state.pool()).select_all().await?;
    Ok(ApiResponse::success(many(&todos)))
}

/// POST /api/v1/todos
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<TodoView> {
    let todo = NewTodo::validate(&input)?.insert(state.pool()).await?;
    tracing::info!(todo_id = todo.id, status = %todo.status, "Created todo");
    Ok(ApiResponse::created(TodoView::from(&todo)))
}

/// DELETE /api/v1/todos - clear completed todos, return the rest
pub async fn delete_completed(State(state): State<AppState>) -> ApiResult<Vec<TodoView>> {
    let removed = Repository::<Todo>::new(state.pool())
        .delete_flagged("is_complete")
        .await?;
    tracing::info!(removed, "Cleared completed todos");
    Ok(ApiResponse::created(remaining::<Todo, TodoView>(state.pool()).await?))
}

/// GET /api/v1/todos/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<TodoView> {
    let todo = Repository::<Todo>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(TodoView::from(&todo)))
}

/// PUT /api/v1/todos/:id - status follows `is_complete`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<TodoView> {
    let changes = TodoChanges::validate(&input)?;
    let mut todo = Repository::<Todo>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut todo);
    let todo = todo.save(state.pool()).await?;

    tracing::info!(todo_id = todo.id, status = %todo.status, "Updated todo");
    Ok(ApiResponse::created(TodoView::from(&todo)))
}

/// DELETE /api/v1/todos/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<TodoView>> {
    Repository::<Todo>::new(state.pool()).delete_404(id).await?;
    tracing::info!(todo_id = id, "Deleted todo");
    Ok(ApiResponse::success(remaining::<Todo, TodoView>(state.pool()).await?))
}
