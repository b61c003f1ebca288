use axum::extract::{Path, State};

use crate::api::views::ColumnView;
use crate::app::AppState;
use crate::database::models::{BoardColumn, Issue, NewColumn};
use crate::database::Repository;
use crate::error::ApiError;
use crate::forms::{column::ColumnChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

async fn board(state: &AppState) -> Result<Vec<ColumnView>, ApiError> {
    let lanes = BoardColumn::select_all_with_issues(state.pool()).await?;
    Ok(lanes
        .iter()
        .map(|(column, issues)| ColumnView::new(column, issues))
        .collect())
}

async fn render(state: &AppState, column: &BoardColumn) -> Result<ColumnView, ApiError> {
    let issues = Issue::select_for_column(state.pool(), column.id).await?;
    Ok(ColumnView::new(column, &issues))
}

/// GET /api/v1/columns - the whole board, each lane with its issues
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ColumnView>> {
    Ok(ApiResponse::success(board(&state).await?))
}

/// POST /api/v1/columns
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<ColumnView> {
    let column = NewColumn::validate(&input)?.insert(state.pool()).await?;
    tracing::info!(column_id = column.id, "Created column {}", column.name);
    Ok(ApiResponse::created(ColumnView::new(&column, &[])))
}

/// GET /api/v1/columns/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ColumnView> {
    let column = Repository::<BoardColumn>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(render(&state, &column).await?))
}

/// PUT /api/v1/columns/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<ColumnView> {
    let changes = ColumnChanges::validate(&input)?;
    let mut column = Repository::<BoardColumn>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut column);
    let column = column.save(state.pool()).await?;

    tracing::info!(column_id = column.id, "Updated column");
    Ok(ApiResponse::created(render(&state, &column).await?))
}

/// DELETE /api/v1/columns/:id - refused with 409 while the lane holds issues
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<ColumnView>> {
    Repository::<BoardColumn>::new(state.pool()).delete_404(id).await?;
    tracing::info!(column_id = id, "Deleted column");
    Ok(ApiResponse::success(board(&state).await?))
}
