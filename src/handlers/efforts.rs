use axum::extract::{Path, State};

use super::remaining;
use crate::api::views::{many, EffortView};
use crate::app::AppState;
use crate::database::models::{Effort, NewEffort};
use crate::database::Repository;
use crate::forms::{effort::EffortChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/efforts
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<EffortView>> {
    let rows = Repository::<Effort>::new(state.pool()).select_all().await?;
    Ok(ApiResponse::success(many(&rows)))
}

/// POST /api/v1/efforts
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<EffortView> {
    let effort = NewEffort::validate(&input)?.insert(state.pool()).await?;
    tracing::info!(effort_id = effort.id, "Created effort");
    Ok(ApiResponse::created(EffortView::from(&effort)))
}

/// GET /api/v1/efforts/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<EffortView> {
    let effort = Repository::<Effort>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(EffortView::from(&effort)))
}

/// PUT /api/v1/efforts/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<EffortView> {
    let changes = EffortChanges::validate(&input)?;
    let mut effort = Repository::<Effort>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut effort);
    let effort = effort.save(state.pool()).await?;

    tracing::info!(effort_id = effort.id, "Updated effort");
    Ok(ApiResponse::created(EffortView::from(&effort)))
}

/// DELETE /api/v1/efforts/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<EffortView>> {
    Repository::<Effort>::new(state.pool()).delete_404(id).await?;
    tracing::info!(effort_id = id, "Deleted effort");
    Ok(ApiResponse::success(remaining::<Effort, EffortView>(state.pool()).await?))
}
