use axum::extract::{Path, State};

use super::remaining;
use crate::api::views::{many, MilestoneView};
use crate::app::AppState;
use crate::database::models::{Milestone, NewMilestone};
use crate::database::Repository;
use crate::forms::{milestone::MilestoneChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/milestones
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<MilestoneView>> {
    let rows = Repository::<Milestone>::new(state.pool()).select_all().await?;
    Ok(ApiResponse::success(many(&rows)))
}

/// POST /api/v1/milestones
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<MilestoneView> {
    let milestone = NewMilestone::validate(&input)?.insert(state.pool()).await?;
    tracing::info!(milestone_id = milestone.id, "Created milestone");
    Ok(ApiResponse::created(MilestoneView::from(&milestone)))
}

/// GET /api/v1/milestones/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<MilestoneView> {
    let milestone = Repository::<Milestone>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(MilestoneView::from(&milestone)))
}

/// PUT /api/v1/milestones/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<MilestoneView> {
    let changes = MilestoneChanges::validate(&input)?;
    let mut milestone = Repository::<Milestone>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut milestone);
    let milestone = milestone.save(state.pool()).await?;

    tracing::info!(milestone_id = milestone.id, "Updated milestone");
    Ok(ApiResponse::created(MilestoneView::from(&milestone)))
}

/// DELETE /api/v1/milestones/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<MilestoneView>> {
    Repository::<Milestone>::new(state.pool()).delete_404(id).await?;
    tracing::info!(milestone_id = id, "Deleted milestone");
    Ok(ApiResponse::success(remaining::<Milestone, MilestoneView>(state.pool()).await?))
}
