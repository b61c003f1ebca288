use axum::extract::{Path, State};

use super::remaining;
use crate::api::views::{many, ProjectView};
use crate::app::AppState;
use crate::database::models::{Project, NewProject};
use crate::database::Repository;
use crate::forms::{project::ProjectChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ProjectView>> {
    let rows = Repository::<Project>::new(state.pool()).select_all().await?;
    Ok(ApiResponse::success(many(&rows)))
}

/// POST /api/v1/projects - `user_id` names the owning contact
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<ProjectView> {
    let new_project = NewProject::validate(&input, state.pool()).await?;
    let project = new_project.insert(state.pool()).await?;
    tracing::info!(project_id = project.id, "Created project");
    Ok(ApiResponse::created(ProjectView::from(&project)))
}

/// GET /api/v1/projects/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ProjectView> {
    let project = Repository::<Project>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(ProjectView::from(&project)))
}

/// PUT /api/v1/projects/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<ProjectView> {
    let changes = ProjectChanges::validate(&input, state.pool()).await?;
    let mut project = Repository::<Project>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut project);
    let project = project.save(state.pool()).await?;

    tracing::info!(project_id = project.id, "Updated project");
    Ok(ApiResponse::created(ProjectView::from(&project)))
}

/// DELETE /api/v1/projects/:id - 409 while issues still belong to it
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<ProjectView>> {
    Repository::<Project>::new(state.pool()).delete_404(id).await?;
    tracing::info!(project_id = id, "Deleted project");
    Ok(ApiResponse::success(remaining::<Project, ProjectView>(state.pool()).await?))
}
