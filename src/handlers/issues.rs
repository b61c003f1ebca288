use axum::extract::{Path, State};

use super::remaining;
use crate::api::views::{many, IssueView};
use crate::app::AppState;
use crate::database::models::{Issue, NewIssue};
use crate::database::Repository;
use crate::forms::{issue::IssueChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/issues
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<IssueView>> {
    let rows = Repository::<Issue>::new(state.pool()).select_all().await?;
    Ok(ApiResponse::success(many(&rows)))
}

/// POST /api/v1/issues
///
/// Every reference that is set must name an existing row; `column_id`
/// falls back to lane 1.
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<IssueView> {
    let new_issue = NewIssue::validate(&input, state.pool()).await?;
    let issue = new_issue.insert(state.pool()).await?;
    tracing::info!(issue_id = issue.id, "Created issue");
    Ok(ApiResponse::created(IssueView::from(&issue)))
}

/// GET /api/v1/issues/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<IssueView> {
    let issue = Repository::<Issue>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(IssueView::from(&issue)))
}

/// PUT /api/v1/issues/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<IssueView> {
    let changes = IssueChanges::validate(&input, state.pool()).await?;
    let mut issue = Repository::<Issue>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut issue);
    let issue = issue.save(state.pool()).await?;

    tracing::info!(issue_id = issue.id, "Updated issue");
    Ok(ApiResponse::created(IssueView::from(&issue)))
}

/// DELETE /api/v1/issues/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<IssueView>> {
    Repository::<Issue>::new(state.pool()).delete_404(id).await?;
    tracing::info!(issue_id = id, "Deleted issue");
    Ok(ApiResponse::success(remaining::<Issue, IssueView>(state.pool()).await?))
}
