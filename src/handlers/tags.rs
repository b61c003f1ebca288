use axum::extract::{Path, State};

use super::remaining;
use crate::api::views::{many, TagView};
use crate::app::AppState;
use crate::database::models::{Tag, NewTag};
use crate::database::Repository;
use crate::forms::{tag::TagChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/tags
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<TagView>> {
    let rows = Repository::<Tag>::new(state.pool()).select_all().await?;
    Ok(ApiResponse::success(many(&rows)))
}

/// POST /api/v1/tags
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<TagView> {
    let tag = NewTag::validate(&input)?.insert(state.pool()).await?;
    tracing::info!(tag_id = tag.id, "Created tag");
    Ok(ApiResponse::created(TagView::from(&tag)))
}

/// GET /api/v1/tags/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<TagView> {
    let tag = Repository::<Tag>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(TagView::from(&tag)))
}

/// PUT /api/v1/tags/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<TagView> {
    let changes = TagChanges::validate(&input)?;
    let mut tag = Repository::<Tag>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut tag);
    let tag = tag.save(state.pool()).await?;

    tracing::info!(tag_id = tag.id, "Updated tag");
    Ok(ApiResponse::created(TagView::from(&tag)))
}

/// DELETE /api/v1/tags/:id - issues using the tag lose it
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<TagView>> {
    Repository::<Tag>::new(state.pool()).delete_404(id).await?;
    tracing::info!(tag_id = id, "Deleted tag");
    Ok(ApiResponse::success(remaining::<Tag, TagView>(state.pool()).await?))
}
