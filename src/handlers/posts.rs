use axum::extract::{Path, State};
use axum::Extension;

use crate::api::views::{many, PostView};
use crate::app::AppState;
use crate::database::models::{NewPost, Post, PostWithAuthor};
use crate::database::Repository;
use crate::error::ApiError;
use crate::forms::{post::PostChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};

/// GET /api/v1/posts
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PostView>> {
    let rows = PostWithAuthor::select_all(state.pool()).await?;
    Ok(ApiResponse::success(many(&rows)))
}

/// POST /api/v1/posts - authored by the authenticated caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    input: FormInput,
) -> ApiResult<PostView> {
    let new_post = NewPost::validate(&input)?;
    let post = new_post.insert(state.pool(), user.id).await?;

    tracing::info!(post_id = post.id, user_id = user.id, "Created post");
    Ok(ApiResponse::created(authored(post, &user)))
}

/// GET /api/v1/posts/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<PostView> {
    let row = PostWithAuthor::select_404(state.pool(), id).await?;
    Ok(ApiResponse::success(PostView::from(&row)))
}

/// PUT /api/v1/posts/:id - only the author may edit
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<PostView> {
    let changes = PostChanges::validate(&input)?;
    let mut post = owned_post(&state, &user, id).await?;

    changes.apply(&mut post);
    let post = post.save(state.pool()).await?;

    tracing::info!(post_id = post.id, user_id = user.id, "Updated post");
    Ok(ApiResponse::created(authored(post, &user)))
}

/// DELETE /api/v1/posts/:id - only the author may delete; returns what is left
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<PostView>> {
    owned_post(&state, &user, id).await?;
    Repository::<Post>::new(state.pool()).delete_404(id).await?;

    tracing::info!(post_id = id, user_id = user.id, "Deleted post");
    let rows = PostWithAuthor::select_all(state.pool()).await?;
    Ok(ApiResponse::success(many(&rows)))
}

async fn owned_post(state: &AppState, user: &CurrentUser, id: i64) -> Result<Post, ApiError> {
    let post = Repository::<Post>::new(state.pool()).select_404(id).await?;
    if post.user_id != Some(user.id) {
        tracing::warn!(post_id = id, user_id = user.id, "Refused change to another user's post");
        return Err(ApiError::forbidden("Only the author may change this post"));
    }
    Ok(post)
}

fn authored(post: Post, user: &CurrentUser) -> PostView {
    PostView::from(&PostWithAuthor {
        post,
        author_email: Some(user.email.clone()),
    })
}
