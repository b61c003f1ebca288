use axum::extract::{Path, State};

use super::remaining;
use crate::api::views::{many, ContactView};
use crate::app::AppState;
use crate::database::models::{Contact, NewContact};
use crate::database::Repository;
use crate::forms::{contact::ContactChanges, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/v1/contacts
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<ContactView>> {
    let contacts = Repository::<Contact>::new(state.pool()).select_all().await?;
    Ok(ApiResponse::success(many(&contacts)))
}

/// POST /api/v1/contacts
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<ContactView> {
    let contact = NewContact::validate(&input)?.insert(state.pool()).await?;
    tracing::info!(contact_id = contact.id, "Created contact");
    Ok(ApiResponse::created(ContactView::from(&contact)))
}

/// DELETE /api/v1/contacts - remove selected contacts, return the rest
///
/// A selected contact that still owns a project blocks the whole batch
/// with 409.
pub async fn delete_selected(State(state): State<AppState>) -> ApiResult<Vec<ContactView>> {
    let removed = Repository::<Contact>::new(state.pool())
        .delete_flagged("is_selected")
        .await?;
    tracing::info!(removed, "Removed selected contacts");
    Ok(ApiResponse::created(remaining::<Contact, ContactView>(state.pool()).await?))
}

/// GET /api/v1/contacts/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ContactView> {
    let contact = Repository::<Contact>::new(state.pool()).select_404(id).await?;
    Ok(ApiResponse::success(ContactView::from(&contact)))
}

/// PUT /api/v1/contacts/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    input: FormInput,
) -> ApiResult<ContactView> {
    let changes = ContactChanges::validate(&input)?;
    let mut contact = Repository::<Contact>::new(state.pool()).select_404(id).await?;

    changes.apply(&mut contact);
    let contact = contact.save(state.pool()).await?;

    tracing::info!(contact_id = contact.id, "Updated contact");
    Ok(ApiResponse::created(ContactView::from(&contact)))
}

/// DELETE /api/v1/contacts/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Vec<ContactView>> {
    Repository::<Contact>::new(state.pool()).delete_404(id).await?;
    tracing::info!(contact_id = id, "Deleted contact");
    Ok(ApiResponse::success(remaining::<Contact, ContactView>(state.pool()).await?))
}
