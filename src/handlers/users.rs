use axum::extract::State;

use crate::api::views::UserView;
use crate::app::AppState;
use crate::database::models::NewUser;
use crate::forms::{user::UserCreateForm, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/v1/users - register an account
///
/// Answers 200 (not 201) with the new user. A duplicate email is a 422,
/// including when two registrations race past the form check.
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<UserView> {
    let form = UserCreateForm::validate(&input, state.pool()).await?;
    let password_hash = state.passwords.hash(&form.password).await?;

    let user = NewUser {
        email: form.email,
        password_hash,
    }
    .insert(state.pool())
    .await?;

    tracing::info!(user_id = user.id, "Registered {}", user.email);
    Ok(ApiResponse::success(UserView::from(&user)))
}
