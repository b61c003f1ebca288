use axum::extract::State;

use crate::api::views::UserView;
use crate::app::AppState;
use crate::database::models::User;
use crate::error::ApiError;
use crate::forms::{user::SessionCreateForm, FormInput};
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/v1/sessions - check an email and password
///
/// 201 with the user on success; 401 with an empty body for an unknown
/// email or a wrong password, without saying which.
pub async fn create(State(state): State<AppState>, input: FormInput) -> ApiResult<UserView> {
    let form = SessionCreateForm::validate(&input)?;

    let Some(user) = User::find_by_email(state.pool(), &form.email).await? else {
        tracing::warn!(email = %form.email, "Login failed: unknown email");
        return Err(ApiError::unauthorized());
    };

    if !state.passwords.verify(&form.password, &user.password).await? {
        tracing::warn!(email = %form.email, "Login failed: wrong password");
        return Err(ApiError::unauthorized());
    }

    tracing::info!(user_id = user.id, "Logged in {}", user.email);
    Ok(ApiResponse::created(UserView::from(&user)))
}
