use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::BasicCredentials;
use crate::database::models::User;
use crate::error::ApiError;

/// The caller resolved by the auth gate, handed to handlers as a request
/// extension.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// HTTP Basic gate: resolves the caller from the users table or answers 401
/// with an empty body before the handler runs.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let realm = &state.config.security.auth_realm;

    let Some(credentials) = BasicCredentials::from_headers(request.headers()) else {
        tracing::debug!("Missing or malformed Basic credentials for {}", request.uri().path());
        return Err(ApiError::challenge(realm.as_str()));
    };

    let Some(user) = User::find_by_email(state.pool(), &credentials.email).await? else {
        tracing::warn!(email = %credentials.email, "Authentication failed: unknown email");
        return Err(ApiError::challenge(realm.as_str()));
    };

    if !state.passwords.verify(&credentials.password, &user.password).await? {
        tracing::warn!(email = %credentials.email, "Authentication failed: wrong password");
        return Err(ApiError::challenge(realm.as_str()));
    }

    tracing::debug!(user_id = user.id, "Authenticated {}", user.email);
    request.extensions_mut().insert(CurrentUser::from(&user));

    Ok(next.run(request).await)
}
