use sqlx::SqlitePool;

use super::{Form, FormInput, ALREADY_EXISTS};
use crate::database::models::User;
use crate::error::ApiError;

/// Longest accepted password
pub const MAX_PASSWORD: u64 = 80;

/// Account registration: `{email, password}`
#[derive(Debug)]
pub struct UserCreateForm {
    pub email: String,
    pub password: String,
}

impl UserCreateForm {
    pub async fn validate(input: &FormInput, pool: &SqlitePool) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let email = form.email("email");
        let password = form.required_string("password", Some(MAX_PASSWORD));

        if let Some(email) = &email {
            if User::find_by_email(pool, email).await?.is_some() {
                form.add_error("email", ALREADY_EXISTS);
            }
        }

        form.finish()?;
        Ok(Self {
            email: email.unwrap_or_default(),
            password: password.unwrap_or_default(),
        })
    }
}

/// Login: `{email, password}`, both only required to be present
#[derive(Debug)]
pub struct SessionCreateForm {
    pub email: String,
    pub password: String,
}

impl SessionCreateForm {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let email = form.required_string("email", None);
        let password = form.required_string("password", None);

        form.finish()?;
        Ok(Self {
            email: email.unwrap_or_default().trim().to_string(),
            password: password.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewUser;
    use crate::error::ApiError;
    use crate::forms::{INVALID_EMAIL, REQUIRED};
    use crate::testing::memory_database;
    use serde_json::json;

    fn field_errors(err: ApiError) -> serde_json::Value {
        match err {
            ApiError::UnprocessableEntity(errors) => serde_json::to_value(errors).unwrap(),
            other => panic!("expected 422, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reports_every_problem_at_once() {
        let db = memory_database().await;
        let input = FormInput::from_value(json!({"email": "nope"})).unwrap();
        let err = UserCreateForm::validate(&input, db.pool()).await.unwrap_err();
        assert_eq!(
            field_errors(err),
            json!({"email": [INVALID_EMAIL], "password": [REQUIRED]})
        );
    }

    #[tokio::test]
    async fn rejects_duplicate_email() {
        let db = memory_database().await;
        NewUser {
            email: "ada@example.com".into(),
            password_hash: "x".into(),
        }
        .insert(db.pool())
        .await
        .unwrap();

        let input = FormInput::from_value(json!({"email": "ada@example.com", "password": "pw"})).unwrap();
        let err = UserCreateForm::validate(&input, db.pool()).await.unwrap_err();
        assert_eq!(field_errors(err), json!({"email": ["Already exists."]}));
    }

    #[test]
    fn session_form_requires_both_fields() {
        let input = FormInput::from_value(json!({"email": "ada@example.com"})).unwrap();
        let err = SessionCreateForm::validate(&input).unwrap_err();
        assert_eq!(field_errors(err), json!({"password": [REQUIRED]}));
    }
}
