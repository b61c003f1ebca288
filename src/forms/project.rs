use sqlx::SqlitePool;

use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{Contact, NewProject, Project};
use crate::error::ApiError;

impl NewProject {
    pub async fn validate(input: &FormInput, pool: &SqlitePool) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let name = form.required_string("name", Some(SHORT_TEXT));
        let description = form.optional_string("description", None);
        let user_id = form.required_integer("user_id");
        form.check_reference::<Contact>(pool, "user_id", user_id).await?;

        form.finish()?;
        Ok(Self {
            user_id: user_id.unwrap_or_default(),
            name: name.unwrap_or_default(),
            description,
        })
    }
}

#[derive(Debug, Default)]
pub struct ProjectChanges {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl ProjectChanges {
    pub async fn validate(input: &FormInput, pool: &SqlitePool) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            user_id: form.patch_required_integer("user_id"),
            name: form.patch_required_string("name", Some(SHORT_TEXT)),
            description: form.patch_string("description", None),
        };
        form.check_reference::<Contact>(pool, "user_id", changes.user_id).await?;

        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, project: &mut Project) {
        if let Some(user_id) = self.user_id {
            project.user_id = user_id;
        }
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
    }
}
