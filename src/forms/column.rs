use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{BoardColumn, NewColumn};
use crate::error::ApiError;

impl NewColumn {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let name = form.required_string("name", Some(SHORT_TEXT));
        let description = form.optional_string("description", None);

        form.finish()?;
        Ok(Self {
            name: name.unwrap_or_default(),
            description,
        })
    }
}

#[derive(Debug, Default)]
pub struct ColumnChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl ColumnChanges {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            name: form.patch_required_string("name", Some(SHORT_TEXT)),
            description: form.patch_string("description", None),
        };
        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, column: &mut BoardColumn) {
        if let Some(name) = self.name {
            column.name = name;
        }
        if let Some(description) = self.description {
            column.description = description;
        }
    }
}
