use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{Effort, NewEffort};
use crate::error::ApiError;

impl NewEffort {
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
pub struct EffortChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl EffortChanges {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            name: form.patch_required_string("name", Some(SHORT_TEXT)),
            description: form.patch_string("description", None),
        };
        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, effort: &mut Effort) {
        if let Some(name) = self.name {
            effort.name = name;
        }
        if let Some(description) = self.description {
            effort.description = description;
        }
    }
}
