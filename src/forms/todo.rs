use super::{Form, FormInput};
use crate::database::models::{NewTodo, Todo};
use crate::error::ApiError;

impl NewTodo {
    /// `{text, is_complete}`; status is derived, never accepted
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let text = form.required_string("text", None);
        let is_complete = form.boolean("is_complete");

        form.finish()?;
        Ok(Self::new(text.unwrap_or_default(), is_complete))
    }
}

/// Completion toggle. `is_complete` is a checkbox: leaving it out marks the
/// todo active again. `text` is only replaced when sent.
#[derive(Debug)]
pub struct TodoChanges {
    pub text: Option<String>,
    pub is_complete: bool,
}

impl TodoChanges {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            text: form.patch_required_string("text", None),
            is_complete: form.boolean("is_complete"),
        };
        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, todo: &mut Todo) {
        if let Some(text) = self.text {
            todo.text = text;
        }
        todo.set_complete(self.is_complete);
    }
}
