use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{Contact, NewContact};
use crate::error::ApiError;

impl NewContact {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let first_name = form.required_string("first_name", Some(SHORT_TEXT));
        let last_name = form.required_string("last_name", Some(SHORT_TEXT));
        let text = form.required_string("text", None);
        let icon_url = form.optional_string("icon_url", Some(SHORT_TEXT));
        let is_selected = form.boolean("is_selected");

        form.finish()?;
        Ok(Self {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            text: text.unwrap_or_default(),
            icon_url,
            is_selected,
        })
    }
}

#[derive(Debug, Default)]
pub struct ContactChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub text: Option<String>,
    pub icon_url: Option<Option<String>>,
    pub is_selected: Option<bool>,
}

impl ContactChanges {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            first_name: form.patch_required_string("first_name", Some(SHORT_TEXT)),
            last_name: form.patch_required_string("last_name", Some(SHORT_TEXT)),
            text: form.patch_required_string("text", None),
            icon_url: form.patch_string("icon_url", Some(SHORT_TEXT)),
            is_selected: form.patch_boolean("is_selected"),
        };
        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, contact: &mut Contact) {
        if let Some(first_name) = self.first_name {
            contact.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            contact.last_name = last_name;
        }
        if let Some(text) = self.text {
            contact.text = text;
        }
        if let Some(icon_url) = self.icon_url {
            contact.icon_url = icon_url;
        }
        if let Some(is_selected) = self.is_selected {
            contact.is_selected = is_selected;
        }
    }
}
