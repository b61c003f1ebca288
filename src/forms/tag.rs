use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{NewTag, Tag, DEFAULT_TAG_COLOR};
use crate::error::ApiError;

const COLOR_LEN: u64 = 32;

impl NewTag {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let name = form.required_string("name", Some(SHORT_TEXT));
        let description = form.optional_string("description", None);
        let color = form
            .optional_string("color", Some(COLOR_LEN))
            .unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());

        form.finish()?;
        Ok(Self {
            name: name.unwrap_or_default(),
            description,
            color,
        })
    }
}

#[derive(Debug, Default)]
pub struct TagChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub color: Option<String>,
}

impl TagChanges {
    /// A blank `color` resets it to the default rather than clearing it
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            name: form.patch_required_string("name", Some(SHORT_TEXT)),
            description: form.patch_string("description", None),
            color: form
                .patch_string("color", Some(COLOR_LEN))
                .map(|color| color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string())),
        };
        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, tag: &mut Tag) {
        if let Some(name) = self.name {
            tag.name = name;
        }
        if let Some(description) = self.description {
            tag.description = description;
        }
        if let Some(color) = self.color {
            tag.color = color;
        }
    }
}
