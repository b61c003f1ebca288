use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{NewPost, Post};
use crate::error::ApiError;

impl NewPost {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let title = form.required_string("title", Some(SHORT_TEXT));
        let body = form.required_string("body", None);

        form.finish()?;
        Ok(Self {
            title: title.unwrap_or_default(),
            body: body.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl PostChanges {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            title: form.patch_required_string("title", Some(SHORT_TEXT)),
            body: form.patch_required_string("body", None),
        };
        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
    }
}
