use chrono::{DateTime, Utc};

use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{Milestone, NewMilestone, DEFAULT_MILESTONE_STATUS};
use crate::error::ApiError;

impl NewMilestone {
    /// `due_date` defaults to the time of creation, `status` to "Active"
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let name = form.required_string("name", Some(SHORT_TEXT));
        let description = form.optional_string("description", None);
        let due_date = form.optional_datetime("due_date").unwrap_or_else(Utc::now);
        let status = form
            .optional_string("status", Some(SHORT_TEXT))
            .unwrap_or_else(|| DEFAULT_MILESTONE_STATUS.to_string());

        form.finish()?;
        Ok(Self {
            name: name.unwrap_or_default(),
            description,
            due_date,
            status,
        })
    }
}

#[derive(Debug, Default)]
pub struct MilestoneChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<String>,
}

impl MilestoneChanges {
    pub fn validate(input: &FormInput) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            name: form.patch_required_string("name", Some(SHORT_TEXT)),
            description: form.patch_string("description", None),
            due_date: form.patch_datetime("due_date"),
            status: form.patch_required_string("status", Some(SHORT_TEXT)),
        };
        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, milestone: &mut Milestone) {
        if let Some(name) = self.name {
            milestone.name = name;
        }
        if let Some(description) = self.description {
            milestone.description = description;
        }
        if let Some(due_date) = self.due_date {
            milestone.due_date = due_date;
        }
        if let Some(status) = self.status {
            milestone.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn fills_in_defaults() {
        let before = Utc::now();
        let input = FormInput::from_value(json!({"name": "v1"})).unwrap();
        let milestone = NewMilestone::validate(&input).unwrap();
        assert_eq!(milestone.status, "Active");
        assert!(milestone.due_date >= before);
    }

    #[test]
    fn accepts_plain_datetimes() {
        let input = FormInput::from_value(json!({
            "name": "v1",
            "due_date": "2024-03-01 12:00:00",
            "status": "Planned"
        }))
        .unwrap();
        let milestone = NewMilestone::validate(&input).unwrap();
        assert_eq!(milestone.due_date, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        assert_eq!(milestone.status, "Planned");
    }
}
