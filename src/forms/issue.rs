use sqlx::SqlitePool;

use super::{Form, FormInput, SHORT_TEXT};
use crate::database::models::{
    BoardColumn, Contact, Effort, Issue, Milestone, NewIssue, Project, Tag, DEFAULT_COLUMN_ID,
};
use crate::error::ApiError;

/// Optional issue references, checked the same way on create and update
async fn check_optional_refs(
    form: &mut Form<'_>,
    pool: &SqlitePool,
    tag_id: Option<i64>,
    milestone_id: Option<i64>,
    effort_id: Option<i64>,
    assigned_to_id: Option<i64>,
) -> Result<(), ApiError> {
    form.check_reference::<Tag>(pool, "tag_id", tag_id).await?;
    form.check_reference::<Milestone>(pool, "milestone_id", milestone_id).await?;
    form.check_reference::<Effort>(pool, "effort_id", effort_id).await?;
    form.check_reference::<Contact>(pool, "assigned_to_id", assigned_to_id).await
}

impl NewIssue {
    /// Issues land in lane 1 unless `column_id` says otherwise
    pub async fn validate(input: &FormInput, pool: &SqlitePool) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let title = form.required_string("title", Some(SHORT_TEXT));
        let description = form.optional_string("description", None);
        let project_id = form.required_integer("project_id");
        let column_id = form.optional_integer("column_id").unwrap_or(DEFAULT_COLUMN_ID);
        let tag_id = form.optional_integer("tag_id");
        let milestone_id = form.optional_integer("milestone_id");
        let effort_id = form.optional_integer("effort_id");
        let assigned_to_id = form.optional_integer("assigned_to_id");

        form.check_reference::<Project>(pool, "project_id", project_id).await?;
        form.check_reference::<BoardColumn>(pool, "column_id", Some(column_id)).await?;
        check_optional_refs(&mut form, pool, tag_id, milestone_id, effort_id, assigned_to_id).await?;

        form.finish()?;
        Ok(Self {
            title: title.unwrap_or_default(),
            description,
            project_id: project_id.unwrap_or_default(),
            column_id,
            tag_id,
            milestone_id,
            effort_id,
            assigned_to_id,
        })
    }
}

#[derive(Debug, Default)]
pub struct IssueChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub project_id: Option<i64>,
    pub column_id: Option<i64>,
    pub tag_id: Option<Option<i64>>,
    pub milestone_id: Option<Option<i64>>,
    pub effort_id: Option<Option<i64>>,
    pub assigned_to_id: Option<Option<i64>>,
}

impl IssueChanges {
    pub async fn validate(input: &FormInput, pool: &SqlitePool) -> Result<Self, ApiError> {
        let mut form = Form::new(input);
        let changes = Self {
            title: form.patch_required_string("title", Some(SHORT_TEXT)),
            description: form.patch_string("description", None),
            project_id: form.patch_required_integer("project_id"),
            column_id: form.patch_required_integer("column_id"),
            tag_id: form.patch_integer("tag_id"),
            milestone_id: form.patch_integer("milestone_id"),
            effort_id: form.patch_integer("effort_id"),
            assigned_to_id: form.patch_integer("assigned_to_id"),
        };

        form.check_reference::<Project>(pool, "project_id", changes.project_id).await?;
        form.check_reference::<BoardColumn>(pool, "column_id", changes.column_id).await?;
        check_optional_refs(
            &mut form,
            pool,
            changes.tag_id.flatten(),
            changes.milestone_id.flatten(),
            changes.effort_id.flatten(),
            changes.assigned_to_id.flatten(),
        )
        .await?;

        form.finish()?;
        Ok(changes)
    }

    pub fn apply(self, issue: &mut Issue) {
        if let Some(title) = self.title {
            issue.title = title;
        }
        if let Some(description) = self.description {
            issue.description = description;
        }
        if let Some(project_id) = self.project_id {
            issue.project_id = project_id;
        }
        if let Some(column_id) = self.column_id {
            issue.column_id = column_id;
        }
        if let Some(tag_id) = self.tag_id {
            issue.tag_id = tag_id;
        }
        if let Some(milestone_id) = self.milestone_id {
            issue.milestone_id = milestone_id;
        }
        if let Some(effort_id) = self.effort_id {
            issue.effort_id = effort_id;
        }
        if let Some(assigned_to_id) = self.assigned_to_id {
            issue.assigned_to_id = assigned_to_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{NewColumn, NewContact, NewProject};
    use crate::testing::memory_database;
    use serde_json::json;

    #[tokio::test]
    async fn defaults_to_the_first_lane() {
        let db = memory_database().await;
        let pool = db.pool();
        NewColumn { name: "Backlog".into(), description: None }.insert(pool).await.unwrap();
        let owner = NewContact {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            text: "admiral".into(),
            icon_url: None,
            is_selected: false,
        }
        .insert(pool)
        .await
        .unwrap();
        let project = NewProject { user_id: owner.id, name: "Apollo".into(), description: None }
            .insert(pool)
            .await
            .unwrap();

        let input = FormInput::from_value(json!({"title": "Fix it", "project_id": project.id})).unwrap();
        let issue = NewIssue::validate(&input, pool).await.unwrap();
        assert_eq!(issue.column_id, DEFAULT_COLUMN_ID);
        assert_eq!(issue.tag_id, None);
    }

    #[tokio::test]
    async fn flags_every_unknown_reference() {
        let db = memory_database().await;
        let input = FormInput::from_value(json!({
            "title": "Fix it",
            "project_id": 5,
            "tag_id": 6,
            "effort_id": ""
        }))
        .unwrap();
        match NewIssue::validate(&input, db.pool()).await {
            Err(ApiError::UnprocessableEntity(errors)) => {
                assert!(errors.get("project_id").is_some());
                assert!(errors.get("column_id").is_some());
                assert!(errors.get("tag_id").is_some());
                assert!(errors.get("effort_id").is_none());
            }
            other => panic!("expected 422, got {other:?}"),
        }
    }

    #[test]
    fn cleared_optional_reference_is_applied() {
        let mut issue = Issue {
            id: 1,
            title: "Fix it".into(),
            description: None,
            project_id: 1,
            column_id: 1,
            tag_id: Some(3),
            milestone_id: Some(4),
            effort_id: None,
            assigned_to_id: None,
            created_at: chrono::Utc::now(),
        };
        IssueChanges {
            tag_id: Some(None),
            ..Default::default()
        }
        .apply(&mut issue);
        assert_eq!(issue.tag_id, None);
        assert_eq!(issue.milestone_id, Some(4));
    }
}
