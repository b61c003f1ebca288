//! Response views. Each view is the allowlist of fields a client may see for
//! an entity; anything not named here never leaves the server.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::{
    BoardColumn, Contact, Effort, Issue, Milestone, PostWithAuthor, Project, Tag, Todo, User,
};

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i64,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub user: Option<UserView>,
    pub created_at: DateTime<Utc>,
}

impl From<&PostWithAuthor> for PostView {
    fn from(row: &PostWithAuthor) -> Self {
        let user = match (row.post.user_id, &row.author_email) {
            (Some(id), Some(email)) => Some(UserView {
                id,
                email: email.clone(),
            }),
            _ => None,
        };

        Self {
            id: row.post.id,
            title: row.post.title.clone(),
            body: row.post.body.clone(),
            user,
            created_at: row.post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoView {
    pub id: i64,
    pub text: String,
    pub is_complete: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Todo> for TodoView {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            text: todo.text.clone(),
            is_complete: todo.is_complete,
            status: todo.status.clone(),
            created_at: todo.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Contact> for ContactView {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            text: contact.text.clone(),
            created_at: contact.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectView {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            description: project.description.clone(),
            user_id: project.user_id,
            created_at: project.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueView {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub project_id: i64,
    pub column_id: i64,
    pub tag_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub effort_id: Option<i64>,
    pub assigned_to_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<&Issue> for IssueView {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id,
            title: issue.title.clone(),
            description: issue.description.clone(),
            project_id: issue.project_id,
            column_id: issue.column_id,
            tag_id: issue.tag_id,
            milestone_id: issue.milestone_id,
            effort_id: issue.effort_id,
            assigned_to_id: issue.assigned_to_id,
            created_at: issue.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

impl From<&Tag> for TagView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name.clone(),
            description: tag.description.clone(),
            color: tag.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MilestoneView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: String,
}

impl From<&Milestone> for MilestoneView {
    fn from(milestone: &Milestone) -> Self {
        Self {
            id: milestone.id,
            name: milestone.name.clone(),
            description: milestone.description.clone(),
            due_date: milestone.due_date,
            status: milestone.status.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EffortView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Effort> for EffortView {
    fn from(effort: &Effort) -> Self {
        Self {
            id: effort.id,
            name: effort.name.clone(),
            description: effort.description.clone(),
        }
    }
}

/// A lane with its issues expanded one level.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub issues: Vec<IssueView>,
}

impl ColumnView {
    pub fn new(column: &BoardColumn, issues: &[Issue]) -> Self {
        Self {
            id: column.id,
            name: column.name.clone(),
            description: column.description.clone(),
            created_at: column.created_at,
            issues: many(issues),
        }
    }
}

/// Project a slice of rows into views, preserving order.
pub fn many<'a, R: 'a, V>(rows: &'a [R]) -> Vec<V>
where
    V: From<&'a R>,
{
    rows.iter().map(V::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Post;
    use serde_json::json;

    fn keys(value: &serde_json::Value) -> Vec<String> {
        let mut keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    #[test]
    fn user_view_hides_password() {
        let user = User {
            id: 3,
            email: "ada@example.com".into(),
            password: "$argon2id$secret".into(),
        };
        let value = serde_json::to_value(UserView::from(&user)).unwrap();
        assert_eq!(value, json!({"id": 3, "email": "ada@example.com"}));
    }

    #[test]
    fn contact_view_is_an_allowlist() {
        let contact = Contact {
            id: 1,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            text: "admiral".into(),
            icon_url: Some("http://example.com/g.png".into()),
            is_selected: true,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(ContactView::from(&contact)).unwrap();
        assert_eq!(keys(&value), ["created_at", "first_name", "id", "last_name", "text"]);
    }

    #[test]
    fn todo_view_fields() {
        let todo = Todo {
            id: 1,
            text: "buy milk".into(),
            is_complete: false,
            status: "Active".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(TodoView::from(&todo)).unwrap();
        assert_eq!(keys(&value), ["created_at", "id", "is_complete", "status", "text"]);
        assert!(value.get("is_selected").is_none());
    }

    #[test]
    fn post_view_embeds_author() {
        let row = PostWithAuthor {
            post: Post {
                id: 9,
                title: "Hello".into(),
                body: "World".into(),
                user_id: Some(2),
                created_at: Utc::now(),
            },
            author_email: Some("ada@example.com".into()),
        };
        let value = serde_json::to_value(PostView::from(&row)).unwrap();
        assert_eq!(value["user"], json!({"id": 2, "email": "ada@example.com"}));

        let orphan = PostWithAuthor {
            author_email: None,
            ..row
        };
        let value = serde_json::to_value(PostView::from(&orphan)).unwrap();
        assert!(value["user"].is_null());
    }
}
