pub mod column;
pub mod contact;
pub mod effort;
pub mod issue;
pub mod milestone;
pub mod post;
pub mod project;
pub mod tag;
pub mod todo;
pub mod user;

pub use column::{BoardColumn, NewColumn};
pub use contact::{Contact, NewContact};
pub use effort::{Effort, NewEffort};
pub use issue::{Issue, NewIssue, DEFAULT_COLUMN_ID};
pub use milestone::{Milestone, NewMilestone, DEFAULT_MILESTONE_STATUS};
pub use post::{NewPost, Post, PostWithAuthor};
pub use project::{NewProject, Project};
pub use tag::{NewTag, Tag, DEFAULT_TAG_COLOR};
pub use todo::{NewTodo, Todo};
pub use user::{NewUser, User};
