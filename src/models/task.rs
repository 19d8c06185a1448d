use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::auth::ownership::Owned;

/// Represents a task entity as stored and returned by the API.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// Identifier of the user who owns/created the task.
    pub user_id: Uuid,
    /// Category the task was filed under. Fixed at creation.
    pub category_id: Uuid,
    pub is_finished: bool,
    /// Timestamp of when the task was created.
    pub create_date: DateTime<Utc>,
}

/// The fields returned when listing tasks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub is_finished: bool,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    /// Must be between 3 and 50 characters once trimmed.
    #[validate(custom = "crate::models::validate_title")]
    pub title: String,
    pub category_id: Uuid,
}

/// Input structure for updating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[validate(custom = "crate::models::validate_title")]
    pub title: String,
    /// Left unchanged when omitted.
    pub is_finished: Option<bool>,
}

impl Task {
    /// Creates an unfinished task for `user_id` in the input's category.
    pub fn new(input: TaskInput, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            user_id,
            category_id: input.category_id,
            is_finished: false,
            create_date: Utc::now(),
        }
    }

    pub fn apply(mut self, update: TaskUpdate) -> Self {
        self.title = update.title.trim().to_string();
        if let Some(is_finished) = update.is_finished {
            self.is_finished = is_finished;
        }
        self
    }
}

impl From<Task> for TaskSummary {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            category_id: task.category_id,
            title: task.title,
            is_finished: task.is_finished,
        }
    }
}

impl Owned for Task {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}
