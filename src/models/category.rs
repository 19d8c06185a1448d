use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::auth::ownership::Owned;

/// A user-defined group of tasks.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Owner of the category.
    pub user_id: Uuid,
    pub create_date: DateTime<Utc>,
}

/// The fields returned when listing categories.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// Payload for creating or replacing a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(custom = "crate::models::validate_title")]
    pub title: String,
    /// Required, but may be empty.
    #[validate(length(max = 255))]
    pub description: String,
}

impl Category {
    pub fn new(input: CategoryInput, user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            user_id,
            create_date: Utc::now(),
        }
    }

    /// Replaces the editable fields, keeping identity, owner and creation date.
    pub fn apply(mut self, input: CategoryInput) -> Self {
        self.title = input.title.trim().to_string();
        self.description = input.description.trim().to_string();
        self
    }
}

impl From<Category> for CategorySummary {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            title: category.title,
            description: category.description,
        }
    }
}

impl Owned for Category {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}
