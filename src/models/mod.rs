pub mod category;
pub mod task;
pub mod user;

use validator::ValidationError;

pub use category::{Category, CategoryInput, CategorySummary};
pub use task::{Task, TaskInput, TaskSummary, TaskUpdate};
pub use user::{User, UserInput};

/// Titles are stored trimmed, so their length is checked after trimming too.
pub(crate) fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.trim().chars().count();
    if (3..=50).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}
