//! Persistence behind the HTTP handlers.
//!
//! Handlers talk to a `dyn Store`, registered as `web::Data<dyn Store>`. Two
//! backends exist: [`PgStore`] for Postgres and [`MemoryStore`] for tests and
//! database-less local runs. Lookups by id never filter by owner; ownership is
//! decided by the caller through `auth::authorize_owner`.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Category, Task, User};

#[async_trait]
pub trait Store: Send + Sync {
    /// Persists a new user. Fails with `AppError::BadRequest` if the login or
    /// email is already taken.
    async fn insert_user(&self, user: User) -> Result<User, AppError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// The user's categories, oldest first.
    async fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>, AppError>;
    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError>;
    async fn insert_category(&self, category: Category) -> Result<Category, AppError>;
    /// Replaces a stored category, returning `None` if it no longer exists.
    async fn update_category(&self, category: Category) -> Result<Option<Category>, AppError>;
    /// Removes a category, returning it if it existed.
    async fn delete_category(&self, id: Uuid) -> Result<Option<Category>, AppError>;

    /// The user's tasks, oldest first, optionally restricted to one category.
    async fn list_tasks(
        &self,
        user_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Task>, AppError>;
    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;
    async fn insert_task(&self, task: Task) -> Result<Task, AppError>;
    async fn update_task(&self, task: Task) -> Result<Option<Task>, AppError>;
    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, AppError>;
}
