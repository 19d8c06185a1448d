use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::Store;
use crate::error::AppError;
use crate::models::user::ALREADY_REGISTERED;
use crate::models::{Category, Task, User};

/// In-memory store for tests and local runs.
///
/// Data is not persisted and will be lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    categories: RwLock<HashMap<Uuid, Category>>,
    tasks: RwLock<HashMap<Uuid, Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.login == user.login || existing.email == user.email)
        {
            return Err(AppError::BadRequest(ALREADY_REGISTERED.into()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.login == login).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>, AppError> {
        let categories = self.categories.read().await;
        let mut owned: Vec<Category> = categories
            .values()
            .filter(|category| category.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|category| category.create_date);
        Ok(owned)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        Ok(self.categories.read().await.get(&id).cloned())
    }

    async fn insert_category(&self, category: Category) -> Result<Category, AppError> {
        self.categories
            .write()
            .await
            .insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, category: Category) -> Result<Option<Category>, AppError> {
        let mut categories = self.categories.write().await;
        Ok(categories.get_mut(&category.id).map(|stored| {
            *stored = category;
            stored.clone()
        }))
    }

    async fn delete_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        Ok(self.categories.write().await.remove(&id))
    }

    async fn list_tasks(
        &self,
        user_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        let mut owned: Vec<Task> = tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .filter(|task| category_id.map_or(true, |id| task.category_id == id))
            .cloned()
            .collect();
        owned.sort_by_key(|task| task.create_date);
        Ok(owned)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        self.tasks.write().await.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, task: Task) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(&task.id).map(|stored| {
            *stored = task;
            stored.clone()
        }))
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        Ok(self.tasks.write().await.remove(&id))
    }
}
