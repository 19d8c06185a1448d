use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::Store;
use crate::error::AppError;
use crate::models::{Category, Task, User};

const USER_COLUMNS: &str = "id, login, email, password";
const CATEGORY_COLUMNS: &str = "id, title, description, user_id, create_date";
const TASK_COLUMNS: &str = "id, title, user_id, category_id, is_finished, create_date";

/// Postgres-backed store.
///
/// Login and email uniqueness is enforced by unique indexes; a violation surfaces
/// as the duplicate-registration error through `From<sqlx::Error> for AppError`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        log::info!("Connected to database and applied migrations");
        Ok(Self::new(pool))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: User) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users ({cols}) VALUES ($1, $2, $3, $4) RETURNING {cols}",
            cols = USER_COLUMNS
        );
        let inserted = sqlx::query_as::<_, User>(&sql)
            .bind(user.id)
            .bind(&user.login)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_login(&self, login: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE login = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>, AppError> {
        let sql = format!(
            "SELECT {} FROM categories WHERE user_id = $1 ORDER BY create_date",
            CATEGORY_COLUMNS
        );
        let categories = sqlx::query_as::<_, Category>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let sql = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);
        let category = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn insert_category(&self, category: Category) -> Result<Category, AppError> {
        let sql = format!(
            "INSERT INTO categories ({cols}) VALUES ($1, $2, $3, $4, $5) RETURNING {cols}",
            cols = CATEGORY_COLUMNS
        );
        let inserted = sqlx::query_as::<_, Category>(&sql)
            .bind(category.id)
            .bind(&category.title)
            .bind(&category.description)
            .bind(category.user_id)
            .bind(category.create_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    async fn update_category(&self, category: Category) -> Result<Option<Category>, AppError> {
        let sql = format!(
            "UPDATE categories SET title = $2, description = $3 WHERE id = $1 RETURNING {}",
            CATEGORY_COLUMNS
        );
        let updated = sqlx::query_as::<_, Category>(&sql)
            .bind(category.id)
            .bind(&category.title)
            .bind(&category.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let sql = format!(
            "DELETE FROM categories WHERE id = $1 RETURNING {}",
            CATEGORY_COLUMNS
        );
        let deleted = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }

    async fn list_tasks(
        &self,
        user_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Task>, AppError> {
        let sql = format!(
            "SELECT {} FROM tasks \
             WHERE user_id = $1 AND ($2::uuid IS NULL OR category_id = $2) \
             ORDER BY create_date",
            TASK_COLUMNS
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(user_id)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn find_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn insert_task(&self, task: Task) -> Result<Task, AppError> {
        let sql = format!(
            "INSERT INTO tasks ({cols}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {cols}",
            cols = TASK_COLUMNS
        );
        let inserted = sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(task.user_id)
            .bind(task.category_id)
            .bind(task.is_finished)
            .bind(task.create_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(inserted)
    }

    async fn update_task(&self, task: Task) -> Result<Option<Task>, AppError> {
        let sql = format!(
            "UPDATE tasks SET title = $2, is_finished = $3 WHERE id = $1 RETURNING {}",
            TASK_COLUMNS
        );
        let updated = sqlx::query_as::<_, Task>(&sql)
            .bind(task.id)
            .bind(&task.title)
            .bind(task.is_finished)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete_task(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let sql = format!("DELETE FROM tasks WHERE id = $1 RETURNING {}", TASK_COLUMNS);
        let deleted = sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }
}
