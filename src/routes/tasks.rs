use crate::{
    auth::{authorize_owner, AuthenticatedUser, ResourceKind},
    error::AppError,
    models::{Task, TaskInput, TaskSummary, TaskUpdate},
    store::Store,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

const KIND: ResourceKind = ResourceKind::Task;

fn summarize(tasks: Vec<Task>) -> Vec<TaskSummary> {
    tasks.into_iter().map(TaskSummary::from).collect()
}

async fn find_in_category(
    store: &dyn Store,
    category_id: Uuid,
    task_id: Uuid,
) -> Result<Option<Task>, AppError> {
    match store.find_task(task_id).await? {
        Some(task) if task.category_id != category_id => Err(AppError::NotFound(
            "The task does not belong to this category!".into(),
        )),
        found => Ok(found),
    }
}

/// Retrieves all tasks of the authenticated user, oldest first.
///
/// ## Responses:
/// - `200 OK`: a JSON array of `{_id, categoryId, title, isFinished}` entries.
/// - `401 Unauthorized`: no token was sent.
#[get("")]
pub async fn get_tasks(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store.list_tasks(user.id, None).await?;
    Ok(HttpResponse::Ok().json(summarize(tasks)))
}

/// Retrieves the authenticated user's tasks filed under one category.
///
/// A category the user does not own, or an id that is not a UUID, simply
/// yields an empty list.
#[get("/{category_id}")]
pub async fn get_tasks_by_category(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    category_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let tasks = match Uuid::parse_str(&category_id) {
        Ok(category_id) => store.list_tasks(user.id, Some(category_id)).await?,
        Err(_) => Vec::new(),
    };
    Ok(HttpResponse::Ok().json(summarize(tasks)))
}

/// Creates a new task for the authenticated user.
///
/// The referenced category must exist and belong to the user; otherwise the
/// category's not-found or ownership 404 is returned and nothing is stored.
///
/// ## Request Body:
/// - `title`: 3 to 50 characters.
/// - `categoryId`: the category the task is filed under.
#[post("")]
pub async fn create_task(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let category_id = task_data.category_id;
    authorize_owner(&user, ResourceKind::Category, || {
        store.find_category(category_id)
    })
    .await?;

    let task = store
        .insert_task(Task::new(task_data.into_inner(), user.id))
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Retrieves a single task through its category.
///
/// Checks run in order: the task exists, it is filed under `category_id`, it
/// belongs to the authenticated user. Each failure is a 404.
#[get("/{category_id}/{task_id}")]
pub async fn get_task(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<impl Responder, AppError> {
    let (category_id, task_id) = path.into_inner();

    let task = authorize_owner(&user, KIND, || {
        find_in_category(store.get_ref(), category_id, task_id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Updates the title and, when given, the finished flag of a task.
///
/// The category of a task cannot be changed.
#[put("/{id}")]
pub async fn update_task(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let id = task_id.into_inner();
    let task = authorize_owner(&user, KIND, || store.find_task(id)).await?;

    let updated = store
        .update_task(task.apply(task_data.into_inner()))
        .await?
        .ok_or_else(|| KIND.not_found())?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes a task and returns it. Deleting it again is a 404.
#[delete("/{id}")]
pub async fn delete_task(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = task_id.into_inner();
    authorize_owner(&user, KIND, || store.find_task(id)).await?;

    let deleted = store
        .delete_task(id)
        .await?
        .ok_or_else(|| KIND.not_found())?;
    Ok(HttpResponse::Ok().json(deleted))
}
