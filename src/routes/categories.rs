use crate::{
    auth::{authorize_owner, AuthenticatedUser, ResourceKind},
    error::AppError,
    models::{Category, CategoryInput, CategorySummary},
    store::Store,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

const KIND: ResourceKind = ResourceKind::Category;

/// Lists the authenticated user's categories, oldest first.
///
/// Only `_id`, `title` and `description` are returned for each entry.
#[get("")]
pub async fn get_categories(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let categories: Vec<CategorySummary> = store
        .list_categories(user.id)
        .await?
        .into_iter()
        .map(CategorySummary::from)
        .collect();
    Ok(HttpResponse::Ok().json(categories))
}

/// Creates a category owned by the authenticated user.
#[post("")]
pub async fn create_category(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    category_data: web::Json<CategoryInput>,
) -> Result<impl Responder, AppError> {
    category_data.validate()?;
    let category = Category::new(category_data.into_inner(), user.id);
    let created = store.insert_category(category).await?;
    Ok(HttpResponse::Ok().json(created))
}

/// Retrieves one of the authenticated user's categories.
///
/// ## Responses:
/// - `200 OK`: the category.
/// - `404 Not Found`: no such category, or it belongs to another user.
#[get("/{id}")]
pub async fn get_category(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    category_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = category_id.into_inner();
    let category = authorize_owner(&user, KIND, || store.find_category(id)).await?;
    Ok(HttpResponse::Ok().json(category))
}

/// Replaces the title and description of a category.
///
/// Input is validated before the category is looked up, so malformed bodies are
/// 400s even for identifiers that do not exist.
#[put("/{id}")]
pub async fn update_category(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    category_id: web::Path<Uuid>,
    category_data: web::Json<CategoryInput>,
) -> Result<impl Responder, AppError> {
    category_data.validate()?;
    let id = category_id.into_inner();
    let category = authorize_owner(&user, KIND, || store.find_category(id)).await?;

    let updated = store
        .update_category(category.apply(category_data.into_inner()))
        .await?
        .ok_or_else(|| KIND.not_found())?;
    Ok(HttpResponse::Ok().json(updated))
}

/// Deletes a category and returns it.
///
/// Tasks filed under the category are left in place.
#[delete("/{id}")]
pub async fn delete_category(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
    category_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let id = category_id.into_inner();
    authorize_owner(&user, KIND, || store.find_category(id)).await?;

    // Someone else may have deleted it between the check and now.
    let deleted = store
        .delete_category(id)
        .await?
        .ok_or_else(|| KIND.not_found())?;
    Ok(HttpResponse::Ok().json(deleted))
}
