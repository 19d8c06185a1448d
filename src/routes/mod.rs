pub mod auth;
pub mod categories;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::{error, web, HttpRequest};

use crate::auth::{AuthMiddleware, ResourceKind};
use crate::error::AppError;

/// Registers every `/api` route.
///
/// Expects `web::Data<dyn Store>` and `web::Data<TokenService>` on the app.
/// Everything except login and registration sits behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .service(web::scope("/auth").service(auth::login))
        .service(
            web::scope("/users")
                .service(users::register)
                .service(
                    web::resource("/me")
                        .wrap(AuthMiddleware)
                        .route(web::get().to(users::me)),
                ),
        )
        .service(
            web::scope("/categories")
                .wrap(AuthMiddleware)
                .app_data(path_config(ResourceKind::Category))
                .service(categories::get_categories)
                .service(categories::create_category)
                .service(categories::get_category)
                .service(categories::update_category)
                .service(categories::delete_category),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthMiddleware)
                .app_data(path_config(ResourceKind::Task))
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_tasks_by_category)
                .service(tasks::get_task)
                .service(tasks::update_task)
                .service(tasks::delete_task),
        );
}

/// Unreadable or incomplete JSON bodies are validation failures.
fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(err.to_string()).into()
}

/// An identifier that is not a UUID cannot name any stored resource.
fn path_config(kind: ResourceKind) -> web::PathConfig {
    web::PathConfig::default().error_handler(move |_, _| kind.not_found().into())
}
