#![allow(dead_code)]

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::{json, Value};
use tasklist::auth::{TokenService, AUTH_TOKEN_HEADER};
use tasklist::routes::{self, health};
use tasklist::store::{MemoryStore, Store};

pub const TEST_SECRET: &str = "integration_test_private_key";

// Helper struct to hold auth details
pub struct TestUser {
    pub id: String,
    pub token: String,
}

pub async fn init_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    test::init_service(
        App::new()
            .app_data(web::Data::from(store))
            .app_data(web::Data::new(TokenService::new(TEST_SECRET)))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .expose_headers([AUTH_TOKEN_HEADER])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config)),
    )
    .await
}

pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    login: &str,
    email: &str,
    password: &str,
) -> Result<TestUser, String> {
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "login": login,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let token = resp
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = test::read_body(resp).await;

    if !status.is_success() {
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    let user: Value = serde_json::from_slice(&body)
        .map_err(|e| format!("Failed to parse registration response: {}", e))?;

    Ok(TestUser {
        id: user["_id"]
            .as_str()
            .ok_or("Registration response has no _id")?
            .to_string(),
        token: token.ok_or("Registration response has no token header")?,
    })
}

/// Sends a JSON request and returns the status with the decoded body.
///
/// Bodies that are not JSON come back as a JSON string.
pub async fn send(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    req: test::TestRequest,
    token: Option<&str>,
) -> (actix_web::http::StatusCode, Value) {
    let req = match token {
        Some(token) => req.insert_header((AUTH_TOKEN_HEADER, token)),
        None => req,
    };
    let resp = test::call_service(app, req.to_request()).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let value = serde_json::from_slice(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));
    (status, value)
}
