use crate::{
    auth::{verify_password, LoginRequest, TokenService},
    error::AppError,
    store::Store,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Log in
///
/// Checks the credentials and answers with the raw token as a plain-text body.
/// Both an unknown user and a wrong password are 404s.
#[post("")]
pub async fn login(
    store: web::Data<dyn Store>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;
    let LoginRequest { login, password } = login_data.into_inner();

    let user = match store.find_user_by_login(&login).await? {
        Some(user) => Some(user),
        None => store.find_user_by_email(&login).await?,
    };
    let user = user.ok_or_else(|| AppError::NotFound("User not found!".into()))?;

    let stored_hash = user.password.clone();
    let valid = web::block(move || verify_password(&password, &stored_hash)).await??;
    if !valid {
        log::info!("Failed login attempt for {}", user.login);
        return Err(AppError::NotFound("Invalid password!".into()));
    }

    let token = tokens.issue(user.id)?;
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(token))
}
