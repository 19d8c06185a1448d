use crate::{
    auth::{hash_password, AuthenticatedUser, TokenService, AUTH_TOKEN_HEADER},
    error::AppError,
    models::{user::ALREADY_REGISTERED, User, UserInput},
    store::Store,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates the account and answers with `{_id, login, email}`. The new user's
/// token is sent in the `x-auth-token` header, so registering also logs in.
///
/// ## Responses:
/// - `200 OK`: the created user.
/// - `400 Bad Request`: invalid input, or the login or email is already registered.
#[post("")]
pub async fn register(
    store: web::Data<dyn Store>,
    tokens: web::Data<TokenService>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;
    let mut input = user_data.into_inner();

    // The unique indexes catch a concurrent registration that slips past this check.
    if store.find_user_by_email(&input.email).await?.is_some()
        || store.find_user_by_login(&input.login).await?.is_some()
    {
        return Err(AppError::BadRequest(ALREADY_REGISTERED.into()));
    }

    let plaintext = std::mem::take(&mut input.password);
    let password_hash = web::block(move || hash_password(&plaintext)).await??;
    let user = store.insert_user(User::new(input, password_hash)).await?;
    log::info!("Registered user {} ({})", user.login, user.id);

    let token = tokens.issue(user.id)?;
    Ok(HttpResponse::Ok()
        .insert_header((AUTH_TOKEN_HEADER, token))
        .json(user))
}

/// Current user
///
/// Returns the profile of the user the token was issued to.
pub async fn me(
    store: web::Data<dyn Store>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profile = store
        .find_user_by_id(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found!".into()))?;
    Ok(HttpResponse::Ok().json(profile))
}
