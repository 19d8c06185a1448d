use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Answer to a registration whose login or email is already taken.
pub const ALREADY_REGISTERED: &str = "User already registered!";

/// A registered account.
///
/// Serializes to `{_id, login, email}`; the password hash never leaves the server.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub login: String,
    pub email: String,
    /// bcrypt hash of the user's password.
    #[serde(skip_serializing)]
    pub password: String,
}

/// Registration payload.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 3, max = 50))]
    pub login: String,
    #[validate(length(min = 8, max = 255), email)]
    pub email: String,
    #[validate(length(min = 5, max = 255))]
    pub password: String, // plaintext; only its hash is stored
}

impl User {
    pub fn new(input: UserInput, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            login: input.login,
            email: input.email,
            password: password_hash,
        }
    }
}
