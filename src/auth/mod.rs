pub mod extractors;
pub mod middleware;
pub mod ownership;
pub mod password;
pub mod token;

use serde::Deserialize;
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use ownership::{authorize_owner, Owned, ResourceKind};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Header carrying the auth token, both on requests and on the registration response.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Message returned when a protected route is called without a token.
pub const ACCESS_DENIED: &str = "Access denied. No token provided.";

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// The account's login. An email address is accepted as well, so the upper
    /// bound is the email one.
    #[validate(length(min = 3, max = 255))]
    pub login: String,
    #[validate(length(min = 5, max = 255))]
    pub password: String,
}
