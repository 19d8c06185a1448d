#![doc = "The `tasklist` library crate."]
#![doc = ""]
#![doc = "Domain models, authentication (password hashing, auth tokens, the ownership"]
#![doc = "policy), the store abstraction, routing configuration and error handling for"]
#![doc = "the task list API. The binary (`main.rs`) wires these into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
