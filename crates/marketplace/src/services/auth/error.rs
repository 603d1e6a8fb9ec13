//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login called without an email or password.
    #[error("email and password are required")]
    MissingCredentials,

    /// Signup called with an empty field.
    #[error("all fields are required")]
    MissingFields,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] artconnect_core::EmailError),

    /// Signup `userType` is not a role users may pick.
    #[error("invalid user type: {0}")]
    InvalidUserType(String),

    /// Invalid credentials (wrong password or user not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
