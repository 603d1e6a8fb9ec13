//! User repository.

use artconnect_core::{Email, UserId};

use super::{Database, RepositoryError};
use crate::models::{NewUser, User, UserProfile};

/// Profile image assigned to new accounts.
pub const DEFAULT_PROFILE_IMAGE: &str = "/placeholder-profile.jpg";

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get a user by their email address (case-insensitive).
    pub async fn get_by_email(&self, email: &Email) -> Option<User> {
        self.db
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email.matches(email))
            .cloned()
    }

    /// Get a user by their ID.
    pub async fn get_by_id(&self, id: &UserId) -> Option<User> {
        self.db
            .users
            .read()
            .await
            .iter()
            .find(|user| &user.id == id)
            .cloned()
    }

    /// Number of stored users.
    pub async fn count(&self) -> usize {
        self.db.users.read().await.len()
    }

    /// Create a new user.
    ///
    /// The email check and the insert happen under one write lock. IDs are
    /// sequential: the new user gets `count + 1`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    pub async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut users = self.db.users.write().await;

        if users.iter().any(|user| user.email.matches(&new_user.email)) {
            return Err(RepositoryError::Conflict(format!(
                "email {} already registered",
                new_user.email
            )));
        }

        let user = User {
            id: UserId::new((users.len() + 1).to_string()),
            email: new_user.email,
            password: new_user.password,
            name: new_user.name,
            role: new_user.role,
            profile: UserProfile {
                profile_image: Some(DEFAULT_PROFILE_IMAGE.to_string()),
                ..UserProfile::default()
            },
        };
        users.push(user.clone());

        Ok(user)
    }
}
