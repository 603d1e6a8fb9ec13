//! Authentication service.
//!
//! Email + password login against the mock user store. Passwords are kept
//! and compared in plaintext; this store is a stand-in, not a credential
//! vault.

mod error;

pub use error::AuthError;

use artconnect_core::{Email, UserId, UserRole};

use crate::db::Database;
use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::{NewUser, User};

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self {
            users: UserRepository::new(db),
        }
    }

    /// Login with email and password.
    ///
    /// Unknown emails, malformed emails and wrong passwords all produce the
    /// same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredentials` if either field is blank.
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_email(&email)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        if user.password != password {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Register a new account.
    ///
    /// Only the `artist` and `buyer` roles can be picked at signup.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::InvalidUserType` for any other role.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        user_type: &str,
    ) -> Result<User, AuthError> {
        if [email, password, name, user_type]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;

        let role = match user_type.parse::<UserRole>() {
            Ok(role @ (UserRole::Artist | UserRole::Buyer)) => role,
            _ => return Err(AuthError::InvalidUserType(user_type.to_string())),
        };

        let user = self
            .users
            .create(NewUser {
                email,
                password: password.to_string(),
                name: name.trim().to_string(),
                role,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no user has this ID.
    pub async fn get_user(&self, id: &UserId) -> Result<User, AuthError> {
        self.users.get_by_id(id).await.ok_or(AuthError::UserNotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_with_seeded_credentials() {
        let db = Database::seeded().unwrap();
        let auth = AuthService::new(&db);

        let user = auth.login("sofia@artist.com", "password123").await.unwrap();
        assert_eq!(user.id.as_str(), "1");
        assert_eq!(user.role, UserRole::Artist);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let db = Database::seeded().unwrap();
        let auth = AuthService::new(&db);

        for (email, password) in [
            ("x@x.com", "wrong"),
            ("sofia@artist.com", "wrong"),
            ("not-an-email", "password123"),
        ] {
            assert!(matches!(
                auth.login(email, password).await,
                Err(AuthError::InvalidCredentials)
            ));
        }

        assert!(matches!(
            auth.login("", "password123").await,
            Err(AuthError::MissingCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let db = Database::seeded().unwrap();
        let auth = AuthService::new(&db);

        assert!(matches!(
            auth.register("a@b.com", "pw", "", "buyer").await,
            Err(AuthError::MissingFields)
        ));
        assert!(matches!(
            auth.register("nope", "pw", "Jo", "buyer").await,
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(matches!(
            auth.register("a@b.com", "pw", "Jo", "admin").await,
            Err(AuthError::InvalidUserType(_))
        ));
        assert!(matches!(
            auth.register("maya@artist.com", "pw", "Jo", "artist").await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let db = Database::seeded().unwrap();
        let auth = AuthService::new(&db);

        let user = auth
            .register("jamie@buyer.com", "s3cret", "Jamie Lee", "buyer")
            .await
            .unwrap();
        assert_eq!(user.id.as_str(), "4");

        let logged_in = auth.login("jamie@buyer.com", "s3cret").await.unwrap();
        assert_eq!(logged_in.id, user.id);
        assert_eq!(auth.get_user(&user.id).await.unwrap().name, "Jamie Lee");
    }
}
