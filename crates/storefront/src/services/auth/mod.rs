//! Username/password accounts.
//!
//! Passwords are hashed with Argon2id and stored as PHC strings in the
//! user store. Sign-in failures collapse to a single "invalid email or
//! password" so the form never confirms whether an address has an account.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::Utc;
use sura_core::Email;

use crate::models::UserRecord;
use crate::store::UserStore;

pub mod error;

pub use error::AuthError;

/// Minimum password length for new accounts.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Registration and sign-in over the user store.
pub struct AuthService<'a> {
    users: &'a UserStore,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(users: &'a UserStore) -> Self {
        Self { users }
    }

    /// Create an account and return its record.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidEmail`] for unparsable addresses
    /// - [`AuthError::WeakPassword`] for short passwords
    /// - [`AuthError::UserAlreadyExists`] on duplicate email
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<UserRecord, AuthError> {
        let email: Email = email.parse()?;
        validate_password(password)?;

        let display_name = display_name.trim();
        let display_name = if display_name.is_empty() {
            email.local_part().to_owned()
        } else {
            display_name.to_owned()
        };

        let user = UserRecord {
            email,
            password_hash: hash_password(password)?,
            display_name,
            newsletter: false,
            created_at: Utc::now(),
            orders: Vec::new(),
        };
        self.users.create(&user).await?;

        tracing::info!(email = %user.email, "account created");
        Ok(user)
    }

    /// Verify credentials and return the account record.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for unknown email or wrong
    /// password alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord, AuthError> {
        let email: Email = email.parse().map_err(|_| AuthError::InvalidCredentials)?;
        let user = self.users.get(&email).await?;

        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Reject passwords under [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

/// Hash a password with Argon2id using a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());
        let auth = AuthService::new(&store);

        let user = auth
            .register("Amina@Example.com", "a decent password", "Amina")
            .await
            .unwrap();
        assert_eq!(user.email.as_str(), "amina@example.com");

        // Login works with any casing of the address
        assert!(auth
            .login("AMINA@example.com", "a decent password")
            .await
            .is_ok());
        assert!(matches!(
            auth.login("amina@example.com", "wrong password").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());
        let auth = AuthService::new(&store);

        auth.register("amina@example.com", "a decent password", "Amina")
            .await
            .unwrap();
        assert!(matches!(
            auth.register("amina@example.com", "another password", "A")
                .await,
            Err(AuthError::UserAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_unknown_email_is_invalid_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());
        let auth = AuthService::new(&store);

        assert!(matches!(
            auth.login("nobody@example.com", "whatever!").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_defaults_display_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = UserStore::new(dir.path());
        let auth = AuthService::new(&store);

        let user = auth
            .register("amina@example.com", "a decent password", "  ")
            .await
            .unwrap();
        assert_eq!(user.display_name, "amina");
    }
}
