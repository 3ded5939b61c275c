//! Temporary password generation and hashing

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString},
};
use rand::{Rng, distributions::Alphanumeric};
use thiserror::Error;

/// Length of the credential handed out at account creation
pub const TEMPORARY_PASSWORD_LENGTH: usize = 12;

/// Errors from hashing or parsing a stored hash
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    Hash(password_hash::Error),

    #[error("Failed to parse password hash: {0}")]
    InvalidHash(password_hash::Error),
}

/// Generate a random alphanumeric temporary password
pub fn generate_temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMPORARY_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}

/// Hash a password with a fresh random salt, returning the PHC string
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(PasswordError::Hash)?
        .to_string();

    Ok(hash)
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(password_hash).map_err(PasswordError::InvalidHash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_password_shape() {
        let password = generate_temporary_password();
        assert_eq!(password.chars().count(), TEMPORARY_PASSWORD_LENGTH);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_temporary_passwords_differ() {
        assert_ne!(generate_temporary_password(), generate_temporary_password());
    }

    #[test]
    fn test_hash_verifies_only_the_original() {
        let password = generate_temporary_password();
        let hash = hash_password(&password).unwrap();

        assert_ne!(hash, password);
        assert!(!hash.contains(&password));
        assert!(verify_password(&password, &hash).unwrap());
        assert!(!verify_password("something-else", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let first = hash_password("password123").unwrap();
        let second = hash_password("password123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "not-a-phc-string"),
            Err(PasswordError::InvalidHash(_))
        ));
    }
}
