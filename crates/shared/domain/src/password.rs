//! Password hashing and verification.
//!
//! Passwords are stored as argon2id PHC strings: the algorithm, its cost
//! parameters and a random per-record salt travel with the digest.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Hash a plaintext password with a fresh random salt.
///
/// # Errors
/// Returns `DomainError::Hashing` if argon2 rejects the input.
pub fn hash(plain_text: &str) -> DomainResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2()
        .hash_password(plain_text.as_bytes(), &salt)
        .map_err(|e| DomainError::hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check a plaintext candidate against a stored hash.
///
/// A malformed stored hash is reported exactly like a wrong password so
/// callers cannot tell the two apart.
pub fn verify_password(hash: &str, plain_text: &str) -> DomainResult<()> {
    let parsed = PasswordHash::new(hash).map_err(|_| DomainError::InvalidCredentials)?;
    argon2()
        .verify_password(plain_text.as_bytes(), &parsed)
        .map_err(|_| DomainError::InvalidCredentials)
}

#[inline]
fn argon2() -> Argon2<'static> {
    Argon2::default()
}

/// Hashed password value object.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash the plain text into a new password.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Ok(Self {
            hash: hash(plain_text)?,
        })
    }

    /// Wrap an existing hash (from the database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str) -> DomainResult<()> {
        verify_password(&self.hash, plain_text)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash("SecurePassword123!").unwrap();

        assert!(verify_password(&hashed, "SecurePassword123!").is_ok());
        assert!(matches!(
            verify_password(&hashed, "WrongPassword123"),
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hashed = hash("password").unwrap();
        assert_ne!(hashed, "password");
        assert!(hashed.starts_with("$argon2id$"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let plain = "SamePassword123";
        let pass1 = Password::new(plain).unwrap();
        let pass2 = Password::new(plain).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
        assert!(pass1.verify(plain).is_ok());
        assert!(pass2.verify(plain).is_ok());
    }

    #[test]
    fn test_corrupt_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("not-a-phc-string", "password"),
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_from_hash_round_trip() {
        let password = Password::new("TestPassword123").unwrap();
        let restored = Password::from_hash(password.clone().into_string());

        assert_eq!(restored, password);
        assert!(restored.verify("TestPassword123").is_ok());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("hunter22").unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }
}
