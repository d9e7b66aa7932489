//! Argon2 password hashing.

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use folio_core::ports::{AuthError, PasswordService};

/// Argon2id password service with the crate's default parameters.
#[derive(Default)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    /// A wrong password is `Ok(false)`; a corrupt stored hash is an error.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let hash = service.hash("correct horse battery").unwrap();

        assert!(service.verify("correct horse battery", &hash).unwrap());
        assert!(!service.verify("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = Argon2PasswordService::new();
        assert_ne!(service.hash("same").unwrap(), service.hash("same").unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        let service = Argon2PasswordService::new();
        let result = service.verify("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
