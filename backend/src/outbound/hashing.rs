//! Argon2 password hashing.

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher as _, SaltString};
use rand::rngs::OsRng;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Hashes passwords with Argon2id and a random salt, producing PHC strings.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(encoded.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::PasswordVerifier;
    use rstest::rstest;

    #[rstest]
    fn hash_verifies_and_is_salted() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("correct horse").expect("hash");
        let second = hasher.hash("correct horse").expect("hash");

        assert!(first.as_ref().starts_with("$argon2id$"));
        assert_ne!(first.as_ref(), second.as_ref());

        let parsed = argon2::PasswordHash::new(first.as_ref()).expect("phc string");
        assert!(
            Argon2::default()
                .verify_password(b"correct horse", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong horse", &parsed)
                .is_err()
        );
    }
}
