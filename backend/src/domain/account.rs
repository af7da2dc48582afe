//! Account identity backing a voter record.
//!
//! Every voter is one-to-one with an account. The account id is what the
//! session stores once OTP verification succeeds.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserIdValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    Empty,
    /// The identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    Invalid,
}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UserIdValidationError::Invalid);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserIdValidationError::Invalid)
    }

    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an already encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Account record created alongside a voter at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Fresh account identifier.
    pub id: UserId,
    /// Login name; registration uses the voter ID.
    pub username: String,
    /// Hashed password.
    pub password_hash: PasswordHash,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdValidationError::Empty)]
    #[case("not-a-uuid", UserIdValidationError::Invalid)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserIdValidationError::Invalid)]
    fn rejects_invalid_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
        assert_eq!(UserId::new(raw), Err(expected));
    }

    #[rstest]
    fn round_trips_through_string() {
        let id = UserId::random();
        let raw: String = id.into();
        assert_eq!(UserId::new(raw), Ok(id));
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
