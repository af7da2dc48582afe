//! Port for one-way password hashing.
use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    /// Errors raised by hashing adapters.
    pub enum PasswordHasherError {
        /// The hashing primitive failed.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// Port turning plain passwords into stored hashes.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plain` with a fresh salt.
    fn hash(&self, plain: &str) -> Result<PasswordHash, PasswordHasherError>;
}
