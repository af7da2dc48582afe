//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories used when no database is set
//! - **cache**: passcode stores (Redis or in-process)
//! - **notify**: passcode delivery
//! - **hashing**: Argon2 password hashing
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod cache;
pub mod hashing;
pub mod memory;
pub mod notify;
pub mod persistence;
