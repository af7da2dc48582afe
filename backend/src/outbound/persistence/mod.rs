//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the voter, election and vote repository ports
//! backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Constraint-backed invariants**: uniqueness of voter IDs, Aadhar
//!   numbers and one vote per election is enforced by named constraints and
//!   surfaced as typed port errors.
//!
//! # Example
//!
//! ```ignore
//! use voting::outbound::persistence::{DbPool, DieselVoterRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/voting")).await?;
//! let voters = DieselVoterRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_election_repository;
mod diesel_vote_repository;
mod diesel_voter_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_election_repository::DieselElectionRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use diesel_voter_repository::DieselVoterRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
