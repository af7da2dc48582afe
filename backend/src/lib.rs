//! Voting backend library.
//!
//! Voters register with their identity documents, sign in with a one-time
//! passcode and cast one ballot per election. The crate follows a hexagonal
//! layout: [`domain`] holds the rules and ports, [`inbound`] adapts HTTP
//! requests onto the services, and [`outbound`] implements the ports against
//! PostgreSQL, Redis or process memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
