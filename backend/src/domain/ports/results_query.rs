//! Driving port for election results.

use async_trait::async_trait;

use crate::domain::{Error, TallyOutcome, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResultsQuery: Send + Sync {
    /// Tally of the active election, as seen by the voter owning `user`.
    async fn results(&self, user: &UserId) -> Result<TallyOutcome, Error>;
}
