//! Driving port for the public landing page.

use async_trait::async_trait;

use crate::domain::{Election, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ElectionQuery: Send + Sync {
    /// Election open right now, if any.
    async fn current_election(&self) -> Result<Option<Election>, Error>;
}
