//! Driven port for fetching entity statistics from a killboard.
//!
//! The domain owns the request shape and the error taxonomy; the reqwest
//! adapter in `outbound::zkillboard` only deals with transport.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{EntityType, StatsDocument};

/// Which entity's statistics to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsRequest {
    /// Entity kind; selects the upstream modifier.
    pub entity_type: EntityType,
    /// Numeric EVE Online identifier.
    pub entity_id: u64,
}

define_port_error! {
    /// Errors surfaced while calling the killboard.
    pub enum KillboardStatsSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "killboard transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "killboard timeout: {message}",
        /// The killboard rate-limited the request.
        RateLimited { message: String } =>
            "killboard rate limited request: {message}",
        /// The killboard answered with a non-success status.
        Status { message: String } =>
            "killboard returned an error: {message}",
        /// The response body was not a JSON object.
        Decode { message: String } =>
            "killboard response decode failed: {message}",
    }
}

/// Port for reading aggregate kill/loss statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KillboardStatsSource: Send + Sync {
    /// Fetch the statistics document for one entity.
    async fn fetch_stats(
        &self,
        request: &StatsRequest,
    ) -> Result<StatsDocument, KillboardStatsSourceError>;
}

/// Source that answers every request with the same document.
///
/// Used by integration tests and local runs without network access.
///
/// # Examples
///
/// ```rust,ignore
/// use eve_shields::domain::ports::{FixtureKillboardStatsSource, KillboardStatsSource, StatsRequest};
/// use eve_shields::domain::{EntityType, StatsDocument};
///
/// let source = FixtureKillboardStatsSource::new(StatsDocument::default());
/// let stats = source
///     .fetch_stats(&StatsRequest { entity_type: EntityType::Alliance, entity_id: 1 })
///     .await?;
/// assert_eq!(stats, StatsDocument::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FixtureKillboardStatsSource {
    stats: StatsDocument,
}

impl FixtureKillboardStatsSource {
    /// Serve `stats` for every request.
    #[must_use]
    pub const fn new(stats: StatsDocument) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl KillboardStatsSource for FixtureKillboardStatsSource {
    async fn fetch_stats(
        &self,
        _request: &StatsRequest,
    ) -> Result<StatsDocument, KillboardStatsSourceError> {
        Ok(self.stats.clone())
    }
}
