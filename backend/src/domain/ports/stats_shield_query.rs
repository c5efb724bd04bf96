//! Driving port for building killboard statistics badges.
//!
//! The HTTP handler depends on this trait only, so it can be exercised with a
//! mock without any upstream I/O.

use async_trait::async_trait;

use crate::domain::{Error, Shield};

/// Caller-supplied presentation overrides.
///
/// When set, each field replaces what the topic rule would have chosen. The
/// message itself always comes from the statistics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShieldOverrides {
    /// Replacement label.
    pub label: Option<String>,
    /// Replacement color.
    pub color: Option<String>,
    /// Replacement format name (`none`, `isk`, `number`, `percent`).
    pub format: Option<String>,
}

/// One badge request, as it arrives from the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShieldRequest {
    /// Public entity type name, e.g. `alliance`.
    pub entity_type: String,
    /// Numeric entity identifier; must be positive.
    pub entity_id: u64,
    /// Topic name, e.g. `memberCount`.
    pub topic: String,
    /// Presentation overrides.
    pub overrides: ShieldOverrides,
}

/// Use-case port producing a badge for one entity statistic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsShieldQuery: Send + Sync {
    /// Build the badge described by `request`.
    async fn stats_shield(&self, request: &ShieldRequest) -> Result<Shield, Error>;
}
