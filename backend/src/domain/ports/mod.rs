//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod killboard_stats_source;
mod stats_shield_query;

#[cfg(test)]
pub use killboard_stats_source::MockKillboardStatsSource;
pub use killboard_stats_source::{
    FixtureKillboardStatsSource, KillboardStatsSource, KillboardStatsSourceError, StatsRequest,
};
#[cfg(test)]
pub use stats_shield_query::MockStatsShieldQuery;
pub use stats_shield_query::{ShieldOverrides, ShieldRequest, StatsShieldQuery};
