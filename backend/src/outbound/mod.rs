//! Outbound adapters implementing domain ports for external services.
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no badge logic.
//!
//! - **zkillboard**: reqwest-backed `KillboardStatsSource`.

pub mod zkillboard;
