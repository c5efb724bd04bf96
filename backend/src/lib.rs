//! shields.io endpoint badges for EVE Online zKillboard statistics.
//!
//! The crate is split hexagonally: [`domain`] holds the badge rules and ports,
//! [`inbound`] the actix-web adapter, and [`outbound`] the reqwest zKillboard
//! client.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
