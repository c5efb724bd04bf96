//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the badge and probe endpoints plus the schema wrappers
//! from [`crate::inbound::http::schemas`]. Swagger UI serves it in debug builds
//! and `cargo run --bin openapi-dump` exports it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ShieldBodySchema};

/// OpenAPI document for the HTTP API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EVE shields API",
        description = "shields.io endpoint badges for zKillboard entity statistics.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::shields::get_zkb_stats_shield,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ShieldBodySchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "shields", description = "Killboard statistics badges"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
