//! zKillboard statistics badge endpoint.
//!
//! ```text
//! GET /zkb-stats/{entityType}/{entityId}/{topic}?label=&color=&format=
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::domain::ports::{ShieldOverrides, ShieldRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::badge_headers;
use crate::inbound::http::schemas::{ErrorSchema, ShieldBodySchema};
use crate::inbound::http::state::HttpState;

/// Path segments of a badge request.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(names("entityType", "entityId", "topic"), parameter_in = Path)]
pub struct ShieldPath(
    /// One of `character`, `corporation`, `alliance`, `faction`, `shipType`,
    /// `shipGroup`, `solarSystem`, `region`.
    String,
    /// EVE Online entity identifier.
    u64,
    /// Statistic to render, e.g. `memberCount` or `shipsEff`.
    String,
);

/// Optional presentation overrides.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShieldQuery {
    /// Replacement badge label.
    pub label: Option<String>,
    /// Replacement badge color.
    pub color: Option<String>,
    /// Replacement format: `none`, `isk`, `number` or `percent`.
    pub format: Option<String>,
}

impl From<ShieldQuery> for ShieldOverrides {
    fn from(query: ShieldQuery) -> Self {
        Self {
            label: query.label,
            color: query.color,
            format: query.format,
        }
    }
}

/// Serve a shields.io endpoint badge for one zKillboard statistic.
#[utoipa::path(
    get,
    path = "/zkb-stats/{entityType}/{entityId}/{topic}",
    description = "Fetch zKillboard statistics for an entity and render one topic as a shields.io endpoint badge. Example request: GET /zkb-stats/alliance/99000001/memberCount",
    params(ShieldPath, ShieldQuery),
    responses(
        (
            status = 200,
            description = "Endpoint badge",
            headers(
                ("Cache-Control" = String, description = "Cache control header"),
                ("Access-Control-Allow-Origin" = String, description = "Always `*`")
            ),
            body = ShieldBodySchema
        ),
        (status = 400, description = "Invalid entity id or format override", body = ErrorSchema),
        (status = 404, description = "Unknown entity type, topic or statistics key", body = ErrorSchema),
        (status = 503, description = "zKillboard unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["shields"],
    operation_id = "getZkbStatsShield",
    security([])
)]
#[get("/zkb-stats/{entity_type}/{entity_id}/{topic}")]
pub async fn get_zkb_stats_shield(
    state: web::Data<HttpState>,
    path: web::Path<ShieldPath>,
    query: web::Query<ShieldQuery>,
) -> ApiResult<HttpResponse> {
    let ShieldPath(entity_type, entity_id, topic) = path.into_inner();
    let request = ShieldRequest {
        entity_type,
        entity_id,
        topic,
        overrides: query.into_inner().into(),
    };
    let shield = state.shields.stats_shield(&request).await?;
    info!(
        entity_type = %request.entity_type,
        entity_id = request.entity_id,
        topic = %request.topic,
        "served badge"
    );

    let mut response = HttpResponse::Ok();
    for header in badge_headers() {
        response.insert_header(header);
    }
    Ok(response.json(shield.body()))
}
