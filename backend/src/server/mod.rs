//! Server construction and middleware wiring.

mod settings;

pub use settings::{ResolvedSettings, ShieldsSettings};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use eve_shields::Trace;
#[cfg(debug_assertions)]
use eve_shields::doc::ApiDoc;
use eve_shields::domain::ZkbShieldService;
use eve_shields::domain::ports::KillboardStatsSource;
use eve_shields::inbound::http::health::{HealthState, live, ready};
use eve_shields::inbound::http::shields::get_zkb_stats_shield;
use eve_shields::inbound::http::state::HttpState;
use eve_shields::outbound::zkillboard::{ZkillboardHttpIdentity, ZkillboardHttpSource};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(get_zkb_stats_shield)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Build the reqwest-backed statistics source from settings.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub fn build_stats_source(
    settings: &ResolvedSettings,
) -> std::io::Result<Arc<dyn KillboardStatsSource>> {
    let source = ZkillboardHttpSource::with_identity(
        settings.zkb_base_url.clone(),
        settings.request_timeout,
        ZkillboardHttpIdentity {
            user_agent: settings.user_agent.clone(),
        },
    )
    .map_err(|error| std::io::Error::other(format!("failed to build HTTP client: {error}")))?;
    Ok(Arc::new(source))
}

/// Construct the HTTP server around `source`.
///
/// Marks `health_state` ready once the listener is bound. The returned
/// [`Server`] must be awaited to drive it.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    source: Arc<dyn KillboardStatsSource>,
    settings: &ResolvedSettings,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::new(Arc::new(ZkbShieldService::new(source))));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(settings.bind_addr)?
    .run();

    info!(bind_addr = %settings.bind_addr, upstream = %settings.zkb_base_url, "server listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use eve_shields::domain::StatsDocument;
    use eve_shields::domain::ports::FixtureKillboardStatsSource;
    use rstest::{fixture, rstest};
    use url::Url;

    use super::*;

    #[fixture]
    fn local_settings() -> ResolvedSettings {
        ResolvedSettings {
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            zkb_base_url: Url::parse("http://127.0.0.1:1/api/stats/").expect("url"),
            request_timeout: Duration::from_secs(1),
            user_agent: "eve-shields-test".to_owned(),
        }
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready(local_settings: ResolvedSettings) {
        let health_state = web::Data::new(HealthState::new());
        assert!(!health_state.is_ready(), "state should start unready");

        let _server = create_server(
            health_state.clone(),
            Arc::new(FixtureKillboardStatsSource::new(StatsDocument::default())),
            &local_settings,
        )
        .expect("server should build");

        assert!(health_state.is_ready(), "server creation should mark readiness");
    }

    #[rstest]
    fn stats_source_builds_from_settings(local_settings: ResolvedSettings) {
        assert!(build_stats_source(&local_settings).is_ok());
    }
}
