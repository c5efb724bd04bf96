//! zKillboard statistics badge use-case.
//!
//! Ties the pure pieces together for one request: validate the entity type and
//! topic, fetch the statistics through [`KillboardStatsSource`], resolve the
//! topic, apply overrides, and validate the resulting [`Shield`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use super::ports::{
    KillboardStatsSource, KillboardStatsSourceError, ShieldRequest, StatsRequest,
    StatsShieldQuery,
};
use super::{
    EntityType, Error, Shield, ShieldDraft, ShieldValidationError, StatsFieldError, Topic,
};

/// [`StatsShieldQuery`] backed by a killboard statistics source.
#[derive(Clone)]
pub struct ZkbShieldService {
    source: Arc<dyn KillboardStatsSource>,
}

impl ZkbShieldService {
    /// Build the service on top of `source`.
    #[must_use]
    pub fn new(source: Arc<dyn KillboardStatsSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl StatsShieldQuery for ZkbShieldService {
    async fn stats_shield(&self, request: &ShieldRequest) -> Result<Shield, Error> {
        let entity_type: EntityType = request
            .entity_type
            .parse()
            .map_err(|err| Error::not_found(format!("{err}")))?;
        let topic: Topic = request
            .topic
            .parse()
            .map_err(|err| Error::not_found(format!("{err}")))?;
        if request.entity_id == 0 {
            return Err(Error::invalid_request("entity id must be a positive integer"));
        }

        let stats_request = StatsRequest {
            entity_type,
            entity_id: request.entity_id,
        };
        debug!(
            entity_type = %entity_type,
            entity_id = request.entity_id,
            topic = %topic,
            "requesting stats from killboard"
        );
        let stats = self
            .source
            .fetch_stats(&stats_request)
            .await
            .map_err(map_source_error)?;
        debug!(entity_id = request.entity_id, "stats received from killboard");

        let resolved = topic.resolve(&stats).map_err(map_field_error)?;
        let overrides = request.overrides.clone();
        let format_overridden = overrides.format.is_some();
        let draft = ShieldDraft {
            label: Some(overrides.label.unwrap_or_else(|| resolved.label.to_owned())),
            message: Some(resolved.value),
            color: Some(overrides.color.unwrap_or_else(|| resolved.color.to_owned())),
            format: Some(
                overrides
                    .format
                    .unwrap_or_else(|| resolved.format.as_str().to_owned()),
            ),
        };
        Shield::try_from(draft).map_err(|error| map_validation_error(error, format_overridden))
    }
}

fn map_source_error(error: KillboardStatsSourceError) -> Error {
    warn!(%error, "killboard stats unavailable");
    Error::service_unavailable("killboard statistics are unavailable")
        .with_details(json!({ "reason": error.to_string() }))
}

fn map_field_error(error: StatsFieldError) -> Error {
    match error {
        StatsFieldError::Missing { ref key } => {
            Error::not_found(error.to_string()).with_details(json!({ "key": key }))
        }
        StatsFieldError::NotNumeric { ref key } => {
            warn!(%key, "killboard returned a non-numeric statistic");
            Error::service_unavailable(error.to_string()).with_details(json!({ "key": key }))
        }
    }
}

fn map_validation_error(error: ShieldValidationError, format_overridden: bool) -> Error {
    match error {
        ShieldValidationError::InvalidFormat(invalid) => Error::invalid_request(invalid.to_string()),
        ShieldValidationError::NonNumericMessage { .. } if format_overridden => {
            Error::invalid_request(error.to_string())
        }
        ShieldValidationError::NonNumericMessage { .. } => {
            warn!(%error, "killboard returned text for a numeric topic");
            Error::service_unavailable(error.to_string())
        }
        other => Error::internal(format!("shield validation failed: {other}")),
    }
}

#[cfg(test)]
mod tests {
    //! Orchestration coverage using a mocked killboard.
    use super::*;
    use crate::domain::ports::{MockKillboardStatsSource, ShieldOverrides};
    use crate::domain::{ErrorCode, StatsDocument};
    use mockall::predicate::eq;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    fn request(entity_type: &str, topic: &str) -> ShieldRequest {
        ShieldRequest {
            entity_type: entity_type.to_owned(),
            entity_id: 99_000_001,
            topic: topic.to_owned(),
            overrides: ShieldOverrides::default(),
        }
    }

    fn source_returning(document: Value) -> MockKillboardStatsSource {
        let stats = StatsDocument::try_from(document).expect("object document");
        let mut source = MockKillboardStatsSource::new();
        source
            .expect_fetch_stats()
            .returning(move |_| Ok(stats.clone()));
        source
    }

    fn service(source: MockKillboardStatsSource) -> ZkbShieldService {
        ZkbShieldService::new(Arc::new(source))
    }

    #[fixture]
    fn unreachable_source() -> MockKillboardStatsSource {
        let mut source = MockKillboardStatsSource::new();
        source.expect_fetch_stats().never();
        source
    }

    #[rstest]
    #[tokio::test]
    async fn builds_member_count_badge_for_alliance() {
        let mut source = MockKillboardStatsSource::new();
        let stats = StatsDocument::try_from(json!({ "info": { "memberCount": 18_143 } }))
            .expect("object document");
        source
            .expect_fetch_stats()
            .with(eq(StatsRequest {
                entity_type: EntityType::Alliance,
                entity_id: 99_000_001,
            }))
            .times(1)
            .returning(move |_| Ok(stats.clone()));

        let shield = service(source)
            .stats_shield(&request("alliance", "memberCount"))
            .await
            .expect("badge builds");

        assert_eq!(
            serde_json::to_value(shield.body()).expect("body serialises"),
            json!({
                "schemaVersion": 1,
                "label": "Members",
                "message": "18.1k",
                "color": "informational",
                "cacheSeconds": 1800,
            })
        );
    }

    #[rstest]
    #[tokio::test]
    async fn builds_ships_efficiency_badge() {
        let source = source_returning(json!({
            "shipsDestroyed": 1_096_773,
            "shipsLost": 1_142_054,
        }));
        let shield = service(source)
            .stats_shield(&request("alliance", "shipsEff"))
            .await
            .expect("badge builds");
        let body = shield.body();
        assert_eq!(body.message, "49%");
        assert_eq!(body.color.as_deref(), Some("critical"));
        assert_eq!(body.label, "Ships Efficiency");
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_unknown_entity_type_before_fetching(
        unreachable_source: MockKillboardStatsSource,
    ) {
        let error = service(unreachable_source)
            .stats_shield(&request("xyz", "shipsDestroyed"))
            .await
            .expect_err("entity type is unknown");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "invalid entity type: xyz");
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_unknown_topic_before_fetching(unreachable_source: MockKillboardStatsSource) {
        let error = service(unreachable_source)
            .stats_shield(&request("alliance", "bogusTopic"))
            .await
            .expect_err("topic is unknown");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "invalid topic: bogusTopic");
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_zero_entity_id(unreachable_source: MockKillboardStatsSource) {
        let mut zero = request("alliance", "memberCount");
        zero.entity_id = 0;
        let error = service(unreachable_source)
            .stats_shield(&zero)
            .await
            .expect_err("zero is not a valid id");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_field_is_not_found_naming_the_key() {
        let source = source_returning(json!({ "info": { "corpCount": 3 } }));
        let error = service(source)
            .stats_shield(&request("alliance", "memberCount"))
            .await
            .expect_err("memberCount is absent");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "invalid key: memberCount");
        assert_eq!(error.details(), Some(&json!({ "key": "memberCount" })));
    }

    #[rstest]
    #[case(KillboardStatsSourceError::timeout("10s elapsed"))]
    #[case(KillboardStatsSourceError::status("status 502"))]
    #[case(KillboardStatsSourceError::decode("expected object"))]
    #[tokio::test]
    async fn upstream_failures_are_service_unavailable(#[case] failure: KillboardStatsSourceError) {
        let mut source = MockKillboardStatsSource::new();
        source
            .expect_fetch_stats()
            .returning(move |_| Err(failure.clone()));
        let error = service(source)
            .stats_shield(&request("corporation", "shipsLost"))
            .await
            .expect_err("upstream failed");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn overrides_replace_label_color_and_format() {
        let source = source_returning(json!({ "shipsLost": 1_142_054 }));
        let mut overridden = request("corporation", "shipsLost");
        overridden.overrides = ShieldOverrides {
            label: Some("Losses".to_owned()),
            color: Some("orange".to_owned()),
            format: Some("none".to_owned()),
        };

        let shield = service(source)
            .stats_shield(&overridden)
            .await
            .expect("badge builds");
        let body = shield.body();
        assert_eq!(body.label, "Losses");
        assert_eq!(body.color.as_deref(), Some("orange"));
        assert_eq!(body.message, "1142054");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_format_override_is_invalid_request() {
        let source = source_returning(json!({ "shipsLost": 5 }));
        let mut overridden = request("corporation", "shipsLost");
        overridden.overrides.format = Some("xyz".to_owned());

        let error = service(source)
            .stats_shield(&overridden)
            .await
            .expect_err("format is unknown");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "invalid format: xyz");
    }

    #[rstest]
    #[case("percent")]
    #[case("number")]
    #[tokio::test]
    async fn numeric_format_override_on_danger_ratio_is_invalid_request(#[case] format: &str) {
        let source = source_returning(json!({ "dangerRatio": 45 }));
        let mut overridden = request("alliance", "dangerRatio");
        overridden.overrides.format = Some(format.to_owned());

        let error = service(source)
            .stats_shield(&overridden)
            .await
            .expect_err("danger message is text");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert!(error.message().contains("Snuggly 55%"));
        assert!(!error.message().contains("%%"));
    }

    #[rstest]
    #[tokio::test]
    async fn plain_format_override_keeps_danger_message() {
        let source = source_returning(json!({ "dangerRatio": 45 }));
        let mut overridden = request("alliance", "dangerRatio");
        overridden.overrides.format = Some("none".to_owned());

        let shield = service(source)
            .stats_shield(&overridden)
            .await
            .expect("badge builds");
        assert_eq!(shield.body().message, "Snuggly 55%");
    }

    #[rstest]
    #[tokio::test]
    async fn text_for_numeric_topic_is_service_unavailable() {
        let source = source_returning(json!({ "shipsLost": "many" }));
        let error = service(source)
            .stats_shield(&request("corporation", "shipsLost"))
            .await
            .expect_err("shipsLost must be numeric");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn empty_text_statistic_is_internal_error() {
        let source = source_returning(json!({ "shipsLost": "" }));
        let error = service(source)
            .stats_shield(&request("corporation", "shipsLost"))
            .await
            .expect_err("empty message");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
