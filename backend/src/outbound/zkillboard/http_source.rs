//! Reqwest-backed zKillboard statistics source.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and decoding the body into a [`StatsDocument`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::domain::ports::{KillboardStatsSource, KillboardStatsSourceError, StatsRequest};
use crate::domain::{StatsDocument, cache_max_age};

/// User-agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("eve-shields/", env!("CARGO_PKG_VERSION"));

/// Outbound identity sent with every zKillboard request.
#[derive(Debug, Clone)]
pub struct ZkillboardHttpIdentity {
    /// HTTP user-agent; zKillboard asks callers to identify themselves.
    pub user_agent: String,
}

impl Default for ZkillboardHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Statistics source performing `GET {base}/{modifier}/{id}/` requests.
pub struct ZkillboardHttpSource {
    client: Client,
    base_url: Url,
    user_agent: String,
    cache_control: String,
}

impl ZkillboardHttpSource {
    /// Build an adapter with the default identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(base_url, timeout, ZkillboardHttpIdentity::default())
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// A missing trailing slash on `base_url` is added so entity paths are
    /// appended rather than replacing the last segment.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        mut base_url: Url,
        timeout: Duration,
        identity: ZkillboardHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            user_agent: identity.user_agent,
            cache_control: cache_max_age(),
        })
    }

    fn stats_url(&self, request: &StatsRequest) -> Result<Url, KillboardStatsSourceError> {
        let relative = format!(
            "{}/{}/",
            request.entity_type.upstream_field(),
            request.entity_id
        );
        self.base_url.join(&relative).map_err(|error| {
            KillboardStatsSourceError::transport(format!("invalid stats URL: {error}"))
        })
    }
}

#[async_trait]
impl KillboardStatsSource for ZkillboardHttpSource {
    async fn fetch_stats(
        &self,
        request: &StatsRequest,
    ) -> Result<StatsDocument, KillboardStatsSourceError> {
        let url = self.stats_url(request)?;
        debug!(%url, "fetching killboard stats");
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, self.cache_control.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_stats(body.as_ref())
    }
}

fn parse_stats(body: &[u8]) -> Result<StatsDocument, KillboardStatsSourceError> {
    let decoded: serde_json::Value = serde_json::from_slice(body).map_err(|error| {
        KillboardStatsSourceError::decode(format!("invalid stats JSON payload: {error}"))
    })?;
    StatsDocument::try_from(decoded).map_err(|other| {
        KillboardStatsSourceError::decode(format!(
            "expected a JSON object, got: {}",
            body_preview(other.to_string().as_bytes())
        ))
    })
}

fn map_transport_error(error: reqwest::Error) -> KillboardStatsSourceError {
    if error.is_timeout() {
        KillboardStatsSourceError::timeout(error.to_string())
    } else {
        KillboardStatsSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> KillboardStatsSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => KillboardStatsSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            KillboardStatsSourceError::timeout(message)
        }
        _ => KillboardStatsSourceError::status(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
