//! Service settings loaded via OrthoConfig.
//!
//! Every field is optional at the source level; [`ShieldsSettings::resolve`]
//! applies defaults and validates, so a bad value fails startup instead of the
//! first badge request.

use std::net::SocketAddr;
use std::time::Duration;

use eve_shields::outbound::zkillboard::DEFAULT_USER_AGENT;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_ZKB_BASE_URL: &str = "https://zkillboard.com/api/stats/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Raw settings, read from CLI flags, `EVE_SHIELDS_*` environment variables,
/// and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVE_SHIELDS")]
pub struct ShieldsSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Base URL of the zKillboard statistics API.
    pub zkb_base_url: Option<String>,
    /// Upstream request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// User-agent sent to zKillboard.
    pub user_agent: Option<String>,
}

/// Validated settings used to build the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    /// Listener address.
    pub bind_addr: SocketAddr,
    /// zKillboard statistics base URL.
    pub zkb_base_url: Url,
    /// Upstream request timeout.
    pub request_timeout: Duration,
    /// Outbound user-agent.
    pub user_agent: String,
}

/// Reasons settings are rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr {
        /// Rejected input.
        value: String,
        /// Parser error.
        message: String,
    },
    /// `zkb_base_url` is not an absolute http(s) URL.
    #[error("invalid zKillboard base URL {value:?}: {message}")]
    BaseUrl {
        /// Rejected input.
        value: String,
        /// Parser or scheme error.
        message: String,
    },
    /// `request_timeout_secs` is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

impl ShieldsSettings {
    /// Apply defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a supplied value cannot be used.
    pub fn resolve(&self) -> Result<ResolvedSettings, SettingsError> {
        let bind_value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = bind_value
            .parse::<SocketAddr>()
            .map_err(|error| SettingsError::BindAddr {
                value: bind_value.to_owned(),
                message: error.to_string(),
            })?;

        let url_value = self.zkb_base_url.as_deref().unwrap_or(DEFAULT_ZKB_BASE_URL);
        let zkb_base_url = Url::parse(url_value).map_err(|error| SettingsError::BaseUrl {
            value: url_value.to_owned(),
            message: error.to_string(),
        })?;
        if !matches!(zkb_base_url.scheme(), "http" | "https") {
            return Err(SettingsError::BaseUrl {
                value: url_value.to_owned(),
                message: format!("unsupported scheme {}", zkb_base_url.scheme()),
            });
        }

        let timeout_secs = self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }

        Ok(ResolvedSettings {
            bind_addr,
            zkb_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Settings loading and validation.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "EVE_SHIELDS_BIND_ADDR",
        "EVE_SHIELDS_ZKB_BASE_URL",
        "EVE_SHIELDS_REQUEST_TIMEOUT_SECS",
        "EVE_SHIELDS_USER_AGENT",
    ];

    fn load_from_empty_args() -> ShieldsSettings {
        ShieldsSettings::load_from_iter([OsString::from("eve-shields")])
            .expect("config should load")
    }

    fn settings(
        bind_addr: Option<&str>,
        zkb_base_url: Option<&str>,
        request_timeout_secs: Option<u64>,
    ) -> ShieldsSettings {
        ShieldsSettings {
            bind_addr: bind_addr.map(str::to_owned),
            zkb_base_url: zkb_base_url.map(str::to_owned),
            request_timeout_secs,
            user_agent: None,
        }
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let resolved = load_from_empty_args().resolve().expect("defaults are valid");
        assert_eq!(resolved.bind_addr, "0.0.0.0:8000".parse::<SocketAddr>().expect("addr"));
        assert_eq!(resolved.zkb_base_url.as_str(), DEFAULT_ZKB_BASE_URL);
        assert_eq!(resolved.request_timeout, Duration::from_secs(10));
        assert_eq!(resolved.user_agent, DEFAULT_USER_AGENT);
        assert!(resolved.user_agent.starts_with("eve-shields/"));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EVE_SHIELDS_BIND_ADDR", Some("127.0.0.1:9090".to_owned())),
            (
                "EVE_SHIELDS_ZKB_BASE_URL",
                Some("http://localhost:3000/stats/".to_owned()),
            ),
            ("EVE_SHIELDS_REQUEST_TIMEOUT_SECS", Some("3".to_owned())),
            ("EVE_SHIELDS_USER_AGENT", Some("corp-badges/2".to_owned())),
        ]);

        let resolved = load_from_empty_args().resolve().expect("overrides are valid");
        assert_eq!(resolved.bind_addr, "127.0.0.1:9090".parse::<SocketAddr>().expect("addr"));
        assert_eq!(resolved.zkb_base_url.as_str(), "http://localhost:3000/stats/");
        assert_eq!(resolved.request_timeout, Duration::from_secs(3));
        assert_eq!(resolved.user_agent, "corp-badges/2");
    }

    #[rstest]
    #[case(settings(Some("not an address"), None, None))]
    #[case(settings(None, Some("zkillboard.com/api"), None))]
    #[case(settings(None, Some("ftp://zkillboard.com/api/stats/"), None))]
    #[case(settings(None, None, Some(0)))]
    fn invalid_values_fail_resolution(#[case] raw: ShieldsSettings) {
        assert!(raw.resolve().is_err());
    }

    #[test]
    fn zero_timeout_names_the_problem() {
        let error = settings(None, None, Some(0))
            .resolve()
            .expect_err("zero timeout");
        assert_eq!(error, SettingsError::ZeroTimeout);
    }
}
