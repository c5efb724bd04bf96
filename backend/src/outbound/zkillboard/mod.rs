//! zKillboard statistics API adapter.

mod http_source;

pub use http_source::{DEFAULT_USER_AGENT, ZkillboardHttpIdentity, ZkillboardHttpSource};
