//! Domain primitives and the badge use-case.
//!
//! Purpose: turn a killboard statistics document into a shields.io endpoint
//! badge without any knowledge of HTTP or reqwest. Adapters talk to this layer
//! through the traits in [`ports`].
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload.
//! - EntityType: public entity names and their upstream modifiers.
//! - StatsDocument: nested statistics with key-path lookup.
//! - Topic / resolve: the fixed topic rule table.
//! - ShieldFormat / format_value: value rendering.
//! - Shield / ShieldBody: validated badge and its wire shape.
//! - ZkbShieldService: orchestration behind `ports::StatsShieldQuery`.

pub mod entity_type;
pub mod error;
pub mod ports;
pub mod shield;
pub mod stats;
pub mod topics;
pub mod trace_id;
pub mod value_format;
pub mod zkb_shields;

pub use self::entity_type::{EntityType, UnknownEntityType};
pub use self::error::{Error, ErrorCode};
pub use self::shield::{
    CACHE_SECONDS, SCHEMA_VERSION, Shield, ShieldBody, ShieldDraft, ShieldValidationError,
    cache_max_age,
};
pub use self::stats::{StatsDocument, StatsFieldError};
pub use self::topics::{
    ColorRule, ResolveError, ResolvedTopic, Topic, TopicRule, UnknownTopic, ValueRule, resolve,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::value_format::{InvalidFormat, ShieldFormat, ShieldValue, format_value, yes_no};
pub use self::zkb_shields::ZkbShieldService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use eve_shields::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u8> {
///     Err(Error::not_found("invalid key: memberCount"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
