//! shields.io endpoint badge value object.
//!
//! A [`Shield`] is validated once, when it is built from a [`ShieldDraft`],
//! and is immutable afterwards. Serialising it produces the JSON document the
//! shields.io endpoint badge expects.

use serde::{Deserialize, Serialize};

use super::value_format::{InvalidFormat, ShieldFormat, ShieldValue, format_value};

/// shields.io endpoint schema version.
pub const SCHEMA_VERSION: u8 = 1;

/// Advertised cache lifetime of a badge, in seconds.
pub const CACHE_SECONDS: u32 = 1800;

/// `Cache-Control` directive for [`CACHE_SECONDS`].
///
/// # Examples
/// ```
/// assert_eq!(eve_shields::domain::cache_max_age(), "max-age=1800");
/// ```
#[must_use]
pub fn cache_max_age() -> String {
    format!("max-age={CACHE_SECONDS}")
}

/// Reasons a [`ShieldDraft`] is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShieldValidationError {
    /// No label was supplied.
    #[error("shield label must not be null")]
    MissingLabel,
    /// No message was supplied.
    #[error("shield message must not be null")]
    MissingMessage,
    /// The message renders to an empty string.
    #[error("shield message must not be empty")]
    EmptyMessage,
    /// The format name is not recognised.
    #[error(transparent)]
    InvalidFormat(#[from] InvalidFormat),
    /// A numeric format was paired with a message that is not a number.
    #[error("format {format} needs a numeric message, got: {message}")]
    NonNumericMessage {
        /// Requested format.
        format: ShieldFormat,
        /// Plain text of the rejected message.
        message: String,
    },
}

/// Unvalidated badge input.
///
/// # Examples
///
/// ```
/// use eve_shields::domain::{Shield, ShieldDraft, ShieldValue};
///
/// let shield = Shield::try_from(ShieldDraft {
///     label: Some("Members".to_owned()),
///     message: Some(ShieldValue::from(18_143_u64)),
///     color: Some("informational".to_owned()),
///     format: Some("number".to_owned()),
/// })?;
/// assert_eq!(shield.body().message, "18.1k");
/// # Ok::<(), eve_shields::domain::ShieldValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShieldDraft {
    /// Left-hand badge text.
    pub label: Option<String>,
    /// Raw right-hand badge value.
    pub message: Option<ShieldValue>,
    /// shields.io color name or hex code.
    pub color: Option<String>,
    /// Format name (`none`, `isk`, `number`, `percent`); absent means `none`.
    pub format: Option<String>,
}

/// Validated badge.
#[derive(Debug, Clone, PartialEq)]
pub struct Shield {
    label: String,
    message: ShieldValue,
    color: Option<String>,
    format: ShieldFormat,
}

impl Shield {
    /// Left-hand badge text.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Raw, unformatted message value.
    #[must_use]
    pub const fn message(&self) -> &ShieldValue {
        &self.message
    }

    /// Badge color, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Format applied to the message on serialisation.
    #[must_use]
    pub const fn format(&self) -> ShieldFormat {
        self.format
    }

    /// Render the endpoint-badge document.
    #[must_use]
    pub fn body(&self) -> ShieldBody {
        ShieldBody {
            schema_version: SCHEMA_VERSION,
            label: self.label.clone(),
            message: format_value(&self.message, self.format),
            cache_seconds: CACHE_SECONDS,
            color: self.color.clone(),
        }
    }
}

impl TryFrom<ShieldDraft> for Shield {
    type Error = ShieldValidationError;

    fn try_from(draft: ShieldDraft) -> Result<Self, Self::Error> {
        let ShieldDraft {
            label,
            message,
            color,
            format,
        } = draft;

        let label = label.ok_or(ShieldValidationError::MissingLabel)?;
        let message = message.ok_or(ShieldValidationError::MissingMessage)?;
        if message.plain_text().is_empty() {
            return Err(ShieldValidationError::EmptyMessage);
        }
        let format = format
            .as_deref()
            .map(str::parse::<ShieldFormat>)
            .transpose()?
            .unwrap_or_default();
        if format.is_numeric() && message.as_f64().is_none() {
            return Err(ShieldValidationError::NonNumericMessage {
                format,
                message: message.plain_text(),
            });
        }

        Ok(Self {
            label,
            message,
            color,
            format,
        })
    }
}

/// JSON document served to shields.io.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldBody {
    /// Always [`SCHEMA_VERSION`].
    pub schema_version: u8,
    /// Left-hand badge text.
    pub label: String,
    /// Formatted right-hand badge text.
    pub message: String,
    /// Always [`CACHE_SECONDS`].
    pub cache_seconds: u32,
    /// Badge color; omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&Shield> for ShieldBody {
    fn from(shield: &Shield) -> Self {
        shield.body()
    }
}
