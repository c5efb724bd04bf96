//! Badge message values and their display formats.
//!
//! A badge message starts as a raw value pulled out of the statistics
//! document and is only turned into text when the badge is serialised. The
//! format decides how: verbatim, abbreviated by magnitude (`1.6m`), or as a
//! whole percentage (`49%`).

use std::fmt;
use std::str::FromStr;

use serde_json::{Number, Value};

/// Magnitude tiers for humanised numbers, largest first.
const MAGNITUDE_TIERS: [(f64, &str); 4] = [
    (1_000_000_000_000.0, "t"),
    (1_000_000_000.0, "b"),
    (1_000_000.0, "m"),
    (1_000.0, "k"),
];

/// Render a boolean the way badges spell it.
///
/// # Examples
/// ```
/// use eve_shields::domain::yes_no;
///
/// assert_eq!(yes_no(true), "yes");
/// assert_eq!(yes_no(false), "no");
/// ```
#[must_use]
pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Raised when a format name is not one of the recognised modes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid format: {0}")]
pub struct InvalidFormat(pub String);

/// How a badge message is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShieldFormat {
    /// Natural text form; booleans become `yes`/`no`.
    #[default]
    Plain,
    /// Magnitude-abbreviated number with thousands separators.
    ///
    /// Parsed from both `isk` and `number`.
    Humanized,
    /// Whole-number percentage with a trailing `%`.
    Percent,
}

impl ShieldFormat {
    /// Whether the format needs a numeric message.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Humanized | Self::Percent)
    }

    /// Canonical name of the format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "none",
            Self::Humanized => "number",
            Self::Percent => "percent",
        }
    }
}

impl fmt::Display for ShieldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShieldFormat {
    type Err = InvalidFormat;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::Plain),
            "isk" | "number" => Ok(Self::Humanized),
            "percent" => Ok(Self::Percent),
            other => Err(InvalidFormat(other.to_owned())),
        }
    }
}

/// Raw, unformatted badge message.
#[derive(Debug, Clone, PartialEq)]
pub enum ShieldValue {
    /// Integer or floating-point number.
    Number(Number),
    /// Free text.
    Text(String),
    /// Boolean flag.
    Flag(bool),
}

impl ShieldValue {
    /// Build a message value from a JSON value.
    ///
    /// Returns `None` for JSON `null`. Arrays and objects are kept as their
    /// compact JSON text.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(Self::Flag(*flag)),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(text) => Some(Self::Text(text.clone())),
            other @ (Value::Array(_) | Value::Object(_)) => Some(Self::Text(other.to_string())),
        }
    }

    /// Build a numeric value from a float, falling back to `0` for NaN or
    /// infinities, which JSON cannot carry.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self::Number(Number::from_f64(value).unwrap_or_else(|| Number::from(0)))
    }

    /// Numeric magnitude, if the value is a number or numeric text.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Flag(_) => None,
        }
    }

    /// Natural text form: integers without decimals, floats as given,
    /// strings verbatim, booleans as `yes`/`no`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
            Self::Flag(flag) => yes_no(*flag).to_owned(),
        }
    }
}

impl From<i64> for ShieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for ShieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for ShieldValue {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<bool> for ShieldValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for ShieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ShieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Render `value` under `format`.
///
/// Values that cannot be read as a number fall back to their plain text under
/// the numeric formats. [`Shield`](super::Shield) rejects such pairings before
/// they reach this function.
///
/// # Examples
/// ```
/// use eve_shields::domain::{format_value, ShieldFormat, ShieldValue};
///
/// assert_eq!(format_value(&ShieldValue::from(1_570_000_u64), ShieldFormat::Humanized), "1.6m");
/// assert_eq!(format_value(&ShieldValue::from(555_u64), ShieldFormat::Humanized), "555");
/// assert_eq!(format_value(&ShieldValue::from(65.3), ShieldFormat::Percent), "65%");
/// assert_eq!(format_value(&ShieldValue::from(true), ShieldFormat::Plain), "yes");
/// ```
#[must_use]
pub fn format_value(value: &ShieldValue, format: ShieldFormat) -> String {
    match format {
        ShieldFormat::Plain => value.plain_text(),
        ShieldFormat::Humanized => humanize(value),
        ShieldFormat::Percent => match value.as_f64() {
            Some(magnitude) => format!("{magnitude:.0}%"),
            None => value.plain_text(),
        },
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "magnitude tiers divide the raw statistic"
)]
fn humanize(value: &ShieldValue) -> String {
    let Some(magnitude) = value.as_f64() else {
        return value.plain_text();
    };
    MAGNITUDE_TIERS
        .iter()
        .find(|(divisor, _)| magnitude > *divisor)
        .map_or_else(
            || group_thousands(&value.plain_text()),
            |(divisor, suffix)| {
                let scaled = format!("{:.1}", magnitude / divisor);
                format!("{}{suffix}", group_thousands(&scaled))
            },
        )
}

/// Insert `,` between groups of three digits in the integer part of a
/// decimal string. Text without a leading digit run is returned unchanged.
fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = text
        .strip_prefix('-')
        .map_or(("", text), |rest| ("-", rest));
    let split = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let (digits, tail) = unsigned.split_at(split);

    let mut grouped = String::with_capacity(text.len().saturating_mul(2));
    grouped.push_str(sign);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(tail);
    grouped
}
