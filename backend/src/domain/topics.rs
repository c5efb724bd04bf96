//! Topic dispatch: which statistic a badge shows and how it looks.
//!
//! Each [`Topic`] owns one static [`TopicRule`] describing where its value
//! comes from in the statistics document, the badge label, how the color is
//! chosen, and which [`ShieldFormat`] renders the message. Resolution is a
//! table lookup followed by evaluating the rule; there is no per-topic code.

use std::fmt;
use std::str::FromStr;

use serde_json::Number;

use super::stats::{StatsDocument, StatsFieldError};
use super::value_format::{ShieldFormat, ShieldValue};

/// Raised when a topic name is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid topic: {0}")]
pub struct UnknownTopic(pub String);

/// Failure resolving a topic against a statistics document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The topic name is not in the table.
    #[error(transparent)]
    UnknownTopic(#[from] UnknownTopic),
    /// The document lacks a field the topic reads.
    #[error(transparent)]
    Field(#[from] StatsFieldError),
}

/// Where a topic's raw value comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRule {
    /// Read one field verbatim.
    Field(&'static [&'static str]),
    /// `destroyed / (destroyed + lost) * 100`, or `0` when both are zero.
    Efficiency {
        /// Field counting what the entity destroyed.
        destroyed: &'static str,
        /// Field counting what the entity lost.
        lost: &'static str,
    },
    /// Danger ratio rendered as `Dangerous {r}%` above `threshold`, otherwise
    /// `Snuggly {100 - r}%`.
    Danger {
        /// Field holding the ratio, 0 to 100.
        field: &'static str,
        /// Ratios strictly above this read as dangerous.
        threshold: f64,
    },
}

/// How a topic's badge color is chosen from its numeric metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorRule {
    /// Always the same color.
    Fixed(&'static str),
    /// `below` when the metric is strictly under `threshold`.
    Below {
        /// Exclusive upper bound for `below`.
        threshold: f64,
        /// Color under the threshold.
        below: &'static str,
        /// Color at or over the threshold.
        otherwise: &'static str,
    },
    /// `above` when the metric is strictly over `threshold`.
    Above {
        /// Exclusive lower bound for `above`.
        threshold: f64,
        /// Color over the threshold.
        above: &'static str,
        /// Color at or under the threshold.
        otherwise: &'static str,
    },
}

impl ColorRule {
    /// Pick a color for `metric`; threshold rules without a metric take their
    /// `otherwise` branch.
    #[must_use]
    pub fn pick(self, metric: Option<f64>) -> &'static str {
        match self {
            Self::Fixed(color) => color,
            Self::Below {
                threshold,
                below,
                otherwise,
            } => match metric {
                Some(value) if value < threshold => below,
                _ => otherwise,
            },
            Self::Above {
                threshold,
                above,
                otherwise,
            } => match metric {
                Some(value) if value > threshold => above,
                _ => otherwise,
            },
        }
    }
}

/// Static description of one topic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopicRule {
    /// Value extraction or derivation.
    pub value: ValueRule,
    /// Badge label.
    pub label: &'static str,
    /// Color selection.
    pub color: ColorRule,
    /// Message format.
    pub format: ShieldFormat,
}

const EFFICIENCY_COLORS: ColorRule = ColorRule::Below {
    threshold: 50.0,
    below: "critical",
    otherwise: "success",
};

const DANGER_COLORS: ColorRule = ColorRule::Above {
    threshold: 50.0,
    above: "red",
    otherwise: "green",
};

const ACTIVE_PVP_CHARS: TopicRule = TopicRule {
    value: ValueRule::Field(&["activepvp", "characters", "count"]),
    label: "Active PVP chars",
    color: ColorRule::Fixed("informational"),
    format: ShieldFormat::Humanized,
};

const CORP_COUNT: TopicRule = TopicRule {
    value: ValueRule::Field(&["info", "corpCount"]),
    label: "Corporations",
    color: ColorRule::Fixed("informational"),
    format: ShieldFormat::Humanized,
};

const DANGER_RATIO: TopicRule = TopicRule {
    value: ValueRule::Danger {
        field: "dangerRatio",
        threshold: 50.0,
    },
    label: "Danger",
    color: DANGER_COLORS,
    format: ShieldFormat::Plain,
};

const ISK_DESTROYED: TopicRule = TopicRule {
    value: ValueRule::Field(&["iskDestroyed"]),
    label: "ISK Destroyed",
    color: ColorRule::Fixed("success"),
    format: ShieldFormat::Humanized,
};

const ISK_LOST: TopicRule = TopicRule {
    value: ValueRule::Field(&["iskLost"]),
    label: "ISK Lost",
    color: ColorRule::Fixed("critical"),
    format: ShieldFormat::Humanized,
};

const ISK_EFF: TopicRule = TopicRule {
    value: ValueRule::Efficiency {
        destroyed: "iskDestroyed",
        lost: "iskLost",
    },
    label: "ISK Efficiency",
    color: EFFICIENCY_COLORS,
    format: ShieldFormat::Percent,
};

const MEMBER_COUNT: TopicRule = TopicRule {
    value: ValueRule::Field(&["info", "memberCount"]),
    label: "Members",
    color: ColorRule::Fixed("informational"),
    format: ShieldFormat::Humanized,
};

const SHIPS_DESTROYED: TopicRule = TopicRule {
    value: ValueRule::Field(&["shipsDestroyed"]),
    label: "Ships Destroyed",
    color: ColorRule::Fixed("success"),
    format: ShieldFormat::Humanized,
};

const SHIPS_LOST: TopicRule = TopicRule {
    value: ValueRule::Field(&["shipsLost"]),
    label: "Ships Lost",
    color: ColorRule::Fixed("critical"),
    format: ShieldFormat::Humanized,
};

const SHIPS_EFF: TopicRule = TopicRule {
    value: ValueRule::Efficiency {
        destroyed: "shipsDestroyed",
        lost: "shipsLost",
    },
    label: "Ships Efficiency",
    color: EFFICIENCY_COLORS,
    format: ShieldFormat::Percent,
};

/// Statistic shown on a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Characters with recent PvP activity.
    ActivePvpChars,
    /// Corporations in an alliance.
    CorpCount,
    /// Dangerous/Snuggly rating.
    DangerRatio,
    /// Total ISK value destroyed.
    IskDestroyed,
    /// Total ISK value lost.
    IskLost,
    /// ISK destroyed as a share of ISK destroyed plus lost.
    IskEff,
    /// Members of a corporation or alliance.
    MemberCount,
    /// Ships destroyed.
    ShipsDestroyed,
    /// Ships lost.
    ShipsLost,
    /// Ships destroyed as a share of ships destroyed plus lost.
    ShipsEff,
}

impl Topic {
    /// Every supported topic.
    pub const ALL: [Self; 10] = [
        Self::ActivePvpChars,
        Self::CorpCount,
        Self::DangerRatio,
        Self::IskDestroyed,
        Self::IskLost,
        Self::IskEff,
        Self::MemberCount,
        Self::ShipsDestroyed,
        Self::ShipsLost,
        Self::ShipsEff,
    ];

    /// Name used in the public badge URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ActivePvpChars => "activePvpChars",
            Self::CorpCount => "corpCount",
            Self::DangerRatio => "dangerRatio",
            Self::IskDestroyed => "iskDestroyed",
            Self::IskLost => "iskLost",
            Self::IskEff => "iskEff",
            Self::MemberCount => "memberCount",
            Self::ShipsDestroyed => "shipsDestroyed",
            Self::ShipsLost => "shipsLost",
            Self::ShipsEff => "shipsEff",
        }
    }

    /// The static rule for this topic.
    #[must_use]
    pub const fn rule(self) -> &'static TopicRule {
        match self {
            Self::ActivePvpChars => &ACTIVE_PVP_CHARS,
            Self::CorpCount => &CORP_COUNT,
            Self::DangerRatio => &DANGER_RATIO,
            Self::IskDestroyed => &ISK_DESTROYED,
            Self::IskLost => &ISK_LOST,
            Self::IskEff => &ISK_EFF,
            Self::MemberCount => &MEMBER_COUNT,
            Self::ShipsDestroyed => &SHIPS_DESTROYED,
            Self::ShipsLost => &SHIPS_LOST,
            Self::ShipsEff => &SHIPS_EFF,
        }
    }

    /// Evaluate this topic's rule against `stats`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsFieldError`] when a field the rule reads is absent, or
    /// is not numeric where arithmetic is required.
    pub fn resolve(self, stats: &StatsDocument) -> Result<ResolvedTopic, StatsFieldError> {
        let rule = self.rule();
        let (value, metric) = evaluate(rule.value, stats)?;
        Ok(ResolvedTopic {
            label: rule.label,
            value,
            color: rule.color.pick(metric),
            format: rule.format,
        })
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.as_str() == value)
            .ok_or_else(|| UnknownTopic(value.to_owned()))
    }
}

/// Label, raw value, color and format derived for one topic.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTopic {
    /// Badge label from the rule.
    pub label: &'static str,
    /// Raw message value.
    pub value: ShieldValue,
    /// Chosen badge color.
    pub color: &'static str,
    /// Message format from the rule.
    pub format: ShieldFormat,
}

/// Resolve `topic` by name against `stats`.
///
/// # Examples
/// ```
/// use eve_shields::domain::{resolve, ShieldFormat, StatsDocument};
/// use serde_json::json;
///
/// let stats = StatsDocument::try_from(json!({ "dangerRatio": 45 })).expect("object");
/// let resolved = resolve("dangerRatio", &stats)?;
/// assert_eq!(resolved.value.plain_text(), "Snuggly 55%");
/// assert_eq!(resolved.color, "green");
/// assert_eq!(resolved.format, ShieldFormat::Plain);
/// # Ok::<(), eve_shields::domain::ResolveError>(())
/// ```
///
/// # Errors
///
/// Returns [`ResolveError::UnknownTopic`] for names outside the table,
/// whatever `stats` contains, and [`ResolveError::Field`] when the document
/// lacks a field the rule needs.
pub fn resolve(topic: &str, stats: &StatsDocument) -> Result<ResolvedTopic, ResolveError> {
    let topic: Topic = topic.parse()?;
    Ok(topic.resolve(stats)?)
}

fn evaluate(
    rule: ValueRule,
    stats: &StatsDocument,
) -> Result<(ShieldValue, Option<f64>), StatsFieldError> {
    match rule {
        ValueRule::Field(path) => {
            let raw = stats.lookup(path)?;
            let value = ShieldValue::from_json(raw).ok_or_else(|| StatsFieldError::Missing {
                key: path.last().copied().unwrap_or_default().to_owned(),
            })?;
            Ok((value, raw.as_f64()))
        }
        ValueRule::Efficiency { destroyed, lost } => {
            let destroyed = stats.lookup_f64(&[destroyed])?;
            let lost = stats.lookup_f64(&[lost])?;
            let efficiency = efficiency(destroyed, lost);
            let value = efficiency.map_or_else(|| ShieldValue::from(0_i64), ShieldValue::from);
            Ok((value, Some(efficiency.unwrap_or(0.0))))
        }
        ValueRule::Danger { field, threshold } => {
            let raw = stats.lookup(&[field])?;
            let Some(ratio) = raw.as_number() else {
                return Err(StatsFieldError::NotNumeric {
                    key: field.to_owned(),
                });
            };
            let message = danger_message(ratio, threshold);
            Ok((ShieldValue::Text(message), ratio.as_f64()))
        }
    }
}

/// Share of destroyed in destroyed + lost, as a percentage. `None` when the
/// total is not positive.
#[expect(
    clippy::float_arithmetic,
    reason = "efficiency is a ratio of two statistics"
)]
fn efficiency(destroyed: f64, lost: f64) -> Option<f64> {
    let total = destroyed + lost;
    (total > 0.0).then(|| destroyed / total * 100.0)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the snuggly side shows the complementary ratio"
)]
fn danger_message(ratio: &Number, threshold: f64) -> String {
    let magnitude = ratio.as_f64().unwrap_or_default();
    if magnitude > threshold {
        return format!("Dangerous {ratio}%");
    }
    let complement = ratio.as_i64().map_or_else(
        || ShieldValue::from(100.0 - magnitude),
        |whole| ShieldValue::from(100 - whole),
    );
    format!("Snuggly {}%", complement.plain_text())
}
