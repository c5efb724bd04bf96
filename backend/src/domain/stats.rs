//! Upstream statistics document and nested field access.
//!
//! zKillboard answers with a deep JSON object. Topics address fields in it by
//! key path (`["info", "memberCount"]`); a failed lookup must name the exact
//! segment that was missing because that name is reported back to the caller.

use serde_json::{Map, Value};

/// Failure resolving a key path inside a [`StatsDocument`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsFieldError {
    /// The named key is absent, or its parent is not an object.
    #[error("invalid key: {key}")]
    Missing {
        /// First path segment that could not be resolved.
        key: String,
    },
    /// The key exists but does not hold a number where one is required.
    #[error("unexpected non-numeric value for key: {key}")]
    NotNumeric {
        /// Last path segment of the offending field.
        key: String,
    },
}

impl StatsFieldError {
    fn missing(key: &str) -> Self {
        Self::Missing {
            key: key.to_owned(),
        }
    }

    /// Key the error refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Missing { key } | Self::NotNumeric { key } => key,
        }
    }
}

/// Aggregate kill/loss statistics for one entity, as returned upstream.
///
/// The document is treated as opaque apart from key-path lookups.
///
/// # Examples
/// ```
/// use eve_shields::domain::StatsDocument;
/// use serde_json::json;
///
/// let stats = StatsDocument::try_from(json!({ "info": { "memberCount": 18143 } }))
///     .expect("object document");
/// assert_eq!(stats.lookup(&["info", "memberCount"]).ok(), Some(&json!(18143)));
/// assert_eq!(
///     stats.lookup(&["info", "corpCount"]).map_err(|e| e.key().to_owned()),
///     Err("corpCount".to_owned()),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsDocument(Map<String, Value>);

impl StatsDocument {
    /// Wrap an already-decoded JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Resolve `path` one segment at a time.
    ///
    /// Descending into a scalar or array is reported the same way as an
    /// absent key. An empty path resolves nothing and reports an empty key.
    ///
    /// # Errors
    ///
    /// Returns [`StatsFieldError::Missing`] naming the first segment that could
    /// not be resolved.
    pub fn lookup(&self, path: &[&str]) -> Result<&Value, StatsFieldError> {
        let mut node: Option<&Value> = None;
        for key in path {
            let fields = match node {
                None => &self.0,
                Some(Value::Object(fields)) => fields,
                Some(_) => return Err(StatsFieldError::missing(key)),
            };
            node = Some(fields.get(*key).ok_or_else(|| StatsFieldError::missing(key))?);
        }
        node.ok_or_else(|| StatsFieldError::missing(""))
    }

    /// Resolve `path` and read it as a floating-point number.
    ///
    /// # Errors
    ///
    /// Returns [`StatsFieldError::Missing`] as [`Self::lookup`] does, or
    /// [`StatsFieldError::NotNumeric`] when the value is not a JSON number.
    pub fn lookup_f64(&self, path: &[&str]) -> Result<f64, StatsFieldError> {
        self.lookup(path)?
            .as_f64()
            .ok_or_else(|| StatsFieldError::NotNumeric {
                key: path.last().copied().unwrap_or_default().to_owned(),
            })
    }
}

impl From<Map<String, Value>> for StatsDocument {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl TryFrom<Value> for StatsDocument {
    type Error = Value;

    /// Accept only JSON objects; anything else is handed back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(other),
        }
    }
}
