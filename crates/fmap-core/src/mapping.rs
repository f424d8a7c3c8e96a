//! Symbol mappings and per-method results.
//!
//! A [`MappingResult`] is either a mapping (formula symbol → code construct)
//! or an inline error. Serialized shapes:
//!
//! ```text
//! {"method_name": "f", "mapping": {"E": "energy", "c": 299792458.0, "G": null}}
//! {"method_name": "f", "error_kind": "format", "error": "No JSON found", "raw": "..."}
//! ```

use std::collections::BTreeSet;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

// ---------------------------------------------------------------------------
// MappingValue
// ---------------------------------------------------------------------------

/// The code construct a formula symbol maps to.
///
/// Numeric literals are canonicalized to JSON numbers: a reply value of
/// `"9.81"` and one of `9.81` both become `Literal(9.81)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingValue {
    /// A candidate variable of the method.
    Variable(String),
    /// A call or other expression string.
    Expression(String),
    /// A numeric constant.
    Literal(Number),
    /// No implementation found.
    Unmapped,
}

impl MappingValue {
    /// Classify a decoded reply value against the method's candidate variables.
    ///
    /// Returns `None` for values that are not a string, number, or null.
    #[must_use]
    pub fn classify(value: &Value, variables: &BTreeSet<String>) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Unmapped),
            Value::Number(n) => Some(Self::Literal(n.clone())),
            Value::String(s) => {
                let text = s.trim();
                if text.is_empty() || text == "null" {
                    return Some(Self::Unmapped);
                }
                if variables.contains(text) {
                    return Some(Self::Variable(text.to_string()));
                }
                if let Ok(number) = text.parse::<Number>() {
                    return Some(Self::Literal(number));
                }
                Some(Self::Expression(text.to_string()))
            }
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }

    #[must_use]
    pub const fn is_unmapped(&self) -> bool {
        matches!(self, Self::Unmapped)
    }
}

impl Serialize for MappingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Variable(s) | Self::Expression(s) => serializer.serialize_str(s),
            Self::Literal(n) => n.serialize(serializer),
            Self::Unmapped => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for MappingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(s) | Self::Expression(s) => f.write_str(s),
            Self::Literal(n) => write!(f, "{n}"),
            Self::Unmapped => f.write_str("null"),
        }
    }
}

// ---------------------------------------------------------------------------
// SymbolMapping
// ---------------------------------------------------------------------------

/// Ordered mapping from formula symbol to [`MappingValue`].
///
/// Keys keep the order the oracle emitted them in. Re-inserting a key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolMapping {
    entries: Vec<(String, MappingValue)>,
}

impl SymbolMapping {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, value: MappingValue) {
        let symbol = symbol.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == symbol) {
            slot.1 = value;
        } else {
            self.entries.push((symbol, value));
        }
    }

    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&MappingValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == symbol)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry whose key fails `keep`, returning the removed keys in order.
    pub fn retain_keys(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let mut removed = Vec::new();
        self.entries.retain(|(k, _)| {
            let kept = keep(k);
            if !kept {
                removed.push(k.clone());
            }
            kept
        });
        removed
    }
}

impl<K: Into<String>> FromIterator<(K, MappingValue)> for SymbolMapping {
    fn from_iter<I: IntoIterator<Item = (K, MappingValue)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl Serialize for SymbolMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// MappingResult
// ---------------------------------------------------------------------------

/// Category of a per-method failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Non-success status, transport fault, or timeout.
    Transport,
    /// Reply could not be reduced to structured data.
    Format,
    /// Reply keys not present in the formula text.
    ContractViolation,
}

/// Success or failure payload of a [`MappingResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MappingOutcome {
    Mapped {
        mapping: SymbolMapping,
        /// Foreign keys dropped under [`ContractPolicy::Strip`](crate::ContractPolicy::Strip).
        #[serde(skip_serializing_if = "Vec::is_empty")]
        rejected_keys: Vec<String>,
    },
    Failed {
        error_kind: FailureKind,
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    },
}

/// Oracle answer for one method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingResult {
    pub method_name: String,
    #[serde(flatten)]
    pub outcome: MappingOutcome,
}

impl MappingResult {
    #[must_use]
    pub fn mapped(method_name: impl Into<String>, mapping: SymbolMapping) -> Self {
        Self {
            method_name: method_name.into(),
            outcome: MappingOutcome::Mapped {
                mapping,
                rejected_keys: Vec::new(),
            },
        }
    }

    #[must_use]
    pub fn failed(
        method_name: impl Into<String>,
        error_kind: FailureKind,
        error: impl Into<String>,
        raw: Option<String>,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            outcome: MappingOutcome::Failed {
                error_kind,
                error: error.into(),
                raw,
            },
        }
    }

    #[must_use]
    pub fn with_rejected_keys(mut self, keys: Vec<String>) -> Self {
        if let MappingOutcome::Mapped { rejected_keys, .. } = &mut self.outcome {
            *rejected_keys = keys;
        }
        self
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, MappingOutcome::Mapped { .. })
    }

    #[must_use]
    pub const fn mapping(&self) -> Option<&SymbolMapping> {
        match &self.outcome {
            MappingOutcome::Mapped { mapping, .. } => Some(mapping),
            MappingOutcome::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn rejected_keys(&self) -> &[String] {
        match &self.outcome {
            MappingOutcome::Mapped { rejected_keys, .. } => rejected_keys,
            MappingOutcome::Failed { .. } => &[],
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            MappingOutcome::Failed { error, .. } => Some(error),
            MappingOutcome::Mapped { .. } => None,
        }
    }

    #[must_use]
    pub const fn error_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            MappingOutcome::Failed { error_kind, .. } => Some(*error_kind),
            MappingOutcome::Mapped { .. } => None,
        }
    }

    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        match &self.outcome {
            MappingOutcome::Failed { raw, .. } => raw.as_deref(),
            MappingOutcome::Mapped { .. } => None,
        }
    }
}
