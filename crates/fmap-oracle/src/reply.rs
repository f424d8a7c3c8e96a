//! Reply parsing.
//!
//! A reply text is reduced to a symbol mapping in four stages:
//!
//! 1. [`strip_fences`] removes a leading ```` ``` ````/```` ```json ```` marker
//!    and a trailing ```` ``` ```` marker.
//! 2. [`locate_object`] takes the leftmost `{` through the rightmost `}`.
//! 3. [`decode`] reads that region as a JSON object of scalar values,
//!    keeping the keys in reply order.
//! 4. [`foreign_keys`] lists keys that do not occur in the method's
//!    documentation; the client applies the contract policy to them.

use std::collections::BTreeSet;
use std::fmt;

use fmap_core::{MappingValue, SymbolMapping};
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::error::ReplyError;

/// A reply that made it through stages 1-3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedReply {
    /// The brace-delimited substring the mapping was decoded from.
    pub object: String,
    pub mapping: SymbolMapping,
}

/// Run stages 1-3 over a raw reply.
///
/// # Errors
///
/// Returns [`ReplyError::NoObject`] when the reply has no brace region, and
/// [`ReplyError::Malformed`] when the region is not an object of scalars.
pub fn parse_reply(raw: &str, variables: &BTreeSet<String>) -> Result<DecodedReply, ReplyError> {
    let text = strip_fences(raw);
    let object = locate_object(text).ok_or_else(|| ReplyError::NoObject {
        raw: raw.to_string(),
    })?;
    let mapping = decode(object, variables)?;
    Ok(DecodedReply {
        object: object.to_string(),
        mapping,
    })
}

/// Remove a leading code-fence marker (with optional `json` tag) and a
/// trailing fence marker.
#[must_use]
pub fn strip_fences(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

/// Leftmost `{` through rightmost `}`, inclusive.
#[must_use]
pub fn locate_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Decode a JSON object whose values are strings, numbers, or null.
///
/// Keys keep their reply order. A repeated key keeps its first position
/// and its last value.
///
/// # Errors
///
/// Returns [`ReplyError::Malformed`] carrying `object` when it is not valid
/// JSON, not an object, or holds a non-scalar value.
pub fn decode(object: &str, variables: &BTreeSet<String>) -> Result<SymbolMapping, ReplyError> {
    let malformed = |reason: String| ReplyError::Malformed {
        object: object.to_string(),
        reason,
    };

    let OrderedObject(entries) =
        serde_json::from_str(object).map_err(|e| malformed(e.to_string()))?;

    let mut mapping = SymbolMapping::new();
    for (key, value) in entries {
        let Some(value) = MappingValue::classify(&value, variables) else {
            return Err(malformed(format!(
                "value for `{key}` is not a string, number, or null"
            )));
        };
        mapping.insert(key, value);
    }
    Ok(mapping)
}

/// Keys of `mapping` that do not occur as a symbol in `documentation`.
#[must_use]
pub fn foreign_keys(mapping: &SymbolMapping, documentation: &str) -> Vec<String> {
    mapping
        .keys()
        .filter(|key| !contains_symbol(documentation, key))
        .map(ToString::to_string)
        .collect()
}

/// Whether `symbol` occurs in `text`.
///
/// Formulas juxtapose symbols (`mc^2`, `ρgh`), so a symbol may sit inside a
/// longer run of letters. A symbol that starts with a digit must stand
/// alone, so `0` is not found in `v0`.
#[must_use]
pub fn contains_symbol(text: &str, symbol: &str) -> bool {
    let Some(first) = symbol.chars().next() else {
        return false;
    };
    if !first.is_numeric() {
        return text.contains(symbol);
    }
    text.match_indices(symbol).any(|(at, _)| {
        let before_ok = text[..at].chars().next_back().is_none_or(|c| !is_ident_char(c));
        let after_ok = text[at + symbol.len()..]
            .chars()
            .next()
            .is_none_or(|c| !is_ident_char(c));
        before_ok && after_ok
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// JSON object deserialized into `(key, value)` pairs in document order.
struct OrderedObject(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor;

        impl<'de> Visitor<'de> for ObjectVisitor {
            type Value = OrderedObject;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(OrderedObject(entries))
            }
        }

        deserializer.deserialize_map(ObjectVisitor)
    }
}
