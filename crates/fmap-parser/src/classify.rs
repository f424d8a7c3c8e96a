//! Numeric-type classification for formula candidate variables.

/// Primitive numeric types, their boxed counterparts, and arbitrary-precision types.
const NUMERIC_TYPES: &[&str] = &[
    "int",
    "long",
    "double",
    "float",
    "short",
    "byte",
    "Integer",
    "Long",
    "Double",
    "Float",
    "Short",
    "Byte",
    "BigDecimal",
    "BigInteger",
    "Number",
];

/// Whether `type_name` names a numeric-like type.
///
/// Exact, case-sensitive membership; empty and unknown names are not numeric.
#[must_use]
pub fn is_numeric(type_name: &str) -> bool {
    NUMERIC_TYPES.contains(&type_name)
}

/// Reduce a declared type as written in source to the name [`is_numeric`] expects.
///
/// Qualified names keep their last segment (`java.math.BigDecimal` becomes
/// `BigDecimal`). Generic and array types are returned whole, so they never
/// classify as numeric.
#[must_use]
pub fn declared_type_name(type_text: &str) -> &str {
    let text = type_text.trim();
    if text.contains(['<', '[']) {
        return text;
    }
    text.rsplit('.').next().unwrap_or(text).trim()
}
