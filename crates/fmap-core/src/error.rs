//! Run-level error types.
//!
//! Per-method failures (oracle transport, reply format, contract violations)
//! are not errors at this level: they are carried inline in
//! [`MappingResult`](crate::MappingResult) so sibling methods keep going.

use thiserror::Error;

/// A source unit could not be turned into method records.
///
/// Terminal for the whole analysis run: once the compilation unit itself
/// fails, no method can be recovered from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// The source text does not parse.
    #[error("Syntax Error: {message}")]
    Syntax { message: String },

    /// The source parses but declares no methods.
    #[error("No methods found")]
    NoMethodsFound,
}

impl ParseFailure {
    /// Whether the failure is a parse error, as opposed to a valid but empty unit.
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}
