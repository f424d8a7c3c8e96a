//! Method records produced by the source-unit parser.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Documentation placeholder for methods without an attached doc comment.
pub const NO_COMMENT: &str = "No comment";

/// Code placeholder when the method body span cannot be recovered.
pub const EXTRACTION_FAILED: &str = "// Extraction failed";

/// Structured summary of one method declaration, used as oracle input.
///
/// Immutable once built. `variables` and `calls` are sets; they iterate in
/// lexical order so that two parses of the same source produce identical
/// records and identical oracle requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Method name as declared.
    pub name: String,
    /// Cleaned doc comment text, or [`NO_COMMENT`]. Never empty.
    pub documentation: String,
    /// Candidate variable names (parameters and locals).
    pub variables: BTreeSet<String>,
    /// Call-expression renderings, e.g. `Math.sqrt(...)`.
    pub calls: BTreeSet<String>,
    /// Exact source span of the declaration, or [`EXTRACTION_FAILED`].
    pub code: String,
    /// 1-based line the declaration starts on.
    pub start_line: usize,
}
