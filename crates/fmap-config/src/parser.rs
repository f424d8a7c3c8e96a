//! Source-unit parser configuration.

use fmap_core::VariablePolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParserConfig {
    /// Which declarations become candidate variables.
    #[serde(default)]
    pub variable_policy: VariablePolicy,

    /// Whether `for` loop variables count as candidates.
    #[serde(default)]
    pub include_loop_counters: bool,
}
