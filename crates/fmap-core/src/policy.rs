//! Behavior switches that callers must choose explicitly.
//!
//! Both enums use `snake_case` serialization so they can be set from TOML
//! and `FMAP_*` environment variables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// VariablePolicy
// ---------------------------------------------------------------------------

/// Which declared names become candidate variables for a method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariablePolicy {
    /// Parameters and locals whose declared type is numeric-like.
    #[default]
    NumericTyped,
    /// Every parameter and local declarator name, regardless of type.
    AllDeclared,
}

impl VariablePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NumericTyped => "numeric_typed",
            Self::AllDeclared => "all_declared",
        }
    }

    /// Whether a declaration with the given numeric-ness is kept.
    #[must_use]
    pub const fn admits(self, is_numeric: bool) -> bool {
        match self {
            Self::NumericTyped => is_numeric,
            Self::AllDeclared => true,
        }
    }
}

impl fmt::Display for VariablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariablePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "numeric_typed" | "numeric" => Ok(Self::NumericTyped),
            "all_declared" | "all" => Ok(Self::AllDeclared),
            other => Err(format!("unknown variable policy: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// ContractPolicy
// ---------------------------------------------------------------------------

/// What to do when the oracle answers with symbols absent from the formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractPolicy {
    /// Drop the foreign keys and list them in `rejected_keys`.
    #[default]
    Strip,
    /// Turn the whole method result into a contract-violation error.
    Reject,
}

impl ContractPolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strip => "strip",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for ContractPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strip" => Ok(Self::Strip),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown contract policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(VariablePolicy::default(), VariablePolicy::NumericTyped);
        assert_eq!(ContractPolicy::default(), ContractPolicy::Strip);
    }

    #[test]
    fn variable_policy_admission() {
        assert!(VariablePolicy::NumericTyped.admits(true));
        assert!(!VariablePolicy::NumericTyped.admits(false));
        assert!(VariablePolicy::AllDeclared.admits(false));
    }

    #[test]
    fn parse_from_str_accepts_cli_spellings() {
        assert_eq!(
            "all-declared".parse::<VariablePolicy>(),
            Ok(VariablePolicy::AllDeclared)
        );
        assert_eq!(
            "numeric_typed".parse::<VariablePolicy>(),
            Ok(VariablePolicy::NumericTyped)
        );
        assert!("everything".parse::<VariablePolicy>().is_err());
        assert_eq!("Reject".parse::<ContractPolicy>(), Ok(ContractPolicy::Reject));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&VariablePolicy::AllDeclared).unwrap();
        assert_eq!(json, "\"all_declared\"");
        let back: ContractPolicy = serde_json::from_str("\"reject\"").unwrap();
        assert_eq!(back, ContractPolicy::Reject);
    }
}
