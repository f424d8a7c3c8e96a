//! Run summary over a batch of mapping results.

use std::fmt;

use serde::Serialize;

use crate::mapping::{FailureKind, MappingResult};

/// Counts over one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    /// Methods submitted to the oracle.
    pub methods: usize,
    /// Methods with a mapping.
    pub mapped: usize,
    /// Mapped methods that had foreign keys stripped.
    pub with_rejected_keys: usize,
    /// Symbols mapped to `null` across all mappings.
    pub unmapped_symbols: usize,
    pub transport_errors: usize,
    pub format_errors: usize,
    pub contract_violations: usize,
}

impl AnalysisReport {
    #[must_use]
    pub fn from_results(results: &[MappingResult]) -> Self {
        let mut report = Self {
            methods: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.error_kind() {
                None => {
                    report.mapped += 1;
                    if !result.rejected_keys().is_empty() {
                        report.with_rejected_keys += 1;
                    }
                    report.unmapped_symbols += result
                        .mapping()
                        .map_or(0, |m| m.iter().filter(|(_, v)| v.is_unmapped()).count());
                }
                Some(FailureKind::Transport) => report.transport_errors += 1,
                Some(FailureKind::Format) => report.format_errors += 1,
                Some(FailureKind::ContractViolation) => report.contract_violations += 1,
            }
        }
        report
    }

    #[must_use]
    pub const fn failed(&self) -> usize {
        self.transport_errors + self.format_errors + self.contract_violations
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} methods: {} mapped, {} failed (transport {}, format {}, contract {})",
            self.methods,
            self.mapped,
            self.failed(),
            self.transport_errors,
            self.format_errors,
            self.contract_violations
        )
    }
}
