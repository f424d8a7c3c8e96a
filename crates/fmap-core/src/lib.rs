//! # fmap-core
//!
//! Core types, policies, and error types for fmap.
//!
//! This crate provides the foundational types shared across all fmap crates:
//! - [`MethodRecord`]: the parser's summary of one method declaration
//! - [`MappingResult`] / [`SymbolMapping`] / [`MappingValue`]: the oracle's
//!   per-method answer, or a per-method error
//! - [`VariablePolicy`] / [`ContractPolicy`]: explicit knobs for behaviors
//!   that differ between callers
//! - [`ParseFailure`]: the only error class that is fatal to a whole run
//! - [`AnalysisReport`]: run summary over a result batch

pub mod error;
pub mod mapping;
pub mod policy;
pub mod record;
pub mod report;

pub use error::ParseFailure;
pub use mapping::{FailureKind, MappingOutcome, MappingResult, MappingValue, SymbolMapping};
pub use policy::{ContractPolicy, VariablePolicy};
pub use record::{EXTRACTION_FAILED, MethodRecord, NO_COMMENT};
pub use report::AnalysisReport;
