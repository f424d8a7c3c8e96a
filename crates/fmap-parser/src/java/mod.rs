//! Java method walker.
//!
//! Finds every `method_declaration` in document order and summarizes it as a
//! [`MethodRecord`]. Constructors are not methods here; methods nested in
//! anonymous or local classes are, and appear where they occur in the text.

mod helpers;

use std::collections::BTreeSet;

use ast_grep_core::matcher::KindMatcher;
use ast_grep_language::SupportLang;
use fmap_core::{EXTRACTION_FAILED, MethodRecord, NO_COMMENT, ParseFailure, VariablePolicy};

use crate::parser::parse_checked;
use crate::span::extract_body;

/// Variable-collection switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Which declarations become candidate variables.
    pub variable_policy: VariablePolicy,
    /// Keep `for` initializer declarations and enhanced-`for` loop variables.
    pub include_loop_counters: bool,
}

/// Source-unit parser for Java.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaParser {
    options: ParseOptions,
}

impl JavaParser {
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn with_policy(variable_policy: VariablePolicy) -> Self {
        Self::new(ParseOptions {
            variable_policy,
            include_loop_counters: false,
        })
    }

    /// Parse one compilation unit into method records, in source order.
    ///
    /// # Errors
    /// Returns [`ParseFailure::Syntax`] if the source does not parse and
    /// [`ParseFailure::NoMethodsFound`] if it declares no methods.
    pub fn parse(&self, source: &str) -> Result<Vec<MethodRecord>, ParseFailure> {
        let tree = parse_checked(source)?;
        let matcher = KindMatcher::new("method_declaration", SupportLang::Java);

        let mut records = Vec::new();
        for node in tree.root().find_all(&matcher) {
            let name = node
                .field("name")
                .map(|n| n.text().to_string())
                .unwrap_or_default();

            let documentation = helpers::extract_javadoc_before(&node);
            let documentation = if documentation.is_empty() {
                NO_COMMENT.to_string()
            } else {
                documentation
            };

            let mut variables = BTreeSet::new();
            helpers::collect_parameters(&node, self.options, &mut variables);

            let mut calls = BTreeSet::new();
            if let Some(body) = node.field("body") {
                helpers::collect_locals(&body, self.options, &mut variables);
                calls = helpers::collect_calls(&body);
            }

            let start_line = node.start_pos().line() + 1;
            let code = extract_body(source, start_line);
            let code = if code.trim().is_empty() {
                EXTRACTION_FAILED.to_string()
            } else {
                code
            };

            tracing::debug!(
                method = %name,
                line = start_line,
                variables = variables.len(),
                calls = calls.len(),
                "parsed method"
            );

            records.push(MethodRecord {
                name,
                documentation,
                variables,
                calls,
                code,
                start_line,
            });
        }

        if records.is_empty() {
            return Err(ParseFailure::NoMethodsFound);
        }
        Ok(records)
    }
}

/// Parse with the default options (numeric-typed variables, no loop counters).
///
/// # Errors
/// See [`JavaParser::parse`].
pub fn parse(source: &str) -> Result<Vec<MethodRecord>, ParseFailure> {
    JavaParser::default().parse(source)
}

#[cfg(test)]
mod tests;
