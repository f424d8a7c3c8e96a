use std::collections::BTreeSet;

use ast_grep_core::Node;
use ast_grep_core::matcher::KindMatcher;
use ast_grep_language::SupportLang;

use crate::classify::{declared_type_name, is_numeric};

use super::ParseOptions;

/// Qualifier kinds rendered in front of a call; anything else (chained
/// calls, casts, object creation) renders the call unqualified.
const QUALIFIER_KINDS: &[&str] = &[
    "identifier",
    "field_access",
    "scoped_identifier",
    "this",
    "super",
];

pub(super) fn extract_javadoc_before<D: ast_grep_core::Doc>(anchor: &Node<D>) -> String {
    let mut current = anchor.prev();
    while let Some(prev) = current {
        let kind = prev.kind();
        if kind.as_ref() == "line_comment" {
            current = prev.prev();
            continue;
        }
        if kind.as_ref() != "block_comment" {
            break;
        }

        let text = prev.text().trim().to_string();
        if !text.starts_with("/**") || text.starts_with("/***") {
            break;
        }

        // `/**/` is an empty plain comment, not an opened doc comment.
        let Some(body) = text.strip_prefix("/**").and_then(|rest| rest.strip_suffix("*/")) else {
            return String::new();
        };
        return body
            .lines()
            .map(|line| line.trim().trim_start_matches('*').trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
    }
    String::new()
}

/// Parameter names admitted by the variable policy.
pub(super) fn collect_parameters<D: ast_grep_core::Doc>(
    method: &Node<D>,
    options: ParseOptions,
    out: &mut BTreeSet<String>,
) {
    let Some(parameters) = method.field("parameters") else {
        return;
    };

    for child in parameters.children() {
        match child.kind().as_ref() {
            "formal_parameter" => {
                let Some(name) = child.field("name") else {
                    continue;
                };
                let numeric = child.field("dimensions").is_none()
                    && child
                        .field("type")
                        .is_some_and(|t| is_numeric(declared_type_name(t.text().as_ref())));
                if options.variable_policy.admits(numeric) {
                    out.insert(name.text().to_string());
                }
            }
            // Varargs arrive as an array, never a scalar.
            "spread_parameter" => {
                if !options.variable_policy.admits(false) {
                    continue;
                }
                out.extend(
                    child
                        .children()
                        .filter(|c| c.kind().as_ref() == "variable_declarator")
                        .filter_map(|d| d.field("name").map(|n| n.text().to_string())),
                );
            }
            _ => {}
        }
    }
}

/// Local declarator names (including nested blocks) admitted by the policy.
pub(super) fn collect_locals<D: ast_grep_core::Doc<Lang = SupportLang>>(
    body: &Node<D>,
    options: ParseOptions,
    out: &mut BTreeSet<String>,
) {
    let locals = KindMatcher::new("local_variable_declaration", SupportLang::Java);
    for declaration in body.find_all(&locals) {
        if !options.include_loop_counters && is_for_initializer(&declaration) {
            continue;
        }
        let type_numeric = declaration
            .field("type")
            .is_some_and(|t| is_numeric(declared_type_name(t.text().as_ref())));

        for declarator in declaration
            .children()
            .filter(|c| c.kind().as_ref() == "variable_declarator")
        {
            let Some(name) = declarator.field("name") else {
                continue;
            };
            let numeric = type_numeric && declarator.field("dimensions").is_none();
            if options.variable_policy.admits(numeric) {
                out.insert(name.text().to_string());
            }
        }
    }

    if !options.include_loop_counters {
        return;
    }
    let enhanced_for = KindMatcher::new("enhanced_for_statement", SupportLang::Java);
    for stmt in body.find_all(&enhanced_for) {
        let Some(name) = stmt.field("name") else {
            continue;
        };
        let numeric = stmt.field("dimensions").is_none()
            && stmt
                .field("type")
                .is_some_and(|t| is_numeric(declared_type_name(t.text().as_ref())));
        if options.variable_policy.admits(numeric) {
            out.insert(name.text().to_string());
        }
    }
}

fn is_for_initializer<D: ast_grep_core::Doc>(declaration: &Node<D>) -> bool {
    declaration
        .parent()
        .is_some_and(|parent| parent.kind().as_ref() == "for_statement")
}

/// Render every method invocation in `body` as `qualifier.member(...)`.
pub(super) fn collect_calls<D: ast_grep_core::Doc<Lang = SupportLang>>(
    body: &Node<D>,
) -> BTreeSet<String> {
    let invocations = KindMatcher::new("method_invocation", SupportLang::Java);
    body.find_all(&invocations)
        .filter_map(|call| render_call(&call))
        .collect()
}

fn render_call<D: ast_grep_core::Doc>(call: &Node<D>) -> Option<String> {
    let member = call.field("name")?.text().to_string();

    let prefix = call
        .field("object")
        .filter(|object| QUALIFIER_KINDS.contains(&object.kind().as_ref()))
        .map(|object| format!("{}.", normalize_whitespace(object.text().as_ref())))
        .unwrap_or_default();

    let has_args = call.field("arguments").is_some_and(|args| {
        !args
            .text()
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim()
            .is_empty()
    });
    let args = if has_args { "..." } else { "" };

    Some(format!("{prefix}{member}({args})"))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_whitespace_joins_tokens() {
        assert_eq!(normalize_whitespace("this . mass"), "this.mass");
        assert_eq!(normalize_whitespace("Math"), "Math");
    }
}
