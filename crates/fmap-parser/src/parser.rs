//! ast-grep wrapper and syntax-error detection.
//!
//! tree-sitter always produces a tree; invalid input shows up as `ERROR`
//! nodes or as zero-width "missing" tokens the parser inserted to recover.
//! Either one fails the whole source unit.

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::{LanguageExt, SupportLang};
use fmap_core::ParseFailure;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Parse Java source into an ast-grep tree.
#[must_use]
pub fn parse_source(source: &str) -> AstTree {
    SupportLang::Java.ast_grep(source)
}

/// Parse Java source, failing on the first syntax error in document order.
///
/// # Errors
/// Returns [`ParseFailure::Syntax`] describing the first error or missing node.
pub fn parse_checked(source: &str) -> Result<AstTree, ParseFailure> {
    let tree = parse_source(source);
    if let Some(message) = first_syntax_error(&tree.root()) {
        return Err(ParseFailure::Syntax { message });
    }
    Ok(tree)
}

fn first_syntax_error<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    let kind = node.kind();
    if kind.as_ref() == "ERROR" {
        return Some(format!(
            "unexpected `{}` at line {}, column {}",
            snippet(node.text().as_ref()),
            node.start_pos().line() + 1,
            node.start_pos().column(node) + 1
        ));
    }
    if is_missing(node) {
        return Some(format!(
            "missing `{}` at line {}, column {}",
            kind.as_ref(),
            node.start_pos().line() + 1,
            node.start_pos().column(node) + 1
        ));
    }
    node.children().find_map(|child| first_syntax_error(&child))
}

/// A zero-width leaf below the root: a token tree-sitter invented to recover.
fn is_missing<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.parent().is_some() && node.children().next().is_none() && node.text().is_empty()
}

fn snippet(text: &str) -> String {
    const MAX_CHARS: usize = 40;
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() > MAX_CHARS {
        let cut: String = first_line.chars().take(MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        first_line.to_string()
    }
}
