//! Source text acquisition.

use std::io::Read;

use anyhow::{Context, bail};

/// Read a source file, or stdin when `input` is `-`.
///
/// Whitespace-only input is refused.
pub fn read_source(input: &str) -> anyhow::Result<String> {
    let source = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read source from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {input}"))?
    };

    ensure_code(source)
}

fn ensure_code(source: String) -> anyhow::Result<String> {
    if source.trim().is_empty() {
        bail!("No code provided");
    }
    Ok(source)
}
