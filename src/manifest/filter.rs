use super::scan::{scan, Segment};
use std::collections::BTreeSet;

/// Keep only the `<types>` blocks whose declared name is in `allowed`.
///
/// Lines outside blocks are passed through unchanged. Kept blocks are
/// emitted verbatim; a block without a resolvable name, or one still open at
/// end of input, is dropped.
pub fn filter(document: &str, allowed: &BTreeSet<String>) -> String {
    let scan = scan(document);
    let mut out: Vec<&str> = Vec::new();
    for segment in scan.segments {
        match segment {
            Segment::Line(line) => out.push(line),
            Segment::Block(block) => match block.name {
                Some(name) if allowed.contains(name) => out.extend(block.lines),
                name => {
                    tracing::debug!(type_name = name.unwrap_or_default(), "dropping types block");
                }
            },
        }
    }
    if let Some(block) = scan.unterminated {
        tracing::warn!(
            type_name = block.name.unwrap_or_default(),
            lines = block.lines.len(),
            "dropping unterminated types block"
        );
    }
    out.join("\n")
}
