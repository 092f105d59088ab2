use super::scan::{scan, Segment};
use super::TypeSummary;
use std::borrow::Cow;
use std::collections::HashMap;

/// Indentation added on top of the closing marker's own indentation.
const INDENT_UNIT: &str = "    ";

/// Insert a statistics comment before the closing line of every `<types>`
/// block that has a matching summary.
///
/// The comment copies the closing line's indentation (plus one level) and
/// its trailing `\r`. A block written on a single line gets the comment on
/// the line above it.
///
/// ```text
///     <types>
///         <members>Foo</members>
///         <members>Bar</members>
///         <name>ApexClass</name>
///         <!-- ApexClass: 2 members / FROM Foo ~ TO Bar -->
///     </types>
/// ```
pub fn annotate(document: &str, summaries: &[TypeSummary]) -> String {
    let lookup: HashMap<&str, &TypeSummary> = summaries
        .iter()
        .map(|summary| (summary.name.as_str(), summary))
        .collect();

    let scan = scan(document);
    let mut out: Vec<Cow<'_, str>> = Vec::new();
    let mut inserted = 0usize;
    for segment in scan.segments {
        match segment {
            Segment::Line(line) => out.push(Cow::Borrowed(line)),
            Segment::Block(block) => {
                let Some((closing, body)) = block.lines.split_last() else {
                    continue;
                };
                out.extend(body.iter().map(|line| Cow::Borrowed(*line)));
                if let Some(summary) = block.name.and_then(|name| lookup.get(name)) {
                    out.push(Cow::Owned(comment_line(closing, summary)));
                    inserted += 1;
                }
                out.push(Cow::Borrowed(*closing));
            }
        }
    }
    if let Some(block) = scan.unterminated {
        out.extend(block.lines.into_iter().map(Cow::Borrowed));
    }
    tracing::debug!(inserted, "annotated types blocks");
    out.join("\n")
}

fn comment_line(closing: &str, summary: &TypeSummary) -> String {
    let indent = &closing[..closing.len() - closing.trim_start().len()];
    let eol = if closing.ends_with('\r') { "\r" } else { "" };
    let range = summary
        .member_range()
        .map(|(first, last)| format!(" / FROM {first} ~ TO {last}"))
        .unwrap_or_default();
    format!(
        "{indent}{INDENT_UNIT}<!-- {}: {} members{range} -->{eol}",
        summary.name, summary.member_count
    )
}
