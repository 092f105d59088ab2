use super::scan::declared_name;
use super::TypeSummary;
use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::LazyLock;

static TYPES_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<types>(.*?)</types>").expect("types block regex"));

static MEMBER_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<members>(.*?)</members>").expect("member entry regex"));

/// Summarize every `<types>` block in `document`, sorted by type name.
///
/// Blocks sharing a name merge into one summary with members kept in
/// document order. Blocks without a name entry are skipped.
pub fn analyze(document: &str) -> Vec<TypeSummary> {
    let mut order: Vec<(String, Vec<String>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for caps in TYPES_BLOCK.captures_iter(document) {
        let body = caps.get(1).map_or("", |m| m.as_str());
        let Some(name) = declared_name(body) else {
            tracing::debug!(block_bytes = body.len(), "skipping types block without a name");
            continue;
        };
        let members = MEMBER_ENTRY
            .captures_iter(body)
            .filter_map(|member| member.get(1))
            .map(|member| decode_entities(member.as_str().trim()).into_owned())
            .filter(|member| !member.is_empty());

        match index.get(name).copied() {
            Some(slot) => {
                tracing::warn!(type_name = name, "duplicate types block; merging members");
                order[slot].1.extend(members);
            }
            None => {
                index.insert(name.to_string(), order.len());
                order.push((name.to_string(), members.collect()));
            }
        }
    }

    let mut summaries: Vec<TypeSummary> = order
        .into_iter()
        .map(|(name, members)| TypeSummary::new(name, members))
        .collect();
    summaries.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    summaries
}

/// Number of types and total member count across `summaries`.
pub fn totals(summaries: &[TypeSummary]) -> (usize, usize) {
    let members = summaries.iter().map(|summary| summary.member_count).sum();
    (summaries.len(), members)
}

// Punctuation before digits before letters, letters compared without case.
// On a tie the lowercase spelling sorts first.
fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = collation_key(a).cmp(collation_key(b));
    folded.then_with(|| b.cmp(a))
}

fn collation_key(name: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    name.chars().flat_map(char::to_lowercase).map(|c| {
        let class = if c.is_alphabetic() {
            2
        } else if c.is_numeric() {
            1
        } else {
            0
        };
        (class, c)
    })
}

fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&"),
    )
}
