//! Inline span substitution for list items and paragraphs.

use std::sync::LazyLock;

use regex::Regex;

/// Non-greedy `**...**` span.
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// Non-greedy `*...*` span with no `*` inside.
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*]+?)\*").unwrap());

/// Apply bold then italic substitution to one line of content.
///
/// Bold runs first so a `**bold**` span is never half-consumed by the
/// italic pattern. Heading text never goes through this function.
///
/// Unbalanced or adjacent single asterisks (`*a*b*c*`) pair
/// left-to-right, non-greedily; such input is outside the dialect and
/// the resulting pairing is deterministic but not guaranteed.
#[must_use]
pub fn apply_inline(text: &str) -> String {
    let bolded = BOLD.replace_all(text, "<strong>$1</strong>");
    ITALIC.replace_all(&bolded, "<em>$1</em>").into_owned()
}
