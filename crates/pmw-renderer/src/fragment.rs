//! Line-based fragment renderer.
//!
//! Each input line is classified in precedence order (heading, list
//! item, paragraph, blank) and emitted as one self-contained markup
//! snippet. The only state carried between lines is whether an
//! unordered list is currently open, modeled as an explicit two-state
//! machine so the close-before-heading and close-at-end rules are
//! visible in the control flow.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::inline::apply_inline;

/// Utility classes applied to `<h1>` headings.
const H1_CLASS: &str = "text-2xl font-bold mt-4 mb-2";
/// Utility classes applied to `<h2>` headings.
const H2_CLASS: &str = "text-xl font-semibold mt-3 mb-2";
/// Utility classes applied to `<h3>` headings.
const H3_CLASS: &str = "text-lg font-semibold mt-2 mb-1";
/// Utility classes applied to `<ul>` list wrappers.
const UL_CLASS: &str = "list-disc list-inside mb-2 space-y-1";
/// Utility class applied to `<p>` paragraphs.
const P_CLASS: &str = "mb-2";

/// A line that is a single `-` or `*`, at least one whitespace, then content.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*]\s+(.+)$").unwrap());

/// Whether an unordered list is currently open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListState {
    InParagraph,
    InList,
}

/// Streaming renderer over the lines of one document.
///
/// All state is local to one invocation of [`render`]; the type is
/// exposed for callers that already have lines in hand and want to
/// drive it directly.
#[derive(Debug)]
pub struct FragmentRenderer {
    out: String,
    state: ListState,
}

impl FragmentRenderer {
    /// Create a renderer with an empty output buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(256),
            state: ListState::InParagraph,
        }
    }

    /// Process one input line.
    ///
    /// `is_last` marks the final line of the document; a trailing blank
    /// line emits nothing.
    pub fn line(&mut self, raw: &str, is_last: bool) {
        let line = raw.trim();

        // Three hashes before two before one: the shorter markers are
        // prefixes of the longer ones.
        if let Some(text) = line.strip_prefix("### ") {
            self.heading(3, H3_CLASS, text);
            return;
        }
        if let Some(text) = line.strip_prefix("## ") {
            self.heading(2, H2_CLASS, text);
            return;
        }
        if let Some(text) = line.strip_prefix("# ") {
            self.heading(1, H1_CLASS, text);
            return;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            if self.state == ListState::InParagraph {
                write!(self.out, r#"<ul class="{UL_CLASS}">"#).unwrap();
                self.state = ListState::InList;
            }
            write!(self.out, "<li>{}</li>", apply_inline(&caps[1])).unwrap();
            return;
        }

        // Any non-item line terminates an open list before it is
        // processed further.
        self.close_list();

        if !line.is_empty() {
            write!(self.out, r#"<p class="{P_CLASS}">{}</p>"#, apply_inline(line)).unwrap();
        } else if !is_last {
            self.out.push_str("<br/>");
        }
    }

    /// Close any open list and return the accumulated fragment.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.close_list();
        self.out
    }

    /// Emit a heading, closing an open list first.
    ///
    /// Heading text gets no inline substitution.
    fn heading(&mut self, level: u8, class: &str, text: &str) {
        self.close_list();
        write!(self.out, r#"<h{level} class="{class}">{text}</h{level}>"#).unwrap();
    }

    fn close_list(&mut self) {
        if self.state == ListState::InList {
            self.out.push_str("</ul>");
            self.state = ListState::InParagraph;
        }
    }
}

impl Default for FragmentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a document to an HTML fragment.
///
/// Total over all inputs: malformed markup degrades to literal
/// paragraph text with best-effort inline substitution, never an error.
#[must_use]
pub fn render(document: &str) -> String {
    let mut renderer = FragmentRenderer::new();
    let last = document.split('\n').count() - 1;
    for (index, line) in document.split('\n').enumerate() {
        renderer.line(line, index == last);
    }
    renderer.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_empty_document() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn test_h1() {
        assert_eq!(
            render("# Title"),
            r#"<h1 class="text-2xl font-bold mt-4 mb-2">Title</h1>"#
        );
    }

    #[test]
    fn test_h2() {
        assert_eq!(
            render("## Section"),
            r#"<h2 class="text-xl font-semibold mt-3 mb-2">Section</h2>"#
        );
    }

    #[test]
    fn test_h3_not_parsed_as_h1() {
        let html = render("### Detail");
        assert!(html.starts_with("<h3"));
        assert!(html.contains(">Detail</h3>"));
        assert!(!html.contains("<h1"));
    }

    #[test]
    fn test_heading_text_gets_no_inline_substitution() {
        let html = render("# **not bold**");
        assert!(html.contains("**not bold**"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_list_two_items() {
        assert_eq!(
            render("- a\n- b"),
            r#"<ul class="list-disc list-inside mb-2 space-y-1"><li>a</li><li>b</li></ul>"#
        );
    }

    #[test]
    fn test_star_marker_list_item() {
        let html = render("* starred");
        assert!(html.contains("<li>starred</li>"));
        assert!(html.starts_with("<ul"));
        assert!(html.ends_with("</ul>"));
    }

    #[test]
    fn test_list_item_inline_substitution() {
        let html = render("- **bold** item");
        assert!(html.contains("<li><strong>bold</strong> item</li>"));
    }

    #[test]
    fn test_paragraph_with_inline() {
        let html = render("**bold** and *italic*");
        assert_eq!(
            html,
            r#"<p class="mb-2"><strong>bold</strong> and <em>italic</em></p>"#
        );
        assert!(!html.contains('*'));
    }

    #[test]
    fn test_blank_line_between_paragraphs() {
        assert_eq!(
            render("line1\n\nline2"),
            r#"<p class="mb-2">line1</p><br/><p class="mb-2">line2</p>"#
        );
    }

    #[test]
    fn test_trailing_blank_line_emits_nothing() {
        // "line1\n\n" splits into three lines; only the middle blank
        // produces a break, the final one is dropped.
        assert_eq!(render("line1\n\n"), r#"<p class="mb-2">line1</p><br/>"#);
        assert!(!render("line1\n").contains("<br/>"));
    }

    #[test]
    fn test_heading_closes_open_list() {
        let html = render("- item\n# Heading");
        let ul_close = html.find("</ul>").unwrap();
        let h1_open = html.find("<h1").unwrap();
        assert!(ul_close < h1_open);
    }

    #[test]
    fn test_paragraph_closes_open_list() {
        let html = render("- item\nafter");
        assert!(html.contains(r#"</ul><p class="mb-2">after</p>"#));
    }

    #[test]
    fn test_document_ending_inside_list_is_closed() {
        let html = render("- a\n- b\n- c");
        assert!(html.ends_with("</ul>"));
    }

    #[test]
    fn test_ul_balance_invariant() {
        let documents = [
            "",
            "- a",
            "- a\n- b\n\n- c",
            "# h\n- a\n## h2\n- b\n- c\npara",
            "text\n\n- x\n# h\n- y",
            "* a\n* b\n\n\n* c\n",
        ];
        for doc in documents {
            let html = render(doc);
            assert_eq!(
                html.matches("<ul").count(),
                html.matches("</ul>").count(),
                "unbalanced lists for {doc:?}"
            );
        }
    }

    #[test]
    fn test_lists_never_nest() {
        let html = render("- a\n- b\n- c");
        assert_eq!(html.matches("<ul").count(), 1);
    }

    #[test]
    fn test_indented_lines_are_trimmed() {
        let html = render("   # Indented");
        assert!(html.starts_with("<h1"));
    }

    #[test]
    fn test_unrecognized_syntax_passes_through_as_paragraph() {
        assert_eq!(
            render("> quote"),
            r#"<p class="mb-2">> quote</p>"#
        );
        assert!(render("1. ordered").contains(r#"<p class="mb-2">1. ordered</p>"#));
        assert!(render("[link](url)").contains("[link](url)"));
    }

    #[test]
    fn test_no_html_escaping() {
        // Fragment generator, not a sanitizer: markup passes through.
        assert_eq!(
            render("<div>raw</div>"),
            r#"<p class="mb-2"><div>raw</div></p>"#
        );
    }

    #[test]
    fn test_dash_without_content_is_a_paragraph() {
        assert_eq!(render("-"), r#"<p class="mb-2">-</p>"#);
    }

    #[test]
    fn test_bold_line_is_not_a_list_item() {
        // `**` fails the marker-then-whitespace shape.
        let html = render("**bold** lead");
        assert!(html.starts_with("<p"));
    }

    #[test]
    fn test_hash_without_space_is_a_paragraph() {
        assert_eq!(render("#tag"), r##"<p class="mb-2">#tag</p>"##);
    }

    #[test]
    fn test_mixed_document() {
        let html = render("# Brief\n\n- **goal**: ship\n- risk\ndone\n");
        assert_eq!(
            html,
            concat!(
                r#"<h1 class="text-2xl font-bold mt-4 mb-2">Brief</h1>"#,
                "<br/>",
                r#"<ul class="list-disc list-inside mb-2 space-y-1">"#,
                "<li><strong>goal</strong>: ship</li>",
                "<li>risk</li>",
                "</ul>",
                r#"<p class="mb-2">done</p>"#
            )
        );
    }

    #[test]
    fn test_renderer_default() {
        let renderer = FragmentRenderer::default();
        assert_eq!(renderer.finish(), "");
    }
}
