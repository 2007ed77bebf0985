//! Serialization of a [`RenderedView`] for output
//!
//! Bodies are written as produced by the markup renderer: pair [`to_html`]
//! with [`MarkdownHtml`](crate::MarkdownHtml) and [`to_text`] with
//! [`MarkdownText`](crate::MarkdownText).

use crate::view::{RenderedView, SectionBody, NO_ANALYSIS_PLACEHOLDER};
use std::fmt::Write;

/// HTML fragment: `<h4>` headings, `<ul><li>` items
#[must_use]
pub fn to_html(view: &RenderedView) -> String {
    let sections = match view {
        RenderedView::Placeholder => return format!("<p>{NO_ANALYSIS_PLACEHOLDER}</p>\n"),
        RenderedView::Analysis(sections) => sections,
    };

    let mut out = String::from("<div>\n");
    for section in sections {
        let _ = writeln!(out, "<h4>{}</h4>", section.kind.title());
        match &section.body {
            SectionBody::Text(body) => {
                let _ = writeln!(out, "{body}");
            }
            SectionBody::Items(items) => {
                out.push_str("<ul>\n");
                for item in items {
                    let _ = writeln!(out, "<li>{item}</li>");
                }
                out.push_str("</ul>\n");
            }
        }
    }
    out.push_str("</div>\n");
    out
}

/// Terminal text: underlined headings, bulleted items
#[must_use]
pub fn to_text(view: &RenderedView) -> String {
    let sections = match view {
        RenderedView::Placeholder => return format!("{NO_ANALYSIS_PLACEHOLDER}\n"),
        RenderedView::Analysis(sections) => sections,
    };

    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let title = section.kind.title();
        let _ = writeln!(out, "{title}\n{}", "-".repeat(title.len()));
        match &section.body {
            SectionBody::Text(body) => {
                if !body.is_empty() {
                    let _ = writeln!(out, "{body}");
                }
            }
            SectionBody::Items(items) => {
                for item in items {
                    write_item(&mut out, item);
                }
            }
        }
    }
    out
}

/// Bullet one item, indenting continuation lines under its first line
fn write_item(out: &mut String, item: &str) {
    let mut lines = item.lines();
    let first = lines.next().unwrap_or_default();
    let _ = writeln!(out, "  * {first}");
    for line in lines {
        if line.is_empty() {
            out.push('\n');
        } else {
            let _ = writeln!(out, "    {line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{RenderedSection, SectionKind};

    #[test]
    fn placeholder_outputs() {
        assert_eq!(to_text(&RenderedView::Placeholder), "No analysis yet.\n");
        assert_eq!(to_html(&RenderedView::Placeholder), "<p>No analysis yet.</p>\n");
    }

    #[test]
    fn multi_line_items_are_indented() {
        let mut out = String::new();
        write_item(&mut out, "first\nsecond");
        assert_eq!(out, "  * first\n    second\n");
    }

    #[test]
    fn empty_item_list_writes_heading_only() {
        let view = RenderedView::Analysis(vec![RenderedSection {
            kind: SectionKind::PotentialPitfalls,
            body: SectionBody::Items(vec![]),
        }]);
        assert_eq!(to_text(&view), "Potential Pitfalls\n------------------\n");
        assert_eq!(
            to_html(&view),
            "<div>\n<h4>Potential Pitfalls</h4>\n<ul>\n</ul>\n</div>\n"
        );
    }
}
