//! Markup rendering adapters
//!
//! Result strings carry lightweight Markdown. The renderer is a pure function
//! from that text to displayable output. Input is treated as trusted: raw HTML
//! embedded in a result passes through [`MarkdownHtml`] unchanged.

use pulldown_cmark::{html, Event, Parser as MdParser, Tag, TagEnd};

/// Pure text → displayable markup function
pub trait MarkupRenderer {
    /// Render one markup string
    fn render(&self, source: &str) -> String;
}

impl<F> MarkupRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, source: &str) -> String {
        self(source)
    }
}

/// Markdown → HTML fragment
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownHtml;

impl MarkupRenderer for MarkdownHtml {
    fn render(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut out, MdParser::new(source));
        out.truncate(out.trim_end().len());
        out
    }
}

/// Markdown → plain terminal text
///
/// Emphasis markers are dropped, inline code keeps its content, links become
/// `text (url)` and list items get `-` or `n.` markers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownText;

impl MarkupRenderer for MarkdownText {
    fn render(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut links: Vec<String> = Vec::new();
        let mut lists: Vec<Option<u64>> = Vec::new();

        for event in MdParser::new(source) {
            match event {
                Event::Text(text) | Event::Code(text) => out.push_str(&text),
                Event::Html(raw) | Event::InlineHtml(raw) => out.push_str(&raw),
                Event::SoftBreak => out.push(' '),
                Event::HardBreak => out.push('\n'),
                Event::Rule => {
                    end_block(&mut out);
                    out.push_str("---\n\n");
                }
                Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url.into_string()),
                Event::End(TagEnd::Link) => {
                    if let Some(url) = links.pop() {
                        if !url.is_empty() {
                            out.push_str(" (");
                            out.push_str(&url);
                            out.push(')');
                        }
                    }
                }
                Event::Start(Tag::List(start)) => {
                    if lists.is_empty() {
                        end_block(&mut out);
                    }
                    lists.push(start);
                }
                Event::End(TagEnd::List(_)) => {
                    lists.pop();
                    if lists.is_empty() {
                        end_block(&mut out);
                    }
                }
                Event::Start(Tag::Item) => {
                    start_line(&mut out);
                    let depth = lists.len().saturating_sub(1);
                    out.push_str(&"  ".repeat(depth));
                    match lists.last_mut() {
                        Some(Some(n)) => {
                            out.push_str(&format!("{n}. "));
                            *n += 1;
                        }
                        _ => out.push_str("- "),
                    }
                }
                Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                    if lists.is_empty() {
                        end_block(&mut out);
                    }
                }
                _ => {}
            }
        }

        out.truncate(out.trim_end().len());
        out
    }
}

/// Move to the start of a fresh line
fn start_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Terminate the current block with a blank line
fn end_block(out: &mut String) {
    if out.is_empty() {
        return;
    }
    while !out.ends_with("\n\n") {
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_renders_inline_markup() {
        let rendered = MarkdownHtml.render("**Bold** and *em*");
        assert_eq!(rendered, "<p><strong>Bold</strong> and <em>em</em></p>");
    }

    #[test]
    fn html_passes_raw_html_through() {
        let rendered = MarkdownHtml.render("<b>raw</b>");
        assert!(rendered.contains("<b>raw</b>"));
    }

    #[test]
    fn text_drops_emphasis_markers() {
        assert_eq!(MarkdownText.render("**Bold** and *em*"), "Bold and em");
    }

    #[test]
    fn text_keeps_link_targets() {
        assert_eq!(
            MarkdownText.render("See [the guide](https://example.com/guide)."),
            "See the guide (https://example.com/guide)."
        );
    }

    #[test]
    fn text_keeps_inline_code_content() {
        assert_eq!(MarkdownText.render("Run `cargo test` first"), "Run cargo test first");
    }

    #[test]
    fn text_separates_paragraphs() {
        assert_eq!(MarkdownText.render("first\n\nsecond"), "first\n\nsecond");
    }

    #[test]
    fn text_renders_lists() {
        assert_eq!(MarkdownText.render("- one\n- two"), "- one\n- two");
        assert_eq!(MarkdownText.render("1. one\n2. two"), "1. one\n2. two");
    }

    #[test]
    fn text_empty_input() {
        assert_eq!(MarkdownText.render(""), "");
        assert_eq!(MarkdownHtml.render(""), "");
    }

    #[test]
    fn closures_are_renderers() {
        let upper = |s: &str| s.to_uppercase();
        assert_eq!(upper.render("abc"), "ABC");
    }
}
