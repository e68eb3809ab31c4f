//! HTML output writer.
//!
//! Inline markup for every text-bearing block is built through this writer,
//! and [`HtmlWriter::write_document`] serializes a whole [`Document`] to an
//! HTML fragment for previews and the CLI.

use crate::document::{Block, Document, Section};
use crate::escape;

/// Attributes every emitted link carries.
const EXTERNAL_LINK_ATTRS: &str = "\" target=\"_blank\" rel=\"noopener noreferrer\">";

/// HTML output writer with a reusable buffer.
///
/// # Example
/// ```
/// use postrender::HtmlWriter;
///
/// let mut writer = HtmlWriter::new();
/// writer.strong_start();
/// writer.write_escaped_text("Hello <World>");
/// writer.strong_end();
///
/// assert_eq!(writer.into_string(), "<strong>Hello &lt;World&gt;</strong>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlWriter {
    out: String,
}

impl HtmlWriter {
    /// Create a new writer with default capacity.
    #[inline]
    pub fn new() -> Self {
        Self {
            out: String::with_capacity(256),
        }
    }

    /// Create with pre-allocated capacity based on expected input size.
    #[inline]
    pub fn with_capacity_for(input_len: usize) -> Self {
        Self {
            out: String::with_capacity(input_len + input_len / 4),
        }
    }

    /// Write a static string (tags, fixed attributes).
    #[inline]
    pub fn write_str(&mut self, s: &'static str) {
        self.out.push_str(s);
    }

    /// Write a dynamic string without escaping.
    ///
    /// Only for text that is already markup-safe.
    #[inline]
    pub fn write_string(&mut self, s: &str) {
        self.out.push_str(s);
    }

    /// Write text with HTML escaping (for text content).
    #[inline]
    pub fn write_escaped_text(&mut self, text: &str) {
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write a raw value escaped for a double-quoted attribute.
    #[inline]
    pub fn write_escaped_attr(&mut self, attr: &str) {
        escape::escape_attr_into(&mut self.out, attr);
    }

    #[inline]
    pub fn newline(&mut self) {
        self.out.push('\n');
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.out
    }

    // --- Inline markup ---

    #[inline]
    pub fn em_start(&mut self) {
        self.write_str("<em>");
    }

    #[inline]
    pub fn em_end(&mut self) {
        self.write_str("</em>");
    }

    #[inline]
    pub fn strong_start(&mut self) {
        self.write_str("<strong>");
    }

    #[inline]
    pub fn strong_end(&mut self) {
        self.write_str("</strong>");
    }

    /// Open an external link to a raw (unescaped) URL.
    ///
    /// The caller is responsible for having sanitized the scheme.
    #[inline]
    pub fn link_start(&mut self, url: &str) {
        self.write_str("<a href=\"");
        self.write_escaped_attr(url);
        self.write_str(EXTERNAL_LINK_ATTRS);
    }

    /// Open an external link whose href is already escaped text.
    #[inline]
    pub fn link_start_escaped(&mut self, href: &str) {
        self.write_str("<a href=\"");
        self.write_string(href);
        self.write_str(EXTERNAL_LINK_ATTRS);
    }

    #[inline]
    pub fn link_end(&mut self) {
        self.write_str("</a>");
    }

    /// Line break inside a paragraph: `<br />`
    #[inline]
    pub fn line_break(&mut self) {
        self.write_str("<br />");
    }

    // --- Block markup ---

    /// Write opening tag with an anchor id: `<tag id="...">`
    fn open_tag_with_id(&mut self, tag: &'static str, id: &str) {
        self.out.push('<');
        self.write_str(tag);
        self.write_str(" id=\"");
        self.write_escaped_attr(id);
        self.write_str("\">");
    }

    fn close_tag_nl(&mut self, tag: &'static str) {
        self.write_str("</");
        self.write_str(tag);
        self.write_str(">\n");
    }

    /// Write one section as a top-level element carrying its anchor id.
    pub fn write_section(&mut self, section: &Section) {
        let id = section.anchor.as_str();
        match &section.block {
            Block::Paragraph { html } => {
                self.open_tag_with_id("p", id);
                self.write_string(html);
                self.close_tag_nl("p");
            }
            Block::Heading { level, html, .. } => {
                let tag = heading_tag(*level);
                self.open_tag_with_id(tag, id);
                self.write_string(html);
                self.close_tag_nl(tag);
            }
            Block::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                self.open_tag_with_id(tag, id);
                self.newline();
                for item in items {
                    self.write_str("<li>");
                    self.write_string(item);
                    self.write_str("</li>\n");
                }
                self.close_tag_nl(tag);
            }
            Block::Image { url, alt } => {
                self.open_tag_with_id("figure", id);
                self.write_str("<img src=\"");
                self.write_escaped_attr(url);
                self.write_str("\" alt=\"");
                self.write_escaped_attr(alt);
                self.write_str("\" loading=\"lazy\" />");
                self.close_tag_nl("figure");
            }
            Block::CodeBlock { code, language } => {
                self.open_tag_with_id("pre", id);
                match language {
                    Some(lang) if !lang.is_empty() => {
                        self.write_str("<code class=\"language-");
                        self.write_escaped_attr(lang);
                        self.write_str("\">");
                    }
                    _ => self.write_str("<code>"),
                }
                self.write_string(code);
                self.write_str("</code>");
                self.close_tag_nl("pre");
            }
            Block::Divider => {
                self.write_str("<hr id=\"");
                self.write_escaped_attr(id);
                self.write_str("\" />\n");
            }
            Block::Blockquote { html } => {
                self.open_tag_with_id("blockquote", id);
                self.write_string(html);
                self.close_tag_nl("blockquote");
            }
            Block::Spacer => {
                self.write_str("<div id=\"");
                self.write_escaped_attr(id);
                self.write_str("\" class=\"spacer\" aria-hidden=\"true\"></div>\n");
            }
        }
    }

    /// Write every section of a document in order.
    pub fn write_document(&mut self, document: &Document) {
        for section in &document.sections {
            self.write_section(section);
        }
    }
}

fn heading_tag(level: u8) -> &'static str {
    match level {
        0 | 1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}
