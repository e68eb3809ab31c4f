//! postrender: rich-text segmentation and rendering for social-media posts
//!
//! Turns a post's structured content blocks (offset-based style and entity
//! ranges) or its unstructured plain text into an ordered sequence of
//! semantic blocks with stable anchor ids.
//!
//! # Design Principles
//! - Pure and synchronous: identical input gives identical output
//! - Never fails on malformed content: ranges clamp, bad entities drop
//! - Single linear passes: flattening, grouping and reflow are O(n)
//! - Output markup is pre-escaped; only http/https URLs become links

pub mod block;
pub mod document;
pub mod entity;
pub mod error;
pub mod escape;
pub mod inline;
pub mod limits;
pub mod plain;
pub mod post;
pub mod range;
pub mod render;

// Re-export primary types
pub use block::{BlockType, ContentBlock, EntityKey, EntityRange, InlineStyle, InlineStyleRange};
pub use document::{AnchorId, Block, Document, Section};
pub use entity::{ContentEntity, EntityMap};
pub use error::{Error, Result};
pub use plain::{DefaultHeuristics, Heading, ReflowThresholds, StyleMode, TextHeuristics};
pub use post::{parse_post, PostContent};
pub use range::Range;
pub use render::HtmlWriter;

use serde::{Deserialize, Serialize};

/// Unit in which range offsets and lengths are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OffsetUnit {
    /// UTF-16 code units, as emitted by the platform.
    #[default]
    Utf16,
    /// Unicode scalar values.
    Char,
}

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Unit of range offsets.
    pub offset_unit: OffsetUnit,
    /// Link bare URLs, mentions and hashtags in unattributed text.
    pub linkify: bool,
    /// Detect headings in article-mode plain text.
    pub detect_headings: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            offset_unit: OffsetUnit::Utf16,
            linkify: true,
            detect_headings: true,
        }
    }
}

/// Render structured content blocks.
///
/// # Example
/// ```
/// use postrender::{BlockType, ContentBlock, EntityMap, InlineStyle, Options};
///
/// let blocks = [ContentBlock::new(BlockType::HeaderOne, "Hello").with_style(0, 5, InlineStyle::Bold)];
/// let doc = postrender::render_blocks(&blocks, &EntityMap::new(), &Options::default());
/// assert_eq!(doc.to_html(), "<h1 id=\"section-block-0\"><strong>Hello</strong></h1>\n");
/// ```
pub fn render_blocks(blocks: &[ContentBlock], entities: &EntityMap, options: &Options) -> Document {
    document::assemble_blocks(blocks, entities, options)
}

/// Render plain text with the built-in heuristics.
///
/// # Example
/// ```
/// use postrender::{Options, StyleMode};
///
/// let doc = postrender::render_text("Para1\n\nPara2", StyleMode::Tweet, &Options::default());
/// assert_eq!(doc.len(), 2);
/// ```
pub fn render_text(text: &str, mode: StyleMode, options: &Options) -> Document {
    render_text_with(text, mode, &DefaultHeuristics::default(), options)
}

/// Render plain text with custom heuristics.
pub fn render_text_with(
    text: &str,
    mode: StyleMode,
    heuristics: &dyn TextHeuristics,
    options: &Options,
) -> Document {
    document::assemble_text(text, mode, heuristics, options)
}

/// Render a decoded post, structured or plain.
pub fn render_post(post: &PostContent, options: &Options) -> Document {
    if post.is_structured() {
        render_blocks(&post.blocks, &post.entity_map, options)
    } else {
        render_text(&post.text, post.mode, options)
    }
}

/// Serialize a document to an HTML fragment.
pub fn to_html(document: &Document) -> String {
    document.to_html()
}
