//! Inline markup for block text.
//!
//! Two phases:
//! 1. Flattening: style and entity ranges become attributed segments
//! 2. Emission: each segment is escaped, linkified when it has no entity,
//!    and wrapped as `<a>` outside `<em>` outside `<strong>`

pub mod flatten;
mod linkify;

pub use flatten::{flags, flatten, unit_len, Segment};
pub use linkify::{linkify, linkify_into};

use crate::block::{ContentBlock, EntityKey};
use crate::entity::{ContentEntity, EntityMap};
use crate::escape::{escape_text_into, sanitize_url};
use crate::render::HtmlWriter;
use crate::Options;

/// Inline renderer state.
///
/// Holds a scratch buffer reused across segments and blocks.
#[derive(Debug, Default)]
pub struct InlineRenderer {
    escaped: String,
}

impl InlineRenderer {
    /// Create a new inline renderer.
    pub fn new() -> Self {
        Self {
            escaped: String::with_capacity(128),
        }
    }

    /// Render a block's text with its style and entity ranges.
    pub fn render_block(&mut self, block: &ContentBlock, entities: &EntityMap, options: &Options) -> String {
        let mut w = HtmlWriter::with_capacity_for(block.text.len());
        self.render_block_into(&mut w, block, entities, options);
        w.into_string()
    }

    /// Render a block's text into `w`.
    pub fn render_block_into(
        &mut self,
        w: &mut HtmlWriter,
        block: &ContentBlock,
        entities: &EntityMap,
        options: &Options,
    ) {
        let segments = flatten(
            &block.text,
            &block.inline_style_ranges,
            &block.entity_ranges,
            options.offset_unit,
        );
        for segment in &segments {
            self.render_segment(w, segment, entities, options);
        }
    }

    /// Render unattributed text, turning single newlines into `<br />`.
    pub fn render_plain(&mut self, text: &str, options: &Options) -> String {
        let mut w = HtmlWriter::with_capacity_for(text.len());
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                w.line_break();
            }
            self.write_unattributed(&mut w, line, options);
        }
        w.into_string()
    }

    fn render_segment(&mut self, w: &mut HtmlWriter, segment: &Segment<'_>, entities: &EntityMap, options: &Options) {
        let href = segment.entity.and_then(|key| link_href(key, entities));

        if let Some(href) = href {
            w.link_start(href);
        }
        if segment.is_italic() {
            w.em_start();
        }
        if segment.is_bold() {
            w.strong_start();
        }

        if segment.entity.is_some() {
            w.write_escaped_text(segment.text);
        } else {
            self.write_unattributed(w, segment.text, options);
        }

        if segment.is_bold() {
            w.strong_end();
        }
        if segment.is_italic() {
            w.em_end();
        }
        if href.is_some() {
            w.link_end();
        }
    }

    fn write_unattributed(&mut self, w: &mut HtmlWriter, text: &str, options: &Options) {
        if !options.linkify {
            w.write_escaped_text(text);
            return;
        }
        self.escaped.clear();
        escape_text_into(&mut self.escaped, text);
        linkify_into(w, &self.escaped);
    }
}

/// Target of a segment's entity, if it is a link with a usable URL.
fn link_href<'e>(key: &EntityKey, entities: &'e EntityMap) -> Option<&'e str> {
    match entities.get(key) {
        Some(ContentEntity::Link { url }) => {
            let href = sanitize_url(url);
            if href.is_none() {
                log::debug!("dropping link with unusable url {url:?}");
            }
            href
        }
        Some(_) => None,
        None => {
            log::trace!("inline range references missing entity {:?}", key.as_str());
            None
        }
    }
}

/// Render a block's inline markup with a fresh renderer.
///
/// # Example
/// ```
/// use postrender::block::{BlockType, ContentBlock, InlineStyle};
/// use postrender::{inline, EntityMap, Options};
///
/// let block = ContentBlock::new(BlockType::Unstyled, "hi there").with_style(0, 2, InlineStyle::Bold);
/// let html = inline::render_block(&block, &EntityMap::new(), &Options::default());
/// assert_eq!(html, "<strong>hi</strong> there");
/// ```
pub fn render_block(block: &ContentBlock, entities: &EntityMap, options: &Options) -> String {
    InlineRenderer::new().render_block(block, entities, options)
}
