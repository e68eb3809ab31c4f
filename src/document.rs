//! Output block sequence and its assembly.
//!
//! Every top-level output is a [`Section`] carrying a positional anchor id:
//! `section-block-{group}` on the structured path, `section-article-{n}` on
//! the plain-text path.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::block::{group_blocks, resolve_atomic, BlockGroup, BlockType, ContentBlock, ListItems};
use crate::entity::EntityMap;
use crate::inline::InlineRenderer;
use crate::plain::{normalize_newlines, StyleMode, TextHeuristics};
use crate::render::HtmlWriter;
use crate::Options;

/// Stable, position-derived identifier for scroll navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AnchorId(String);

impl AnchorId {
    /// Anchor of the structured group at `index`.
    pub fn block(index: usize) -> Self {
        Self(format!("section-block-{index}"))
    }

    /// Anchor of the plain-text output at `index`.
    pub fn article(index: usize) -> Self {
        Self(format!("section-article-{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnchorId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for AnchorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One rendering instruction.
///
/// Text-bearing variants carry pre-escaped, pre-linkified markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Block {
    Paragraph { html: String },
    Heading { level: u8, html: String, anchor_id: AnchorId },
    List { ordered: bool, items: Vec<String> },
    Image { url: String, alt: String },
    CodeBlock { code: String, language: Option<String> },
    Divider,
    Blockquote { html: String },
    Spacer,
}

/// A top-level output with its anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub anchor: AnchorId,
    pub block: Block,
}

/// Ordered rendering instructions for one post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Anchors in document order.
    pub fn anchors(&self) -> impl Iterator<Item = &AnchorId> {
        self.sections.iter().map(|s| &s.anchor)
    }

    /// Serialize to an HTML fragment.
    pub fn to_html(&self) -> String {
        let mut writer = HtmlWriter::new();
        writer.write_document(self);
        writer.into_string()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Assemble structured blocks.
///
/// Each group gets the anchor of its index; an atomic group that resolves to
/// nothing is omitted but still consumes its index.
pub fn assemble_blocks(blocks: &[ContentBlock], entities: &EntityMap, options: &Options) -> Document {
    let mut inline = InlineRenderer::new();
    let groups = group_blocks(blocks);
    let mut sections = Vec::with_capacity(groups.len());

    for (index, group) in groups.iter().enumerate() {
        let block = match group {
            BlockGroup::UnorderedList(items) => Some(list(&mut inline, false, items, entities, options)),
            BlockGroup::OrderedList(items) => Some(list(&mut inline, true, items, entities, options)),
            BlockGroup::Single(block) => single(&mut inline, block, index, entities, options),
        };
        match block {
            Some(block) => sections.push(Section {
                anchor: AnchorId::block(index),
                block,
            }),
            None => log::debug!("omitting unresolved atomic block at group {index}"),
        }
    }

    Document { sections }
}

fn list(
    inline: &mut InlineRenderer,
    ordered: bool,
    items: &ListItems<'_>,
    entities: &EntityMap,
    options: &Options,
) -> Block {
    Block::List {
        ordered,
        items: items
            .iter()
            .map(|item| inline.render_block(item, entities, options))
            .collect(),
    }
}

fn single(
    inline: &mut InlineRenderer,
    block: &ContentBlock,
    index: usize,
    entities: &EntityMap,
    options: &Options,
) -> Option<Block> {
    if block.kind == BlockType::Atomic {
        return resolve_atomic(block, entities);
    }
    if block.is_blank() {
        return Some(Block::Spacer);
    }

    let html = inline.render_block(block, entities, options);
    Some(match block.kind {
        BlockType::HeaderOne | BlockType::HeaderTwo | BlockType::HeaderThree => Block::Heading {
            level: block.kind.heading_level().unwrap_or(2),
            html,
            anchor_id: AnchorId::block(index),
        },
        BlockType::Blockquote => Block::Blockquote { html },
        BlockType::CodeBlock => Block::CodeBlock { code: html, language: None },
        BlockType::UnorderedListItem | BlockType::OrderedListItem => Block::List {
            ordered: block.kind == BlockType::OrderedListItem,
            items: vec![html],
        },
        BlockType::Unstyled | BlockType::Atomic | BlockType::Unknown => Block::Paragraph { html },
    })
}

/// Assemble unstructured text.
///
/// Headings are only emitted in article mode with heading detection on. The
/// text is cut at each heading line, and the spans between headings are
/// paragraphized on their own, so reflow never swallows a heading.
pub fn assemble_text(
    text: &str,
    mode: StyleMode,
    heuristics: &dyn TextHeuristics,
    options: &Options,
) -> Document {
    let headings = if mode == StyleMode::Article && options.detect_headings {
        heuristics.headings(text)
    } else {
        Vec::new()
    };

    let mut inline = InlineRenderer::new();
    let mut sections = Vec::new();

    if headings.is_empty() {
        push_paragraphs(&mut sections, &mut inline, heuristics.paragraphs(text, mode), options);
        return Document { sections };
    }

    let heading_lines: FxHashSet<usize> = headings.iter().map(|h| h.line_index).collect();
    let normalized = normalize_newlines(text);
    let mut span = String::new();
    let mut line_index = 0;

    for line in normalized.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            span.push('\n');
            continue;
        }

        if heading_lines.contains(&line_index) {
            flush_span(&mut sections, &mut inline, &mut span, mode, heuristics, options);
            let html = inline.render_plain(trimmed, options);
            push_article(&mut sections, |anchor| Block::Heading {
                level: 2,
                html,
                anchor_id: anchor.clone(),
            });
        } else {
            span.push_str(line);
            span.push('\n');
        }
        line_index += 1;
    }
    flush_span(&mut sections, &mut inline, &mut span, mode, heuristics, options);

    Document { sections }
}

fn flush_span(
    sections: &mut Vec<Section>,
    inline: &mut InlineRenderer,
    span: &mut String,
    mode: StyleMode,
    heuristics: &dyn TextHeuristics,
    options: &Options,
) {
    if !span.trim().is_empty() {
        push_paragraphs(sections, inline, heuristics.paragraphs(span, mode), options);
    }
    span.clear();
}

fn push_paragraphs(
    sections: &mut Vec<Section>,
    inline: &mut InlineRenderer,
    paragraphs: Vec<String>,
    options: &Options,
) {
    for paragraph in paragraphs {
        let html = inline.render_plain(&paragraph, options);
        push_article(sections, |_| Block::Paragraph { html });
    }
}

fn push_article(sections: &mut Vec<Section>, make: impl FnOnce(&AnchorId) -> Block) {
    let anchor = AnchorId::article(sections.len());
    let block = make(&anchor);
    sections.push(Section { anchor, block });
}
