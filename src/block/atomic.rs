//! Resolution of `atomic` blocks through their entities.

use crate::block::ContentBlock;
use crate::document::Block;
use crate::entity::{ContentEntity, EntityMap};
use crate::escape::{escape_text, sanitize_url};

/// Resolve an atomic block to its single rendering instruction.
///
/// Entity ranges are tried in order and the first entity with a supported
/// type and usable data wins. Returns `None` when nothing resolves; the
/// caller omits the block.
pub fn resolve_atomic(block: &ContentBlock, entities: &EntityMap) -> Option<Block> {
    for range in &block.entity_ranges {
        let Some(entity) = entities.get(&range.key) else {
            log::trace!("atomic block references missing entity {:?}", range.key.as_str());
            continue;
        };

        match entity {
            ContentEntity::Media { image_url, alt } => match sanitize_url(image_url) {
                Some(url) => {
                    return Some(Block::Image {
                        url: url.to_owned(),
                        alt: alt.clone(),
                    });
                }
                None => log::debug!("skipping media entity with unusable url {image_url:?}"),
            },
            ContentEntity::Markdown { markdown } if !markdown.trim().is_empty() => {
                let fence = strip_fence(markdown);
                return Some(Block::CodeBlock {
                    code: escape_text(fence.code),
                    language: fence.language.map(str::to_owned),
                });
            }
            ContentEntity::Divider => return Some(Block::Divider),
            ContentEntity::Markdown { .. } => {}
            ContentEntity::Link { .. } => {}
            ContentEntity::Unsupported { kind } => {
                log::trace!("ignoring unsupported entity type {kind:?} in atomic block");
            }
        }
    }
    None
}

/// Body of a fenced snippet with its optional language tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence<'a> {
    pub language: Option<&'a str>,
    pub code: &'a str,
}

/// Strip a leading ```` ```lang ```` line and a trailing ```` ``` ````.
///
/// Text without fence markers is returned trimmed and untagged.
pub fn strip_fence(markdown: &str) -> Fence<'_> {
    let mut body = markdown.trim();
    let mut language = None;

    if let Some(rest) = body.strip_prefix("```") {
        let tag_len = rest.find(|c: char| !is_language_char(c)).unwrap_or(rest.len());
        if tag_len > 0 {
            language = Some(&rest[..tag_len]);
        }
        body = rest[tag_len..].trim_start_matches([' ', '\t']);
        body = body
            .strip_prefix("\r\n")
            .or_else(|| body.strip_prefix('\n'))
            .unwrap_or(body);
    }

    if let Some(rest) = body.strip_suffix("```") {
        body = rest.trim_end_matches([' ', '\t', '\r', '\n']);
    }

    Fence { language, code: body }
}

#[inline]
fn is_language_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.' | '#')
}
