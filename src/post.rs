//! The upstream post payload.

use serde::Deserialize;

use crate::block::ContentBlock;
use crate::entity::EntityMap;
use crate::error::Result;
use crate::plain::StyleMode;

/// A post as delivered upstream: structured blocks with their entities, or
/// plain text with a layout mode.
///
/// Every field is optional on the wire. Blocks that fail to decode are
/// dropped. An empty `blocks` list selects the plain-text path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostContent {
    #[serde(deserialize_with = "crate::block::lenient_vec")]
    pub blocks: Vec<ContentBlock>,
    #[serde(alias = "entity_map")]
    pub entity_map: EntityMap,
    pub text: String,
    pub mode: StyleMode,
}

impl PostContent {
    /// Structured post with no entities.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self {
            blocks,
            ..Self::default()
        }
    }

    /// Plain-text post.
    pub fn from_text(text: impl Into<String>, mode: StyleMode) -> Self {
        Self {
            text: text.into(),
            mode,
            ..Self::default()
        }
    }

    /// Whether the structured path applies.
    pub fn is_structured(&self) -> bool {
        !self.blocks.is_empty()
    }
}

/// Decode a post from JSON.
///
/// # Example
/// ```
/// let post = postrender::parse_post(r#"{"text": "hello", "mode": "article"}"#).unwrap();
/// assert!(!post.is_structured());
/// assert_eq!(post.mode, postrender::StyleMode::Article);
/// ```
pub fn parse_post(json: &str) -> Result<PostContent> {
    Ok(serde_json::from_str(json)?)
}
