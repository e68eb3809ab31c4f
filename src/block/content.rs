//! Structured content blocks as delivered by the ingestion pipeline.
//!
//! Decoding is lenient: missing fields take defaults, unknown or non-string
//! block types decode as [`BlockType::Unknown`], malformed list entries are
//! dropped, and range numbers accept integers, floats, numeric strings or
//! `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Kind of a structured block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    #[default]
    Unstyled,
    HeaderOne,
    HeaderTwo,
    HeaderThree,
    Blockquote,
    CodeBlock,
    UnorderedListItem,
    OrderedListItem,
    Atomic,
    /// Any type this crate does not know; rendered as a body paragraph.
    #[serde(other)]
    Unknown,
}

/// List flavour of a list-item block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl BlockType {
    /// List kind for list-item blocks, `None` for everything else.
    #[inline]
    pub fn list_kind(self) -> Option<ListKind> {
        match self {
            Self::UnorderedListItem => Some(ListKind::Unordered),
            Self::OrderedListItem => Some(ListKind::Ordered),
            _ => None,
        }
    }

    /// Heading level (1-3) for header blocks.
    #[inline]
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::HeaderOne => Some(1),
            Self::HeaderTwo => Some(2),
            Self::HeaderThree => Some(3),
            _ => None,
        }
    }
}

/// Inline style carried by a style range. Matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InlineStyle {
    Bold,
    Italic,
    /// Styles the renderer ignores (`UNDERLINE`, `CODE`, ...).
    #[default]
    Other,
}

impl InlineStyle {
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("bold") {
            Self::Bold
        } else if name.eq_ignore_ascii_case("italic") {
            Self::Italic
        } else {
            Self::Other
        }
    }
}

impl<'de> Deserialize<'de> for InlineStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map_or(Self::Other, Self::parse))
    }
}

impl Serialize for InlineStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Other => "OTHER",
        })
    }
}

/// Key referencing an entry in the entity map.
///
/// Integer and string keys normalize to the same form, so `0` and `"0"`
/// name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.trim().to_owned()),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Self(i.to_string()),
                (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => Self((f as i64).to_string()),
                _ => Self(n.to_string()),
            },
            _ => Self::default(),
        }
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<u32> for EntityKey {
    fn from(key: u32) -> Self {
        Self(key.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// `{offset, length, style}` span over a block's text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct InlineStyleRange {
    #[serde(default, deserialize_with = "lenient_int")]
    pub offset: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub length: i64,
    #[serde(default)]
    pub style: InlineStyle,
}

/// `{offset, length, key}` span referencing an entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntityRange {
    #[serde(default, deserialize_with = "lenient_int")]
    pub offset: i64,
    #[serde(default, deserialize_with = "lenient_int")]
    pub length: i64,
    #[serde(default)]
    pub key: EntityKey,
}

/// One structural unit of a rich document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    #[serde(rename = "type", default, deserialize_with = "lenient_block_type")]
    pub kind: BlockType,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub inline_style_ranges: Vec<InlineStyleRange>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub entity_ranges: Vec<EntityRange>,
}

impl ContentBlock {
    pub fn new(kind: BlockType, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Append a style range.
    pub fn with_style(mut self, offset: i64, length: i64, style: InlineStyle) -> Self {
        self.inline_style_ranges.push(InlineStyleRange { offset, length, style });
        self
    }

    /// Append an entity range.
    pub fn with_entity(mut self, offset: i64, length: i64, key: impl Into<EntityKey>) -> Self {
        self.entity_ranges.push(EntityRange {
            offset,
            length,
            key: key.into(),
        });
        self
    }

    /// True when the text is empty or whitespace only.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_block_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BlockType, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(_) => serde_json::from_value(value).unwrap_or(BlockType::Unknown),
        _ => BlockType::Unknown,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Decode a list, dropping entries that fail to decode and treating any
/// non-array as empty.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::debug!("dropping malformed entry: {err}");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_type_names() {
        let kinds: Vec<BlockType> = serde_json::from_str(
            r#"["unstyled","header-one","header-two","header-three","blockquote",
                "code-block","unordered-list-item","ordered-list-item","atomic","section"]"#,
        )
        .unwrap();
        assert_eq!(
            kinds,
            vec![
                BlockType::Unstyled,
                BlockType::HeaderOne,
                BlockType::HeaderTwo,
                BlockType::HeaderThree,
                BlockType::Blockquote,
                BlockType::CodeBlock,
                BlockType::UnorderedListItem,
                BlockType::OrderedListItem,
                BlockType::Atomic,
                BlockType::Unknown,
            ]
        );
    }

    #[test]
    fn test_non_string_block_type_is_unknown() {
        let blocks: Vec<ContentBlock> = serde_json::from_str(
            r#"[{"type": null, "text": "a"}, {"type": 3, "text": "b"}, {"type": ["x"], "text": "c"}]"#,
        )
        .unwrap();
        assert!(blocks.iter().all(|b| b.kind == BlockType::Unknown));
        assert_eq!(blocks[2].text, "c");
    }

    #[test]
    fn test_style_case_insensitive() {
        let styles: Vec<InlineStyle> =
            serde_json::from_str(r#"["BOLD","bold","Italic","UNDERLINE",null]"#).unwrap();
        assert_eq!(
            styles,
            vec![
                InlineStyle::Bold,
                InlineStyle::Bold,
                InlineStyle::Italic,
                InlineStyle::Other,
                InlineStyle::Other,
            ]
        );
    }

    #[test]
    fn test_entity_key_normalizes() {
        let keys: Vec<EntityKey> = serde_json::from_str(r#"[0, "0", 3.0, " 7 "]"#).unwrap();
        assert_eq!(keys[0], keys[1]);
        assert_eq!(keys[2].as_str(), "3");
        assert_eq!(keys[3].as_str(), "7");
    }

    #[test]
    fn test_block_decodes_with_defaults() {
        let block: ContentBlock = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(block.kind, BlockType::Unstyled);
        assert!(block.inline_style_ranges.is_empty());
        assert!(block.entity_ranges.is_empty());
    }

    #[test]
    fn test_block_lenient_ranges() {
        let block: ContentBlock = serde_json::from_str(
            r#"{
                "type": "unstyled",
                "text": null,
                "inlineStyleRanges": [
                    {"offset": "2", "length": 3.7, "style": "BOLD"},
                    "garbage"
                ],
                "entityRanges": {"not": "a list"}
            }"#,
        )
        .unwrap();
        assert_eq!(block.text, "");
        assert_eq!(block.inline_style_ranges.len(), 1);
        assert_eq!(block.inline_style_ranges[0].offset, 2);
        assert_eq!(block.inline_style_ranges[0].length, 3);
        assert!(block.entity_ranges.is_empty());
    }

    #[test]
    fn test_builder_helpers() {
        let block = ContentBlock::new(BlockType::Unstyled, "hello")
            .with_style(0, 2, InlineStyle::Bold)
            .with_entity(1, 2, 4);
        assert_eq!(block.inline_style_ranges.len(), 1);
        assert_eq!(block.entity_ranges[0].key.as_str(), "4");
    }

    #[test]
    fn test_list_kind_and_level() {
        assert_eq!(BlockType::OrderedListItem.list_kind(), Some(ListKind::Ordered));
        assert_eq!(BlockType::Atomic.list_kind(), None);
        assert_eq!(BlockType::HeaderThree.heading_level(), Some(3));
        assert_eq!(BlockType::Blockquote.heading_level(), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(ContentBlock::new(BlockType::Unstyled, " \t ").is_blank());
        assert!(!ContentBlock::new(BlockType::Unstyled, " x ").is_blank());
    }
}
