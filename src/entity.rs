//! Content entities and the entity map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::block::EntityKey;

/// An out-of-line annotation referenced by entity ranges.
///
/// Decoding never fails: unknown types become [`ContentEntity::Unsupported`]
/// and missing data fields decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntity")]
pub enum ContentEntity {
    Link { url: String },
    Media { image_url: String, alt: String },
    Markdown { markdown: String },
    Divider,
    Unsupported { kind: String },
}

impl ContentEntity {
    pub fn link(url: impl Into<String>) -> Self {
        Self::Link { url: url.into() }
    }

    pub fn media(image_url: impl Into<String>) -> Self {
        Self::Media {
            image_url: image_url.into(),
            alt: String::new(),
        }
    }

    pub fn markdown(markdown: impl Into<String>) -> Self {
        Self::Markdown {
            markdown: markdown.into(),
        }
    }
}

/// Wire shape of an entity: `{"type": "LINK", "data": {...}}`.
#[derive(Deserialize)]
struct RawEntity {
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    data: Value,
}

impl From<RawEntity> for ContentEntity {
    fn from(raw: RawEntity) -> Self {
        let kind = raw.kind.as_str().unwrap_or_default().trim().to_ascii_uppercase();
        let field = |name: &str| -> String {
            raw.data
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned()
        };
        match kind.as_str() {
            "LINK" => Self::Link { url: field("url") },
            "MEDIA" | "IMAGE" => {
                let mut alt = field("alt");
                if alt.is_empty() {
                    alt = field("caption");
                }
                Self::Media {
                    image_url: field("imageUrl"),
                    alt,
                }
            }
            "MARKDOWN" => Self::Markdown {
                markdown: field("markdown"),
            },
            "DIVIDER" => Self::Divider,
            _ => Self::Unsupported { kind },
        }
    }
}

/// Entities keyed by [`EntityKey`].
///
/// Decodes from the object form `{"0": {...}}` and from the list form
/// `[{"key": 0, "value": {...}}]`. With duplicate keys the first definition
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct EntityMap {
    by_key: FxHashMap<EntityKey, ContentEntity>,
}

impl EntityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity if the key is new. First definition wins.
    pub fn insert(&mut self, key: impl Into<EntityKey>, entity: ContentEntity) {
        self.by_key.entry(key.into()).or_insert(entity);
    }

    /// Builder form of [`EntityMap::insert`].
    pub fn with(mut self, key: impl Into<EntityKey>, entity: ContentEntity) -> Self {
        self.insert(key, entity);
        self
    }

    pub fn get(&self, key: &EntityKey) -> Option<&ContentEntity> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[derive(Deserialize)]
struct KeyedEntity {
    #[serde(default)]
    key: EntityKey,
    value: ContentEntity,
}

impl From<Value> for EntityMap {
    fn from(raw: Value) -> Self {
        let mut map = EntityMap::new();
        match raw {
            Value::Object(entries) => {
                for (key, value) in entries {
                    match serde_json::from_value::<ContentEntity>(value) {
                        Ok(entity) => map.insert(EntityKey::new(key.trim()), entity),
                        Err(err) => log::debug!("dropping malformed entity {key:?}: {err}"),
                    }
                }
            }
            Value::Array(entries) => {
                for value in entries {
                    match serde_json::from_value::<KeyedEntity>(value) {
                        Ok(entry) => map.insert(entry.key, entry.value),
                        Err(err) => log::debug!("dropping malformed entity entry: {err}"),
                    }
                }
            }
            _ => {}
        }
        map
    }
}
