//! Draft.js raw content types.
//!
//! These mirror `RawDraftContentState` closely enough to deserialize the
//! JSON Draft.js produces with `convertToRaw`. Fields the converter has no
//! use for (`depth`, `data`, entity `mutability` beyond pass-through) are
//! tolerated and ignored.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::error::ConvertError;
use crate::overlay::OffsetRange;

/// Key used by entity ranges to point into the entity map.
pub type EntityKey = u64;

/// Entity map keyed by entity key. JSON object keys ("0", "1", ...) are
/// parsed as integers.
pub type EntityMap = BTreeMap<EntityKey, Entity>;

/// A whole Draft.js document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub blocks: Vec<SourceBlock>,
    pub entity_map: EntityMap,
}

impl SourceDocument {
    /// Check the gross shape of a JSON document, then deserialize it.
    ///
    /// `blocks` must be an array and `entityMap` must be an object. Anything
    /// else fails with an error naming the offending field before any field
    /// level deserialization happens.
    pub fn from_value(value: Value) -> Result<Self, ConvertError> {
        if !value.get("blocks").is_some_and(Value::is_array) {
            return Err(ConvertError::InvalidBlocks);
        }
        if !value.get("entityMap").is_some_and(Value::is_object) {
            return Err(ConvertError::InvalidEntityMap);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parse JSON text and validate it like [`SourceDocument::from_value`].
    pub fn from_json_str(json: &str) -> Result<Self, ConvertError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }
}

/// One Draft.js content block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBlock {
    /// Draft block key, used only in diagnostics.
    #[serde(default)]
    pub key: Option<SmolStr>,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub inline_style_ranges: Vec<StyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,
}

impl SourceBlock {
    pub fn new(block_type: impl Into<BlockType>, text: impl Into<String>) -> Self {
        Self {
            key: None,
            block_type: block_type.into(),
            text: text.into(),
            inline_style_ranges: Vec::new(),
            entity_ranges: Vec::new(),
        }
    }

    pub fn with_style(mut self, offset: usize, length: usize, style: &str) -> Self {
        self.inline_style_ranges.push(StyleRange {
            offset,
            length,
            style: style.into(),
        });
        self
    }

    pub fn with_entity(mut self, offset: usize, length: usize, key: EntityKey) -> Self {
        self.entity_ranges.push(EntityRange {
            offset,
            length,
            key,
        });
        self
    }
}

/// Block type tag, closed over the natively supported kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockType {
    /// `header-one` .. `header-six`, carrying the level 1..=6.
    Heading(u8),
    Paragraph,
    Unstyled,
    /// `unordered-list-item` or `ordered-list-item`.
    ListItem(ListKind),
    Blockquote,
    CodeBlock,
    /// Any tag outside the fixed table, kept verbatim.
    Unknown(SmolStr),
}

const HEADING_TAGS: [&str; 6] = [
    "header-one",
    "header-two",
    "header-three",
    "header-four",
    "header-five",
    "header-six",
];

impl BlockType {
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Heading(level) => HEADING_TAGS
                .get(usize::from(*level).wrapping_sub(1))
                .copied()
                .unwrap_or("header-one"),
            BlockType::Paragraph => "paragraph",
            BlockType::Unstyled => "unstyled",
            BlockType::ListItem(ListKind::Bullet) => "unordered-list-item",
            BlockType::ListItem(ListKind::Ordered) => "ordered-list-item",
            BlockType::Blockquote => "blockquote",
            BlockType::CodeBlock => "code-block",
            BlockType::Unknown(tag) => tag.as_str(),
        }
    }

    /// List kind for list-item block types.
    pub fn list_kind(&self) -> Option<ListKind> {
        match self {
            BlockType::ListItem(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        if let Some(idx) = HEADING_TAGS.iter().position(|h| *h == tag) {
            return BlockType::Heading(idx as u8 + 1);
        }
        match tag {
            "paragraph" => BlockType::Paragraph,
            "unstyled" => BlockType::Unstyled,
            "unordered-list-item" => BlockType::ListItem(ListKind::Bullet),
            "ordered-list-item" => BlockType::ListItem(ListKind::Ordered),
            "blockquote" => BlockType::Blockquote,
            "code-block" => BlockType::CodeBlock,
            other => BlockType::Unknown(SmolStr::new(other)),
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BlockType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = SmolStr::deserialize(deserializer)?;
        Ok(BlockType::from(tag.as_str()))
    }
}

impl Serialize for BlockType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The two list flavours that get grouped into containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Bullet,
    Ordered,
}

impl ListKind {
    /// The block type whose consecutive runs form this list.
    pub fn item_type(self) -> BlockType {
        BlockType::ListItem(self)
    }
}

/// Inline style range, e.g. `{ offset: 1, length: 4, style: "BOLD" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: SmolStr,
}

impl OffsetRange for StyleRange {
    fn offset(&self) -> usize {
        self.offset
    }

    fn length(&self) -> usize {
        self.length
    }
}

/// Entity range pointing at `entityMap[key]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    pub offset: usize,
    pub length: usize,
    pub key: EntityKey,
}

impl OffsetRange for EntityRange {
    fn offset(&self) -> usize {
        self.offset
    }

    fn length(&self) -> usize {
        self.length
    }
}

/// An entity from the entity map.
///
/// Deserialization never fails on entity contents: a known type with
/// unusable data becomes `Invalid`, which is only an error once a range
/// resolves to it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEntity")]
pub enum Entity {
    Link(LinkEntity),
    Mention(MentionEntity),
    /// Any other entity type (`IMAGE`, `EMBED`, custom plugin types, ...).
    Other(RawEntity),
    /// A `LINK` or `mention` whose data doesn't have the expected shape.
    Invalid { raw: RawEntity, reason: String },
}

impl Entity {
    pub fn link(url: impl Into<String>) -> Self {
        Entity::Link(LinkEntity { url: url.into() })
    }

    pub fn mention(data: Map<String, Value>) -> Self {
        Entity::Mention(MentionEntity { data })
    }

    /// The Draft.js `type` tag of this entity.
    pub fn entity_type(&self) -> &str {
        match self {
            Entity::Link(_) => LINK_TYPE,
            Entity::Mention(_) => MENTION_TYPE,
            Entity::Other(raw) | Entity::Invalid { raw, .. } => &raw.entity_type,
        }
    }
}

const LINK_TYPE: &str = "LINK";
const MENTION_TYPE: &str = "mention";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntity {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MentionEntity {
    pub data: Map<String, Value>,
}

impl MentionEntity {
    /// Build `{ id, label }` mention attrs from two named data fields.
    ///
    /// Missing fields become `null`, matching what the Tiptap mention
    /// extension expects for absent attributes.
    pub fn attrs_from_fields(&self, id_field: &str, label_field: &str) -> Map<String, Value> {
        let mut attrs = Map::new();
        attrs.insert(
            "id".into(),
            self.data.get(id_field).cloned().unwrap_or(Value::Null),
        );
        attrs.insert(
            "label".into(),
            self.data.get(label_field).cloned().unwrap_or(Value::Null),
        );
        attrs
    }
}

/// Entity exactly as it appears in the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutability: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl From<RawEntity> for Entity {
    fn from(raw: RawEntity) -> Self {
        let invalid = |raw, reason: &str| Entity::Invalid {
            raw,
            reason: reason.to_string(),
        };
        match raw.entity_type.as_str() {
            LINK_TYPE => match raw.data.get("url").and_then(Value::as_str) {
                Some(url) => Entity::link(url),
                None => invalid(raw, "LINK entity is missing a string `data.url`"),
            },
            MENTION_TYPE => match raw.data {
                Value::Object(data) => Entity::mention(data),
                Value::Null => Entity::mention(Map::new()),
                _ => invalid(raw, "mention entity `data` must be an object"),
            },
            _ => Entity::Other(raw),
        }
    }
}
