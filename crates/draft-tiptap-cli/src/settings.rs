//! Converter settings: an optional KDL file, overridden by command line flags.
//!
//! ```kdl
//! pretty true
//! mention id="id" label="name"
//! unknown-entities "drop"
//! unknown-blocks "paragraph"
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use draft_tiptap::{BlockNode, ConvertConfig, Entity, Mark};
use kdl::{KdlDocument, KdlNode, KdlValue};
use miette::Diagnostic;
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_MENTION_ID: &str = "id";
pub const DEFAULT_MENTION_LABEL: &str = "name";

#[derive(Debug, Error, Diagnostic)]
pub enum SettingsError {
    #[error("could not read settings file {}", path.display())]
    #[diagnostic(code(draft_tiptap::settings::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse settings file {}", path.display())]
    #[diagnostic(code(draft_tiptap::settings::parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: kdl::KdlError,
    },

    #[error("invalid `{setting}` in settings file {}: {reason}", path.display())]
    #[diagnostic(code(draft_tiptap::settings::value))]
    InvalidValue {
        path: PathBuf,
        setting: &'static str,
        reason: String,
    },
}

/// What to do with entities that have no native mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EntityPolicy {
    /// Fail the conversion.
    #[default]
    Error,
    /// Drop the entity, keeping the text it covers.
    Drop,
    /// Emit a mark named after the entity type.
    Mark,
}

impl FromStr for EntityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(EntityPolicy::Error),
            "drop" => Ok(EntityPolicy::Drop),
            "mark" => Ok(EntityPolicy::Mark),
            other => Err(format!(
                "unknown entity policy {other:?}, expected one of error, drop, mark"
            )),
        }
    }
}

/// What to do with block types outside the fixed table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BlockPolicy {
    /// Skip the block with a warning.
    #[default]
    Skip,
    /// Convert the block into a paragraph of its text.
    Paragraph,
}

impl FromStr for BlockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(BlockPolicy::Skip),
            "paragraph" => Ok(BlockPolicy::Paragraph),
            other => Err(format!(
                "unknown block policy {other:?}, expected one of skip, paragraph"
            )),
        }
    }
}

/// Mention data fields mapped onto the mention node's `id` and `label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionFields {
    pub id: String,
    pub label: String,
}

impl Default for MentionFields {
    fn default() -> Self {
        Self {
            id: DEFAULT_MENTION_ID.to_string(),
            label: DEFAULT_MENTION_LABEL.to_string(),
        }
    }
}

impl MentionFields {
    /// Fields from the two optional flags, or `None` when neither is given.
    /// A missing half falls back to its default.
    pub fn from_flags(id: Option<String>, label: Option<String>) -> Option<Self> {
        if id.is_none() && label.is_none() {
            return None;
        }
        let defaults = Self::default();
        Some(Self {
            id: id.unwrap_or(defaults.id),
            label: label.unwrap_or(defaults.label),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub pretty: bool,
    pub mention: Option<MentionFields>,
    pub unknown_entities: EntityPolicy,
    pub unknown_blocks: BlockPolicy,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parse KDL settings text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, SettingsError> {
        let doc: KdlDocument = text.parse().map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let invalid = |setting: &'static str, reason: String| SettingsError::InvalidValue {
            path: path.to_path_buf(),
            setting,
            reason,
        };

        let mut settings = Settings::default();

        if let Some(node) = doc.get("pretty") {
            settings.pretty = first_arg(node)
                .and_then(KdlValue::as_bool)
                .ok_or_else(|| invalid("pretty", "expected a boolean".to_string()))?;
        }

        if let Some(node) = doc.get("mention") {
            let defaults = MentionFields::default();
            let field = |name: &str| -> Result<Option<String>, SettingsError> {
                match property(node, name) {
                    None => Ok(None),
                    Some(value) => value
                        .as_string()
                        .map(|s| Some(s.to_string()))
                        .ok_or_else(|| invalid("mention", format!("`{name}` must be a string"))),
                }
            };
            settings.mention = Some(MentionFields {
                id: field("id")?.unwrap_or(defaults.id),
                label: field("label")?.unwrap_or(defaults.label),
            });
        }

        if let Some(node) = doc.get("unknown-entities") {
            settings.unknown_entities = string_arg(node)
                .ok_or_else(|| "expected a string".to_string())
                .and_then(str::parse)
                .map_err(|reason| invalid("unknown-entities", reason))?;
        }

        if let Some(node) = doc.get("unknown-blocks") {
            settings.unknown_blocks = string_arg(node)
                .ok_or_else(|| "expected a string".to_string())
                .and_then(str::parse)
                .map_err(|reason| invalid("unknown-blocks", reason))?;
        }

        Ok(settings)
    }

    /// Build the library configuration these settings describe.
    pub fn to_convert_config(&self) -> ConvertConfig {
        let mut config = ConvertConfig::new();

        if let Some(fields) = self.mention.clone() {
            config = config.with_mention_attrs(move |mention| {
                mention.attrs_from_fields(&fields.id, &fields.label)
            });
        }

        match self.unknown_entities {
            EntityPolicy::Error => {}
            EntityPolicy::Drop => config = config.with_unknown_mark_handler(|_| None),
            EntityPolicy::Mark => {
                config = config.with_unknown_mark_handler(|entity| {
                    Some(Mark::custom(
                        entity.entity_type().to_lowercase(),
                        entity_data(entity),
                    ))
                })
            }
        }

        if self.unknown_blocks == BlockPolicy::Paragraph {
            config = config.with_unknown_block_handler(|block, _, ctx| {
                Ok(Some(BlockNode::paragraph(ctx.inline_content(block)?)))
            });
        }

        config
    }
}

/// Entity data when it is an object.
fn entity_data(entity: &Entity) -> Option<Map<String, Value>> {
    match entity {
        Entity::Link(link) => {
            let mut data = Map::new();
            data.insert("url".into(), Value::String(link.url.clone()));
            Some(data)
        }
        Entity::Mention(mention) => Some(mention.data.clone()),
        Entity::Other(raw) | Entity::Invalid { raw, .. } => raw.data.as_object().cloned(),
    }
}

fn first_arg(node: &KdlNode) -> Option<&KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_none())
        .map(|e| e.value())
}

fn string_arg(node: &KdlNode) -> Option<&str> {
    first_arg(node)?.as_string()
}

fn property<'n>(node: &'n KdlNode, name: &str) -> Option<&'n KdlValue> {
    node.entries()
        .iter()
        .find(|e| e.name().is_some_and(|n| n.value() == name))
        .map(|e| e.value())
}
