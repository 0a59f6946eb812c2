//! Conversion hooks.
//!
//! Everything the converter can't handle natively is delegated to one of
//! three optional hooks. Each one is checked independently at the point it
//! would be needed, so a document without mentions converts fine with no
//! configuration at all.

use std::fmt;

use serde_json::{Map, Value};

use crate::convert::Context;
use crate::cursor::BlockCursor;
use crate::error::ConvertError;
use crate::node::{BlockNode, Mark};
use crate::source::{Entity, MentionEntity, SourceBlock};

/// Extracts mention node attrs from a mention entity.
pub type MentionAttrsFn = dyn Fn(&MentionEntity) -> Map<String, Value> + Send + Sync;

/// Converts a block whose type is outside the fixed table. May advance the
/// cursor to swallow sibling blocks. `Ok(None)` contributes no node.
pub type UnknownBlockFn = dyn Fn(&SourceBlock, &mut BlockCursor<'_>, &Context<'_>) -> Result<Option<BlockNode>, ConvertError>
    + Send
    + Sync;

/// Converts an entity with no native mapping. `None` drops the entity from
/// the run it covers.
pub type UnknownMarkFn = dyn Fn(&Entity) -> Option<Mark> + Send + Sync;

#[derive(Default)]
pub struct ConvertConfig {
    mention_attrs: Option<Box<MentionAttrsFn>>,
    unknown_block: Option<Box<UnknownBlockFn>>,
    unknown_mark: Option<Box<UnknownMarkFn>>,
}

impl ConvertConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mention_attrs<F>(mut self, f: F) -> Self
    where
        F: Fn(&MentionEntity) -> Map<String, Value> + Send + Sync + 'static,
    {
        self.mention_attrs = Some(Box::new(f));
        self
    }

    pub fn with_unknown_block_handler<F>(mut self, f: F) -> Self
    where
        F: Fn(&SourceBlock, &mut BlockCursor<'_>, &Context<'_>) -> Result<Option<BlockNode>, ConvertError>
            + Send
            + Sync
            + 'static,
    {
        self.unknown_block = Some(Box::new(f));
        self
    }

    pub fn with_unknown_mark_handler<F>(mut self, f: F) -> Self
    where
        F: Fn(&Entity) -> Option<Mark> + Send + Sync + 'static,
    {
        self.unknown_mark = Some(Box::new(f));
        self
    }

    pub fn mention_attrs(&self) -> Option<&MentionAttrsFn> {
        self.mention_attrs.as_deref()
    }

    pub fn unknown_block_handler(&self) -> Option<&UnknownBlockFn> {
        self.unknown_block.as_deref()
    }

    pub fn unknown_mark_handler(&self) -> Option<&UnknownMarkFn> {
        self.unknown_mark.as_deref()
    }
}

impl fmt::Debug for ConvertConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertConfig")
            .field("mention_attrs", &self.mention_attrs.is_some())
            .field("unknown_block", &self.unknown_block.is_some())
            .field("unknown_mark", &self.unknown_mark.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_are_independent() {
        let config = ConvertConfig::new().with_unknown_mark_handler(|_| None);
        assert!(config.mention_attrs().is_none());
        assert!(config.unknown_block_handler().is_none());
        assert!(config.unknown_mark_handler().is_some());
    }

    #[test]
    fn test_debug_lists_configured_hooks() {
        let config = ConvertConfig::new().with_mention_attrs(|m| m.attrs_from_fields("id", "name"));
        assert_eq!(
            format!("{config:?}"),
            "ConvertConfig { mention_attrs: true, unknown_block: false, unknown_mark: false }"
        );
    }
}
