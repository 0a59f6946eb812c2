//! Top-level driver.

use serde_json::Value;

use crate::config::ConvertConfig;
use crate::cursor::BlockCursor;
use crate::dispatch::convert_block;
use crate::error::ConvertError;
use crate::marks::{lift_mention, segment_marks};
use crate::node::{Document, InlineNode};
use crate::overlay::split_ranges;
use crate::source::{EntityMap, SourceBlock, SourceDocument};

/// Per-conversion state shared by the dispatcher, the list grouper and
/// caller hooks.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    config: &'a ConvertConfig,
    entity_map: &'a EntityMap,
}

impl<'a> Context<'a> {
    pub fn new(config: &'a ConvertConfig, entity_map: &'a EntityMap) -> Self {
        Self { config, entity_map }
    }

    pub fn config(&self) -> &'a ConvertConfig {
        self.config
    }

    pub fn entity_map(&self) -> &'a EntityMap {
        self.entity_map
    }

    /// Text runs for a block, with marks resolved but mentions not lifted.
    pub fn text_runs(&self, block: &SourceBlock) -> Result<Vec<InlineNode>, ConvertError> {
        split_ranges(&block.text, &block.inline_style_ranges, &block.entity_ranges)
            .iter()
            .map(|segment| {
                let marks = segment_marks(segment, self)?;
                Ok(InlineNode::marked(segment.text, marks))
            })
            .collect()
    }

    /// Inline content for a block: text runs with mentions lifted into
    /// mention nodes.
    pub fn inline_content(&self, block: &SourceBlock) -> Result<Vec<InlineNode>, ConvertError> {
        Ok(self
            .text_runs(block)?
            .into_iter()
            .map(lift_mention)
            .collect())
    }
}

/// Convert a parsed Draft.js document.
pub fn convert(document: &SourceDocument, config: &ConvertConfig) -> Result<Document, ConvertError> {
    let ctx = Context::new(config, &document.entity_map);
    let mut cursor = BlockCursor::new(&document.blocks);
    let mut content = Vec::with_capacity(document.blocks.len());

    while let Some(block) = cursor.next() {
        if let Some(node) = convert_block(block, &mut cursor, &ctx)? {
            content.push(node);
        }
    }

    tracing::debug!(
        blocks = document.blocks.len(),
        nodes = content.len(),
        "converted draftjs document"
    );

    Ok(Document { content })
}

/// Validate the shape of a JSON document, then convert it.
pub fn convert_value(value: Value, config: &ConvertConfig) -> Result<Document, ConvertError> {
    let document = SourceDocument::from_value(value)?;
    convert(&document, config)
}

/// Parse, validate and convert JSON text.
pub fn convert_str(json: &str, config: &ConvertConfig) -> Result<Document, ConvertError> {
    let document = SourceDocument::from_json_str(json)?;
    convert(&document, config)
}
