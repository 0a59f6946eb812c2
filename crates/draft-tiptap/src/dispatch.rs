//! Block dispatcher: one Draft.js block in, at most one Tiptap node out.

use crate::convert::Context;
use crate::cursor::BlockCursor;
use crate::error::ConvertError;
use crate::list::convert_list;
use crate::node::{BlockNode, CodeBlockAttrs};
use crate::source::{BlockType, SourceBlock};

/// Convert `block`, which has already been taken from `cursor`.
///
/// List items pull their same-kind siblings off the cursor. Unknown block
/// types go to the unknown block hook when there is one; otherwise they are
/// reported and skipped.
pub fn convert_block(
    block: &SourceBlock,
    cursor: &mut BlockCursor<'_>,
    ctx: &Context<'_>,
) -> Result<Option<BlockNode>, ConvertError> {
    tracing::trace!(
        block_type = %block.block_type,
        index = cursor.index(),
        "converting block"
    );

    let node = match &block.block_type {
        BlockType::Heading(level) => BlockNode::heading(*level, ctx.inline_content(block)?),
        BlockType::Paragraph | BlockType::Unstyled => {
            BlockNode::paragraph(ctx.inline_content(block)?)
        }
        BlockType::ListItem(kind) => convert_list(block, *kind, cursor, ctx)?,
        BlockType::Blockquote => BlockNode::Blockquote {
            content: ctx.inline_content(block)?,
        },
        BlockType::CodeBlock => BlockNode::CodeBlock {
            attrs: CodeBlockAttrs { language: None },
            content: ctx.inline_content(block)?,
        },
        BlockType::Unknown(tag) => {
            if let Some(handler) = ctx.config().unknown_block_handler() {
                return handler(block, cursor, ctx);
            }
            tracing::warn!(
                block_type = %tag,
                block_key = block.key.as_deref().unwrap_or(""),
                "unknown draftjs block type: {}",
                tag
            );
            return Ok(None);
        }
    };

    Ok(Some(node))
}
