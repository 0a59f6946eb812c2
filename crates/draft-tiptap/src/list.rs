//! List grouping.
//!
//! Draft.js has no list containers: a list is a run of consecutive
//! `*-list-item` blocks. The grouper takes the first item, then keeps
//! peeking and consuming while the next block is the same list kind.
//! Anything else (including the other list kind) ends the group, and the
//! next item after it starts a fresh container.

use crate::convert::Context;
use crate::cursor::BlockCursor;
use crate::error::ConvertError;
use crate::node::{BlockNode, ListItem};
use crate::source::{ListKind, SourceBlock};

/// Gather `first` and its same-kind followers into one list container.
pub fn convert_list(
    first: &SourceBlock,
    kind: ListKind,
    cursor: &mut BlockCursor<'_>,
    ctx: &Context<'_>,
) -> Result<BlockNode, ConvertError> {
    let item_type = kind.item_type();
    let mut items = vec![list_item(first, ctx)?];

    while let Some(block) = cursor.next_if(|next| next.block_type == item_type) {
        items.push(list_item(block, ctx)?);
    }

    tracing::debug!(?kind, items = items.len(), "grouped list items");

    Ok(match kind {
        ListKind::Bullet => BlockNode::BulletList { content: items },
        ListKind::Ordered => BlockNode::OrderedList { content: items },
    })
}

fn list_item(block: &SourceBlock, ctx: &Context<'_>) -> Result<ListItem, ConvertError> {
    Ok(ListItem::with_paragraph(ctx.inline_content(block)?))
}
