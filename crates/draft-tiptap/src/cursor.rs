//! Lookahead cursor over the source blocks.
//!
//! The driver, the list grouper and caller hooks all advance the same
//! cursor, so a hook that swallows sibling blocks hides them from the
//! driver the same way list grouping does.

use crate::source::SourceBlock;

#[derive(Debug, Clone)]
pub struct BlockCursor<'a> {
    blocks: &'a [SourceBlock],
    position: usize,
}

impl<'a> BlockCursor<'a> {
    pub fn new(blocks: &'a [SourceBlock]) -> Self {
        Self {
            blocks,
            position: 0,
        }
    }

    /// Look at the block `offset` places ahead without consuming anything.
    /// `peek(0)` is the block the next call to `next` returns.
    pub fn peek(&self, offset: usize) -> Option<&'a SourceBlock> {
        self.blocks.get(self.position.checked_add(offset)?)
    }

    /// Consume the next block if `predicate` accepts it.
    pub fn next_if(
        &mut self,
        predicate: impl FnOnce(&SourceBlock) -> bool,
    ) -> Option<&'a SourceBlock> {
        let block = self.peek(0)?;
        if predicate(block) {
            self.position += 1;
            Some(block)
        } else {
            None
        }
    }

    /// Index of the next block to be consumed.
    pub fn index(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.blocks.len().saturating_sub(self.position)
    }
}

impl<'a> Iterator for BlockCursor<'a> {
    type Item = &'a SourceBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let block = self.blocks.get(self.position)?;
        self.position += 1;
        Some(block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}
