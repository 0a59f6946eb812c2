//! Codepoint-aware text helpers.
//!
//! Draft.js expresses every range in Unicode scalar values (what JavaScript
//! gets from `[...text]`), not UTF-16 units and not bytes. Rust strings are
//! UTF-8, so every offset coming from the source document has to go through
//! a char -> byte conversion before slicing.

use std::ops::{Bound, Range, RangeBounds};

/// Number of Unicode scalar values in `text`.
///
/// A base character followed by a combining mark counts as two, which is
/// how Draft.js counts too.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Substring spanning the codepoints in `range`.
///
/// Offsets past the end clamp to the end of the text and an inverted range
/// yields an empty string, so the result is always a valid `&str`.
pub fn char_slice<R: RangeBounds<usize>>(text: &str, range: R) -> &str {
    CharIndex::new(text).slice(range)
}

/// Precomputed codepoint -> byte offset table for a single text.
///
/// The overlay slices the same block text once per segment, so the table is
/// built once and each slice is a pair of lookups.
#[derive(Debug, Clone)]
pub struct CharIndex<'a> {
    text: &'a str,
    /// Byte offset of every char start, followed by `text.len()`.
    offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
        offsets.push(text.len());
        Self { text, offsets }
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Convert a char offset to a byte offset, clamping to the end of text.
    pub fn char_to_byte(&self, char_offset: usize) -> usize {
        self.offsets
            .get(char_offset)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Resolve any range expression to a concrete, clamped char range.
    pub fn char_range<R: RangeBounds<usize>>(&self, range: R) -> Range<usize> {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len(),
        };
        let end = end.min(self.len());
        start.min(end)..end
    }

    /// Slice by char offsets.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> &'a str {
        let chars = self.char_range(range);
        &self.text[self.char_to_byte(chars.start)..self.char_to_byte(chars.end)]
    }
}
