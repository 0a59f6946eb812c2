//! Range overlay: partition a block's text by style and entity ranges.
//!
//! Both range families are half-open intervals over codepoint offsets. The
//! overlay cuts the text at every range boundary and reports, per segment,
//! which ranges of each family are active over it.

mod processor;

pub use processor::{Segment, boundaries, split_ranges};

/// A half-open `[offset, offset + length)` interval in codepoints.
pub trait OffsetRange {
    fn offset(&self) -> usize;

    fn length(&self) -> usize;

    /// Exclusive end. Saturates rather than overflowing on absurd input.
    fn end(&self) -> usize {
        self.offset().saturating_add(self.length())
    }

    /// Whether this range covers any part of `[start, end)`.
    ///
    /// Touching is not overlapping: a range ending at `start` is inactive,
    /// and a zero-length range is never active.
    fn overlaps(&self, start: usize, end: usize) -> bool {
        overlaps(start, end, self.offset(), self.end())
    }
}

/// Strict overlap test for two half-open intervals.
pub fn overlaps(x1: usize, x2: usize, y1: usize, y2: usize) -> bool {
    x1.max(y1) < x2.min(y2)
}
