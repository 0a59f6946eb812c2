use std::ops::Range;

use super::OffsetRange;
use crate::source::{EntityRange, StyleRange};
use crate::text::CharIndex;

/// One piece of the partition, with the ranges active over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a> {
    /// Codepoint range of this segment.
    pub range: Range<usize>,
    /// The text covered, empty when the range lies past the end of the text.
    pub text: &'a str,
    /// Active entity ranges, in source order.
    pub entities: Vec<&'a EntityRange>,
    /// Active style ranges, in source order.
    pub styles: Vec<&'a StyleRange>,
}

impl Segment<'_> {
    pub fn is_plain(&self) -> bool {
        self.entities.is_empty() && self.styles.is_empty()
    }
}

/// Sorted, deduplicated cut points: `0`, the text length, and both ends of
/// every range.
pub fn boundaries<'r, I>(text_len: usize, ranges: I) -> Vec<usize>
where
    I: IntoIterator<Item = &'r dyn OffsetRange>,
{
    let mut cuts = vec![0, text_len];
    for range in ranges {
        cuts.push(range.offset());
        cuts.push(range.end());
    }
    cuts.sort_unstable();
    cuts.dedup();
    cuts
}

/// Partition `text` at every range boundary.
///
/// Segments are contiguous and strictly increasing. Boundaries past the end
/// of the text are kept, which yields trailing segments with empty text.
/// An empty text with no other boundary still yields one empty segment.
pub fn split_ranges<'a>(
    text: &'a str,
    styles: &'a [StyleRange],
    entities: &'a [EntityRange],
) -> Vec<Segment<'a>> {
    let index = CharIndex::new(text);

    let ranges = entities
        .iter()
        .map(|r| r as &dyn OffsetRange)
        .chain(styles.iter().map(|r| r as &dyn OffsetRange));
    let cuts = boundaries(index.len(), ranges);

    if cuts.len() == 1 {
        return vec![Segment {
            range: 0..0,
            text: "",
            entities: Vec::new(),
            styles: Vec::new(),
        }];
    }

    cuts.windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            Segment {
                range: start..end,
                text: index.slice(start..end),
                entities: entities.iter().filter(|r| r.overlaps(start, end)).collect(),
                styles: styles.iter().filter(|r| r.overlaps(start, end)).collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(offset: usize, length: usize, style: &str) -> StyleRange {
        StyleRange {
            offset,
            length,
            style: style.into(),
        }
    }

    fn entity(offset: usize, length: usize, key: u64) -> EntityRange {
        EntityRange {
            offset,
            length,
            key,
        }
    }

    fn summary(segments: &[Segment<'_>]) -> Vec<(String, Vec<String>)> {
        segments
            .iter()
            .map(|s| {
                let mut active: Vec<String> =
                    s.entities.iter().map(|e| format!("#{}", e.key)).collect();
                active.extend(s.styles.iter().map(|r| r.style.to_string()));
                (s.text.to_string(), active)
            })
            .collect()
    }

    #[test]
    fn test_overlapping_styles() {
        let styles = vec![style(1, 4, "ITALIC"), style(3, 4, "BOLD")];
        let segments = split_ranges("abcdefghi", &styles, &[]);

        assert_eq!(
            summary(&segments),
            vec![
                ("a".to_string(), vec![]),
                ("bc".to_string(), vec!["ITALIC".to_string()]),
                ("de".to_string(), vec!["ITALIC".to_string(), "BOLD".to_string()]),
                ("fg".to_string(), vec!["BOLD".to_string()]),
                ("hi".to_string(), vec![]),
            ]
        );
        assert_eq!(segments[2].range, 3..5);
    }

    #[test]
    fn test_no_ranges_is_one_segment() {
        let segments = split_ranges("hello world", &[], &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].range, 0..11);
        assert!(segments[0].is_plain());
    }

    #[test]
    fn test_empty_text_is_one_empty_segment() {
        let segments = split_ranges("", &[], &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].range, 0..0);
        assert_eq!(segments[0].text, "");
    }

    #[test]
    fn test_entities_and_styles_share_boundaries() {
        let styles = vec![style(0, 4, "BOLD")];
        let entities = vec![entity(2, 4, 7)];
        let segments = split_ranges("abcdef", &styles, &entities);

        assert_eq!(
            summary(&segments),
            vec![
                ("ab".to_string(), vec!["BOLD".to_string()]),
                ("cd".to_string(), vec!["#7".to_string(), "BOLD".to_string()]),
                ("ef".to_string(), vec!["#7".to_string()]),
            ]
        );
    }

    #[test]
    fn test_zero_length_range_cuts_but_never_activates() {
        let styles = vec![style(2, 0, "BOLD")];
        let segments = split_ranges("abcd", &styles, &[]);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "ab");
        assert_eq!(segments[1].text, "cd");
        assert!(segments.iter().all(Segment::is_plain));
    }

    #[test]
    fn test_range_past_end_is_not_clamped() {
        let styles = vec![style(2, 5, "BOLD")];
        let segments = split_ranges("abc", &styles, &[]);

        assert_eq!(
            summary(&segments),
            vec![
                ("ab".to_string(), vec![]),
                ("c".to_string(), vec!["BOLD".to_string()]),
                ("".to_string(), vec!["BOLD".to_string()]),
            ]
        );
        assert_eq!(segments[2].range, 3..7);
    }

    #[test]
    fn test_codepoint_offsets_with_astral_chars() {
        let styles = vec![style(0, 1, "BOLD"), style(2, 1, "BOLD")];
        let segments = split_ranges("<\u{1F9F3}>", &styles, &[]);

        let texts: Vec<&str> = segments.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["<", "\u{1F9F3}", ">"]);
        assert!(segments[1].is_plain());
    }

    #[test]
    fn test_boundaries_are_sorted_and_unique() {
        let styles = [style(3, 2, "A"), style(1, 2, "B"), style(3, 2, "C")];
        let cuts = boundaries(6, styles.iter().map(|r| r as &dyn OffsetRange));
        assert_eq!(cuts, vec![0, 1, 3, 5, 6]);
    }
}
