//! Flattening of overlapping style and entity ranges into segments.
//!
//! Attributes are assigned per offset unit, then a single pass over the
//! characters merges runs with identical `(flags, entity)` into segments.
//! A character takes the attributes of its first unit, so a range boundary
//! inside a surrogate pair never splits a character.

use crate::block::{EntityKey, EntityRange, InlineStyle, InlineStyleRange};
use crate::{OffsetUnit, Range};

/// Style bits of a segment.
pub mod flags {
    pub const BOLD: u8 = 0b01;
    pub const ITALIC: u8 = 0b10;
}

/// A maximal run of characters with identical attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub flags: u8,
    /// Covering entity, `None` when the run is not under any entity range.
    pub entity: Option<&'a EntityKey>,
}

impl Segment<'_> {
    #[inline]
    pub fn is_bold(&self) -> bool {
        self.flags & flags::BOLD != 0
    }

    #[inline]
    pub fn is_italic(&self) -> bool {
        self.flags & flags::ITALIC != 0
    }
}

/// Number of offset units in `text`.
pub fn unit_len(text: &str, unit: OffsetUnit) -> usize {
    match unit {
        OffsetUnit::Utf16 => text.encode_utf16().count(),
        OffsetUnit::Char => text.chars().count(),
    }
}

/// Flatten ranges over `text` into ordered segments covering every character
/// exactly once.
///
/// Style ranges set bits independently. Entity ranges overwrite, so the
/// later range in slice order wins where they overlap.
pub fn flatten<'a>(
    text: &'a str,
    styles: &[InlineStyleRange],
    entities: &'a [EntityRange],
    unit: OffsetUnit,
) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }

    let n = unit_len(text, unit);
    let mut style_bits = vec![0u8; n];
    let mut entity_at: Vec<Option<&'a EntityKey>> = vec![None; n];

    for range in styles {
        let bit = match range.style {
            InlineStyle::Bold => flags::BOLD,
            InlineStyle::Italic => flags::ITALIC,
            InlineStyle::Other => continue,
        };
        let r: std::ops::Range<usize> = Range::clamped(range.offset, range.length, n).into();
        for bits in &mut style_bits[r] {
            *bits |= bit;
        }
    }

    for range in entities {
        let r: std::ops::Range<usize> = Range::clamped(range.offset, range.length, n).into();
        entity_at[r].fill(Some(&range.key));
    }

    let mut segments = Vec::new();
    let mut run_start = 0usize;
    let mut run_attrs: Option<(u8, Option<&'a EntityKey>)> = None;
    let mut u = 0usize;

    for (byte, ch) in text.char_indices() {
        let attrs = (style_bits[u], entity_at[u]);
        match run_attrs {
            Some(current) if current == attrs => {}
            Some((flags, entity)) => {
                segments.push(Segment {
                    text: &text[run_start..byte],
                    flags,
                    entity,
                });
                run_start = byte;
                run_attrs = Some(attrs);
            }
            None => run_attrs = Some(attrs),
        }
        u += match unit {
            OffsetUnit::Utf16 => ch.len_utf16(),
            OffsetUnit::Char => 1,
        };
    }

    if let Some((flags, entity)) = run_attrs {
        segments.push(Segment {
            text: &text[run_start..],
            flags,
            entity,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(offset: i64, length: i64, style: InlineStyle) -> InlineStyleRange {
        InlineStyleRange { offset, length, style }
    }

    fn entity(offset: i64, length: i64, key: &str) -> EntityRange {
        EntityRange {
            offset,
            length,
            key: key.into(),
        }
    }

    fn summary<'a>(segments: &[Segment<'a>]) -> Vec<(&'a str, u8, Option<&'a str>)> {
        segments
            .iter()
            .map(|s| (s.text, s.flags, s.entity.map(EntityKey::as_str)))
            .collect()
    }

    #[test]
    fn test_no_ranges_single_segment() {
        let segs = flatten("hello", &[], &[], OffsetUnit::Utf16);
        assert_eq!(summary(&segs), vec![("hello", 0, None)]);
    }

    #[test]
    fn test_empty_text() {
        assert!(flatten("", &[style(0, 3, InlineStyle::Bold)], &[], OffsetUnit::Utf16).is_empty());
    }

    #[test]
    fn test_overlapping_styles() {
        let styles = [style(0, 5, InlineStyle::Bold), style(3, 5, InlineStyle::Italic)];
        let segs = flatten("0123456789", &styles, &[], OffsetUnit::Utf16);
        let both = flags::BOLD | flags::ITALIC;
        assert_eq!(
            summary(&segs),
            vec![
                ("012", flags::BOLD, None),
                ("34", both, None),
                ("567", flags::ITALIC, None),
                ("89", 0, None),
            ]
        );
    }

    #[test]
    fn test_later_entity_wins() {
        let entities = [entity(2, 4, "A"), entity(5, 3, "B")];
        let segs = flatten("0123456789", &[], &entities, OffsetUnit::Utf16);
        assert_eq!(
            summary(&segs),
            vec![
                ("01", 0, None),
                ("234", 0, Some("A")),
                ("567", 0, Some("B")),
                ("89", 0, None),
            ]
        );
    }

    #[test]
    fn test_repeated_style_is_idempotent() {
        let styles = [style(0, 3, InlineStyle::Bold), style(1, 1, InlineStyle::Bold)];
        let segs = flatten("abcd", &styles, &[], OffsetUnit::Utf16);
        assert_eq!(summary(&segs), vec![("abc", flags::BOLD, None), ("d", 0, None)]);
    }

    #[test]
    fn test_unknown_style_ignored() {
        let segs = flatten("abc", &[style(0, 3, InlineStyle::Other)], &[], OffsetUnit::Utf16);
        assert_eq!(summary(&segs), vec![("abc", 0, None)]);
    }

    #[test]
    fn test_out_of_bounds_ranges_clamp() {
        let styles = [style(-5, 7, InlineStyle::Bold), style(3, 1000, InlineStyle::Italic)];
        let entities = [entity(100, 5, "X"), entity(-1, -1, "Y")];
        let segs = flatten("abcdef", &styles, &entities, OffsetUnit::Utf16);
        assert_eq!(
            summary(&segs),
            vec![("ab", flags::BOLD, None), ("c", 0, None), ("def", flags::ITALIC, None)]
        );
    }

    #[test]
    fn test_utf16_offsets_after_emoji() {
        // "😀" is two UTF-16 units.
        let styles = [style(3, 2, InlineStyle::Bold)];
        let segs = flatten("😀 hi", &styles, &[], OffsetUnit::Utf16);
        assert_eq!(summary(&segs), vec![("😀 ", 0, None), ("hi", flags::BOLD, None)]);
    }

    #[test]
    fn test_char_offsets_after_emoji() {
        let styles = [style(2, 2, InlineStyle::Bold)];
        let segs = flatten("😀 hi", &styles, &[], OffsetUnit::Char);
        assert_eq!(summary(&segs), vec![("😀 ", 0, None), ("hi", flags::BOLD, None)]);
    }

    #[test]
    fn test_range_splitting_surrogate_pair_keeps_char_whole() {
        // Range starts on the low surrogate of the emoji.
        let styles = [style(1, 2, InlineStyle::Bold)];
        let segs = flatten("😀ab", &styles, &[], OffsetUnit::Utf16);
        assert_eq!(summary(&segs), vec![("😀", 0, None), ("a", flags::BOLD, None), ("b", 0, None)]);
    }

    #[test]
    fn test_segments_cover_text() {
        let text = "a😀b€c";
        let styles = [style(1, 1, InlineStyle::Bold), style(3, 2, InlineStyle::Italic)];
        let entities = [entity(0, 2, "k")];
        let segs = flatten(text, &styles, &entities, OffsetUnit::Utf16);
        let joined: String = segs.iter().map(|s| s.text).collect();
        assert_eq!(joined, text);
    }
}
