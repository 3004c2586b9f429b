//! MISC flag composition.
//!
//! The last output column carries per-token side-channel flags joined by
//! `|`: spacing, segment boundaries, partial span mismatches, OCR-noise
//! distance and bibliographic reference membership. Flags sort
//! alphabetically except the Levenshtein flag, which always sorts last.

use crate::document::{Document, Mention, Segment, Token};

/// Entity span does not align with the token span.
pub const PARTIAL_FLAG: &str = "Partial";
/// No whitespace between this token and the next.
pub const NO_SPACE_FLAG: &str = "NoSpaceAfter";
/// Token ends a physical line (inter-document release variant).
pub const END_OF_LINE_FLAG: &str = "EndOfLine";
/// Token ends a sentence.
pub const END_OF_SENTENCE_FLAG: &str = "EndOfSentence";
/// Normalized Levenshtein distance of a noisy-OCR mention.
pub const LEVENSHTEIN_FLAG: &str = "LED";
/// Token lies inside a primary bibliographic reference.
pub const PRIMARY_REFERENCE_FLAG: &str = "InPrimaryReference";
/// Token lies inside a secondary bibliographic reference.
pub const SECONDARY_REFERENCE_FLAG: &str = "InSecondaryReference";

/// Which flag marks the last token of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmentEndFlag {
    /// `EndOfSentence`, used by the commentary releases.
    #[default]
    EndOfSentence,
    /// `EndOfLine`, used by the newspaper release variant.
    EndOfLine,
}

impl SegmentEndFlag {
    fn as_str(self) -> &'static str {
        match self {
            SegmentEndFlag::EndOfSentence => END_OF_SENTENCE_FLAG,
            SegmentEndFlag::EndOfLine => END_OF_LINE_FLAG,
        }
    }
}

/// Compose the MISC column for one token.
///
/// `ent_lit` and `ent_biblio` are the winning literal and bibliographic
/// mentions of the token, when present. Returns the `_` sentinel when no
/// flag applies.
#[must_use]
pub fn set_special_flags(
    token: &Token,
    segment: &Segment,
    ent_lit: Option<&Mention>,
    ent_biblio: Option<&Mention>,
    doc: &Document,
    segment_end: SegmentEndFlag,
) -> String {
    let mut flags: Vec<String> = Vec::new();

    // No space directly after the token. The underscore also counts: the
    // retokenization step uses it as the placeholder for control characters.
    let first_char_after_token = doc.char_at(token.end_offset);
    if first_char_after_token != Some(' ') || first_char_after_token == Some('_') {
        flags.push(NO_SPACE_FLAG.to_string());
    }

    if segment
        .tokens
        .last()
        .is_some_and(|last| last.start_offset == token.start_offset)
    {
        flags.push(segment_end.as_str().to_string());
    }

    if let Some(lit) = ent_lit {
        // Entity boundary does not match the token boundary,
        // e.g. Ruhrgebiet -> Ruhr is the entity, xxxParis -> Paris is.
        if lit.end_offset < token.end_offset || lit.start_offset > token.start_offset {
            let start = lit.start_offset as isize - token.start_offset as isize;
            let end = (lit.end_offset - token.start_offset).min(token.surface.chars().count());
            flags.push(format!("{PARTIAL_FLAG}-{start}:{end}"));
        }

        flags.push(format!("{LEVENSHTEIN_FLAG}{:.2}", lit.levenshtein_norm));
    }

    if let Some(biblio) = ent_biblio {
        if biblio.entity_fine.contains("primary") {
            flags.push(PRIMARY_REFERENCE_FLAG.to_string());
        } else if biblio.entity_fine.contains("secondary") {
            flags.push(SECONDARY_REFERENCE_FLAG.to_string());
        }
    }

    if flags.is_empty() {
        flags.push("_".to_string());
    }

    // alphabetical, Levenshtein always last
    flags.sort_by_key(|f| {
        if f.contains(LEVENSHTEIN_FLAG) {
            "Z".to_string()
        } else {
            f.clone()
        }
    });
    flags.join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn doc(text: &str) -> Document {
        Document::new(
            "d_0001",
            None,
            "d.json",
            text,
            vec![],
            vec![],
            HashMap::new(),
            vec![],
        )
    }

    fn token(id: u32, start: usize, end: usize, surface: &str) -> Token {
        Token {
            id,
            start_offset: start,
            end_offset: end,
            surface: surface.to_string(),
            segment_id: 1,
        }
    }

    fn segment(tokens: Vec<Token>) -> Segment {
        let start = tokens.first().map_or(0, |t| t.start_offset);
        let end = tokens.last().map_or(0, |t| t.end_offset);
        Segment {
            id: 1,
            start_offset: start,
            end_offset: end,
            tokens,
            corrupted: false,
            incomplete_continuing: false,
            incomplete_truncated: false,
        }
    }

    fn mention(start: usize, end: usize, fine: &str) -> Mention {
        Mention {
            id: 1,
            start_offset: start,
            end_offset: end,
            entity_fine: fine.to_string(),
            entity_coarse: Mention::coarse_of(fine),
            entity_biblio: Mention::biblio_of(fine),
            literal: true,
            surface: String::new(),
            noisy_ocr: false,
            transcript: None,
            levenshtein_norm: 0.0,
        }
    }

    #[test]
    fn test_no_flags_is_sentinel() {
        let d = doc("ab cd");
        let seg = segment(vec![token(1, 0, 2, "ab"), token(2, 3, 5, "cd")]);
        let misc = set_special_flags(
            &seg.tokens[0],
            &seg,
            None,
            None,
            &d,
            SegmentEndFlag::EndOfSentence,
        );
        assert_eq!(misc, "_");
    }

    #[test]
    fn test_no_space_after() {
        let d = doc("ab,cd");
        let seg = segment(vec![token(1, 0, 2, "ab"), token(2, 2, 3, ","), token(3, 3, 5, "cd")]);
        let misc = set_special_flags(
            &seg.tokens[0],
            &seg,
            None,
            None,
            &d,
            SegmentEndFlag::EndOfSentence,
        );
        assert_eq!(misc, "NoSpaceAfter");
    }

    #[test]
    fn test_end_of_segment_fires_at_text_end_too() {
        let d = doc("ab cd");
        let seg = segment(vec![token(1, 0, 2, "ab"), token(2, 3, 5, "cd")]);
        // Last token: nothing follows it in the text, so NoSpaceAfter fires
        // alongside the segment-end flag.
        let misc = set_special_flags(
            &seg.tokens[1],
            &seg,
            None,
            None,
            &d,
            SegmentEndFlag::EndOfSentence,
        );
        assert_eq!(misc, "EndOfSentence|NoSpaceAfter");

        let misc = set_special_flags(
            &seg.tokens[1],
            &seg,
            None,
            None,
            &d,
            SegmentEndFlag::EndOfLine,
        );
        assert_eq!(misc, "EndOfLine|NoSpaceAfter");
    }

    #[test]
    fn test_partial_span_mismatch() {
        let d = doc("Ruhrgebiet ist");
        let seg = segment(vec![token(1, 0, 10, "Ruhrgebiet"), token(2, 11, 14, "ist")]);
        // Entity covers only "Ruhr".
        let m = mention(0, 4, "loc.phys");
        let misc = set_special_flags(
            &seg.tokens[0],
            &seg,
            Some(&m),
            None,
            &d,
            SegmentEndFlag::EndOfSentence,
        );
        assert_eq!(misc, "Partial-0:4|LED0.00");
    }

    #[test]
    fn test_partial_end_clamped_to_surface() {
        let d = doc("xxxParis und");
        let seg = segment(vec![token(1, 0, 8, "xxxParis"), token(2, 9, 12, "und")]);
        // Entity starts mid-token and would end past it.
        let m = mention(3, 9, "loc.adm");
        let misc = set_special_flags(
            &seg.tokens[0],
            &seg,
            Some(&m),
            None,
            &d,
            SegmentEndFlag::EndOfSentence,
        );
        assert_eq!(misc, "Partial-3:8|LED0.00");
    }

    #[test]
    fn test_levenshtein_sorted_last() {
        let d = doc("Parls ist");
        let seg = segment(vec![token(1, 0, 5, "Parls"), token(2, 6, 9, "ist")]);
        let mut m = mention(0, 5, "loc.adm");
        m.levenshtein_norm = 0.4;
        let bib = mention(0, 5, "primary-full");
        let misc = set_special_flags(
            &seg.tokens[0],
            &seg,
            Some(&m),
            Some(&bib),
            &d,
            SegmentEndFlag::EndOfSentence,
        );
        // InPrimaryReference sorts before LED despite L < I being false
        // alphabetically: LED is forced last.
        assert_eq!(misc, "InPrimaryReference|LED0.40");
    }

    #[test]
    fn test_secondary_reference_flag() {
        let d = doc("Jebb ad loc.");
        let seg = segment(vec![token(1, 0, 4, "Jebb")]);
        let bib = mention(0, 12, "secondary-meta");
        let misc = set_special_flags(
            &seg.tokens[0],
            &seg,
            None,
            Some(&bib),
            &d,
            SegmentEndFlag::EndOfSentence,
        );
        assert_eq!(misc, "EndOfSentence|InSecondaryReference");
    }
}
