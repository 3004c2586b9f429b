//! Parsed-document model.
//!
//! A [`Document`] is the immutable output of the parsing collaborator: the
//! raw text of one page plus its standoff annotation layers (gold sentences,
//! tokens, named-entity mentions, entity links, hyphenated words). The
//! conversion engine only ever reads from it.
//!
//! All offsets are **character** offsets into [`Document::text`], half-open
//! `[start, end)`. The annotation platform counts characters, not bytes, so
//! the document pre-computes its character sequence once and every lookup
//! downstream is O(1).

use serde::Serialize;
use std::collections::HashMap;

/// Annotation identifier, unique within one document.
pub type AnnotationId = u32;

/// Bibliographic reference types (closed set).
///
/// A mention whose fine type is one of these is a bibliographic reference
/// and is emitted on the parallel `-biblio` layer instead of the main one.
pub const BIBLIO_ENTITIES: [&str; 5] = [
    "primary-full",
    "primary-partial",
    "secondary-full",
    "secondary-partial",
    "secondary-meta",
];

/// One token of a gold sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Annotation id of the token.
    pub id: AnnotationId,
    /// Character offset (start, inclusive).
    pub start_offset: usize,
    /// Character offset (end, exclusive).
    pub end_offset: usize,
    /// Raw covered text.
    pub surface: String,
    /// Id of the owning segment.
    pub segment_id: AnnotationId,
}

/// One gold sentence (a physical line of the scanned page).
///
/// Tokens are ordered by offset and assumed non-overlapping; this is not
/// re-validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Annotation id of the segment.
    pub id: AnnotationId,
    /// Character offset (start, inclusive).
    pub start_offset: usize,
    /// Character offset (end, exclusive).
    pub end_offset: usize,
    /// Tokens in document order.
    pub tokens: Vec<Token>,
    /// OCR too garbled to annotate; excluded from output entirely.
    pub corrupted: bool,
    /// Sentence continues from the previous page.
    pub incomplete_continuing: bool,
    /// Sentence is cut off at the end of the page.
    pub incomplete_truncated: bool,
}

/// One named-entity mention.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mention {
    /// Annotation id of the mention.
    pub id: AnnotationId,
    /// Character offset (start, inclusive). May not align to token boundaries.
    pub start_offset: usize,
    /// Character offset (end, exclusive). May not align to token boundaries.
    pub end_offset: usize,
    /// Dotted fine-grained type, e.g. `pers.ind`.
    pub entity_fine: String,
    /// Fine type truncated before the first `.` (equal to it if undotted).
    pub entity_coarse: String,
    /// Bibliographic reference type, if the fine type is one of
    /// [`BIBLIO_ENTITIES`].
    pub entity_biblio: Option<String>,
    /// Literal (direct) reference. Metonymy is unsupported in this corpus,
    /// so this is always true for parsed documents.
    pub literal: bool,
    /// Covered text with newlines stripped.
    pub surface: String,
    /// Surface is noisy OCR.
    pub noisy_ocr: bool,
    /// Manually corrected transcript, when one was annotated.
    pub transcript: Option<String>,
    /// Normalized edit distance between surface and transcript; 0.0 when no
    /// transcript is present or the mention is clean.
    pub levenshtein_norm: f64,
}

impl Mention {
    /// Truncate a fine-grained type before its first `.`.
    #[must_use]
    pub fn coarse_of(fine: &str) -> String {
        match fine.split_once('.') {
            Some((coarse, _)) => coarse.to_string(),
            None => fine.to_string(),
        }
    }

    /// Bibliographic type of a fine-grained type, if it is one.
    #[must_use]
    pub fn biblio_of(fine: &str) -> Option<String> {
        if BIBLIO_ENTITIES.contains(&fine) {
            Some(fine.to_string())
        } else {
            None
        }
    }
}

/// Knowledge-base link of one mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Id of the linked mention.
    pub entity_id: AnnotationId,
    /// Mention has no knowledge-base entry.
    pub is_nil: bool,
    /// External identifier (full URI or bare id), when present.
    pub wikidata_id: Option<String>,
}

/// A word split across a line break by a hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HyphenatedWord {
    /// Character offset (start, inclusive).
    pub start_offset: usize,
    /// Character offset (end, exclusive).
    pub end_offset: usize,
    /// Reconstructed surface with internal whitespace removed. Still carries
    /// the hyphen character.
    pub surface: String,
}

/// One parsed, offset-validated document.
///
/// Owns all child annotation structures; everything is read-only after
/// parsing. The conversion engine never mutates a document.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document identifier, `{commentary_id}_{page_number}` by convention.
    pub id: String,
    /// ISO language code, when the ingest layer knows it.
    pub language: Option<String>,
    /// Path or URI of the original annotation file, for provenance metadata.
    pub source: String,
    /// Sentences in document order.
    pub segments: Vec<Segment>,
    /// Mentions in document (annotation insertion) order.
    pub mentions: Vec<Mention>,
    /// Links keyed by mention id.
    pub links: HashMap<AnnotationId, Link>,
    /// Hyphenated words in document order.
    pub hyphenated_words: Vec<HyphenatedWord>,
    /// Full raw text.
    pub text: String,
    chars: Vec<char>,
}

impl Document {
    /// Assemble a document from parsed annotation layers.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        language: Option<String>,
        source: impl Into<String>,
        text: impl Into<String>,
        segments: Vec<Segment>,
        mentions: Vec<Mention>,
        links: HashMap<AnnotationId, Link>,
        hyphenated_words: Vec<HyphenatedWord>,
    ) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        Document {
            id: id.into(),
            language,
            source: source.into(),
            segments,
            mentions,
            links,
            hyphenated_words,
            text,
            chars,
        }
    }

    /// Number of characters in the raw text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    /// Character at the given character offset, if in range.
    #[must_use]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Text covered by a half-open character range. Out-of-range offsets are
    /// clamped.
    #[must_use]
    pub fn covered_text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }
}
