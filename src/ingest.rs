//! Standoff JSON ingest.
//!
//! Reads the JSON export of one annotated page into a [`Document`]. The
//! format mirrors the annotation platform's standoff layers; all offsets are
//! character offsets into `text`, half-open:
//!
//! ```json
//! {
//!   "id": "Wecklein1894_0087",
//!   "language": "de",
//!   "text": "Αἴας ...",
//!   "sentences": [
//!     { "id": 101, "begin": 0, "end": 17, "corrupted": false,
//!       "tokens": [ { "id": 201, "begin": 0, "end": 4 } ] }
//!   ],
//!   "entities": [
//!     { "id": 301, "begin": 0, "end": 4, "value": "pers.myth",
//!       "noisy_ocr": false, "transcript": null,
//!       "is_nil": false, "wikidata_id": "https://www.wikidata.org/wiki/Q172725" }
//!   ],
//!   "hyphenations": [ { "begin": 20, "end": 33 } ]
//! }
//! ```
//!
//! Ingest performs the parse-time duties conversion relies on: empty tokens
//! and mentions without a type value are dropped (logged, never fatal),
//! coarse and bibliographic types are derived, surfaces are materialized,
//! and the normalized Levenshtein distance of noisy mentions is computed.
//! A malformed annotation only ever costs that single annotation.

use crate::document::{
    AnnotationId, Document, HyphenatedWord, Link, Mention, Segment, Token,
};
use crate::error::{Error, Result};
use crate::ocr::normalized_levenshtein_distance;
use log::error;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawDocument {
    id: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    source: Option<String>,
    text: String,
    #[serde(default)]
    sentences: Vec<RawSentence>,
    #[serde(default)]
    entities: Vec<RawEntity>,
    #[serde(default)]
    hyphenations: Vec<RawSpan>,
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    id: AnnotationId,
    begin: usize,
    end: usize,
    #[serde(default)]
    corrupted: bool,
    #[serde(default)]
    incomplete_continuing: bool,
    #[serde(default)]
    incomplete_truncated: bool,
    #[serde(default)]
    tokens: Vec<RawToken>,
}

#[derive(Debug, Deserialize)]
struct RawToken {
    id: AnnotationId,
    begin: usize,
    end: usize,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    id: AnnotationId,
    begin: usize,
    end: usize,
    value: Option<String>,
    #[serde(default)]
    noisy_ocr: bool,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    is_nil: bool,
    #[serde(default)]
    wikidata_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSpan {
    begin: usize,
    end: usize,
}

/// Read a standoff JSON file into a document.
pub fn read_document(path: &Path) -> Result<Document> {
    let file = File::open(path)?;
    let raw: RawDocument = serde_json::from_reader(BufReader::new(file))?;
    build_document(raw, &path.display().to_string())
}

/// Read a standoff JSON string into a document. The `source` string is only
/// used for provenance metadata.
pub fn read_document_str(json: &str, source: &str) -> Result<Document> {
    let raw: RawDocument = serde_json::from_str(json)?;
    build_document(raw, source)
}

fn build_document(raw: RawDocument, source: &str) -> Result<Document> {
    let char_len = raw.text.chars().count();
    // Holder for surface extraction while the document is under construction.
    let shell = Document::new(
        raw.id.clone(),
        None,
        source,
        raw.text.clone(),
        vec![],
        vec![],
        HashMap::new(),
        vec![],
    );

    let mut segments = Vec::with_capacity(raw.sentences.len());
    for sent in &raw.sentences {
        if sent.begin > sent.end || sent.end > char_len {
            return Err(Error::parse(format!(
                "Sentence {} in document {} has offsets [{}, {}) outside text of length {}",
                sent.id, raw.id, sent.begin, sent.end, char_len
            )));
        }
        let mut tokens = Vec::with_capacity(sent.tokens.len());
        for tok in &sent.tokens {
            if tok.begin > tok.end || tok.end > char_len {
                error!(
                    "Problem with token annotation {} in {}: offsets out of range",
                    tok.id, raw.id
                );
                continue;
            }
            let surface = shell.covered_text(tok.begin, tok.end);
            // ignore empty tokens
            if surface.is_empty() {
                continue;
            }
            tokens.push(Token {
                id: tok.id,
                start_offset: tok.begin,
                end_offset: tok.end,
                surface,
                segment_id: sent.id,
            });
        }
        segments.push(Segment {
            id: sent.id,
            start_offset: sent.begin,
            end_offset: sent.end,
            tokens,
            corrupted: sent.corrupted,
            incomplete_continuing: sent.incomplete_continuing,
            incomplete_truncated: sent.incomplete_truncated,
        });
    }

    let mut mentions = Vec::with_capacity(raw.entities.len());
    let mut links = HashMap::with_capacity(raw.entities.len());
    for ent in &raw.entities {
        let Some(value) = ent.value.as_deref().filter(|v| !v.is_empty()) else {
            error!(
                "Problem with entity annotation {} in {}: missing type value",
                ent.id, raw.id
            );
            continue;
        };
        if ent.begin > ent.end || ent.end > char_len {
            error!(
                "Problem with entity annotation {} in {}: offsets out of range",
                ent.id, raw.id
            );
            continue;
        }

        let surface = shell.covered_text(ent.begin, ent.end).replace('\n', "");
        let transcript = ent.transcript.clone().filter(|t| !t.is_empty());

        let levenshtein_norm = if ent.noisy_ocr {
            match &transcript {
                Some(transcript) => normalized_levenshtein_distance(&surface, transcript),
                None => {
                    error!(
                        "Transcript for noisy entity {} is missing in {}. \
                         Levenshtein distance cannot be computed and is set to 0.",
                        surface, raw.id
                    );
                    0.0
                }
            }
        } else if let Some(transcript) = &transcript {
            error!(
                "Transcript for entity {} is present in {}, yet entity is not marked \
                 as noisy. Levenshtein distance is computed nevertheless.",
                surface, raw.id
            );
            normalized_levenshtein_distance(&surface, transcript)
        } else {
            0.0
        };

        mentions.push(Mention {
            id: ent.id,
            start_offset: ent.begin,
            end_offset: ent.end,
            entity_fine: value.to_string(),
            entity_coarse: Mention::coarse_of(value),
            entity_biblio: Mention::biblio_of(value),
            // metonymy is not annotated in this corpus
            literal: true,
            surface,
            noisy_ocr: ent.noisy_ocr,
            transcript,
            levenshtein_norm,
        });

        links.insert(
            ent.id,
            Link {
                entity_id: ent.id,
                is_nil: ent.is_nil,
                wikidata_id: ent.wikidata_id.clone(),
            },
        );
    }

    let mut hyphenated_words = Vec::with_capacity(raw.hyphenations.len());
    for span in &raw.hyphenations {
        if span.begin > span.end || span.end > char_len {
            error!(
                "Problem with hyphenation annotation in {}: offsets out of range",
                raw.id
            );
            continue;
        }
        hyphenated_words.push(HyphenatedWord {
            start_offset: span.begin,
            end_offset: span.end,
            surface: shell.covered_text(span.begin, span.end).replace(' ', ""),
        });
    }

    Ok(Document::new(
        raw.id,
        raw.language,
        source,
        raw.text,
        segments,
        mentions,
        links,
        hyphenated_words,
    ))
}
