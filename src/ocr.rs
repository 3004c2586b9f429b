//! OCR-noise measurement and reporting.
//!
//! Noisy-OCR mentions carry a manually corrected transcript; the distance
//! between surface and transcript is surfaced per token through the `LED`
//! flag and collected per batch into a correction table.

use crate::document::Document;
use serde::Serialize;

/// Normalized Levenshtein distance between an OCR surface and its
/// transcript: plain edit distance divided by the length of the longer
/// string, so 0.0 means identical and 1.0 means nothing in common.
#[must_use]
pub fn normalized_levenshtein_distance(surface: &str, transcript: &str) -> f64 {
    1.0 - strsim::normalized_levenshtein(surface, transcript)
}

/// One noisy mention, as a row of the batch correction table.
#[derive(Debug, Clone, Serialize)]
pub struct NoisyEntity {
    /// OCR surface as annotated.
    pub entity_surface: String,
    /// Manually corrected transcript.
    pub gold_transcript: Option<String>,
    /// Normalized edit distance.
    pub levenshtein_norm: f64,
    /// Document the mention occurs in.
    pub document_id: String,
    /// Fine-grained entity type.
    pub entity_fine_type: String,
    /// Bare knowledge-base identifier, or `NIL`.
    pub wikidata_id: String,
}

/// Collect the noisy mentions of a document for the correction table.
///
/// Bibliographic references (`-full`/`-partial` types) and `scope` mentions
/// are excluded; only mentions with a positive distance are reported.
#[must_use]
pub fn extract_noisy_entities(doc: &Document) -> Vec<NoisyEntity> {
    let mut entities = Vec::new();
    for mention in &doc.mentions {
        if mention.entity_fine.contains("-full")
            || mention.entity_fine.contains("-partial")
            || mention.entity_fine == "scope"
        {
            continue;
        }
        if mention.levenshtein_norm <= 0.0 {
            continue;
        }

        let wikidata_id = doc
            .links
            .get(&mention.id)
            .filter(|link| !link.is_nil)
            .and_then(|link| link.wikidata_id.clone())
            .unwrap_or_else(|| "NIL".to_string());

        entities.push(NoisyEntity {
            entity_surface: mention.surface.clone(),
            gold_transcript: mention.transcript.clone(),
            levenshtein_norm: mention.levenshtein_norm,
            document_id: doc.id.clone(),
            entity_fine_type: mention.entity_fine.clone(),
            wikidata_id,
        });
    }
    entities
}
