//! Document row builder.
//!
//! Walks a parsed document segment by segment, token by token, and produces
//! the two synchronized output streams: the main NERC+NEL layer and the
//! bibliographic layer. Corrupted segments are skipped entirely; hyphenated
//! word fragments collapse into one merged row.
//!
//! The builder is a single forward pass with no backtracking. Per-document
//! state is one flag, "was the previous token a hyphenated fragment", reset
//! at every segment boundary.

use crate::classify::MentionClasses;
use crate::document::Document;
use crate::flags::{set_special_flags, SegmentEndFlag};
use crate::hyphen::{dehyphenate, lookup_hyphenation};
use crate::label::{assemble_label, LabelKind};
use crate::metadata::{get_document_metadata, MetadataTable};
use crate::nel::resolve_link;
use crate::span::SpanIndex;
use log::{info, warn};

/// Output column header, in order.
pub const COL_LABELS: [&str; 10] = [
    "TOKEN",
    "NE-COARSE-LIT",
    "NE-COARSE-METO",
    "NE-FINE-LIT",
    "NE-FINE-METO",
    "NE-FINE-COMP",
    "NE-NESTED",
    "NEL-LIT",
    "NEL-METO",
    "MISC",
];

/// One line of an output table: either a `# key = value` metadata comment or
/// a fixed-width token row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsvLine {
    /// Metadata comment line, written verbatim.
    Comment(String),
    /// Token annotation row, one string per column.
    Row([String; 10]),
}

/// Conversion options and release identity.
///
/// Injected into the row builder; there is no global configuration.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Namespace of the shared-task metadata keys (e.g. `hipe2022`).
    pub dataset_namespace: String,
    /// Namespace of the project-specific metadata keys (e.g. `ajmc`).
    pub project_namespace: String,
    /// Release version written into the metadata lines.
    pub dataset_version: String,
    /// License written into the metadata lines.
    pub license: String,
    /// Document type written into the metadata lines.
    pub document_type: String,
    /// Replace the NE-NESTED column with `_`.
    pub drop_nested: bool,
    /// Force `NIL` for linked time mentions.
    pub discard_time_links: bool,
    /// Which flag marks the last token of a segment.
    pub segment_end_flag: SegmentEndFlag,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            dataset_namespace: "hipe2022".to_string(),
            project_namespace: "ajmc".to_string(),
            dataset_version: "v0.4".to_string(),
            license: "CC-BY".to_string(),
            document_type: "commentary".to_string(),
            drop_nested: false,
            discard_time_links: false,
            segment_end_flag: SegmentEndFlag::EndOfSentence,
        }
    }
}

/// The two row streams produced for one document.
///
/// Both streams have identical length, token column and MISC column; only
/// the annotation columns differ.
#[derive(Debug, Clone)]
pub struct DocumentTable {
    /// Main layer (NERC + NEL).
    pub rows: Vec<TsvLine>,
    /// Bibliographic layer.
    pub biblio_rows: Vec<TsvLine>,
}

/// Convert one parsed document into its two output tables.
#[must_use]
pub fn convert_document(
    doc: &Document,
    config: &ConvertConfig,
    metadata: &MetadataTable,
) -> DocumentTable {
    let mut rows: Vec<TsvLine> = Vec::new();
    let mut biblio_rows: Vec<TsvLine> = Vec::new();

    for line in get_document_metadata(doc, config, metadata) {
        rows.push(TsvLine::Comment(line.clone()));
        biblio_rows.push(TsvLine::Comment(line));
    }

    if doc.segments.len() <= 1 {
        warn!("Document {} suspiciously contains 0 sentences", doc.id);
    }

    let index = SpanIndex::new(doc);

    for seg in &doc.segments {
        let mut is_prev_token_hyphenated = false;

        if seg.corrupted {
            let corrupted_sentence_text = seg
                .tokens
                .iter()
                .map(|t| t.surface.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            info!(
                "Removed corrupted sentence from document {}. Text: {}",
                doc.id, corrupted_sentence_text
            );
            continue;
        }

        for tok in &seg.tokens {
            let matches = index.matches(tok);
            let mut classes = MentionClasses::partition(matches, tok, &doc.id);

            let mut token_surface = tok.surface.clone();
            if let Some(word) = lookup_hyphenation(tok, &doc.hyphenated_words) {
                if is_prev_token_hyphenated {
                    // continuation fragment, already emitted with the first one
                    continue;
                }
                if tok.surface.chars().count() > 1 {
                    token_surface = dehyphenate(&word.surface);
                    is_prev_token_hyphenated = true;
                }
            } else {
                is_prev_token_hyphenated = false;
            }

            // The nested label reads the raw literal list, before the
            // metonymic fallback and precedence rules reshape it.
            let fine_nested = if config.drop_nested {
                "_".to_string()
            } else {
                assemble_label(&classes.literal, LabelKind::Fine, true)
            };

            classes.resolve_precedence();

            let coarse_lit = assemble_label(&classes.literal, LabelKind::Coarse, false);
            let fine_lit = assemble_label(&classes.literal, LabelKind::Fine, false);

            let main_ent_lit = classes.main_literal();
            let main_ent_biblio = classes.main_biblio();

            let nel_lit = resolve_link(
                main_ent_lit,
                main_ent_biblio,
                &doc.links,
                config.discard_time_links,
            );

            let misc = set_special_flags(
                tok,
                seg,
                main_ent_lit,
                main_ent_biblio,
                doc,
                config.segment_end_flag,
            );

            // Metonymy and compounds are not annotated in this corpus; their
            // columns stay underscored for format compatibility.
            rows.push(TsvLine::Row([
                token_surface.clone(),
                coarse_lit,
                "_".to_string(),
                fine_lit,
                "_".to_string(),
                "_".to_string(),
                fine_nested,
                nel_lit,
                "_".to_string(),
                misc.clone(),
            ]));

            let biblio_coarse = assemble_label(&classes.biblio, LabelKind::Biblio, false);
            biblio_rows.push(TsvLine::Row([
                token_surface,
                biblio_coarse,
                "_".to_string(),
                "_".to_string(),
                "_".to_string(),
                "_".to_string(),
                "_".to_string(),
                "_".to_string(),
                "_".to_string(),
                misc,
            ]));
        }
    }

    DocumentTable { rows, biblio_rows }
}
