//! Document-level metadata comment lines.
//!
//! Every output file starts with `# key = value` comment lines carrying the
//! document identity plus, when the commentary is known, bibliographic data
//! looked up from an injected metadata table. The table is plain data passed
//! into the row builder, not a module-level global, so several corpora can
//! be processed side by side.

use crate::convert::ConvertConfig;
use crate::document::Document;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Bibliographic metadata of one commentary edition.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentaryMetadata {
    /// Author of the edition.
    pub author: String,
    /// Title of the edition.
    pub title: String,
    /// Publication year as a string, e.g. `1894`.
    pub publication_date: String,
    /// Place of publication.
    pub publication_place: String,
}

/// Commentary metadata keyed by commentary identifier.
pub type MetadataTable = HashMap<String, CommentaryMetadata>;

/// Built-in table for the classical-commentary corpus. Used by the CLI
/// unless an external table is supplied.
pub static DEFAULT_METADATA: Lazy<MetadataTable> = Lazy::new(|| {
    let entries = [
        ("Wecklein1894", "Wecklein, Nikolaus", "Sophokleus Aias", "1894", "München"),
        (
            "sophokle1v3soph",
            "Schneidewin, Friedrich Wilhelm",
            "Sophokles, erklärt",
            "1853",
            "Leipzig",
        ),
        ("cu31924087948174", "Campbell, Lewis", "Sophocles", "1881", "Oxford"),
        (
            "sophoclesplaysa05campgoog",
            "Jebb, Richard Claverhouse",
            "Sophocles: The Plays and Fragments",
            "1896",
            "London",
        ),
        (
            "lestragdiesdeso00tourgoog",
            "Tournier, Édouard",
            "Les tragédies de Sophocle",
            "1886",
            "Paris",
        ),
    ];
    entries
        .into_iter()
        .map(|(id, author, title, date, place)| {
            (
                id.to_string(),
                CommentaryMetadata {
                    author: author.to_string(),
                    title: title.to_string(),
                    publication_date: date.to_string(),
                    publication_place: place.to_string(),
                },
            )
        })
        .collect()
});

/// Split a document id into commentary id and page number.
///
/// The page number is the last underscore-separated component; everything
/// before it is the commentary id (which may itself contain underscores).
#[must_use]
pub fn split_document_id(document_id: &str) -> (&str, Option<u32>) {
    match document_id.rsplit_once('_') {
        Some((commentary, page)) => match page.parse::<u32>() {
            Ok(n) => (commentary, Some(n)),
            Err(_) => (document_id, None),
        },
        None => (document_id, None),
    }
}

/// Columns that carry real annotations in this corpus.
const APPLICABLE_COLUMNS: &str = "TOKEN NE-COARSE-LIT NE-FINE-LIT NE-NESTED NEL-LIT MISC";

/// Build the metadata comment lines for one document, in output order
/// (reverse-sorted, matching the combined-corpus release convention).
#[must_use]
pub fn get_document_metadata(
    doc: &Document,
    config: &ConvertConfig,
    table: &MetadataTable,
) -> Vec<String> {
    let ns = &config.dataset_namespace;
    let project = &config.project_namespace;
    let language = doc.language.as_deref().unwrap_or("unknown");

    let mut rows = vec![
        format!("# {ns}:document_id = {}", doc.id),
        format!("# {ns}:document_type = {}", config.document_type),
        format!("# {ns}:dataset = {project}"),
        format!("# {ns}:language = {language}"),
        format!("# {project}:version = {}", config.dataset_version),
        format!("# {ns}:original_source = {}", doc.source),
        format!("# {ns}:license = {}", config.license),
        format!("# {ns}:applicable_columns = {APPLICABLE_COLUMNS}"),
    ];

    let (commentary_id, page_number) = split_document_id(&doc.id);
    if let Some(metadata) = table.get(commentary_id) {
        rows.push(format!("# {project}:title = {}", metadata.title));
        rows.push(format!("# {project}:author = {}", metadata.author));
        rows.push(format!(
            "# {project}:publication_date = {}",
            metadata.publication_date
        ));
        rows.push(format!("# {ns}:date = {}-01-01", metadata.publication_date));
        rows.push(format!(
            "# {project}:publication_place = {}",
            metadata.publication_place
        ));
        if let Some(page) = page_number {
            rows.push(format!("# {project}:page = {page}"));
        }
    }

    rows.sort();
    rows.reverse();
    rows
}
