//! # standoff-tsv
//!
//! Converts linguistically annotated documents (tokens, gold sentences,
//! named-entity mentions, entity links, hyphenations, stored as standoff
//! annotations over the raw page text) into the flat, tab-separated,
//! IOB-style token-annotation format of the shared evaluation task.
//!
//! The engine walks every token of a document, determines which overlapping
//! entity annotations apply to it, resolves conflicts between nested and
//! overlapping spans, reconstructs hyphenated words, and emits a
//! deterministic, column-exact label row on two synchronized layers: the
//! main NERC+NEL layer and a parallel bibliographic-reference layer.
//!
//! ## Quick start
//!
//! ```
//! use standoff_tsv::{convert_document, read_document_str, ConvertConfig};
//! use std::collections::HashMap;
//!
//! let json = r#"{
//!     "id": "Wecklein1894_0087",
//!     "language": "de",
//!     "text": "Aias ist da",
//!     "sentences": [
//!         { "id": 1, "begin": 0, "end": 11, "tokens": [
//!             { "id": 10, "begin": 0, "end": 4 },
//!             { "id": 11, "begin": 5, "end": 8 },
//!             { "id": 12, "begin": 9, "end": 11 }
//!         ] }
//!     ],
//!     "entities": [
//!         { "id": 20, "begin": 0, "end": 4, "value": "pers.myth",
//!           "wikidata_id": "https://www.wikidata.org/wiki/Q172725" }
//!     ]
//! }"#;
//!
//! let doc = read_document_str(json, "Wecklein1894_0087.json").unwrap();
//! let table = convert_document(&doc, &ConvertConfig::default(), &HashMap::new());
//! assert_eq!(table.rows.len(), table.biblio_rows.len());
//! ```
//!
//! ## Pipeline
//!
//! Data flows one way, per document:
//!
//! 1. [`ingest`] parses the standoff JSON into an immutable [`Document`].
//! 2. [`span::SpanIndex`] answers "which mentions overlap token T".
//! 3. [`classify::MentionClasses`] partitions matches into literal /
//!    metonymic / bibliographic classes and applies the precedence rules.
//! 4. [`label`], [`nel`], [`hyphen`] and [`flags`] compute the columns.
//! 5. [`convert::convert_document`] assembles the two row streams;
//!    [`tsv`] and [`dataset`] write and package them.
//!
//! Errors in one annotation never abort a document, and errors in one
//! document never abort a batch; everything is logged and skipped at the
//! smallest possible boundary.

pub mod classify;
pub mod convert;
pub mod dataset;
pub mod document;
mod error;
pub mod flags;
pub mod hyphen;
pub mod ingest;
pub mod label;
pub mod metadata;
pub mod nel;
pub mod ocr;
pub mod span;
pub mod tsv;

pub use convert::{convert_document, ConvertConfig, DocumentTable, TsvLine, COL_LABELS};
pub use document::{Document, HyphenatedWord, Link, Mention, Segment, Token};
pub use error::{Error, Result};
pub use ingest::{read_document, read_document_str};
pub use metadata::{CommentaryMetadata, MetadataTable, DEFAULT_METADATA};
