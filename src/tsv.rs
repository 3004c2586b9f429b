//! TSV reading and writing.
//!
//! Output files are tab-separated with no quoting and no quote character: a
//! field is written exactly as computed. The first line is the column
//! header; metadata comment lines follow verbatim.

use crate::convert::{TsvLine, COL_LABELS};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write a header plus lines to a TSV file.
pub fn write_tsv(path: &Path, lines: &[TsvLine]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{}", COL_LABELS.join("\t"))?;
    for line in lines {
        match line {
            TsvLine::Comment(text) => writeln!(out, "{text}")?,
            TsvLine::Row(fields) => writeln!(out, "{}", fields.join("\t"))?,
        }
    }
    out.flush()?;
    Ok(())
}

/// Read a TSV file back into lines, skipping the column header.
///
/// Rows with a column count other than 10 are rejected; the masking and
/// assembly transforms must never change table structure silently.
pub fn parse_tsv(path: &Path) -> Result<Vec<TsvLine>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();

    for raw in reader.lines() {
        let raw = raw?;
        if raw.is_empty() {
            continue;
        }
        if raw.starts_with('#') {
            lines.push(TsvLine::Comment(raw));
            continue;
        }
        if raw == COL_LABELS.join("\t") {
            continue;
        }
        let fields: Vec<&str> = raw.split('\t').collect();
        let fields: [String; 10] = fields
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| {
                Error::parse(format!(
                    "Expected 10 columns in {}, found a row with a different width",
                    path.display()
                ))
            })?;
        lines.push(TsvLine::Row(fields));
    }
    Ok(lines)
}

/// Sibling path of the bibliographic-layer file: `page.tsv` -> `page-biblio.tsv`.
#[must_use]
pub fn biblio_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}-biblio.tsv"))
}
