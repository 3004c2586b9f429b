//! Dataset release assembly.
//!
//! Concatenates per-document TSV files into split-level release files,
//! verifies no expected document went missing, and produces the masked
//! variant of the test split. Verification failures are hard errors here, at
//! the aggregation boundary; nothing inside per-document conversion is.

use crate::convert::{TsvLine, COL_LABELS};
use crate::error::{Error, Result};
use crate::tsv::{parse_tsv, write_tsv};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Sentinel value written into masked columns.
pub const MASK_SENTINEL: &str = "_";

/// Concatenate per-document TSV files into one release file.
///
/// The column header is taken from the first file; subsequent files
/// contribute everything but their header line. Missing input files are
/// skipped with a warning. Document blocks are separated by a blank line.
pub fn concat_tsv_files(output_path: &Path, input_files: &[PathBuf]) -> Result<()> {
    let file = File::create(output_path)?;
    let mut out = BufWriter::new(file);

    let mut blocks: Vec<String> = Vec::new();
    for (n, input) in input_files.iter().enumerate() {
        if !input.exists() {
            warn!("Input file {} does not exist", input.display());
            continue;
        }
        debug!("Read input from file {}", input.display());

        let reader = BufReader::new(File::open(input)?);
        let mut lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;
        if n > 0 && !lines.is_empty() {
            lines.remove(0);
        }
        blocks.push(lines.join("\n"));
    }

    write!(out, "{}", blocks.join("\n\n"))?;
    out.flush()?;
    Ok(())
}

/// Check that an assembled release file contains every expected document.
///
/// Documents are identified by their `document_id` metadata comment line.
pub fn is_tsv_complete(path: &Path, expected_doc_ids: &[String]) -> Result<bool> {
    let reader = BufReader::new(File::open(path)?);
    let mut found: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.trim_start_matches('#').split_once('=') {
            if key.trim().ends_with("document_id") {
                found.push(value.trim().to_string());
            }
        }
    }
    Ok(expected_doc_ids.iter().all(|id| found.contains(id)))
}

/// Blank out annotation columns with the masking sentinel, in place.
///
/// `mask_nerc` clears the six NERC columns, `mask_nel` the two NEL columns.
/// The token and MISC columns, comments and row count are preserved, so the
/// transform is structure-preserving.
pub fn mask_lines(lines: &mut [TsvLine], mask_nerc: bool, mask_nel: bool) {
    for line in lines.iter_mut() {
        if let TsvLine::Row(fields) = line {
            if mask_nerc {
                for field in fields.iter_mut().take(7).skip(1) {
                    *field = MASK_SENTINEL.to_string();
                }
            }
            if mask_nel {
                for field in fields.iter_mut().take(9).skip(7) {
                    *field = MASK_SENTINEL.to_string();
                }
            }
        }
    }
}

/// Assemble one split release file from per-document files.
///
/// Returns the path of the written file. Fails hard if an expected document
/// is missing from the result.
pub fn create_dataset(
    files: &[PathBuf],
    dataset_name: &str,
    split: &str,
    version: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let basedir = output_dir.join(version);
    std::fs::create_dir_all(&basedir)?;

    let filename = format!("{dataset_name}-data-{version}-{split}.tsv");
    let output_path = basedir.join(filename);
    concat_tsv_files(&output_path, files)?;
    info!("Written {} to {}", split, output_path.display());

    let expected: Vec<String> = files
        .iter()
        .filter_map(|f| f.file_stem().and_then(|s| s.to_str()))
        .map(String::from)
        .collect();
    if !is_tsv_complete(&output_path, &expected)? {
        return Err(Error::dataset(format!(
            "{} is missing expected documents",
            output_path.display()
        )));
    }
    info!(
        "{} contains all {} expected documents",
        output_path.display(),
        expected.len()
    );

    Ok(output_path)
}

/// Write the masked variant of an assembled release file.
pub fn write_masked_dataset(dataset_path: &Path, masked_path: &Path) -> Result<()> {
    let mut lines = parse_tsv(dataset_path)?;
    mask_lines(&mut lines, true, true);
    write_tsv(masked_path, &lines)?;
    Ok(())
}

/// `{name}-data-{version}-test.tsv` -> `{name}-data-{version}-test-masked.tsv`.
#[must_use]
pub fn masked_dataset_path(dataset_path: &Path) -> PathBuf {
    let stem = dataset_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    dataset_path.with_file_name(format!("{stem}-masked.tsv"))
}
