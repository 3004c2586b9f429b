//! standoff-tsv - annotation conversion CLI
//!
//! Converts standoff-annotated documents into the shared task's IOB-style
//! TSV format and assembles per-split release files.
//!
//! ```bash
//! # Convert a directory tree of standoff JSON files
//! standoff-tsv convert -i annotations/de -o release/de
//!
//! # Assemble a split release from converted documents
//! standoff-tsv dataset --name ajmc --version v0.4 --split test \
//!     -o release release/de/*.tsv
//!
//! # Mask the ground-truth columns of a release file
//! standoff-tsv mask -i ajmc-data-v0.4-test.tsv -o masked.tsv --nerc --nel
//! ```

use clap::{Parser, Subcommand};
use glob::glob;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use standoff_tsv::dataset::{
    create_dataset, mask_lines, masked_dataset_path, write_masked_dataset,
};
use standoff_tsv::flags::SegmentEndFlag;
use standoff_tsv::metadata::{MetadataTable, DEFAULT_METADATA};
use standoff_tsv::ocr::{extract_noisy_entities, NoisyEntity};
use standoff_tsv::tsv::{biblio_path, parse_tsv, write_tsv};
use standoff_tsv::{convert_document, read_document, ConvertConfig, Result};

/// Convert standoff annotations into IOB-style TSV releases.
#[derive(Parser)]
#[command(name = "standoff-tsv", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a directory of standoff JSON files into TSV files.
    Convert {
        /// Input directory with .json standoff files.
        #[arg(short = 'i', long)]
        dir_in: PathBuf,
        /// Output directory for the .tsv files (tree mirrored).
        #[arg(short = 'o', long)]
        dir_out: PathBuf,
        /// External commentary metadata table (JSON); built-in table used
        /// otherwise.
        #[arg(long)]
        metadata: Option<PathBuf>,
        /// Drop information in the nested column.
        #[arg(long)]
        drop_nested: bool,
        /// Mark segment ends with EndOfLine instead of EndOfSentence.
        #[arg(long)]
        end_of_line: bool,
    },
    /// Assemble converted documents into one split release file.
    Dataset {
        /// Dataset name, e.g. `ajmc`.
        #[arg(long)]
        name: String,
        /// Release version, e.g. `v0.4`.
        #[arg(long)]
        version: String,
        /// Split name (train, dev, test). The test split also gets a masked
        /// variant.
        #[arg(long)]
        split: String,
        /// Output directory; the file lands in `{output}/{version}/`.
        #[arg(short = 'o', long)]
        output_dir: PathBuf,
        /// Per-document TSV files, in release order.
        files: Vec<PathBuf>,
    },
    /// Blank out annotation columns of a release file.
    Mask {
        /// Input TSV file.
        #[arg(short = 'i', long)]
        input: PathBuf,
        /// Output TSV file.
        #[arg(short = 'o', long)]
        output: PathBuf,
        /// Mask the NERC columns.
        #[arg(long)]
        nerc: bool,
        /// Mask the NEL columns.
        #[arg(long)]
        nel: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Convert {
            dir_in,
            dir_out,
            metadata,
            drop_nested,
            end_of_line,
        } => run_convert(&dir_in, &dir_out, metadata.as_deref(), drop_nested, end_of_line),
        Commands::Dataset {
            name,
            version,
            split,
            output_dir,
            files,
        } => run_dataset(&name, &version, &split, &output_dir, &files),
        Commands::Mask {
            input,
            output,
            nerc,
            nel,
        } => run_mask(&input, &output, nerc, nel),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_metadata_table(path: Option<&Path>) -> Result<MetadataTable> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        None => Ok(DEFAULT_METADATA.clone()),
    }
}

fn run_convert(
    dir_in: &Path,
    dir_out: &Path,
    metadata: Option<&Path>,
    drop_nested: bool,
    end_of_line: bool,
) -> Result<()> {
    let table = load_metadata_table(metadata)?;
    let config = ConvertConfig {
        drop_nested,
        segment_end_flag: if end_of_line {
            SegmentEndFlag::EndOfLine
        } else {
            SegmentEndFlag::EndOfSentence
        },
        ..ConvertConfig::default()
    };

    let pattern = format!("{}/**/*.json", dir_in.display());
    let mut input_files: Vec<PathBuf> = glob(&pattern)
        .map_err(|e| standoff_tsv::Error::invalid_input(e.to_string()))?
        .filter_map(|entry| entry.ok())
        .collect();
    input_files.sort();

    info!("Start conversion of {} files.", input_files.len());

    let mut noisy_entities: Vec<NoisyEntity> = Vec::new();
    for input in &input_files {
        let relative = input.strip_prefix(dir_in).unwrap_or(input);
        let output = dir_out.join(relative).with_extension("tsv");
        info!("Converting {} into {}", input.display(), output.display());

        let doc = match read_document(input) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Skipping {}: {}", input.display(), e);
                continue;
            }
        };

        noisy_entities.extend(extract_noisy_entities(&doc));

        let document_table = convert_document(&doc, &config, &table);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_tsv(&output, &document_table.rows)?;
        write_tsv(&biblio_path(&output), &document_table.biblio_rows)?;
    }

    info!("Conversion completed.");

    if !noisy_entities.is_empty() {
        let path = dir_out.join("entity-ocr-correction.tsv");
        write_noisy_entities(&path, &noisy_entities)?;
        info!(
            "Written {} noisy entities to {}",
            noisy_entities.len(),
            path.display()
        );
    }

    Ok(())
}

fn write_noisy_entities(path: &Path, entities: &[NoisyEntity]) -> Result<()> {
    use std::io::Write;
    let mut out = std::io::BufWriter::new(std::fs::File::create(path)?);
    writeln!(
        out,
        "entity_surface\tgold_transcript\tlevenshtein_norm\tdocument_id\tentity_fine_type\twikidata_id"
    )?;
    for e in entities {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            e.entity_surface,
            e.gold_transcript.as_deref().unwrap_or(""),
            e.levenshtein_norm,
            e.document_id,
            e.entity_fine_type,
            e.wikidata_id
        )?;
    }
    Ok(())
}

fn run_dataset(
    name: &str,
    version: &str,
    split: &str,
    output_dir: &Path,
    files: &[PathBuf],
) -> Result<()> {
    let dataset_path = create_dataset(files, name, split, version, output_dir)?;

    if split == "test" {
        // ground-truth values masked out for the release
        let masked = masked_dataset_path(&dataset_path);
        write_masked_dataset(&dataset_path, &masked)?;
        info!("Written masked test set to {}", masked.display());
    }

    Ok(())
}

fn run_mask(input: &Path, output: &Path, nerc: bool, nel: bool) -> Result<()> {
    let mut lines = parse_tsv(input)?;
    mask_lines(&mut lines, nerc, nel);
    write_tsv(output, &lines)?;
    Ok(())
}
