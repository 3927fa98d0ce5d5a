//! Batch processing across documents.
//!
//! Each document is an independent computation; rayon fans the work out
//! with one worker per file and no shared mutable state. A failing
//! document is reported and skipped without affecting siblings.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::{analyze_with_options, AnalyzeOptions};
use crate::error::Result;
use crate::model::DocumentStructure;
use crate::source::PdfSource;

/// One failed document in a batch.
#[derive(Debug)]
pub struct FileFailure {
    /// Input file that failed
    pub path: PathBuf,
    /// What went wrong
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// JSON files written, in input order
    pub written: Vec<PathBuf>,
    /// Documents that produced no output
    pub failed: Vec<FileFailure>,
}

impl BatchSummary {
    /// Number of successfully processed documents.
    pub fn succeeded(&self) -> usize {
        self.written.len()
    }
}

/// Infer the structure of a single PDF file.
pub fn process_file(input: &Path, options: &AnalyzeOptions) -> Result<DocumentStructure> {
    let source = PdfSource::open(input)?;
    let analysis = analyze_with_options(&source, options)?;
    Ok(analysis.structure)
}

/// Process every PDF in `input_dir`, writing one JSON file per document
/// into `output_dir`.
///
/// Documents are processed in parallel. Per-document failures are
/// collected in the summary; only the directory scan itself can fail the
/// whole batch.
pub fn process_dir(
    input_dir: &Path,
    output_dir: &Path,
    options: &AnalyzeOptions,
) -> Result<BatchSummary> {
    let mut pdf_files: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .collect();
    pdf_files.sort();

    if pdf_files.is_empty() {
        log::info!("no PDF files found in {}", input_dir.display());
        return Ok(BatchSummary::default());
    }

    fs::create_dir_all(output_dir)?;
    log::info!("processing {} PDF file(s)", pdf_files.len());

    let outcomes: Vec<std::result::Result<PathBuf, FileFailure>> = pdf_files
        .par_iter()
        .map(|path| {
            process_one(path, output_dir, options).map_err(|e| {
                log::error!("processing failed for {}: {}", path.display(), e);
                FileFailure {
                    path: path.clone(),
                    message: e.to_string(),
                }
            })
        })
        .collect();

    let mut summary = BatchSummary::default();
    for outcome in outcomes {
        match outcome {
            Ok(path) => summary.written.push(path),
            Err(failure) => summary.failed.push(failure),
        }
    }
    Ok(summary)
}

/// Process one file and write its JSON artifact.
fn process_one(input: &Path, output_dir: &Path, options: &AnalyzeOptions) -> Result<PathBuf> {
    let structure = process_file(input, options)?;
    let json = serde_json::to_string_pretty(&structure)?;

    let stem = input.file_stem().unwrap_or_default();
    let output = output_dir.join(stem).with_extension("json");
    fs::write(&output, json)?;

    log::info!("{} -> {}", input.display(), output.display());
    Ok(output)
}
