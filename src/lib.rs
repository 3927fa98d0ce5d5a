//! # pdfoutline
//!
//! Document-structure inference for PDFs.
//!
//! PDFs expose only low-level visual primitives: text runs with positions,
//! font names, and sizes. This library reconstructs a document's logical
//! structure from those cues — a title and a hierarchical outline of
//! headings — using typography and layout, with the machine-readable
//! bookmark table as a high-confidence shortcut when one exists.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::extract_structure;
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let structure = extract_structure("document.pdf")?;
//!     println!("title: {}", structure.title);
//!     for entry in &structure.outline {
//!         println!("{} {} (page {})", entry.level, entry.text, entry.page);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! - **Line normalization**: raw runs are stitched into attributed lines;
//!   incoherent extraction junk is filtered out.
//! - **Classification**: a two-stage rule engine labels the document
//!   `Regular` or `Flyer`.
//! - **Header/footer detection**: text repeating across leading pages
//!   becomes suppression regions excluded from further analysis.
//! - **Title detection**: a prominence score over the first page.
//! - **Outline detection**: bookmarks, then a printed table-of-contents
//!   page, then whole-document font scoring — first non-empty wins.
//!
//! Batch processing fans out across documents with rayon; within a
//! document the pipeline is a straight-line sequence of pure scoring
//! passes.

pub mod analysis;
pub mod batch;
pub mod error;
pub mod event;
pub mod model;
pub mod source;

// Re-export commonly used types
pub use analysis::{
    analyze, analyze_with_options, Analysis, AnalyzeOptions, HeadingScorer, OutlineStrategy,
    SuppressionRegions, TocParser,
};
pub use batch::{process_dir, process_file, BatchSummary, FileFailure};
pub use error::{Error, Result};
pub use event::{Component, Event, EventLevel};
pub use model::{
    BoundingBox, DocumentClass, DocumentStructure, HeadingLevel, OutlineEntry, TextLine,
};
pub use source::{Bookmark, DocumentSource, MemorySource, PageContent, PdfSource, RawLine, RawRun};

use std::path::Path;

/// Infer the structure of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// let structure = pdfoutline::extract_structure("report.pdf").unwrap();
/// println!("{} headings under '{}'", structure.outline.len(), structure.title);
/// ```
pub fn extract_structure<P: AsRef<Path>>(path: P) -> Result<DocumentStructure> {
    process_file(path.as_ref(), &AnalyzeOptions::default())
}

/// Infer the structure of a PDF file with custom options.
pub fn extract_structure_with_options<P: AsRef<Path>>(
    path: P,
    options: &AnalyzeOptions,
) -> Result<DocumentStructure> {
    process_file(path.as_ref(), options)
}

/// Infer the structure of a PDF held in memory.
pub fn extract_structure_from_bytes(data: &[u8]) -> Result<DocumentStructure> {
    let source = PdfSource::from_bytes(data)?;
    Ok(analyze(&source)?.structure)
}
