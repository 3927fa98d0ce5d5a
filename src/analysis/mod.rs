//! Document-structure inference pipeline.
//!
//! One straight-line pass per document: classify, detect repeating
//! headers/footers, detect the title, run the outline strategy chain, and
//! reconcile the pieces into a [`DocumentStructure`]. Nothing here
//! suspends, locks, or shares state; parallelism lives at the document
//! granularity in [`crate::batch`].

mod classify;
mod lines;
mod metadata;
mod outline;
mod regions;
mod score;
mod title;
mod toc;

pub use classify::classify;
pub use lines::{is_coherent_text, stitch_lines};
pub use metadata::metadata_title_fallback;
pub use outline::{
    extract_outline, BookmarkStrategy, FontScoringStrategy, OutlineContext, OutlineStrategy,
    VisualTocStrategy,
};
pub use regions::{detect_repeating_regions, SuppressionRegions};
pub use score::HeadingScorer;
pub use title::detect_title;
pub use toc::TocParser;

use crate::error::Result;
use crate::event::{Component, Event, EventLog};
use crate::model::{DocumentClass, DocumentStructure};
use crate::source::DocumentSource;

/// Options for a document pass.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Whether the machine-readable bookmark table may short-circuit the
    /// outline chain
    pub use_bookmarks: bool,

    /// How many leading pages to scan for a printed table of contents
    pub toc_scan_limit: u32,

    /// How many leading pages to sample for header/footer detection
    pub header_sample_pages: u32,
}

impl AnalyzeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ignore the embedded bookmark table.
    pub fn without_bookmarks(mut self) -> Self {
        self.use_bookmarks = false;
        self
    }

    /// Set the ToC scan limit.
    pub fn with_toc_scan_limit(mut self, pages: u32) -> Self {
        self.toc_scan_limit = pages;
        self
    }

    /// Set the header/footer sample size.
    pub fn with_header_sample_pages(mut self, pages: u32) -> Self {
        self.header_sample_pages = pages;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            use_bookmarks: true,
            toc_scan_limit: 10,
            header_sample_pages: 5,
        }
    }
}

/// Everything a document pass produced.
#[derive(Debug)]
pub struct Analysis {
    /// Title and outline, reconciled
    pub structure: DocumentStructure,

    /// Document classification
    pub class: DocumentClass,

    /// Ordered narration of what each component found
    pub events: Vec<Event>,
}

/// Infer a document's structure with default options.
pub fn analyze(source: &dyn DocumentSource) -> Result<Analysis> {
    analyze_with_options(source, &AnalyzeOptions::default())
}

/// Infer a document's structure.
pub fn analyze_with_options(
    source: &dyn DocumentSource,
    options: &AnalyzeOptions,
) -> Result<Analysis> {
    let mut events = EventLog::new();

    let class = classify(source, &mut events)?;
    let regions = detect_repeating_regions(source, options.header_sample_pages, &mut events)?;
    let prominent_title = detect_title(source, &regions, &mut events)?;

    let ctx = OutlineContext {
        regions: &regions,
        title_hint: &prominent_title,
        options,
    };
    let mut outline = extract_outline(source, &ctx, &mut events)?;

    let mut title = match class {
        DocumentClass::Regular => {
            if prominent_title.is_empty() {
                metadata_title_fallback(source, &mut events)
            } else {
                prominent_title.clone()
            }
        }
        // Flyers carry their message in the outline, not a title.
        DocumentClass::Flyer => String::new(),
    };

    if class == DocumentClass::Flyer && title.is_empty() && outline.len() == 1 {
        title = outline.remove(0).text;
        events.info(
            Component::Pipeline,
            "promoted the flyer's only heading to the title",
        );
    }

    if let Some(first) = outline.first() {
        if !prominent_title.is_empty()
            && first.text.trim().to_lowercase() == prominent_title.trim().to_lowercase()
        {
            outline.remove(0);
            events.debug(
                Component::Pipeline,
                "removed leading outline entry duplicating the title",
            );
        }
    }

    let structure = DocumentStructure {
        title: title.trim().to_string(),
        outline,
    };

    Ok(Analysis {
        structure,
        class,
        events: events.into_events(),
    })
}
