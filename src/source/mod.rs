//! Host-document boundary.
//!
//! Structure inference runs against [`DocumentSource`], the contract a
//! page-rendering backend must satisfy: page dimensions, text grouped into
//! low-level lines of positioned runs, an optional machine-readable
//! bookmark table, and optional embedded metadata. The engine itself never
//! touches a PDF object; [`PdfSource`] adapts lopdf to this trait and
//! [`MemorySource`] serves embedders that already hold positioned text.

mod memory;
mod pdf;

pub use memory::MemorySource;
pub use pdf::PdfSource;

use crate::error::Result;
use crate::model::BoundingBox;

/// One text run: a maximal stretch of text sharing font and position.
#[derive(Debug, Clone)]
pub struct RawRun {
    /// Decoded text content
    pub text: String,
    /// Bounding box in top-left-origin page coordinates
    pub bbox: BoundingBox,
    /// Backend font name (e.g. "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
}

/// A low-level line: the runs the backend grouped onto one baseline.
#[derive(Debug, Clone, Default)]
pub struct RawLine {
    /// Constituent runs, left to right
    pub runs: Vec<RawRun>,
}

impl RawLine {
    /// Concatenated text of all runs, untrimmed.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Everything the engine needs from one rendered page.
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 1-based page number
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Low-level lines in reading order (top to bottom)
    pub lines: Vec<RawLine>,
}

impl PageContent {
    /// Whole-page plain text: raw line texts joined with newlines.
    ///
    /// Built from the same runs the normalizer sees, before any coherence
    /// filtering, so phrase searches observe everything on the page.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One entry of a machine-readable bookmark table.
#[derive(Debug, Clone)]
pub struct Bookmark {
    /// 1-based nesting depth
    pub level: u8,
    /// Bookmark title
    pub title: String,
    /// 1-based destination page, when the backend could resolve it
    pub page: Option<u32>,
}

/// The contract a document backend must satisfy.
pub trait DocumentSource {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Content of one page, 1-based.
    fn page(&self, number: u32) -> Result<PageContent>;

    /// The embedded bookmark table, flattened in pre-order; empty when the
    /// document carries none.
    fn bookmarks(&self) -> Vec<Bookmark>;

    /// The embedded metadata title, when present and non-empty.
    fn metadata_title(&self) -> Option<String>;
}
