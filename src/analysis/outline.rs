//! Outline extraction strategy chain.
//!
//! Three independent strategies are tried in fixed priority order; the
//! first to yield a non-empty outline wins. The machine-readable bookmark
//! table is the high-confidence shortcut, a printed ToC page the next
//! best, and whole-document font scoring the fallback.

use crate::error::Result;
use crate::event::{Component, EventLog};
use crate::model::{HeadingLevel, OutlineEntry};
use crate::source::DocumentSource;

use super::lines::stitch_lines;
use super::regions::SuppressionRegions;
use super::score::HeadingScorer;
use super::toc::TocParser;
use super::AnalyzeOptions;

/// Shared inputs for every outline strategy.
pub struct OutlineContext<'a> {
    /// Header/footer regions to exclude
    pub regions: &'a SuppressionRegions,
    /// Already-detected title, so scoring does not re-emit it as a heading
    pub title_hint: &'a str,
    /// Analysis options (strategy toggles, scan caps)
    pub options: &'a AnalyzeOptions,
}

/// One outline-extraction capability, tried in chain order.
pub trait OutlineStrategy {
    /// Short name used in the event narration.
    fn name(&self) -> &'static str;

    /// Attempt extraction; an empty result means the strategy failed and
    /// the chain moves on.
    fn extract(
        &self,
        source: &dyn DocumentSource,
        ctx: &OutlineContext<'_>,
        events: &mut EventLog,
    ) -> Result<Vec<OutlineEntry>>;
}

/// Pass-through over the host document's embedded bookmark table.
pub struct BookmarkStrategy;

impl OutlineStrategy for BookmarkStrategy {
    fn name(&self) -> &'static str {
        "bookmarks"
    }

    fn extract(
        &self,
        source: &dyn DocumentSource,
        _ctx: &OutlineContext<'_>,
        events: &mut EventLog,
    ) -> Result<Vec<OutlineEntry>> {
        let bookmarks = source.bookmarks();
        if bookmarks.is_empty() {
            return Ok(Vec::new());
        }

        events.info(
            Component::Outline,
            format!(
                "found a machine-readable bookmark table with {} entries",
                bookmarks.len()
            ),
        );

        Ok(bookmarks
            .into_iter()
            .map(|b| {
                OutlineEntry::new(
                    HeadingLevel::from_depth(b.level as usize),
                    b.title,
                    // Bookmarks without a resolvable destination point at
                    // the first page rather than being dropped.
                    b.page.unwrap_or(1),
                )
            })
            .collect())
    }
}

/// Parser for a visually identified table-of-contents page.
pub struct VisualTocStrategy {
    parser: TocParser,
}

impl VisualTocStrategy {
    pub fn new() -> Self {
        Self {
            parser: TocParser::new(),
        }
    }
}

impl Default for VisualTocStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineStrategy for VisualTocStrategy {
    fn name(&self) -> &'static str {
        "visual-toc"
    }

    fn extract(
        &self,
        source: &dyn DocumentSource,
        ctx: &OutlineContext<'_>,
        events: &mut EventLog,
    ) -> Result<Vec<OutlineEntry>> {
        let scan_limit = ctx.options.toc_scan_limit.min(source.page_count());

        for number in 1..=scan_limit {
            let page = source.page(number)?;
            if !page.plain_text().to_lowercase().contains("table of contents") {
                continue;
            }

            events.info(
                Component::Outline,
                format!("found 'Table of Contents' on page {}, attempting to parse", number),
            );
            let lines = stitch_lines(&page, events);
            let outline = self.parser.parse_page(&lines);
            if outline.is_empty() {
                events.info(
                    Component::Outline,
                    "table-of-contents page yielded no parseable entries",
                );
            } else {
                events.info(
                    Component::Outline,
                    format!("parsed {} entries from visual table of contents", outline.len()),
                );
            }
            // Only the first ToC-labeled page is parsed; an empty result
            // here fails the strategy without a second attempt.
            return Ok(outline);
        }

        Ok(Vec::new())
    }
}

/// Whole-document rule-based font scoring.
pub struct FontScoringStrategy {
    scorer: HeadingScorer,
}

impl FontScoringStrategy {
    pub fn new() -> Self {
        Self {
            scorer: HeadingScorer::new(),
        }
    }
}

impl Default for FontScoringStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl OutlineStrategy for FontScoringStrategy {
    fn name(&self) -> &'static str {
        "font-scoring"
    }

    fn extract(
        &self,
        source: &dyn DocumentSource,
        ctx: &OutlineContext<'_>,
        events: &mut EventLog,
    ) -> Result<Vec<OutlineEntry>> {
        self.scorer
            .extract(source, ctx.regions, ctx.title_hint, events)
    }
}

/// Run the strategy chain; the first non-empty outline wins.
pub fn extract_outline(
    source: &dyn DocumentSource,
    ctx: &OutlineContext<'_>,
    events: &mut EventLog,
) -> Result<Vec<OutlineEntry>> {
    let bookmark = BookmarkStrategy;
    let visual = VisualTocStrategy::new();
    let scoring = FontScoringStrategy::new();

    let mut strategies: Vec<&dyn OutlineStrategy> = Vec::with_capacity(3);
    if ctx.options.use_bookmarks {
        strategies.push(&bookmark);
    }
    strategies.push(&visual);
    strategies.push(&scoring);

    for strategy in strategies {
        let outline = strategy.extract(source, ctx, events)?;
        if !outline.is_empty() {
            events.debug(
                Component::Outline,
                format!("strategy '{}' produced the outline", strategy.name()),
            );
            return Ok(outline);
        }
        events.debug(
            Component::Outline,
            format!("strategy '{}' produced nothing, falling through", strategy.name()),
        );
    }

    Ok(Vec::new())
}
