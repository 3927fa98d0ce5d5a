//! Prominence-based title detection.
//!
//! The title is usually the visually loudest text near the top of the
//! first page. Each candidate line gets a prominence score from its font
//! size, boldness, and vertical position; the top candidates are merged
//! back into one title block when they are stacked closely together.

use crate::error::Result;
use crate::event::{Component, EventLog};
use crate::model::TextLine;
use crate::source::DocumentSource;

use super::lines::stitch_lines;
use super::regions::SuppressionRegions;

/// Minimum candidate length; anything shorter is noise, not a title.
const MIN_TITLE_LINE_CHARS: usize = 4;

/// Detect the document title from page 1.
///
/// Returns an empty string when the document has no pages or no usable
/// candidate survives filtering.
pub fn detect_title(
    source: &dyn DocumentSource,
    regions: &SuppressionRegions,
    events: &mut EventLog,
) -> Result<String> {
    if source.page_count() == 0 {
        return Ok(String::new());
    }

    let page = source.page(1)?;
    let page_height = page.height;
    let lines = stitch_lines(&page, events);

    let mut scored: Vec<(f32, TextLine)> = lines
        .into_iter()
        .filter(|line| !regions.suppresses(&line.bbox))
        .filter(|line| line.text.chars().count() >= MIN_TITLE_LINE_CHARS)
        .map(|line| (prominence_score(&line, page_height), line))
        .collect();

    if scored.is_empty() {
        return Ok(String::new());
    }

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    // Top 3 by prominence, re-ordered top to bottom on the page.
    let mut top: Vec<TextLine> = scored.into_iter().take(3).map(|(_, line)| line).collect();
    top.sort_by(|a, b| {
        a.bbox
            .y0
            .partial_cmp(&b.bbox.y0)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Greedily absorb lines stacked within one font-size of the last
    // accepted line; a large gap breaks the title block.
    let mut merged: Vec<&TextLine> = vec![&top[0]];
    let mut last = &top[0];
    for line in &top[1..] {
        if last.gap_to(line) < last.font_size {
            merged.push(line);
            last = line;
        }
    }

    let title = merged
        .iter()
        .map(|line| line.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    events.info(
        Component::Title,
        format!("found potential title by prominence: '{}'", title),
    );
    Ok(title)
}

/// Prominence score: font size, boosted for boldness and for sitting in
/// the top half of the page. The boosts compound.
fn prominence_score(line: &TextLine, page_height: f32) -> f32 {
    let mut score = line.font_size;
    if line.bold {
        score *= 1.5;
    }
    if line.bbox.y1 < page_height * 0.5 {
        score *= 1.5;
    }
    score
}
