//! Repeating header/footer detection.
//!
//! Text that recurs verbatim across a sample of leading pages is almost
//! always a running header or footer. Its bounding boxes become
//! suppression regions that the title and outline detectors exclude.

use std::collections::HashMap;

use crate::error::Result;
use crate::event::{Component, EventLog};
use crate::model::BoundingBox;
use crate::source::DocumentSource;

use super::lines::stitch_lines;

/// Regions to exclude from title and heading consideration.
///
/// Purely an exclusion filter; nothing is removed from the page content.
#[derive(Debug, Clone, Default)]
pub struct SuppressionRegions {
    regions: Vec<BoundingBox>,
}

impl SuppressionRegions {
    /// An empty region set (suppresses nothing).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create from a list of boxes.
    pub fn from_boxes(regions: Vec<BoundingBox>) -> Self {
        Self { regions }
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether `bbox` intersects any suppression region.
    pub fn suppresses(&self, bbox: &BoundingBox) -> bool {
        self.regions.iter().any(|r| r.intersects(bbox))
    }
}

/// Detect repeating headers and footers over a sample of leading pages.
///
/// Documents with 3 or fewer pages return an empty set: too little signal
/// to tell a header from ordinary content. A text repeats when its
/// exact-match occurrence count exceeds half the sample size; texts with
/// no ASCII-alphabetic character are ignored so that page-number-only
/// footers are left alone.
pub fn detect_repeating_regions(
    source: &dyn DocumentSource,
    sample_pages: u32,
    events: &mut EventLog,
) -> Result<SuppressionRegions> {
    let page_count = source.page_count();
    if page_count <= 3 {
        return Ok(SuppressionRegions::empty());
    }

    let samples = sample_pages.min(page_count);
    let mut sampled_lines = Vec::new();
    for number in 1..=samples {
        let page = source.page(number)?;
        sampled_lines.extend(stitch_lines(&page, events));
    }

    let mut text_counts: HashMap<&str, usize> = HashMap::new();
    for line in &sampled_lines {
        *text_counts.entry(line.text.as_str()).or_insert(0) += 1;
    }

    let repeating: Vec<&str> = text_counts
        .iter()
        .filter(|(_, &count)| count * 2 > samples as usize)
        .map(|(&text, _)| text)
        .filter(|text| text.chars().any(|c| c.is_ascii_alphabetic()))
        .collect();

    let regions: Vec<BoundingBox> = sampled_lines
        .iter()
        .filter(|line| repeating.contains(&line.text.as_str()))
        .map(|line| line.bbox)
        .collect();

    if !regions.is_empty() {
        events.info(
            Component::HeaderFooter,
            format!(
                "detected {} repeating header/footer text(s) to ignore",
                repeating.len()
            ),
        );
    }

    Ok(SuppressionRegions::from_boxes(regions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{MemorySource, PageContent, RawLine, RawRun};

    fn page(texts: &[(&str, f32)]) -> PageContent {
        let lines = texts
            .iter()
            .map(|(text, y)| RawLine {
                runs: vec![RawRun {
                    text: text.to_string(),
                    bbox: BoundingBox::new(50.0, *y, 550.0, *y + 12.0),
                    font_name: "Helvetica".to_string(),
                    font_size: 12.0,
                }],
            })
            .collect();
        PageContent {
            number: 0,
            width: 612.0,
            height: 792.0,
            lines,
        }
    }

    fn doc_with_footer(pages: u32, footer_on: u32) -> MemorySource {
        let mut source = MemorySource::new();
        for i in 0..pages {
            let mut texts = vec![(format!("Body text of page {}", i + 1), 100.0)];
            if i < footer_on {
                texts.push(("Acme Corp Confidential".to_string(), 760.0));
            }
            let refs: Vec<(&str, f32)> = texts.iter().map(|(t, y)| (t.as_str(), *y)).collect();
            source.push_page(page(&refs));
        }
        source
    }

    #[test]
    fn test_footer_on_every_sampled_page_is_detected() {
        let source = doc_with_footer(10, 10);
        let mut events = EventLog::new();
        let regions = detect_repeating_regions(&source, 5, &mut events).unwrap();
        // One occurrence per sampled page.
        assert_eq!(regions.len(), 5);
        assert!(regions.suppresses(&BoundingBox::new(50.0, 760.0, 550.0, 772.0)));
    }

    #[test]
    fn test_rare_text_is_not_detected() {
        // Footer on only 2 of 5 sampled pages: 2*2 <= 5.
        let source = doc_with_footer(10, 2);
        let mut events = EventLog::new();
        let regions = detect_repeating_regions(&source, 5, &mut events).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_short_documents_return_empty() {
        let source = doc_with_footer(3, 3);
        let mut events = EventLog::new();
        let regions = detect_repeating_regions(&source, 5, &mut events).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_page_numbers_are_not_suppressed() {
        let mut source = MemorySource::new();
        for i in 0..6 {
            let body = format!("Body of page {}", i + 1);
            source.push_page(page(&[(body.as_str(), 100.0), ("- 12 -", 760.0)]));
        }
        let mut events = EventLog::new();
        let regions = detect_repeating_regions(&source, 5, &mut events).unwrap();
        // "- 12 -" repeats but has no alphabetic character.
        assert!(regions.is_empty());
    }
}
