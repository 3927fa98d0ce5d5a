//! Rule-based heading scoring.
//!
//! The last-resort outline strategy: measure every line against the
//! document's body font size and score the ones that stand out. The
//! resulting hierarchy is relative to the score clusters observed in this
//! document, not an absolute size-to-level table.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::Result;
use crate::event::{Component, EventLog};
use crate::model::{HeadingLevel, OutlineEntry, TextLine};
use crate::source::DocumentSource;

use super::lines::stitch_lines;
use super::regions::SuppressionRegions;

/// Sizes must exceed the body size by this margin to score at all.
const SIZE_MARGIN: f32 = 0.5;

/// Scores at or below this value are discarded.
const MIN_SCORE: f32 = 5.0;

/// How many distinct score clusters map onto heading levels.
const MAX_LEVELS: usize = 4;

/// Scorer holding the compiled filter patterns.
pub struct HeadingScorer {
    enumerator: Regex,
    dashes: Regex,
}

impl HeadingScorer {
    /// Compile the scoring patterns.
    pub fn new() -> Self {
        Self {
            // "1.", "IV)", "a." and similar section enumerators.
            enumerator: Regex::new(r"(?i)^(?:[IVX\d]+[.)]|\w\.)").unwrap(),
            dashes: Regex::new(r"^-+$").unwrap(),
        }
    }

    /// Extract an outline by scoring every line of the document.
    ///
    /// Lines intersecting a suppression region and lines equal to the
    /// already-detected title are excluded up front so the title is not
    /// re-emitted as a heading.
    pub fn extract(
        &self,
        source: &dyn DocumentSource,
        regions: &SuppressionRegions,
        title_hint: &str,
        events: &mut EventLog,
    ) -> Result<Vec<OutlineEntry>> {
        let title_norm = title_hint.trim().to_lowercase();

        let mut all_lines: Vec<TextLine> = Vec::new();
        for number in 1..=source.page_count() {
            let page = source.page(number)?;
            for line in stitch_lines(&page, events) {
                if regions.suppresses(&line.bbox) {
                    continue;
                }
                if line.text.to_lowercase() == title_norm {
                    continue;
                }
                all_lines.push(line);
            }
        }

        if all_lines.is_empty() {
            return Ok(Vec::new());
        }

        let body_size = body_font_size(&all_lines);

        let scored: Vec<(f32, &TextLine)> = all_lines
            .iter()
            .filter_map(|line| {
                self.score_line(line, body_size)
                    .map(|score| (score, line))
            })
            .collect();

        if scored.is_empty() {
            return Ok(Vec::new());
        }

        // Top distinct scores become the level ladder for this document.
        let mut distinct: Vec<f32> = scored.iter().map(|(score, _)| *score).collect();
        distinct.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        distinct.dedup();
        distinct.truncate(MAX_LEVELS);

        let outline: Vec<OutlineEntry> = scored
            .iter()
            .filter_map(|(score, line)| {
                distinct.iter().position(|s| s == score).map(|rank| {
                    OutlineEntry::new(
                        HeadingLevel::from_depth(rank + 1),
                        line.text.clone(),
                        line.page,
                    )
                })
            })
            .collect();

        events.info(
            Component::Outline,
            format!(
                "extracted {} headings using rule-based scoring (body size {})",
                outline.len(),
                body_size
            ),
        );
        Ok(outline)
    }

    /// Score one line; `None` when a negative filter disqualifies it or
    /// the score does not clear [`MIN_SCORE`].
    fn score_line(&self, line: &TextLine, body_size: i32) -> Option<f32> {
        let text = line.text.as_str();
        let lower = text.to_lowercase();

        // What is definitely not a heading: URLs, horizontal rules, and
        // short colon-terminated lines (form-field labels). The colon
        // filter knowingly also drops short real headings like
        // "Conclusion:"; see the pinning test below.
        if lower.contains("www.") || lower.contains(".com") || self.dashes.is_match(text) {
            return None;
        }
        if text.ends_with(':') && text.chars().count() < 30 {
            return None;
        }

        let mut score = 0.0f32;
        let body = body_size as f32;
        if line.font_size > body + SIZE_MARGIN {
            score += line.font_size - body;
            if line.bold {
                score += 5.0;
            }
            if line.centered {
                score += 5.0;
            }
            if self.enumerator.is_match(text) {
                score += 10.0;
            }
            if is_all_uppercase(text) && text.split_whitespace().count() < 7 {
                score += 5.0;
            }
            if text.chars().count() > 120 || text.ends_with('.') {
                score -= 10.0;
            }
        }

        (score > MIN_SCORE).then_some(score)
    }
}

impl Default for HeadingScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Body font size: the most common rounded size across all lines.
///
/// Ties resolve toward the smaller size.
fn body_font_size(lines: &[TextLine]) -> i32 {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for line in lines {
        *counts.entry(line.font_size.round() as i32).or_insert(0) += 1;
    }

    let mut best_size = 12;
    let mut best_count = 0;
    for (size, count) in counts {
        if count > best_count {
            best_size = size;
            best_count = count;
        }
    }
    best_size
}

/// Whether all alphabetic characters are uppercase (and at least one
/// exists).
fn is_all_uppercase(text: &str) -> bool {
    let mut has_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            has_alpha = true;
            if c.is_lowercase() {
                return false;
            }
        }
    }
    has_alpha
}
