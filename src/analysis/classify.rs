//! Document classification.
//!
//! A prioritized two-stage rule engine that labels a document `Regular`
//! (transactional, long-form) or `Flyer` (promotional). Classification
//! depends only on document content, is side-effect-free, and is
//! idempotent for a fixed document.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::event::{Component, EventLog};
use crate::model::{DocumentClass, TextLine};
use crate::source::DocumentSource;

use super::lines::stitch_lines;

/// Phrases whose presence, together with fillable fields, marks a form.
const DECLARATION_PHRASES: [&str; 3] = ["i declare that", "i undertake to", "signature:"];

/// Phrases typical of invitations and promotional material.
const PROMO_PHRASES: [&str; 5] = [
    "rsvp",
    "visit website",
    "you're invited",
    "party",
    "conference and awards",
];

/// Flyer score at or above which the document classifies as `Flyer`.
const FLYER_THRESHOLD: i32 = 3;

/// Pages to analyze: every page of a short document, otherwise the
/// deduplicated set {first, second, middle, last}.
fn sample_page_numbers(page_count: u32) -> Vec<u32> {
    if page_count <= 3 {
        return (1..=page_count).collect();
    }
    let sample: BTreeSet<u32> = [1, 2, page_count / 2 + 1, page_count].into_iter().collect();
    sample.into_iter().collect()
}

/// Classify a document as `Regular` or `Flyer`.
pub fn classify(source: &dyn DocumentSource, events: &mut EventLog) -> Result<DocumentClass> {
    let page_count = source.page_count();

    let mut sample_text = String::new();
    let mut sample_lines: Vec<TextLine> = Vec::new();
    for number in sample_page_numbers(page_count) {
        let page = source.page(number)?;
        sample_lines.extend(stitch_lines(&page, events));
        sample_text.push_str(&page.plain_text().to_lowercase());
        sample_text.push('\n');
    }

    // Priority 1: transactional forms always win regardless of score.
    let has_input_fields = sample_lines
        .iter()
        .any(|line| line.text.ends_with(':') || line.text.contains("____"));
    let has_declaration = DECLARATION_PHRASES
        .iter()
        .any(|phrase| sample_text.contains(phrase));

    if has_input_fields && has_declaration {
        events.info(
            Component::Classifier,
            "found input fields and declaration, classified as Regular (form)",
        );
        return Ok(DocumentClass::Regular);
    }

    // Priority 2: score flyer characteristics.
    let mut score = 0;

    if page_count <= 2 {
        score += 1;
    }
    if !sample_text.contains("table of contents") && !sample_text.contains("appendix") {
        score += 1;
    }
    if PROMO_PHRASES
        .iter()
        .any(|phrase| sample_text.contains(phrase))
    {
        score += 2;
    }

    let sizes: Vec<f32> = sample_lines
        .iter()
        .map(|line| line.font_size)
        .filter(|size| *size > 0.0)
        .collect();
    if let (Some(max), Some(min)) = (
        sizes.iter().cloned().reduce(f32::max),
        sizes.iter().cloned().reduce(f32::min),
    ) {
        if max / min > 3.0 {
            score += 1;
        }
    }

    let class = if score >= FLYER_THRESHOLD {
        DocumentClass::Flyer
    } else {
        DocumentClass::Regular
    };
    events.info(
        Component::Classifier,
        format!("flyer score is {}, classified as {}", score, class),
    );
    Ok(class)
}
