//! Line normalization.
//!
//! Turns a page's raw runs into stitched, attributed [`TextLine`] records
//! and filters out lines that look like corrupted extraction output rather
//! than language.

use std::collections::HashMap;

use crate::event::{Component, EventLog};
use crate::model::TextLine;
use crate::source::PageContent;

/// Normalize a page's raw lines into [`TextLine`] records.
///
/// Empty lines and lines failing [`is_coherent_text`] are dropped; dropped
/// lines are reported on the event stream.
pub fn stitch_lines(page: &PageContent, events: &mut EventLog) -> Vec<TextLine> {
    let mut lines = Vec::new();

    for raw in &page.lines {
        let text = raw.text().trim().to_string();
        if text.is_empty() {
            continue;
        }

        if !is_coherent_text(&text) {
            events.debug(
                Component::Normalizer,
                format!("filtering incoherent line: '{}'", text),
            );
            continue;
        }

        let mut bbox = match raw.runs.first() {
            Some(run) => run.bbox,
            None => continue,
        };
        for run in &raw.runs[1..] {
            bbox = bbox.union(&run.bbox);
        }

        let sizes: Vec<f32> = raw.runs.iter().map(|r| r.font_size).collect();
        let font_size = if sizes.is_empty() {
            0.0
        } else {
            sizes.iter().sum::<f32>() / sizes.len() as f32
        };

        let bold = raw.runs.iter().any(|r| is_bold_font(&r.font_name));
        let centered = (bbox.center_x() - page.width / 2.0).abs() < page.width * 0.1;

        lines.push(TextLine {
            text,
            bbox,
            font_size,
            bold,
            centered,
            page: page.number,
        });
    }

    lines
}

/// Whether a font name signals a bold weight.
pub fn is_bold_font(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("bold") || name.contains("black") || name.contains("heavy")
}

/// Lightweight, language-agnostic check that a string is likely coherent
/// language rather than repeated-glyph junk.
///
/// Strings shorter than 3 characters always pass (too short to judge).
pub fn is_coherent_text(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() < 3 {
        return true;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let num_words = words.len();
    if num_words == 0 {
        return true;
    }

    // Unnatural repetition: one short word making up most of the line.
    if num_words > 2 {
        let mut short_counts: HashMap<&str, usize> = HashMap::new();
        for word in &words {
            if word.chars().count() <= 3 {
                *short_counts.entry(word).or_insert(0) += 1;
            }
        }
        if let Some(&most_common) = short_counts.values().max() {
            if most_common as f32 / num_words as f32 > 0.5 {
                return false;
            }
        }
    }

    // Implausibly short words throughout.
    let total_len: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_word_len = total_len as f32 / num_words as f32;
    if avg_word_len < 2.5 && num_words > 4 {
        return false;
    }

    // Vowel-to-consonant ratio, a cheap signal across many languages.
    let mut vowels = 0usize;
    let mut consonants = 0usize;
    for c in text.chars() {
        if c.is_alphabetic() {
            if "aeiouAEIOU".contains(c) {
                vowels += 1;
            } else {
                consonants += 1;
            }
        }
    }
    if consonants > 0 && (vowels as f32 / consonants as f32) < 0.1 {
        return false;
    }

    true
}
