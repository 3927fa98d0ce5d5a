//! Normalized text lines.

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// One visually coherent line of text on a page.
///
/// Produced by the line normalizer from a page's raw runs. The `text` is
/// trimmed, non-empty, and has passed the coherence filter; lines failing
/// the filter are never materialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextLine {
    /// Stitched, trimmed line text
    pub text: String,

    /// Bounding box covering all constituent runs
    pub bbox: BoundingBox,

    /// Mean font size of the constituent runs (0.0 when no run carried a size)
    pub font_size: f32,

    /// True if any constituent run's font name signals a bold weight
    pub bold: bool,

    /// True if the line's horizontal midpoint lies within 10% of the
    /// page's horizontal midpoint
    pub centered: bool,

    /// 1-based page number the line was found on
    pub page: u32,
}

impl TextLine {
    /// Vertical gap between the bottom of this line and the top of `next`.
    ///
    /// Negative when the two overlap vertically.
    pub fn gap_to(&self, next: &TextLine) -> f32 {
        next.bbox.y0 - self.bbox.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_at(y0: f32, y1: f32) -> TextLine {
        TextLine {
            text: "x".to_string(),
            bbox: BoundingBox::new(0.0, y0, 100.0, y1),
            font_size: 12.0,
            bold: false,
            centered: false,
            page: 1,
        }
    }

    #[test]
    fn test_gap_to() {
        let a = line_at(100.0, 112.0);
        let b = line_at(118.0, 130.0);
        assert!((a.gap_to(&b) - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gap_to_overlapping_is_negative() {
        let a = line_at(100.0, 112.0);
        let b = line_at(110.0, 122.0);
        assert!(a.gap_to(&b) < 0.0);
    }
}
