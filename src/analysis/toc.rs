//! Visual table-of-contents parsing.
//!
//! A printed ToC page encodes the outline the document's authors intended.
//! Each line is matched against "optional section number, heading text,
//! dotted leader or wide gap, page number".

use regex::Regex;

use crate::model::{HeadingLevel, OutlineEntry, TextLine};

/// Parser for lines of a visually identified table-of-contents page.
pub struct TocParser {
    pattern: Regex,
}

impl TocParser {
    /// Compile the ToC line pattern.
    pub fn new() -> Self {
        // Section prefix, heading text, then a separator of 3+ leader dots
        // or 4+ spaces, then the page number.
        let pattern = Regex::new(
            r"^(?P<section>[\d.]*\s*)?(?P<text>.+?)(?:\s*\.{3,}\s*|\s{4,})(?P<page>\d+)\s*$",
        )
        .unwrap();
        Self { pattern }
    }

    /// Parse one line; `None` when it does not look like a ToC entry.
    pub fn parse_line(&self, text: &str) -> Option<OutlineEntry> {
        let captures = self.pattern.captures(text)?;

        let section = captures
            .name("section")
            .map(|m| m.as_str().trim())
            .unwrap_or("");
        // "1.2" has one dot: depth 2. No prefix: depth 1.
        let depth = if section.is_empty() {
            1
        } else {
            section.matches('.').count() + 1
        };

        let heading = captures.name("text")?.as_str().trim();
        let page: u32 = captures.name("page")?.as_str().parse().ok()?;

        Some(OutlineEntry::new(
            HeadingLevel::from_depth(depth),
            heading,
            page,
        ))
    }

    /// Parse every line of a ToC page, in order.
    pub fn parse_page(&self, lines: &[TextLine]) -> Vec<OutlineEntry> {
        lines
            .iter()
            .filter_map(|line| self.parse_line(&line.text))
            .collect()
    }
}

impl Default for TocParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_leader_with_section() {
        let parser = TocParser::new();
        let entry = parser.parse_line("1.2 Methodology .......... 14").unwrap();
        assert_eq!(entry.level, HeadingLevel::H2);
        assert_eq!(entry.text, "Methodology");
        assert_eq!(entry.page, 14);
    }

    #[test]
    fn test_wide_gap_without_dots() {
        let parser = TocParser::new();
        let entry = parser.parse_line("Methodology    14").unwrap();
        assert_eq!(entry.level, HeadingLevel::H1);
        assert_eq!(entry.text, "Methodology");
        assert_eq!(entry.page, 14);
    }

    #[test]
    fn test_single_dash_is_not_a_separator() {
        let parser = TocParser::new();
        assert!(parser.parse_line("Methodology - 14").is_none());
    }

    #[test]
    fn test_deep_section_prefix() {
        let parser = TocParser::new();
        let entry = parser
            .parse_line("2.3.1 Data Collection ..... 27")
            .unwrap();
        assert_eq!(entry.level, HeadingLevel::H3);
        assert_eq!(entry.text, "Data Collection");
        assert_eq!(entry.page, 27);
    }

    #[test]
    fn test_very_deep_prefix_clamps_to_h4() {
        let parser = TocParser::new();
        let entry = parser
            .parse_line("1.2.3.4.5 Appendix Detail ..... 99")
            .unwrap();
        assert_eq!(entry.level, HeadingLevel::H4);
    }

    #[test]
    fn test_plain_prose_does_not_match() {
        let parser = TocParser::new();
        assert!(parser.parse_line("This chapter describes the approach.").is_none());
        assert!(parser.parse_line("Table of Contents").is_none());
    }

    #[test]
    fn test_unnumbered_chapter_with_leader() {
        let parser = TocParser::new();
        let entry = parser.parse_line("Introduction ... 1").unwrap();
        assert_eq!(entry.level, HeadingLevel::H1);
        assert_eq!(entry.text, "Introduction");
        assert_eq!(entry.page, 1);
    }
}
