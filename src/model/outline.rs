//! Outline and final-result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Heading depth in the inferred hierarchy.
///
/// The hierarchy is relative to the document under analysis, not an
/// absolute size-to-level table. Sources reporting deeper nesting (e.g.
/// bookmark trees) clamp to [`HeadingLevel::H4`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    /// Level from a 1-based depth, clamping anything deeper to H4.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            3 => HeadingLevel::H3,
            _ => HeadingLevel::H4,
        }
    }

    /// The 1-based depth of this level.
    pub fn depth(&self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for HeadingLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HeadingLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "H1" => Ok(HeadingLevel::H1),
            "H2" => Ok(HeadingLevel::H2),
            "H3" => Ok(HeadingLevel::H3),
            "H4" => Ok(HeadingLevel::H4),
            other => Err(serde::de::Error::custom(format!(
                "invalid heading level: {}",
                other
            ))),
        }
    }
}

/// One entry of the inferred heading outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading depth
    pub level: HeadingLevel,

    /// Heading text, trimmed
    pub text: String,

    /// 1-based page number for every extraction strategy, including
    /// bookmark-derived entries. (The system this engine was modeled on
    /// emitted bookmark pages 0-based and everything else 1-based; that
    /// inconsistency is deliberately not preserved.)
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// The final artifact of a document pass: a title and an ordered outline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Detected title, possibly empty
    pub title: String,

    /// Heading outline in document order
    pub outline: Vec<OutlineEntry>,
}

impl DocumentStructure {
    /// Whether neither a title nor any outline entry was found.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }
}
