//! Metadata title fallback.
//!
//! Last-resort title source: the document's embedded metadata. Generic
//! placeholders and filename-shaped values are rejected rather than
//! surfaced as titles.

use crate::event::{Component, EventLog};
use crate::source::DocumentSource;

/// Values that are placeholders, not titles.
const GENERIC_TITLES: [&str; 2] = ["untitled", "title"];

/// A metadata title containing one of these was almost certainly the
/// source filename of a converted document.
const FILENAME_EXTENSIONS: [&str; 7] =
    [".doc", ".docx", ".ppt", ".pptx", ".xls", ".xlsx", ".cdr"];

/// Read the embedded metadata title, filtering out generic and
/// filename-based values. Returns an empty string when nothing usable is
/// present.
pub fn metadata_title_fallback(source: &dyn DocumentSource, events: &mut EventLog) -> String {
    let Some(title) = source.metadata_title() else {
        events.debug(Component::Pipeline, "no title found in metadata");
        return String::new();
    };

    let lower = title.to_lowercase();
    if GENERIC_TITLES.contains(&lower.as_str())
        || FILENAME_EXTENSIONS.iter().any(|ext| lower.contains(ext))
    {
        events.info(
            Component::Pipeline,
            format!("ignoring generic or filename-based metadata title: '{}'", title),
        );
        return String::new();
    }

    events.info(
        Component::Pipeline,
        format!("found valid metadata title: '{}'", title),
    );
    title
}
