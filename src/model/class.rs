//! Document classification result.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary document type, computed once per document.
///
/// `Regular` covers transactional and long-form documents; `Flyer` covers
/// promotional one-offs whose visually loudest line is the whole message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentClass {
    /// Transactional or long-form document
    #[default]
    Regular,
    /// Promotional flyer or invitation
    Flyer,
}

impl fmt::Display for DocumentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentClass::Regular => f.write_str("Regular"),
            DocumentClass::Flyer => f.write_str("Flyer"),
        }
    }
}
