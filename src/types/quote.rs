//! Quote types
//!
//! Defines the quote value and the text shown while no quote is available yet.

use serde::{Deserialize, Serialize};

/// Text shown in place of both the quote and the author before the first fetch lands
pub const PLACEHOLDER_TEXT: &str = "Loading...";

/// A quotation and its attributed author
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// The quotation text
    pub content: String,
    /// Who the quote is attributed to
    pub author: String,
}

impl Quote {
    /// Create a new quote
    pub fn new(content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author: author.into(),
        }
    }
}

/// The quote currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentQuote {
    /// Nothing fetched yet
    Placeholder,
    /// A fetched quote
    Loaded(Quote),
}

impl CurrentQuote {
    pub fn text(&self) -> &str {
        match self {
            Self::Placeholder => PLACEHOLDER_TEXT,
            Self::Loaded(quote) => &quote.content,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            Self::Placeholder => PLACEHOLDER_TEXT,
            Self::Loaded(quote) => &quote.author,
        }
    }

    /// Author line as displayed under the main quote
    pub fn byline(&self) -> String {
        format!("— {}", self.author())
    }

    pub fn as_quote(&self) -> Option<&Quote> {
        match self {
            Self::Placeholder => None,
            Self::Loaded(quote) => Some(quote),
        }
    }
}

impl Default for CurrentQuote {
    fn default() -> Self {
        Self::Placeholder
    }
}
