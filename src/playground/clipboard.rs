//! Clipboard contract and the result of sharing a snippet.

use std::fmt;
use std::future::Future;

use crate::error::Result;

/// The system clipboard.
pub trait Clipboard {
    /// Write `text`. Failing is recoverable: the link is shown instead.
    fn write_text(&self, text: &str) -> impl Future<Output = Result<()>>;
}

/// What happened when the user pressed "share".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The link is on the clipboard.
    Copied(String),
    /// The clipboard refused; the link must be copied by hand.
    ManualCopy(String),
    /// No link could be produced; the page location was left untouched.
    Unavailable(String),
}

impl ShareOutcome {
    /// The share URL, when one was produced.
    pub fn url(&self) -> Option<&str> {
        match self {
            ShareOutcome::Copied(url) | ShareOutcome::ManualCopy(url) => Some(url.as_str()),
            ShareOutcome::Unavailable(_) => None,
        }
    }
}

impl fmt::Display for ShareOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareOutcome::Copied(_) => write!(f, "Link copied to clipboard!"),
            ShareOutcome::ManualCopy(url) => write!(f, "Copy to clipboard failed.\n{}", url),
            ShareOutcome::Unavailable(reason) => write!(f, "Failed to compress code: {}", reason),
        }
    }
}
