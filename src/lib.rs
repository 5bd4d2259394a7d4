//! # Python Playground
//!
//! The client-side core of a browser Python playground: a page that loads an
//! in-browser Python runtime, shows a code editor, runs the snippet, streams
//! its output, and shares snippets through compressed URL fragments with no
//! server involved.
//!
//! The runtime, the editor widget, the clipboard and the page surface are
//! reached through traits ([`PythonRuntime`], [`Editor`], [`Clipboard`],
//! [`Surface`]), so the same code drives a wasm front-end or a headless
//! test.
//!
//! ## Example
//!
//! ```rust,ignore
//! use python_playground_rs::prelude::*;
//!
//! let location = PageLocation::parse("https://example.com/#lzma=XQAAgAD...")?;
//! let playground = Playground::start(
//!     PlaygroundConfig::default(),
//!     location,
//!     (),
//!     load_pyodide(),
//!     |options| async move { Ok(TextBuffer::new(options)) },
//! )
//! .await?;
//!
//! playground.run().await;
//! let outcome = playground.share(&clipboard).await;
//! println!("{}", outcome);
//! ```
//!
//! ## Share links
//!
//! - **`#lzma=`**: LZMA over UTF-8, URL-safe Base64 without padding (current)
//! - **`#code=`**: LZ-string over UTF-16, same spelling
//! - **`?code=`**: plain Base64 of the UTF-8 text (oldest links)
//!
//! Keys are tried in that order; the first one present decides.

pub mod error;
pub mod playground;
pub mod prelude;
pub mod share;

// Re-export main types at crate root for convenience
pub use error::{PlaygroundError, Result};
pub use playground::app::{Playground, STARTUP_FAILURE_MESSAGE};
pub use playground::clipboard::{Clipboard, ShareOutcome};
pub use playground::config::{PlaygroundConfig, PlaygroundConfigBuilder, DEFAULT_SNIPPET};
pub use playground::editor::{Editor, EditorOptions, Shortcut, TextBuffer};
pub use playground::output::{OutputLog, Stream};
pub use playground::runtime::{run_with_deadline, PythonRuntime};
pub use playground::trigger::{ExecutionTrigger, RunOutcome, Surface};
pub use share::{PageLocation, Scheme, ShareCodec, ShareLinks};
