//! Prelude module for convenient imports.

pub use crate::error::{PlaygroundError, Result};
pub use crate::playground::{
    app::Playground,
    clipboard::{Clipboard, ShareOutcome},
    config::PlaygroundConfig,
    editor::{Editor, EditorOptions, Shortcut, TextBuffer},
    output::{OutputLog, Stream},
    runtime::PythonRuntime,
    trigger::{RunOutcome, Surface},
};
pub use crate::share::{PageLocation, Scheme, ShareCodec, ShareLinks};
