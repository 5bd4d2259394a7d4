//! The page around the share codec: startup, run trigger, output and layout.

pub mod app;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod output;
pub mod policy;
pub mod runtime;
pub mod splitter;
pub mod trigger;
