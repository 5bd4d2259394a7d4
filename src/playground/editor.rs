//! Code editor contract and the options the page creates it with.

use std::cell::RefCell;

/// Options passed to the editor widget on creation.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Initial text.
    pub value: String,
    /// Language mode.
    pub language: String,
    /// Colour theme.
    pub theme: String,
    /// Font size in pixels.
    pub font_size: u32,
    /// Soft-wrap long lines.
    pub word_wrap: bool,
    /// Minimum width of the line-number gutter, in characters.
    pub line_numbers_min_chars: u32,
    /// Relayout when the container resizes.
    pub automatic_layout: bool,
    /// Show the minimap.
    pub minimap: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            value: String::new(),
            language: "python".to_string(),
            theme: "vs-dark".to_string(),
            font_size: 18,
            word_wrap: true,
            line_numbers_min_chars: 3,
            automatic_layout: true,
            minimap: false,
        }
    }
}

/// Modifier half of a [`Shortcut`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Ctrl on Windows/Linux, Cmd on macOS.
    CtrlCmd,
    /// Shift.
    Shift,
    /// Alt, or Option on macOS.
    Alt,
}

/// A keyboard shortcut registered with the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Key held down while pressing `key`.
    pub modifier: Modifier,
    /// Key name as the editor spells it, e.g. `"Enter"`.
    pub key: &'static str,
}

impl Shortcut {
    /// Ctrl/Cmd+Enter, which runs the snippet.
    pub const RUN: Shortcut = Shortcut {
        modifier: Modifier::CtrlCmd,
        key: "Enter",
    };
}

/// The editor widget, as far as the playground uses it.
pub trait Editor {
    /// Current text.
    fn text(&self) -> String;

    /// Replace the text.
    fn set_text(&self, text: &str);

    /// Ask the widget to report `shortcut` presses to the page.
    fn add_shortcut(&self, shortcut: Shortcut);
}

/// In-memory editor for headless use.
#[derive(Debug, Default)]
pub struct TextBuffer {
    options: EditorOptions,
    text: RefCell<String>,
    shortcuts: RefCell<Vec<Shortcut>>,
}

impl TextBuffer {
    /// Create a buffer holding `options.value`.
    pub fn new(options: EditorOptions) -> Self {
        Self {
            text: RefCell::new(options.value.clone()),
            options,
            shortcuts: RefCell::new(Vec::new()),
        }
    }

    /// The options the buffer was created with.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Shortcuts registered so far.
    pub fn shortcuts(&self) -> Vec<Shortcut> {
        self.shortcuts.borrow().clone()
    }
}

impl Editor for TextBuffer {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        *self.text.borrow_mut() = text.to_string();
    }

    fn add_shortcut(&self, shortcut: Shortcut) {
        let mut shortcuts = self.shortcuts.borrow_mut();
        if !shortcuts.contains(&shortcut) {
            shortcuts.push(shortcut);
        }
    }
}
