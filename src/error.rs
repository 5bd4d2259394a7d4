//! Error types for the playground.

use thiserror::Error;

/// Errors that can occur while starting the playground, handling share links
/// or running a snippet.
#[derive(Error, Debug)]
pub enum PlaygroundError {
    /// The Python runtime failed to load or to apply the sandbox prelude.
    #[error("failed to initialize Python runtime: {0}")]
    RuntimeInit(#[source] anyhow::Error),

    /// The code editor failed to load.
    #[error("failed to initialize editor: {0}")]
    EditorInit(#[source] anyhow::Error),

    /// The compressor rejected the snippet.
    #[error("compression failed: {0}")]
    Compression(String),

    /// The payload could not be decompressed back into text.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// The token is not valid Base64 in the share alphabet.
    #[error("malformed share token: {0}")]
    MalformedToken(String),

    /// The token was empty.
    #[error("share token is empty")]
    EmptyToken,

    /// The runtime reported a failure that is not a Python exception.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A Python exception escaped the user's program.
    #[error("Python {exception_type}: {message}")]
    PythonException {
        /// The type of Python exception (e.g., "ValueError", "TypeError").
        exception_type: String,
        /// The exception message.
        message: String,
        /// The full Python traceback, if available.
        traceback: Option<String>,
    },

    /// The run did not finish before the configured deadline.
    #[error("execution timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Writing the share link to the clipboard failed.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PlaygroundError {
    /// Create a Python exception error from the runtime's error text.
    ///
    /// Falls back to [`PlaygroundError::ExecutionFailed`] when no exception
    /// line can be found.
    pub fn from_runtime_text(text: &str) -> Self {
        parse_python_exception(text).unwrap_or_else(|| Self::ExecutionFailed(text.trim().to_string()))
    }

    /// Whether this error is fatal to the page (runtime or editor failed to load).
    pub fn is_init_failure(&self) -> bool {
        matches!(self, Self::RuntimeInit(_) | Self::EditorInit(_))
    }

    /// Whether this error came from the share-link codec.
    pub fn is_codec_failure(&self) -> bool {
        matches!(
            self,
            Self::Compression(_) | Self::Decompression(_) | Self::MalformedToken(_) | Self::EmptyToken
        )
    }

    /// Check if this error represents a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if this error represents a Python exception.
    pub fn is_python_exception(&self) -> bool {
        matches!(self, Self::PythonException { .. })
    }

    /// Text appended to the output log when a run fails.
    ///
    /// Python exceptions print their traceback when one was captured, the
    /// way the interpreter itself would.
    pub fn output_text(&self) -> String {
        match self {
            Self::PythonException {
                traceback: Some(traceback),
                ..
            } => traceback.clone(),
            Self::PythonException {
                exception_type,
                message,
                traceback: None,
            } if message.is_empty() => exception_type.clone(),
            Self::PythonException {
                exception_type,
                message,
                traceback: None,
            } => format!("{}: {}", exception_type, message),
            other => other.to_string(),
        }
    }
}

/// Result type alias for playground operations.
pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// Parse a Python exception from runtime error text.
///
/// Browser runtimes wrap the interpreter output in a JavaScript error whose
/// first line reads `PythonError: Traceback (most recent call last):`; that
/// wrapper is ignored and the last exception line wins. The traceback keeps
/// everything from the first `Traceback` line on, so chained exceptions and
/// multi-line messages survive intact.
pub fn parse_python_exception(text: &str) -> Option<PlaygroundError> {
    if text.trim().is_empty() {
        return None;
    }

    let text = text.trim_start();
    let text = text.strip_prefix("PythonError: ").unwrap_or(text);
    let lines: Vec<&str> = text.lines().collect();

    let mut exception_line = None;
    let mut traceback_start = None;

    for (i, line) in lines.iter().enumerate() {
        if line.starts_with("Traceback (most recent call last):") {
            traceback_start.get_or_insert(i);
            continue;
        }
        if !line.starts_with(' ') && !line.is_empty() && looks_like_exception(line) {
            exception_line = Some((i, *line));
        }
    }

    let (line_idx, exception_str) = exception_line?;
    let (exception_type, first_line) = match exception_str.split_once(':') {
        Some((exc_type, msg)) => (exc_type.trim().to_string(), msg.trim()),
        None => (exception_str.trim().to_string(), ""),
    };

    // Lines after the exception header continue its message.
    let mut message = first_line.to_string();
    for line in &lines[line_idx + 1..] {
        message.push('\n');
        message.push_str(line);
    }
    let message = message.trim().to_string();

    let traceback = traceback_start
        .filter(|start| *start < line_idx)
        .map(|start| lines[start..].join("\n").trim_end().to_string());

    Some(PlaygroundError::PythonException {
        exception_type,
        message,
        traceback,
    })
}

/// Check if a line looks like a Python exception header, e.g.
/// `ZeroDivisionError: division by zero` or `KeyboardInterrupt`.
fn looks_like_exception(line: &str) -> bool {
    const SUFFIXES: [&str; 3] = ["Error", "Exception", "Warning"];
    const STANDALONE: [&str; 4] = ["KeyboardInterrupt", "SystemExit", "StopIteration", "GeneratorExit"];

    if !line.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return false;
    }

    // The type name is everything up to the first colon (or the whole line).
    let name = line.split(':').next().unwrap_or(line).trim_end();
    if name.contains(' ') {
        return false;
    }
    let name = name.rsplit('.').next().unwrap_or(name);

    SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) || STANDALONE.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_exception() {
        let text = "ValueError: invalid literal for int() with base 10: 'abc'";
        let result = parse_python_exception(text);

        if let Some(PlaygroundError::PythonException {
            exception_type,
            message,
            traceback,
        }) = result
        {
            assert_eq!(exception_type, "ValueError");
            assert_eq!(message, "invalid literal for int() with base 10: 'abc'");
            assert!(traceback.is_none());
        } else {
            panic!("Expected PythonException");
        }
    }

    #[test]
    fn test_parse_wrapped_runtime_error() {
        let text = r#"PythonError: Traceback (most recent call last):
  File "/lib/python3.12/site-packages/_pyodide/_base.py", line 596, in eval_code_async
  File "<exec>", line 1, in <module>
ZeroDivisionError: division by zero"#;

        let result = parse_python_exception(text);

        if let Some(PlaygroundError::PythonException {
            exception_type,
            message,
            traceback,
        }) = result
        {
            assert_eq!(exception_type, "ZeroDivisionError");
            assert_eq!(message, "division by zero");
            let traceback = traceback.expect("traceback should be captured");
            assert!(traceback.starts_with("Traceback"));
            assert!(traceback.ends_with("division by zero"));
        } else {
            panic!("Expected PythonException");
        }
    }

    #[test]
    fn test_chained_exceptions_keep_every_traceback() {
        let text = "PythonError: Traceback (most recent call last):\n  File \"<exec>\", line 2, in <module>\nKeyError: 'a'\n\nDuring handling of the above exception, another exception occurred:\n\nTraceback (most recent call last):\n  File \"<exec>\", line 4, in <module>\nValueError: bad\n";

        let err = PlaygroundError::from_runtime_text(text);

        assert!(matches!(
            &err,
            PlaygroundError::PythonException { exception_type, message, .. }
                if exception_type == "ValueError" && message == "bad"
        ));
        assert_eq!(
            err.output_text(),
            text.strip_prefix("PythonError: ").unwrap().trim_end()
        );
    }

    #[test]
    fn test_multi_line_message_is_kept() {
        let text = "PythonError: Traceback (most recent call last):\n  File \"<exec>\", line 1, in <module>\nValueError: first line\nsecond line of message\n";

        let err = PlaygroundError::from_runtime_text(text);

        match &err {
            PlaygroundError::PythonException { exception_type, message, .. } => {
                assert_eq!(exception_type, "ValueError");
                assert_eq!(message, "first line\nsecond line of message");
            }
            other => panic!("Expected PythonException, got {:?}", other),
        }
        assert!(err.output_text().ends_with("ValueError: first line\nsecond line of message"));
        assert!(err.output_text().starts_with("Traceback (most recent call last):"));
    }

    #[test]
    fn test_parse_exception_no_message() {
        match parse_python_exception("StopIteration") {
            Some(PlaygroundError::PythonException {
                exception_type,
                message,
                ..
            }) => {
                assert_eq!(exception_type, "StopIteration");
                assert!(message.is_empty());
            }
            other => panic!("Expected PythonException, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_plain_text() {
        assert!(parse_python_exception("").is_none());
        assert!(parse_python_exception("   ").is_none());
        assert!(parse_python_exception("Hello World").is_none());
        assert!(parse_python_exception("An Error occurred: oops").is_none());
    }

    #[test]
    fn test_from_runtime_text_falls_back() {
        let err = PlaygroundError::from_runtime_text("worker crashed\n");
        assert!(matches!(err, PlaygroundError::ExecutionFailed(ref msg) if msg == "worker crashed"));
        assert_eq!(err.output_text(), "execution failed: worker crashed");
    }

    #[test]
    fn test_output_text_prefers_traceback() {
        let err = PlaygroundError::PythonException {
            exception_type: "NameError".to_string(),
            message: "name 'x' is not defined".to_string(),
            traceback: Some("Traceback (most recent call last):\nNameError: name 'x' is not defined".to_string()),
        };
        assert!(err.output_text().starts_with("Traceback"));

        let bare = PlaygroundError::PythonException {
            exception_type: "NameError".to_string(),
            message: "name 'x' is not defined".to_string(),
            traceback: None,
        };
        assert_eq!(bare.output_text(), "NameError: name 'x' is not defined");
    }

    #[test]
    fn test_error_helpers() {
        let timeout = PlaygroundError::Timeout(std::time::Duration::from_secs(5));
        assert!(timeout.is_timeout());
        assert!(!timeout.is_codec_failure());
        assert!(!timeout.is_init_failure());

        assert!(PlaygroundError::EmptyToken.is_codec_failure());
        assert!(PlaygroundError::MalformedToken("!".into()).is_codec_failure());
        assert!(PlaygroundError::RuntimeInit(anyhow::anyhow!("404")).is_init_failure());
        assert!(PlaygroundError::EditorInit(anyhow::anyhow!("404")).is_init_failure());
        assert!(PlaygroundError::from_runtime_text("KeyError: 'a'").is_python_exception());
    }
}
