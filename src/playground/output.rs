//! The output log the runtime streams into.

use std::sync::{Arc, Mutex};

use tracing::trace;

/// Which stream a batch came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// The program's standard output.
    Stdout,
    /// The program's standard error.
    Stderr,
}

/// Append-only text sink shared between the page and the runtime.
///
/// Cloning yields another handle to the same log. Text is only removed by
/// [`clear`](Self::clear), which the page calls on explicit user action.
#[derive(Clone, Debug, Default)]
pub struct OutputLog {
    state: Arc<Mutex<LogState>>,
}

#[derive(Debug, Default)]
struct LogState {
    text: String,
    stderr_batches: usize,
}

impl OutputLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line batch from the running program.
    ///
    /// Standard output and standard error land in the same log, each batch
    /// terminated by a newline. Standard error batches are also counted.
    pub fn push_batch(&self, stream: Stream, msg: &str) {
        trace!(?stream, len = msg.len(), "output batch");
        let mut state = self.state.lock().unwrap();
        if stream == Stream::Stderr {
            state.stderr_batches += 1;
        }
        state.text.push_str(msg);
        state.text.push('\n');
    }

    /// Append a failure description on a fresh line.
    pub fn push_failure(&self, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.text.push('\n');
        state.text.push_str(text);
    }

    /// Remove everything.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.text.clear();
        state.stderr_batches = 0;
    }

    /// Snapshot of the log.
    pub fn contents(&self) -> String {
        self.state.lock().unwrap().text.clone()
    }

    /// Snapshot of the log split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.state.lock().unwrap().text.lines().map(str::to_string).collect()
    }

    /// Number of standard error batches since the log was last cleared.
    pub fn stderr_batches(&self) -> usize {
        self.state.lock().unwrap().stderr_batches
    }

    /// Length of the log in bytes.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().text.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
