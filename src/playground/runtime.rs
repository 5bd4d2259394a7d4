//! Contract with the in-browser Python runtime.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{PlaygroundError, Result};
use crate::playground::output::OutputLog;

/// An embedded Python interpreter.
///
/// Implementations stream stdout and stderr into `output` as line batches
/// while the program runs, and report an uncaught exception as
/// [`PlaygroundError::PythonException`] (see
/// [`PlaygroundError::from_runtime_text`]).
pub trait PythonRuntime {
    /// Execute `code` to completion.
    fn run_python(&self, code: &str, output: &OutputLog) -> impl Future<Output = Result<()>>;

    /// Make `packages` importable. The default does nothing.
    fn load_packages(&self, packages: &[String]) -> impl Future<Output = Result<()>> {
        let _ = packages;
        async { Ok(()) }
    }
}

/// Run `code`, giving up on the wait after `deadline`.
///
/// Only the wait is abandoned: the runtime is not told to stop, so a
/// program that ignores its deadline may keep running in the background.
pub async fn run_with_deadline<R: PythonRuntime>(
    runtime: &R,
    code: &str,
    output: &OutputLog,
    deadline: Duration,
) -> Result<()> {
    tokio::select! {
        result = runtime.run_python(code, output) => result,
        _ = tokio::time::sleep(deadline) => {
            warn!(?deadline, "execution deadline elapsed");
            Err(PlaygroundError::Timeout(deadline))
        }
    }
}
