//! The run button: one execution in flight at a time.

use std::cell::Cell;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::PlaygroundError;
use crate::playground::output::OutputLog;
use crate::playground::runtime::{run_with_deadline, PythonRuntime};

/// The visible parts of the page the playground toggles.
///
/// Every method defaults to doing nothing so headless callers can use `()`.
pub trait Surface {
    /// Enable or disable the run button.
    fn set_trigger_enabled(&self, _enabled: bool) {}

    /// Show or hide the busy spinner.
    fn set_busy(&self, _busy: bool) {}

    /// Remove graphical output (canvases, plot images) left by the last run.
    fn clear_graphics(&self) {}

    /// Swap the startup spinner for the editor and output panes.
    fn reveal_main_content(&self) {}

    /// Replace the startup spinner with a persistent error message.
    fn show_startup_error(&self, _message: &str) {}
}

impl Surface for () {}

impl<S: Surface + ?Sized> Surface for &S {
    fn set_trigger_enabled(&self, enabled: bool) {
        (**self).set_trigger_enabled(enabled)
    }

    fn set_busy(&self, busy: bool) {
        (**self).set_busy(busy)
    }

    fn clear_graphics(&self) {
        (**self).clear_graphics()
    }

    fn reveal_main_content(&self) {
        (**self).reveal_main_content()
    }

    fn show_startup_error(&self, message: &str) {
        (**self).show_startup_error(message)
    }
}

/// How an invocation of the trigger ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// A run was already in flight; nothing happened.
    Skipped,
    /// The program ran to completion.
    Completed,
    /// The program failed; the error text was appended to the output log.
    Failed(PlaygroundError),
}

impl RunOutcome {
    /// Whether the program ran to completion.
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }

    /// Whether the request was dropped because a run was in flight.
    pub fn is_skipped(&self) -> bool {
        matches!(self, RunOutcome::Skipped)
    }

    /// The Python exception type, if the failure was one.
    pub fn exception_type(&self) -> Option<&str> {
        match self {
            RunOutcome::Failed(PlaygroundError::PythonException { exception_type, .. }) => Some(exception_type.as_str()),
            _ => None,
        }
    }
}

/// Serializes run requests.
///
/// The trigger is disabled for the whole run; invoking it meanwhile is a
/// no-op rather than a queued run.
#[derive(Debug)]
pub struct ExecutionTrigger<S: Surface> {
    surface: S,
    enabled: Cell<bool>,
}

impl<S: Surface> ExecutionTrigger<S> {
    /// Create an enabled trigger driving `surface`.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            enabled: Cell::new(true),
        }
    }

    /// Whether a new run would start.
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// The surface this trigger drives.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run `code` unless a run is already in flight.
    pub async fn invoke<R: PythonRuntime>(
        &self,
        runtime: &R,
        code: &str,
        output: &OutputLog,
        deadline: Option<Duration>,
    ) -> RunOutcome {
        let Some(_busy) = BusyGuard::acquire(self) else {
            debug!("run requested while another run is in flight");
            return RunOutcome::Skipped;
        };

        info!(code_len = code.len(), "running snippet");
        let result = match deadline {
            Some(deadline) => run_with_deadline(runtime, code, output, deadline).await,
            None => runtime.run_python(code, output).await,
        };

        match result {
            Ok(()) => RunOutcome::Completed,
            Err(e) => {
                info!(error = %e, "snippet failed");
                output.push_failure(&e.output_text());
                RunOutcome::Failed(e)
            }
        }
    }
}

/// Holds the trigger disabled; dropping it restores the idle state whatever
/// way the run ended.
struct BusyGuard<'a, S: Surface> {
    trigger: &'a ExecutionTrigger<S>,
}

impl<'a, S: Surface> BusyGuard<'a, S> {
    fn acquire(trigger: &'a ExecutionTrigger<S>) -> Option<Self> {
        if !trigger.enabled.replace(false) {
            return None;
        }
        trigger.surface.set_trigger_enabled(false);
        trigger.surface.set_busy(true);
        trigger.surface.clear_graphics();
        Some(Self { trigger })
    }
}

impl<S: Surface> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.trigger.surface.set_busy(false);
        self.trigger.surface.set_trigger_enabled(true);
        self.trigger.enabled.set(true);
    }
}
