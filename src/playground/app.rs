//! Application state: everything the page's handlers need, built once at
//! startup.

use std::cell::RefCell;
use std::future::Future;

use tracing::{error, info};

use crate::error::{PlaygroundError, Result};
use crate::playground::clipboard::{Clipboard, ShareOutcome};
use crate::playground::config::PlaygroundConfig;
use crate::playground::editor::{Editor, EditorOptions, Shortcut};
use crate::playground::output::OutputLog;
use crate::playground::policy::SandboxPolicy;
use crate::playground::runtime::PythonRuntime;
use crate::playground::trigger::{ExecutionTrigger, RunOutcome, Surface};
use crate::share::{PageLocation, ShareLinks};

/// Persistent text shown in place of the page when startup fails.
pub const STARTUP_FAILURE_MESSAGE: &str = "Error: Initialization failed. Please check the console for details.";

/// A started playground.
///
/// Holds the runtime, the editor, the output log and the run trigger.
/// Handlers borrow it; nothing lives in globals.
pub struct Playground<R: PythonRuntime, E: Editor, S: Surface = ()> {
    config: PlaygroundConfig,
    runtime: R,
    editor: E,
    output: OutputLog,
    trigger: ExecutionTrigger<S>,
    links: ShareLinks,
    location: RefCell<PageLocation>,
}

impl<R: PythonRuntime, E: Editor, S: Surface> Playground<R, E, S> {
    /// Bring the page up.
    ///
    /// Two tasks run concurrently and both must succeed: loading the runtime
    /// (then its packages and the sandbox prelude), and creating the editor
    /// with the snippet carried by `location` or the default one. Failure of
    /// either is fatal and is reported on `surface`.
    pub async fn start<RF, EF, EFut>(
        config: PlaygroundConfig,
        location: PageLocation,
        surface: S,
        load_runtime: RF,
        create_editor: EF,
    ) -> Result<Self>
    where
        RF: Future<Output = anyhow::Result<R>>,
        EF: FnOnce(EditorOptions) -> EFut,
        EFut: Future<Output = anyhow::Result<E>>,
    {
        if let Err(e) = config.validate() {
            surface.show_startup_error(STARTUP_FAILURE_MESSAGE);
            return Err(e);
        }

        let output = OutputLog::new();
        let links = ShareLinks::new(config.share_scheme, &config.decode_order, config.lzma_memlimit);

        let runtime_task = async {
            info!("loading Python runtime");
            let runtime = load_runtime.await.map_err(PlaygroundError::RuntimeInit)?;
            prepare_runtime(&runtime, &config.sandbox, &output).await?;
            info!("Python runtime ready");
            Ok::<_, PlaygroundError>(runtime)
        };

        let editor_task = async {
            let value = initial_snippet(&links, &location, &config.default_snippet).await;
            let options = EditorOptions {
                value,
                ..config.editor.clone()
            };
            let editor = create_editor(options).await.map_err(PlaygroundError::EditorInit)?;
            editor.add_shortcut(Shortcut::RUN);
            info!("editor ready");
            Ok::<_, PlaygroundError>(editor)
        };

        let (runtime, editor) = match tokio::try_join!(runtime_task, editor_task) {
            Ok(ready) => ready,
            Err(e) => {
                error!(error = %e, "initialization failed");
                surface.show_startup_error(STARTUP_FAILURE_MESSAGE);
                return Err(e);
            }
        };

        surface.reveal_main_content();
        Ok(Self {
            config,
            runtime,
            editor,
            output,
            trigger: ExecutionTrigger::new(surface),
            links,
            location: RefCell::new(location),
        })
    }

    /// Run the editor's current text.
    pub async fn run(&self) -> RunOutcome {
        let code = self.editor.text();
        self.trigger
            .invoke(&self.runtime, &code, &self.output, self.config.run_timeout)
            .await
    }

    /// Handle a shortcut reported by the editor. Only the run shortcut does
    /// anything, and only while the trigger is enabled.
    pub async fn on_shortcut(&self, shortcut: Shortcut) -> Option<RunOutcome> {
        if shortcut != Shortcut::RUN || !self.trigger.is_enabled() {
            return None;
        }
        Some(self.run().await)
    }

    /// Empty the output log.
    pub fn clear_output(&self) {
        info!("clear output");
        self.output.clear();
    }

    /// Encode the editor's text into the page location and copy the link.
    ///
    /// When encoding fails the location is left as it was.
    pub async fn share<C: Clipboard>(&self, clipboard: &C) -> ShareOutcome {
        let codec = self.links.share_codec();
        let token = match codec.encode_async(&self.editor.text()).await {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "failed to compress code");
                return ShareOutcome::Unavailable(e.to_string());
            }
        };

        let shared = self.location.borrow().share_location(codec.scheme(), &token);
        let url = shared.href();
        *self.location.borrow_mut() = shared;

        match clipboard.write_text(&url).await {
            Ok(()) => ShareOutcome::Copied(url),
            Err(e) => {
                info!(error = %e, "clipboard write failed, showing link");
                ShareOutcome::ManualCopy(url)
            }
        }
    }

    /// Current page location, including the fragment written by [`share`](Self::share).
    pub fn location(&self) -> PageLocation {
        self.location.borrow().clone()
    }

    /// The configuration the playground was started with.
    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    /// The editor holding the snippet.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// The Python runtime.
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// The output log runs append to.
    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    /// The run trigger and the surface it drives.
    pub fn trigger(&self) -> &ExecutionTrigger<S> {
        &self.trigger
    }
}

/// Load packages and apply the sandbox prelude.
async fn prepare_runtime<R: PythonRuntime>(runtime: &R, policy: &SandboxPolicy, output: &OutputLog) -> Result<()> {
    if !policy.preload_packages.is_empty() {
        runtime
            .load_packages(&policy.preload_packages)
            .await
            .map_err(|e| PlaygroundError::RuntimeInit(e.into()))?;
    }
    if !policy.is_permissive() {
        runtime
            .run_python(&policy.prelude(), output)
            .await
            .map_err(|e| PlaygroundError::RuntimeInit(e.into()))?;
    }
    Ok(())
}

/// The snippet from the page location, or `default` when there is none or
/// it does not decode. An empty decoded snippet also falls back.
async fn initial_snippet(links: &ShareLinks, location: &PageLocation, default: &str) -> String {
    match links.decode_location_async(location).await {
        Ok(Some(snippet)) if !snippet.is_empty() => {
            info!("loaded snippet from share link");
            snippet
        }
        Ok(_) | Err(_) => default.to_string(),
    }
}
