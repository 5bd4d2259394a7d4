//! Playground configuration with builder pattern.

use std::time::Duration;

use crate::error::{PlaygroundError, Result};
use crate::playground::editor::EditorOptions;
use crate::playground::policy::SandboxPolicy;
use crate::playground::splitter::Splitter;
use crate::share::{Placement, Scheme, DEFAULT_LZMA_MEMLIMIT};

/// Snippet shown when the page location carries none.
pub const DEFAULT_SNIPPET: &str = "print(\"Hello World\")";

/// Configuration for the playground.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    /// Editor content when no share link is present or it fails to decode.
    pub default_snippet: String,
    /// Scheme used for new share links.
    pub share_scheme: Scheme,
    /// Schemes tried, in order, when the page opens.
    pub decode_order: Vec<Scheme>,
    /// Optional deadline for a single run.
    pub run_timeout: Option<Duration>,
    /// Dictionary memory cap for LZMA decoding.
    pub lzma_memlimit: usize,
    /// Options the editor is created with. `value` is filled in at startup.
    pub editor: EditorOptions,
    /// Capabilities removed from user programs.
    pub sandbox: SandboxPolicy,
    /// Pane resize limits.
    pub splitter: Splitter,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            default_snippet: DEFAULT_SNIPPET.to_string(),
            share_scheme: Scheme::Lzma,
            decode_order: Scheme::DECODE_PRIORITY.to_vec(),
            run_timeout: None,
            lzma_memlimit: DEFAULT_LZMA_MEMLIMIT,
            editor: EditorOptions::default(),
            sandbox: SandboxPolicy::default(),
            splitter: Splitter::default(),
        }
    }
}

impl PlaygroundConfig {
    /// Create a new builder for PlaygroundConfig.
    pub fn builder() -> PlaygroundConfigBuilder {
        PlaygroundConfigBuilder::default()
    }

    /// Reject configurations the page cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.share_scheme.placement() != Placement::Fragment {
            return Err(PlaygroundError::Config(format!(
                "share scheme {} must live in the URL fragment",
                self.share_scheme
            )));
        }
        if self.decode_order.is_empty() {
            return Err(PlaygroundError::Config("decode order is empty".to_string()));
        }
        if self.run_timeout.is_some_and(|t| t.is_zero()) {
            return Err(PlaygroundError::Config("run timeout must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Builder for creating PlaygroundConfig instances.
#[derive(Debug, Clone, Default)]
pub struct PlaygroundConfigBuilder {
    default_snippet: Option<String>,
    share_scheme: Option<Scheme>,
    decode_order: Option<Vec<Scheme>>,
    run_timeout: Option<Duration>,
    lzma_memlimit: Option<usize>,
    editor: Option<EditorOptions>,
    sandbox: Option<SandboxPolicy>,
    splitter: Option<Splitter>,
}

impl PlaygroundConfigBuilder {
    /// Set the snippet shown when no share link is present.
    pub fn default_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.default_snippet = Some(snippet.into());
        self
    }

    /// Set the scheme used for new share links.
    pub fn share_scheme(mut self, scheme: Scheme) -> Self {
        self.share_scheme = Some(scheme);
        self
    }

    /// Set the order in which schemes are tried on page load.
    pub fn decode_order(mut self, order: impl Into<Vec<Scheme>>) -> Self {
        self.decode_order = Some(order.into());
        self
    }

    /// Set a deadline for each run.
    pub fn run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }

    /// Set the LZMA decoder's dictionary memory cap in bytes.
    pub fn lzma_memlimit(mut self, bytes: usize) -> Self {
        self.lzma_memlimit = Some(bytes);
        self
    }

    /// Set the editor options.
    pub fn editor(mut self, options: EditorOptions) -> Self {
        self.editor = Some(options);
        self
    }

    /// Set the sandbox policy.
    pub fn sandbox(mut self, policy: SandboxPolicy) -> Self {
        self.sandbox = Some(policy);
        self
    }

    /// Set the splitter limits.
    pub fn splitter(mut self, splitter: Splitter) -> Self {
        self.splitter = Some(splitter);
        self
    }

    /// Build the PlaygroundConfig.
    pub fn build(self) -> PlaygroundConfig {
        let default = PlaygroundConfig::default();
        PlaygroundConfig {
            default_snippet: self.default_snippet.unwrap_or(default.default_snippet),
            share_scheme: self.share_scheme.unwrap_or(default.share_scheme),
            decode_order: self.decode_order.unwrap_or(default.decode_order),
            run_timeout: self.run_timeout.or(default.run_timeout),
            lzma_memlimit: self.lzma_memlimit.unwrap_or(default.lzma_memlimit),
            editor: self.editor.unwrap_or(default.editor),
            sandbox: self.sandbox.unwrap_or(default.sandbox),
            splitter: self.splitter.unwrap_or(default.splitter),
        }
    }
}
