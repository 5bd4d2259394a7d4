//! Sandbox prelude run inside the Python runtime before any user code.

/// Which capabilities are taken away from user programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxPolicy {
    /// Packages loaded into the runtime before the prelude runs.
    pub preload_packages: Vec<String>,
    /// `os` functions replaced with `None`.
    pub blocked_os_functions: Vec<String>,
    /// Reject `open` calls whose mode writes, appends or creates.
    pub block_file_writes: bool,
    /// `(module, attribute)` network entry points replaced with `None`.
    pub blocked_network: Vec<(String, String)>,
    /// Replace `builtins.eval` and `builtins.exec` with `None`.
    pub block_dynamic_eval: bool,
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            preload_packages: vec!["micropip".to_string()],
            blocked_os_functions: ["remove", "unlink", "rename", "rmdir", "makedirs", "mkdir"]
                .into_iter()
                .map(String::from)
                .collect(),
            block_file_writes: true,
            blocked_network: [
                ("urllib.request", "urlopen"),
                ("requests", "get"),
                ("requests", "post"),
            ]
            .into_iter()
            .map(|(m, a)| (m.to_string(), a.to_string()))
            .collect(),
            block_dynamic_eval: true,
        }
    }
}

impl SandboxPolicy {
    /// A policy that restricts nothing.
    pub fn permissive() -> Self {
        Self {
            preload_packages: Vec::new(),
            blocked_os_functions: Vec::new(),
            block_file_writes: false,
            blocked_network: Vec::new(),
            block_dynamic_eval: false,
        }
    }

    /// Whether the prelude has anything to do.
    pub fn is_permissive(&self) -> bool {
        self.blocked_os_functions.is_empty()
            && !self.block_file_writes
            && self.blocked_network.is_empty()
            && !self.block_dynamic_eval
    }

    /// Python source that applies the policy. `eval`/`exec` are removed last.
    pub fn prelude(&self) -> String {
        let mut src = String::from("import builtins, importlib, io, os, sys\n");

        if !self.blocked_os_functions.is_empty() {
            src.push_str("\n# filesystem mutation\n");
            for name in &self.blocked_os_functions {
                src.push_str(&format!("os.__dict__[{}] = None\n", py_str(name)));
            }
        }

        if self.block_file_writes {
            src.push_str(
                r#"
# write-mode open
_original_open = io.open

def _restricted_open(file, *args, **kwargs):
    mode = args[0] if args else kwargs.get("mode", "r")
    if any(flag in mode for flag in "wax"):
        raise OSError("Write operations are prohibited.")
    return _original_open(file, *args, **kwargs)

io.open = _restricted_open
builtins.open = _restricted_open
"#,
            );
        }

        if !self.blocked_network.is_empty() {
            src.push_str("\n# network\n");
            for (module, attr) in &self.blocked_network {
                src.push_str(&format!(
                    "try:\n    setattr(importlib.import_module({}), {}, None)\nexcept ImportError:\n    pass\n",
                    py_str(module),
                    py_str(attr)
                ));
            }
        }

        if self.block_dynamic_eval {
            src.push_str("\n# dynamic evaluation\nbuiltins.eval = None\nbuiltins.exec = None\n");
        }

        src
    }
}

/// Quote `s` as a Python string literal.
fn py_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
