//! Rendering through the `typst` command-line compiler.
//!
//! The document is piped through `typst compile - -`, so nothing is written
//! to disk by the renderer.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::kind::OutputFormat;
use crate::render::{Compiler, RenderError};
use crate::request::RenderRequest;

/// [`Compiler`] that runs the `typst` CLI as a subprocess.
///
/// # Example
///
/// ```ignore
/// use typex_examples::{Renderer, TypstCli};
///
/// let renderer = Renderer::new(
///     TypstCli::new()
///         .font_paths(&["fonts".into()])
///         .input("mode", "pre"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TypstCli {
    program: String,
    font_paths: Vec<PathBuf>,
    inputs: Vec<(String, String)>,
}

impl Default for TypstCli {
    fn default() -> Self {
        Self::new()
    }
}

impl TypstCli {
    /// Invoke `typst` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "typst".to_owned(),
            font_paths: Vec::new(),
            inputs: Vec::new(),
        }
    }

    /// Use a different executable.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Add directories passed as `--font-path`.
    #[must_use]
    pub fn font_paths(mut self, dirs: &[PathBuf]) -> Self {
        self.font_paths.extend_from_slice(dirs);
        self
    }

    /// Add a `--input key=value` pair.
    #[must_use]
    pub fn input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push((key.into(), value.into()));
        self
    }

    /// Build the command line for one compilation.
    fn command(&self, format: OutputFormat, working_dir: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["compile", "-", "-", "--format", format.as_str()]);
        for dir in &self.font_paths {
            cmd.arg("--font-path").arg(dir);
        }
        for (key, value) in &self.inputs {
            cmd.arg("--input").arg(format!("{key}={value}"));
        }
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> RenderError {
        RenderError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl Compiler for TypstCli {
    fn compile(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, RenderError> {
        let mut cmd = self.command(request.format, request.working_dir);
        tracing::debug!(program = %self.program, args = ?cmd.get_args().collect::<Vec<_>>(), "running renderer");

        let mut child = cmd.spawn().map_err(|e| self.spawn_error(e))?;
        let input = request.input();

        // Feed stdin from a separate thread so a large stdout cannot deadlock us.
        let output = std::thread::scope(|scope| {
            if let Some(mut stdin) = child.stdin.take() {
                scope.spawn(move || {
                    // An early exit closes the pipe; the exit status reports why.
                    let _ = stdin.write_all(input.as_bytes());
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(RenderError::Compile {
                executed: request.executed.to_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_owned(),
            });
        }

        Ok(output.stdout)
    }
}
