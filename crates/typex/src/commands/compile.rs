//! `typex compile` command implementation.

use clap::Args;
use typex_config::CliSettings;
use typex_examples::DocumentScanner;

use super::{CommonArgs, display_relative, pipeline_from_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the compile command.
#[derive(Args)]
pub(crate) struct CompileArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Renderer executable (overrides config; default: typst).
    #[arg(long, env = "TYPEX_TYPST")]
    typst: Option<String>,

    /// Output format passed to the renderer (overrides config; default: svg).
    #[arg(long)]
    format: Option<String>,

    /// Render every directive, even repeated ones.
    #[arg(long)]
    no_cache: bool,
}

impl CompileArgs {
    /// Execute the compile command.
    ///
    /// Examples are compiled in document order. The first failure aborts the
    /// run; fragments compiled before it are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any example fails to compile.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(CliSettings {
            program: self.typst,
            format: self.format,
            cache_enabled: self.no_cache.then_some(false),
            ..CliSettings::default()
        })?;
        let document = &config.document_resolved;
        let pipeline = pipeline_from_config(&config)?;

        let scanner = DocumentScanner::open(&document.path)?;
        let root = document.root_dir();

        let mut compiled = 0usize;
        for directive in scanner.directives() {
            let fragment = pipeline.compile_directive(&directive)?;
            output.success(&format!("✅ {}", display_relative(&fragment, root)));
            compiled += 1;
        }

        if compiled == 0 {
            output.info(&format!(
                "No examples found in {}",
                document.path.display()
            ));
        } else {
            output.highlight(&format!("Compiled {compiled} example(s)."));
        }
        Ok(())
    }
}
