//! CLI command implementations.

mod compile;
mod list;

use std::path::{Path, PathBuf};

use clap::Args;
use typex_cache::{Cache, NullCache};
use typex_config::{CliSettings, Config};
use typex_examples::{
    DEFAULT_PREAMBLE, Layout, OutputFormat, Pipeline, RenderOptions, Renderer, TypstCli,
};

use crate::error::CliError;

pub(crate) use compile::CompileArgs;
pub(crate) use list::ListArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Host document to scan (overrides config; default: main.typ).
    document: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover typex.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (log every render and cache hit).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration, letting `settings` and the document argument
    /// override file values.
    fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            document: self.document.clone(),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }
}

/// Build the example pipeline described by `config`.
pub(crate) fn pipeline_from_config(config: &Config) -> Result<Pipeline, CliError> {
    let settings = &config.renderer_resolved;

    let format = OutputFormat::parse(&settings.format).ok_or_else(|| {
        CliError::Validation(format!("Unsupported output format: {}", settings.format))
    })?;

    let compiler = settings.inputs.iter().fold(
        TypstCli::new()
            .program(&settings.program)
            .font_paths(&settings.font_paths),
        |cli, (key, value)| cli.input(key, value),
    );

    let mut renderer = Renderer::new(compiler);
    if !settings.cache_enabled {
        renderer = renderer.with_cache(NullCache.bucket("renders"));
    }

    let options = RenderOptions {
        preamble: settings
            .preamble
            .clone()
            .unwrap_or_else(|| DEFAULT_PREAMBLE.to_owned()),
        format,
        working_dir: None,
    };
    let layout = Layout {
        import_path: config.layout.import_path.clone(),
        helper: config.layout.helper.clone(),
    };

    Ok(Pipeline::new(renderer).options(options).layout(layout))
}

/// Display `path` relative to `root` when it lies inside it.
pub(crate) fn display_relative(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative.to_string_lossy().replace('\\', "/")
}
