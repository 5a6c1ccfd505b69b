//! CLI error types.

use typex_config::ConfigError;
use typex_examples::ExampleError;

/// CLI error type.
///
/// Every variant displays its inner message unchanged, so render diagnostics
/// reach the terminal exactly as the renderer formatted them.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Example(#[from] ExampleError),

    #[error("{0}")]
    Validation(String),
}
