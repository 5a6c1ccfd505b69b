//! `typex list` command implementation.

use std::path::Path;

use clap::Args;
use typex_config::CliSettings;
use typex_examples::{Directive, DocumentScanner};

use super::{CommonArgs, display_relative};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the list command.
#[derive(Args)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

impl ListArgs {
    /// Execute the list command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the document cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(CliSettings::default())?;
        let document = &config.document_resolved;
        let scanner = DocumentScanner::open(&document.path)?;
        let root = document.root_dir();

        let mut found = 0usize;
        for directive in scanner.directives() {
            output.info(&describe(&directive, root));
            found += 1;
        }

        output.highlight(&format!("{found} example(s) in {}", document.path.display()));
        Ok(())
    }
}

/// One listing line: `<line>: <source> -> <fragment>`, flagging missing sources.
fn describe(directive: &Directive, root: &Path) -> String {
    let missing = if directive.source.is_file() {
        ""
    } else {
        " (missing)"
    };
    format!(
        "{}: {} -> {}{missing}",
        directive.line,
        display_relative(&directive.source, root),
        display_relative(&directive.fragment, root),
    )
}
