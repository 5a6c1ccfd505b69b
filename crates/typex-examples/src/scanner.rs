//! Directive discovery in a host document.
//!
//! A directive is a whole line of the form
//!
//! ```text
//! #include "examples/thesis.bib.example.typ" // @as-example
//! ```
//!
//! It must start at column 0. Indented or multi-line directives are not
//! recognized.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::consts::FRAGMENT_SUFFIX;
use crate::error::ExampleError;
use crate::kind::ExampleKind;

static DIRECTIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^#include[ \t]+"([^"]+)\.example\.typ"[ \t]*//[ \t]*@as-example$"#).unwrap()
});

/// A located inclusion directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// One-based line number in the host document.
    pub line: usize,
    /// Path as written between the quotes, without the fragment suffix.
    pub stem: String,
    /// Example source to parse and render.
    pub source: PathBuf,
    /// Fragment file the directive includes.
    pub fragment: PathBuf,
}

impl Directive {
    /// Resolve a directive stem against the host document's directory.
    ///
    /// A stem that already names a recognized example file (`thesis.bib`) is
    /// used as is. Otherwise it names a sibling `.typ` or `.bib` file without
    /// its extension: `.typ` wins when both exist, and is also the fallback
    /// when neither does.
    #[must_use]
    pub fn resolve(root: &Path, stem: &str, line: usize) -> Self {
        let fragment = root.join(format!("{stem}{FRAGMENT_SUFFIX}"));
        let source = if ExampleKind::from_path(Path::new(stem)).is_some() {
            root.join(stem)
        } else {
            let typ = root.join(format!("{stem}.typ"));
            let bib = root.join(format!("{stem}.bib"));
            if !typ.is_file() && bib.is_file() {
                bib
            } else {
                typ
            }
        };

        Self {
            line,
            stem: stem.to_owned(),
            source,
            fragment,
        }
    }
}

/// Scanner over the directives of one host document.
///
/// The document is read once on [`open`](Self::open); [`directives`](Self::directives)
/// can be iterated any number of times and always yields the same sequence.
#[derive(Debug)]
pub struct DocumentScanner {
    root: PathBuf,
    content: String,
}

impl DocumentScanner {
    /// Read a host document.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleError::Io`] if the document cannot be read.
    pub fn open(document: &Path) -> Result<Self, ExampleError> {
        let content =
            std::fs::read_to_string(document).map_err(|e| ExampleError::io(document, e))?;
        let root = document.parent().unwrap_or(Path::new("")).to_path_buf();
        Ok(Self::from_content(root, content))
    }

    /// Scan text that is already in memory, resolving paths against `root`.
    #[must_use]
    pub fn from_content(root: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            content: content.into(),
        }
    }

    /// Directory that directive paths are resolved against.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yield directives in document order.
    ///
    /// Repeated directives are yielded once per occurrence.
    pub fn directives(&self) -> impl Iterator<Item = Directive> + '_ {
        self.content.lines().enumerate().filter_map(|(idx, line)| {
            let caps = DIRECTIVE_PATTERN.captures(line)?;
            Some(Directive::resolve(&self.root, &caps[1], idx + 1))
        })
    }
}

/// Read `document` and collect the example source paths it references.
///
/// # Errors
///
/// Returns [`ExampleError::Io`] if the document cannot be read.
pub fn scan(document: &Path) -> Result<Vec<PathBuf>, ExampleError> {
    let scanner = DocumentScanner::open(document)?;
    Ok(scanner.directives().map(|d| d.source).collect())
}
