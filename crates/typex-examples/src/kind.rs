//! Example kinds and render output formats.

use std::path::Path;

/// Source format of an example file.
///
/// Determines which marker convention the parser applies and how the
/// executed view is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExampleKind {
    /// Typst markup (`.typ`), using `<<<` / `>>>` line markers.
    Typst,
    /// `BibTeX` database (`.bib`), using `%` comments as the expected output.
    Bibliography,
}

impl ExampleKind {
    /// Parse kind from a file extension (without the leading dot).
    ///
    /// Matching is case-sensitive: `TYP` is not a Typst example.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "typ" => Some(Self::Typst),
            "bib" => Some(Self::Bibliography),
            _ => None,
        }
    }

    /// Resolve the kind of a file from its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Language tag used for the displayed code block.
    #[must_use]
    pub fn lang(self) -> &'static str {
        match self {
            Self::Typst => "typ",
            Self::Bibliography => "bib",
        }
    }
}

/// Output format requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// SVG text (default; the only format that embeds losslessly as text).
    #[default]
    Svg,
    /// PNG image.
    Png,
    /// PDF document.
    Pdf,
}

impl OutputFormat {
    /// Parse format from its `--format` name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "svg" => Some(Self::Svg),
            "png" => Some(Self::Png),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Return format as passed to `--format`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Pdf => "pdf",
        }
    }
}
