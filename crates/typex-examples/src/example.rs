//! Example parsing.
//!
//! An example file is split into two views derived from the same source by
//! independent, order-preserving line filters:
//!
//! - the *displayed* view, shown to the reader next to the rendered output;
//! - the *executed* view, submitted to the renderer.
//!
//! Which markers are recognized depends on the [`ExampleKind`].

use std::path::Path;

use crate::compose::raw_fence;
use crate::consts::{BIBLIOGRAPHY_PAGE_WIDTH, BIBLIOGRAPHY_STYLE};
use crate::error::ExampleError;
use crate::kind::ExampleKind;

/// Prefix marking a Typst line as displayed-only.
const DISPLAY_ONLY: &str = "<<<";
/// Prefix marking a Typst line as executed-only.
const EXECUTE_ONLY: &str = ">>>";
/// Prefix marking a `BibTeX` line as an expected-output entry.
const EXPECTED_MARKER: &str = "%";

/// A parsed example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Source shown to the reader, markers stripped.
    pub displayed: String,
    /// Source submitted to the renderer, markers stripped.
    pub executed: String,
    /// Source format.
    pub kind: ExampleKind,
}

impl Example {
    /// Read and parse an example file.
    ///
    /// The kind is resolved from the file extension alone.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleError::UnsupportedKind`] for an unrecognized extension
    /// (checked before the file is read) and [`ExampleError::Io`] if the file
    /// cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ExampleError> {
        let kind = ExampleKind::from_path(path).ok_or_else(|| ExampleError::UnsupportedKind {
            path: path.to_path_buf(),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })?;

        let src = std::fs::read_to_string(path).map_err(|e| ExampleError::io(path, e))?;
        Ok(Self::parse(&src, kind))
    }

    /// Parse example source of a known kind.
    #[must_use]
    pub fn parse(src: &str, kind: ExampleKind) -> Self {
        match kind {
            ExampleKind::Typst => Self::from_typ(src),
            ExampleKind::Bibliography => Self::from_bib(src),
        }
    }

    /// Parse a Typst example.
    ///
    /// Lines starting with `<<<` are displayed but not executed; lines starting
    /// with `>>>` are executed but not displayed. The marker is stripped in the
    /// view that keeps the line. Markers elsewhere on a line are plain text.
    #[must_use]
    pub fn from_typ(src: &str) -> Self {
        let displayed = src
            .lines()
            .filter(|line| !line.starts_with(EXECUTE_ONLY))
            .map(|line| line.strip_prefix(DISPLAY_ONLY).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");

        let executed = src
            .lines()
            .filter(|line| !line.starts_with(DISPLAY_ONLY))
            .map(|line| line.strip_prefix(EXECUTE_ONLY).unwrap_or(line))
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            displayed,
            executed,
            kind: ExampleKind::Typst,
        }
    }

    /// Parse a `BibTeX` example.
    ///
    /// Every `%` comment line is one entry of the expected output. The
    /// executed view is a Typst document that renders the remaining entries
    /// as a bibliography above the expected list, for visual comparison.
    #[must_use]
    pub fn from_bib(src: &str) -> Self {
        let (comments, entries): (Vec<&str>, Vec<&str>) = src
            .lines()
            .partition(|line| line.starts_with(EXPECTED_MARKER));

        let displayed = entries.join("\n");
        let expected = comments
            .iter()
            .map(|line| {
                let body = line.strip_prefix(EXPECTED_MARKER).unwrap_or(line);
                format!("+ {}", body.trim())
            })
            .collect::<Vec<_>>()
            .join("\n");

        let executed = bibliography_document(&displayed, &expected);

        Self {
            displayed,
            executed,
            kind: ExampleKind::Bibliography,
        }
    }
}

/// Build the Typst document comparing rendered entries with the expected list.
fn bibliography_document(entries: &str, expected: &str) -> String {
    let fence = raw_fence(entries);
    format!(
        r#"#set page(width: {BIBLIOGRAPHY_PAGE_WIDTH})

Current:

#bibliography(
  bytes({fence}{entries}{fence}.text),
  style: "{BIBLIOGRAPHY_STYLE}",
  title: none,
  full: true,
)

Expected:

#set enum(numbering: "[1]")
{expected}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_typ_without_markers_is_identical() {
        let src = "#set text(red)\nHello *world*\n\n= Heading";
        let example = Example::from_typ(src);

        assert_eq!(example.displayed, src);
        assert_eq!(example.executed, src);
        assert_eq!(example.kind, ExampleKind::Typst);
    }

    #[test]
    fn test_typ_markers_split_views() {
        let example = Example::from_typ("<<<hidden\nshown\n>>>only-run");

        assert_eq!(example.displayed, "hidden\nshown");
        assert_eq!(example.executed, "shown\nonly-run");
    }

    #[test]
    fn test_typ_markers_preserve_order() {
        let src = ">>>#set page(width: 8em)\na\n<<<#show: body\nb\n>>>#pagebreak()\nc";
        let example = Example::from_typ(src);

        assert_eq!(example.displayed, "a\n#show: body\nb\nc");
        assert_eq!(example.executed, "#set page(width: 8em)\na\nb\n#pagebreak()\nc");
    }

    #[test]
    fn test_typ_markers_only_at_line_start() {
        let src = "  <<<indented\ntext >>> arrow\nend<<<";
        let example = Example::from_typ(src);

        assert_eq!(example.displayed, src);
        assert_eq!(example.executed, src);
    }

    #[test]
    fn test_typ_marker_keeps_remaining_whitespace() {
        let example = Example::from_typ("<<< spaced\n>>>  two");

        assert_eq!(example.displayed, " spaced");
        assert_eq!(example.executed, "  two");
    }

    #[test]
    fn test_typ_crlf_line_endings() {
        let example = Example::from_typ("<<<a\r\nb\r\n>>>c\r\n");

        assert_eq!(example.displayed, "a\nb");
        assert_eq!(example.executed, "b\nc");
    }

    #[test]
    fn test_typ_empty_source() {
        let example = Example::from_typ("");

        assert_eq!(example.displayed, "");
        assert_eq!(example.executed, "");
    }

    #[test]
    fn test_bib_comments_become_expected_entries() {
        let src = "% [1] First expected.  \n@book{a,\n  title = {A},\n}\n%   [2] Second expected.\n@misc{b}";
        let example = Example::from_bib(src);

        assert_eq!(example.kind, ExampleKind::Bibliography);
        assert_eq!(example.displayed, "@book{a,\n  title = {A},\n}\n@misc{b}");
        assert!(
            example
                .executed
                .contains("+ [1] First expected.\n+ [2] Second expected.\n")
        );
        assert!(!example.displayed.contains('%'));
    }

    #[test]
    fn test_bib_executed_document() {
        let example = Example::from_bib("%Expected\n@misc{key}");

        assert_eq!(
            example.executed,
            r#"#set page(width: 30em)

Current:

#bibliography(
  bytes(```@misc{key}```.text),
  style: "gb-7714-2015-numeric",
  title: none,
  full: true,
)

Expected:

#set enum(numbering: "[1]")
+ Expected
"#
        );
    }

    #[test]
    fn test_bib_indented_comment_is_an_entry_line() {
        let example = Example::from_bib("  % not a marker\n@misc{x}");

        assert_eq!(example.displayed, "  % not a marker\n@misc{x}");
        assert!(example.executed.ends_with("#set enum(numbering: \"[1]\")\n\n"));
    }

    #[test]
    fn test_bib_entries_with_backticks_get_longer_fence() {
        let example = Example::from_bib("@misc{x, note = {```code```}}");

        assert!(
            example
                .executed
                .contains("bytes(````@misc{x, note = {```code```}}````.text)")
        );
    }

    #[test]
    fn test_parse_dispatches_on_kind() {
        let typ = Example::parse("<<<a", ExampleKind::Typst);
        let bib = Example::parse("<<<a", ExampleKind::Bibliography);

        assert_eq!(typ.displayed, "a");
        assert_eq!(bib.displayed, "<<<a");
    }

    #[test]
    fn test_from_file_typ() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ruby.typ");
        std::fs::write(&path, "<<<shown\n>>>run\nboth\n").unwrap();

        let example = Example::from_file(&path).unwrap();

        assert_eq!(example.kind, ExampleKind::Typst);
        assert_eq!(example.displayed, "shown\nboth");
        assert_eq!(example.executed, "run\nboth");
    }

    #[test]
    fn test_from_file_unsupported_kind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.md");
        std::fs::write(&path, "# Notes").unwrap();

        let err = Example::from_file(&path).unwrap_err();

        assert!(
            matches!(&err, ExampleError::UnsupportedKind { extension, .. } if extension == "md"),
            "Expected UnsupportedKind, got {err:?}"
        );
        assert!(err.to_string().contains("Unsupported file type: md"));
    }

    #[test]
    fn test_from_file_without_extension() {
        let err = Example::from_file(Path::new("/nonexistent/Makefile")).unwrap_err();

        assert!(matches!(
            &err,
            ExampleError::UnsupportedKind { extension, .. } if extension.is_empty()
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.typ");

        let err = Example::from_file(&path).unwrap_err();

        assert!(matches!(err, ExampleError::Io { .. }));
        assert!(err.to_string().contains("missing.typ"));
    }
}
