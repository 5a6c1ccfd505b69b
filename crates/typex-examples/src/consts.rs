//! Internal constants for example rendering.

/// Default preamble prepended to every executed example.
///
/// Sizes the page to its content with a small margin and no fill (some
/// browsers hide the SVG border otherwise), and pins the font chain with
/// fallback disabled so output does not depend on the host's installed fonts.
pub const DEFAULT_PREAMBLE: &str = concat!(
    "#set page(width: auto, height: auto, margin: 0.5em, fill: none)\n",
    "#set text(font: ((name: \"New Computer Modern\", covers: \"latin-in-cjk\"), ",
    "\"Noto Serif CJK SC\"), fallback: false)\n",
);

/// Suffix of fragment files, appended to the example source path.
pub const FRAGMENT_SUFFIX: &str = ".example.typ";

/// Citation style used when rendering bibliography examples.
pub(crate) const BIBLIOGRAPHY_STYLE: &str = "gb-7714-2015-numeric";

/// Page width used when rendering bibliography examples.
pub(crate) const BIBLIOGRAPHY_PAGE_WIDTH: &str = "30em";

/// Cache bucket holding rendered output.
pub(crate) const RENDER_BUCKET: &str = "renders";
