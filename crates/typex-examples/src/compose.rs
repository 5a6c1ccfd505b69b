//! Fragment composition.
//!
//! A fragment is a Typst snippet that imports a layout helper and calls it
//! with the displayed source as a raw block and the rendered output as an
//! inline image.

use crate::kind::ExampleKind;

/// Where the fragment's layout helper comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Module path, as written in the fragment's `#import`.
    pub import_path: String,
    /// Name of the helper taking `(code, preview)`.
    pub helper: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            import_path: "../typ/util.typ".to_owned(),
            helper: "layout-example".to_owned(),
        }
    }
}

/// Compose the fragment for a rendered example.
///
/// `rendered` is embedded as text; invalid UTF-8 is replaced rather than
/// rejected, so composition never fails.
#[must_use]
pub fn compose(displayed: &str, kind: ExampleKind, rendered: &[u8], layout: &Layout) -> String {
    let fence = raw_fence(displayed);
    let lang = kind.lang();
    let image = as_image(rendered);
    let Layout {
        import_path,
        helper,
    } = layout;

    format!(
        r#"#import "{import_path}": {helper}

#{helper}(
  {fence}{lang}
  {displayed}
  {fence},
  {image},
)"#
    )
}

/// Make rendered output embeddable into Typst code as an image expression.
#[must_use]
pub fn as_image(rendered: &[u8]) -> String {
    let text = String::from_utf8_lossy(rendered);
    if text.contains('`') {
        let fence = raw_fence(&text);
        format!("image(bytes({fence}\n{text}\n{fence}.text))")
    } else {
        format!("image(bytes(`{text}`.text))")
    }
}

/// Backtick fence for a raw block that can hold `content` verbatim.
///
/// At least three backticks, and always longer than the longest backtick run
/// inside `content`.
pub(crate) fn raw_fence(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compose_typ_fragment() {
        let fragment = compose(
            "#lorem(5)",
            ExampleKind::Typst,
            b"<svg></svg>",
            &Layout::default(),
        );

        assert_eq!(
            fragment,
            r#"#import "../typ/util.typ": layout-example

#layout-example(
  ```typ
  #lorem(5)
  ```,
  image(bytes(`<svg></svg>`.text)),
)"#
        );
    }

    #[test]
    fn test_compose_bib_uses_bib_tag() {
        let fragment = compose("@misc{x}", ExampleKind::Bibliography, b"<svg/>", &Layout::default());

        assert!(fragment.contains("  ```bib\n  @misc{x}\n  ```,"));
    }

    #[test]
    fn test_compose_custom_layout() {
        let layout = Layout {
            import_path: "/typ/show.typ".to_owned(),
            helper: "show-example".to_owned(),
        };
        let fragment = compose("a", ExampleKind::Typst, b"<svg/>", &layout);

        assert!(fragment.starts_with("#import \"/typ/show.typ\": show-example\n\n#show-example(\n"));
    }

    #[test]
    fn test_compose_displayed_verbatim() {
        let displayed = "#let f(x) = x\n  indented\n\n#f[1]";
        let fragment = compose(displayed, ExampleKind::Typst, b"", &Layout::default());

        assert!(fragment.contains(displayed));
    }

    #[test]
    fn test_compose_displayed_with_backticks() {
        let fragment = compose(
            "```rust\nfn main() {}\n```",
            ExampleKind::Typst,
            b"<svg/>",
            &Layout::default(),
        );

        assert!(fragment.contains("  ````typ\n  ```rust"));
        assert!(fragment.contains("```\n  ````,"));
    }

    #[test]
    fn test_as_image() {
        assert_eq!(
            as_image(b"<svg width=\"1pt\"/>"),
            "image(bytes(`<svg width=\"1pt\"/>`.text))"
        );
    }

    #[test]
    fn test_as_image_with_backtick() {
        assert_eq!(
            as_image(b"<svg>`</svg>"),
            "image(bytes(```\n<svg>`</svg>\n```.text))"
        );
    }

    #[test]
    fn test_as_image_invalid_utf8_is_replaced() {
        let image = as_image(&[b'<', 0xFF, b'>']);
        assert_eq!(image, "image(bytes(`<\u{FFFD}>`.text))");
    }

    #[test]
    fn test_raw_fence() {
        assert_eq!(raw_fence("plain"), "```");
        assert_eq!(raw_fence("a `b` c"), "```");
        assert_eq!(raw_fence("``` x ```"), "````");
        assert_eq!(raw_fence("`````"), "``````");
    }
}
