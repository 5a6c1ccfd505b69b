//! Render requests and their cache keys.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::consts::DEFAULT_PREAMBLE;
use crate::kind::OutputFormat;

/// Everything that determines the renderer's output for one example.
///
/// Two requests with equal fields produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest<'a> {
    /// Executed view of the example.
    pub executed: &'a str,
    /// Text prepended to `executed`, expected to end with a newline.
    pub preamble: &'a str,
    /// Requested output format.
    pub format: OutputFormat,
    /// Directory the renderer runs in (`None` keeps the caller's).
    pub working_dir: Option<&'a Path>,
}

impl RenderRequest<'_> {
    /// Document submitted on the renderer's stdin: preamble, then source.
    #[must_use]
    pub fn input(&self) -> String {
        let mut input = String::with_capacity(self.preamble.len() + self.executed.len());
        input.push_str(self.preamble);
        input.push_str(self.executed);
        input
    }

    /// Compute a content hash for this request.
    ///
    /// Every field is length-prefixed before hashing, so requests hash equal
    /// only if all four fields are byte-for-byte equal. Nothing is normalized.
    ///
    /// # Hash Format
    ///
    /// Hex-encoded SHA-256 (64 characters).
    #[must_use]
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        update_field(&mut hasher, self.executed.as_bytes());
        update_field(&mut hasher, self.preamble.as_bytes());
        update_field(&mut hasher, self.format.as_str().as_bytes());
        match self.working_dir {
            Some(dir) => {
                hasher.update(b"+");
                update_field(&mut hasher, dir.as_os_str().as_encoded_bytes());
            }
            None => hasher.update(b"-"),
        }
        hex::encode(hasher.finalize())
    }
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

/// Request parameters shared by every example of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Preamble prepended to every executed view.
    pub preamble: String,
    /// Output format.
    pub format: OutputFormat,
    /// Directory the renderer runs in.
    pub working_dir: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preamble: DEFAULT_PREAMBLE.to_owned(),
            format: OutputFormat::default(),
            working_dir: None,
        }
    }
}

impl RenderOptions {
    /// Build the request for one executed view.
    #[must_use]
    pub fn request<'a>(&'a self, executed: &'a str) -> RenderRequest<'a> {
        RenderRequest {
            executed,
            preamble: &self.preamble,
            format: self.format,
            working_dir: self.working_dir.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request<'a>(executed: &'a str, preamble: &'a str) -> RenderRequest<'a> {
        RenderRequest {
            executed,
            preamble,
            format: OutputFormat::Svg,
            working_dir: None,
        }
    }

    #[test]
    fn test_input_concatenates_without_separator() {
        let request = make_request("= Title", "#set page(width: auto)\n");
        assert_eq!(request.input(), "#set page(width: auto)\n= Title");

        let request = make_request("a", "b");
        assert_eq!(request.input(), "ba");
    }

    #[test]
    fn test_request_hash() {
        let key1 = make_request("#lorem(3)", DEFAULT_PREAMBLE);
        let key2 = make_request("#lorem(3)", DEFAULT_PREAMBLE);
        let key3 = make_request("#lorem(4)", DEFAULT_PREAMBLE);

        assert_eq!(key1.compute_hash(), key2.compute_hash());
        assert_ne!(key1.compute_hash(), key3.compute_hash());
        assert_eq!(key1.compute_hash().len(), 64);
        assert!(key1.compute_hash().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_request_hash_preamble_matters() {
        let with_default = make_request("x", DEFAULT_PREAMBLE);
        let with_custom = make_request("x", "#set text(red)\n");

        assert_ne!(with_default.compute_hash(), with_custom.compute_hash());
    }

    #[test]
    fn test_request_hash_format_matters() {
        let svg = make_request("x", "");
        let png = RenderRequest {
            format: OutputFormat::Png,
            ..svg
        };

        assert_ne!(svg.compute_hash(), png.compute_hash());
    }

    #[test]
    fn test_request_hash_working_dir_matters() {
        let none = make_request("x", "");
        let root = RenderRequest {
            working_dir: Some(Path::new("/")),
            ..none
        };
        let empty = RenderRequest {
            working_dir: Some(Path::new("")),
            ..none
        };

        assert_ne!(none.compute_hash(), root.compute_hash());
        assert_ne!(none.compute_hash(), empty.compute_hash());
        assert_ne!(root.compute_hash(), empty.compute_hash());
    }

    #[test]
    fn test_request_hash_field_boundaries() {
        // Same concatenated input, different split between preamble and source
        let a = make_request("bc", "a");
        let b = make_request("c", "ab");

        assert_eq!(a.input(), b.input());
        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_request_hash_no_whitespace_normalization() {
        let a = make_request("x", "");
        let b = make_request("x\n", "");

        assert_ne!(a.compute_hash(), b.compute_hash());
    }

    #[test]
    fn test_options_request() {
        let options = RenderOptions {
            working_dir: Some(PathBuf::from("/doc")),
            ..RenderOptions::default()
        };
        let request = options.request("#lorem(1)");

        assert_eq!(request.executed, "#lorem(1)");
        assert_eq!(request.preamble, DEFAULT_PREAMBLE);
        assert_eq!(request.format, OutputFormat::Svg);
        assert_eq!(request.working_dir, Some(Path::new("/doc")));
    }
}
