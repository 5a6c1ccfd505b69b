//! End-to-end example compilation.
//!
//! Ties the parser, renderer and composer together and writes fragments to
//! disk. Processing is sequential and stops at the first error.

use std::path::{Path, PathBuf};

use crate::compose::{Layout, compose};
use crate::consts::FRAGMENT_SUFFIX;
use crate::error::ExampleError;
use crate::example::Example;
use crate::render::Renderer;
use crate::request::RenderOptions;
use crate::scanner::{Directive, DocumentScanner};

/// Compiles examples into fragment files.
pub struct Pipeline {
    renderer: Renderer,
    options: RenderOptions,
    layout: Layout,
}

impl Pipeline {
    /// Create a pipeline with default render options and layout.
    #[must_use]
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer,
            options: RenderOptions::default(),
            layout: Layout::default(),
        }
    }

    /// Set the render options (preamble, format, working directory).
    #[must_use]
    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the fragment layout.
    #[must_use]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Parse, render and compose one example without writing anything.
    ///
    /// # Errors
    ///
    /// Returns any parse, read or render error.
    pub fn fragment(&self, source: &Path) -> Result<String, ExampleError> {
        let example = Example::from_file(source)?;
        let rendered = self
            .renderer
            .render(&self.options.request(&example.executed))?;
        Ok(compose(
            &example.displayed,
            example.kind,
            &rendered,
            &self.layout,
        ))
    }

    /// Compile an example to `fragment`, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns any parse, read, render or write error.
    pub fn compile_to(&self, source: &Path, fragment: &Path) -> Result<PathBuf, ExampleError> {
        let content = self.fragment(source)?;
        std::fs::write(fragment, content).map_err(|e| ExampleError::io(fragment, e))?;
        tracing::info!(source = %source.display(), fragment = %fragment.display(), "compiled example");
        Ok(fragment.to_path_buf())
    }

    /// Compile an example next to its source, as `<source>.example.typ`.
    ///
    /// # Errors
    ///
    /// Returns any parse, read, render or write error.
    pub fn compile_example(&self, source: &Path) -> Result<PathBuf, ExampleError> {
        self.compile_to(source, &fragment_path(source))
    }

    /// Compile the example a directive refers to, into the file it includes.
    ///
    /// # Errors
    ///
    /// Returns any parse, read, render or write error.
    pub fn compile_directive(&self, directive: &Directive) -> Result<PathBuf, ExampleError> {
        self.compile_to(&directive.source, &directive.fragment)
    }

    /// Compile every example referenced by a host document, in order.
    ///
    /// Stops at the first failure; fragments written before it are kept.
    ///
    /// # Errors
    ///
    /// Returns the first read, parse, render or write error.
    pub fn compile_document(&self, document: &Path) -> Result<Vec<PathBuf>, ExampleError> {
        let scanner = DocumentScanner::open(document)?;
        scanner
            .directives()
            .map(|directive| self.compile_directive(&directive))
            .collect()
    }
}

/// Fragment path for an example source: `<source>.example.typ`.
#[must_use]
pub fn fragment_path(source: &Path) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(FRAGMENT_SUFFIX);
    PathBuf::from(name)
}
