//! Live example rendering for Typst documents.
//!
//! This crate turns small example files referenced from a host document into
//! fragments that show each example's source next to its rendered output:
//! - [`DocumentScanner`] finds `#include "….example.typ" // @as-example` lines
//! - [`Example`] splits a `.typ` or `.bib` file into displayed and executed views
//! - [`Renderer`] compiles executed views through a [`Compiler`], memoizing results
//! - [`compose`] builds the fragment embedding both views
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - [`kind`]: Example kinds and output formats (`ExampleKind`, `OutputFormat`)
//! - [`example`]: Marker-based parsing into displayed and executed views
//! - [`request`]: Render requests and their content hashes
//! - [`render`]: `Compiler` trait and the memoizing `Renderer`
//! - [`typst`]: `Compiler` backed by the `typst` CLI
//! - [`compose`]: Fragment text generation
//! - [`scanner`]: Directive discovery in host documents
//! - [`pipeline`]: Parse, render, compose and write, per directive
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use typex_examples::{Pipeline, Renderer, TypstCli};
//!
//! let pipeline = Pipeline::new(Renderer::new(TypstCli::new()));
//! for fragment in pipeline.compile_document(Path::new("main.typ"))? {
//!     println!("compiled {}", fragment.display());
//! }
//! ```

mod compose;
mod consts;
mod error;
mod example;
mod kind;
mod pipeline;
mod render;
mod request;
mod scanner;
mod typst;

pub use compose::{Layout, as_image, compose};
pub use consts::{DEFAULT_PREAMBLE, FRAGMENT_SUFFIX};
pub use error::ExampleError;
pub use example::Example;
pub use kind::{ExampleKind, OutputFormat};
pub use pipeline::{Pipeline, fragment_path};
pub use render::{Compiler, RenderError, Renderer};
pub use request::{RenderOptions, RenderRequest};
pub use scanner::{Directive, DocumentScanner, scan};
pub use typst::TypstCli;
