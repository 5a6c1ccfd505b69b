//! Memoized rendering.
//!
//! [`Renderer`] sits in front of a [`Compiler`] and serves repeated requests
//! from a cache bucket, so every unique [`RenderRequest`] is compiled at most
//! once per run.

use std::sync::Mutex;

use typex_cache::{Cache, CacheBucket, MemoryCache};

use crate::consts::RENDER_BUCKET;
use crate::request::RenderRequest;

/// Error returned when an example cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer exited unsuccessfully.
    ///
    /// The message is a complete diagnostic that quotes the offending source.
    #[error("Failed to compile a typst document:\n\n```typst\n{executed}\n```\n\n{stderr}")]
    Compile {
        /// Executed view that was rejected.
        executed: String,
        /// Renderer diagnostics, trailing whitespace trimmed.
        stderr: String,
    },

    /// The renderer process could not be started or awaited.
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A backend that turns a render request into rendered bytes.
///
/// Implementations run uncached; [`Renderer`] adds memoization.
pub trait Compiler: Send + Sync {
    /// Compile `request`, returning the rendered output.
    fn compile(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, RenderError>;
}

/// Memoizing front end for a [`Compiler`].
///
/// Uses a fresh in-memory cache by default, scoped to this renderer. Pass
/// [`typex_cache::NullCache`]'s bucket to [`with_cache`](Self::with_cache) to
/// disable memoization.
pub struct Renderer {
    compiler: Box<dyn Compiler>,
    cache: Box<dyn CacheBucket>,
    /// Held across lookup, compile and insert.
    lock: Mutex<()>,
}

impl Renderer {
    /// Create a renderer with a private in-memory cache.
    #[must_use]
    pub fn new(compiler: impl Compiler + 'static) -> Self {
        Self {
            compiler: Box::new(compiler),
            cache: MemoryCache::new().bucket(RENDER_BUCKET),
            lock: Mutex::new(()),
        }
    }

    /// Replace the cache bucket.
    #[must_use]
    pub fn with_cache(mut self, cache: Box<dyn CacheBucket>) -> Self {
        self.cache = cache;
        self
    }

    /// Render a request, reusing the result of an identical earlier request.
    ///
    /// Failures are not cached: a failing request is compiled again if it
    /// is submitted again.
    ///
    /// # Errors
    ///
    /// Propagates the compiler's [`RenderError`].
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>, RenderError> {
        let key = request.compute_hash();
        let _guard = self.lock.lock().unwrap();

        if let Some(rendered) = self.cache.get(&key) {
            tracing::debug!(key = %key, "render cache hit");
            return Ok(rendered);
        }

        tracing::debug!(key = %key, format = request.format.as_str(), "render cache miss");
        let rendered = self.compiler.compile(request)?;
        self.cache.set(&key, &rendered);
        Ok(rendered)
    }
}
