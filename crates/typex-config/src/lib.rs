//! Configuration management for typex.
//!
//! Parses `typex.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `renderer.program`
//! - `renderer.font_paths`
//! - `renderer.inputs` (values only)

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the host document path.
    pub document: Option<PathBuf>,
    /// Override the renderer program.
    pub program: Option<String>,
    /// Override the output format.
    pub format: Option<String>,
    /// Override the render cache flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "typex.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host document configuration (path is a relative string from TOML).
    document: DocumentConfigRaw,
    /// Renderer configuration (font paths are relative strings from TOML).
    renderer: RendererConfigRaw,
    /// Fragment layout configuration.
    pub layout: LayoutConfig,

    /// Resolved document configuration (set after loading).
    #[serde(skip)]
    pub document_resolved: DocumentConfig,
    /// Resolved renderer configuration (set after loading).
    #[serde(skip)]
    pub renderer_resolved: RendererConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw document configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocumentConfigRaw {
    path: Option<String>,
}

/// Resolved host document configuration.
#[derive(Debug, Default)]
pub struct DocumentConfig {
    /// Absolute path of the host document to scan for directives.
    pub path: PathBuf,
}

impl DocumentConfig {
    /// Directory containing the host document.
    ///
    /// Directive paths are resolved relative to this directory.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Raw renderer configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RendererConfigRaw {
    program: Option<String>,
    format: Option<String>,
    preamble: Option<String>,
    font_paths: Option<Vec<String>>,
    inputs: Option<BTreeMap<String, String>>,
    cache: Option<bool>,
}

/// Resolved renderer configuration with absolute paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Renderer executable (default: `typst`).
    pub program: String,
    /// Output format passed to `--format` (default: `svg`).
    ///
    /// Not checked here; the renderer decides which formats it supports.
    pub format: String,
    /// Preamble prepended to every executed example.
    ///
    /// Nothing is inserted between the preamble and the example, so a
    /// non-empty preamble must end with a newline.
    ///
    /// `None` keeps the built-in reproducible preamble.
    pub preamble: Option<String>,
    /// Extra font directories passed as `--font-path`.
    pub font_paths: Vec<PathBuf>,
    /// Values passed as `--input key=value`, in key order.
    pub inputs: BTreeMap<String, String>,
    /// Whether identical render requests are served from memory.
    pub cache_enabled: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: "typst".to_owned(),
            format: "svg".to_owned(),
            preamble: None,
            font_paths: Vec::new(),
            inputs: BTreeMap::new(),
            cache_enabled: true,
        }
    }
}

/// Fragment layout configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Module the layout helper is imported from, relative to the fragment.
    pub import_path: String,
    /// Name of the layout helper function.
    pub helper: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            import_path: "../typ/util.typ".to_owned(),
            helper: "layout-example".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`renderer.program`").
        field: String,
        /// Error message (e.g., "${`TYPST_BIN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `typex.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. Validation runs
    /// last so overrides are checked too.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(document) = &settings.document {
            self.document_resolved.path.clone_from(document);
        }
        if let Some(program) = &settings.program {
            self.renderer_resolved.program.clone_from(program);
        }
        if let Some(format) = &settings.format {
            self.renderer_resolved.format.clone_from(format);
        }
        if let Some(cache_enabled) = settings.cache_enabled {
            self.renderer_resolved.cache_enabled = cache_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            document: DocumentConfigRaw::default(),
            renderer: RendererConfigRaw::default(),
            layout: LayoutConfig::default(),
            document_resolved: DocumentConfig {
                path: base.join("main.typ"),
            },
            renderer_resolved: RendererConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`load`](Self::load) after CLI settings apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_renderer()?;
        self.validate_layout()?;
        Ok(())
    }

    /// Validate renderer configuration.
    fn validate_renderer(&self) -> Result<(), ConfigError> {
        let renderer = &self.renderer_resolved;
        require_non_empty(&renderer.program, "renderer.program")?;

        if let Some(preamble) = &renderer.preamble
            && !preamble.is_empty()
            && !preamble.ends_with('\n')
        {
            return Err(ConfigError::Validation(
                "renderer.preamble must end with a newline".to_owned(),
            ));
        }

        if let Some(key) = renderer.inputs.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(ConfigError::Validation(format!(
                "renderer.inputs key '{key}' must be non-empty and cannot contain '='"
            )));
        }

        Ok(())
    }

    /// Validate layout configuration.
    fn validate_layout(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.layout.import_path, "layout.import_path")?;
        require_non_empty(&self.layout.helper, "layout.helper")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let renderer = &mut self.renderer;

        if let Some(ref program) = renderer.program {
            renderer.program = Some(expand::expand_env(program, "renderer.program")?);
        }

        if let Some(ref mut font_paths) = renderer.font_paths {
            for path in font_paths.iter_mut() {
                *path = expand::expand_env(path, "renderer.font_paths")?;
            }
        }

        if let Some(ref mut inputs) = renderer.inputs {
            for (key, value) in inputs.iter_mut() {
                *value = expand::expand_env(value, &format!("renderer.inputs.{key}"))?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.document_resolved = DocumentConfig {
            path: config_dir.join(self.document.path.as_deref().unwrap_or("main.typ")),
        };

        let defaults = RendererConfig::default();
        let raw = &self.renderer;
        self.renderer_resolved = RendererConfig {
            program: raw.program.clone().unwrap_or(defaults.program),
            format: raw.format.clone().unwrap_or(defaults.format),
            preamble: raw.preamble.clone(),
            font_paths: raw
                .font_paths
                .iter()
                .flatten()
                .map(|p| config_dir.join(p))
                .collect(),
            inputs: raw.inputs.clone().unwrap_or_default(),
            cache_enabled: raw.cache.unwrap_or(defaults.cache_enabled),
        };
    }
}
