//! Configuration for plitrans.
//!
//! Supports loading configuration from:
//! - `~/.config/plitrans/config.toml` for user defaults
//! - `plitrans.toml` in the current directory (or an explicit `--config` file)
//! - Environment variables (PLITRANS_*)
//! - Command-line arguments (highest priority, applied by the commands)

use std::path::{Path, PathBuf};

use plitrans::{CSharpEmitter, Emitter, JavaScriptEmitter, Target};
use serde::{Deserialize, Serialize};

/// Project configuration file name.
pub const PROJECT_CONFIG: &str = "plitrans.toml";

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Transpilation settings.
    pub transpile: TranspileConfig,
    /// C# backend settings.
    pub csharp: CSharpConfig,
    /// Output file settings.
    pub output: OutputConfig,
}

/// Transpilation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranspileConfig {
    /// Default output language.
    pub target: Target,
}

/// C# backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CSharpConfig {
    /// Namespace wrapping the generated class.
    pub namespace: String,
    /// Name of the generated class.
    pub class_name: String,
}

impl Default for CSharpConfig {
    fn default() -> Self {
        let emitter = CSharpEmitter::default();
        Self {
            namespace: emitter.namespace,
            class_name: emitter.class_name,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// When set, `transpile` without `-o` writes `<directory>/<stem>.<ext>`
    /// instead of printing to stdout.
    pub directory: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations, or from `explicit` in
    /// place of the project file. An explicit file must exist and parse;
    /// the default locations are skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(user_config) = Self::user_config_path() {
            if user_config.is_file() {
                config = config.merge(Self::load_from_file(&user_config)?);
                tracing::debug!("Loaded user config {}", user_config.display());
            }
        }

        match explicit {
            Some(path) => {
                config = config.merge(Self::load_from_file(path)?);
                tracing::debug!("Loaded config {}", path.display());
            }
            None => {
                let project = Path::new(PROJECT_CONFIG);
                if project.is_file() {
                    config = config.merge(Self::load_from_file(project)?);
                    tracing::debug!("Loaded project config {}", project.display());
                }
            }
        }

        config.apply_env_vars();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the user configuration file path.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("plitrans").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority for every
    /// field it sets to a non-default value).
    pub fn merge(mut self, other: Config) -> Self {
        let defaults = Config::default();

        if other.transpile.target != defaults.transpile.target {
            self.transpile.target = other.transpile.target;
        }
        if other.csharp.namespace != defaults.csharp.namespace {
            self.csharp.namespace = other.csharp.namespace;
        }
        if other.csharp.class_name != defaults.csharp.class_name {
            self.csharp.class_name = other.csharp.class_name;
        }
        if other.output.directory.is_some() {
            self.output.directory = other.output.directory;
        }

        self
    }

    /// Apply environment variables to configuration.
    fn apply_env_vars(&mut self) {
        if let Ok(val) = std::env::var("PLITRANS_TARGET") {
            match val.parse() {
                Ok(target) => self.transpile.target = target,
                Err(e) => tracing::warn!("Ignoring PLITRANS_TARGET: {e}"),
            }
        }
        if let Ok(val) = std::env::var("PLITRANS_NAMESPACE") {
            self.csharp.namespace = val;
        }
        if let Ok(val) = std::env::var("PLITRANS_CLASS_NAME") {
            self.csharp.class_name = val;
        }
        if let Ok(val) = std::env::var("PLITRANS_OUTPUT_DIR") {
            self.output.directory = Some(PathBuf::from(val));
        }
    }

    /// Build the emitter for `target` using these settings.
    pub fn emitter(&self, target: Target) -> Box<dyn Emitter> {
        match target {
            Target::CSharp => Box::new(CSharpEmitter::new(
                self.csharp.namespace.clone(),
                self.csharp.class_name.clone(),
            )),
            Target::JavaScript => Box::new(JavaScriptEmitter),
        }
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }

    /// Write configuration to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// I/O error reading/writing config.
    #[error("I/O error for {}: {message}", .path.display())]
    #[diagnostic(code(plitrans::config::io))]
    Io { path: PathBuf, message: String },

    /// Parse error in config file.
    #[error("Parse error in {}: {message}", .path.display())]
    #[diagnostic(code(plitrans::config::parse))]
    Parse { path: PathBuf, message: String },

    /// Serialization error.
    #[error("Serialization error: {message}")]
    #[diagnostic(code(plitrans::config::serialize))]
    Serialize { message: String },
}
