//! Runtime configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then `STIMFLOW_`-prefixed
//! environment variables, where `__` separates nesting levels:
//!
//! ```toml
//! [compiler]
//! max_nodes = 5000
//! template_dir = "templates"   # optional; overrides the embedded templates per target
//! targets = ["desktop", "browser"]
//!
//! [logging]
//! level = "info"
//! format = "pretty"            # pretty | compact | json
//! ```
//!
//! `STIMFLOW_COMPILER__MAX_NODES=200` overrides `compiler.max_nodes`.

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::foundation::error::{StimflowError, StimflowResult};
use crate::target::Target;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "STIMFLOW_";

/// Default upper bound on nodes per compile.
pub const DEFAULT_MAX_NODES: usize = 5000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StimflowConfig {
    /// Compiler settings.
    pub compiler: CompilerConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// `[compiler]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Graphs with more nodes fail with [`StimflowError::TooManyNodes`].
    pub max_nodes: usize,
    /// Directory with `<target>/` subdirectories of `.tmpl` files layered over the embedded set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    /// Targets compiled when none is requested explicitly.
    pub targets: Vec<Target>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            max_nodes: DEFAULT_MAX_NODES,
            template_dir: None,
            targets: Target::ALL.to_vec(),
        }
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored.
    #[default]
    Pretty,
    /// Single-line, no colors.
    Compact,
    /// One JSON object per event.
    Json,
}

/// `[logging]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Output layout.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl StimflowConfig {
    /// Defaults merged with the environment.
    pub fn load() -> StimflowResult<Self> {
        Self::load_from(None::<&Path>)
    }

    /// Defaults, then the TOML file at `path` (which must exist when given), then the environment.
    pub fn load_from(path: Option<impl AsRef<Path>>) -> StimflowResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            let path = path.as_ref();
            if !path.is_file() {
                return Err(StimflowError::config(format!(
                    "config file '{}' not found",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Defaults overlaid with TOML text. The environment is not consulted.
    pub fn from_toml_str(toml: &str) -> StimflowResult<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(toml)),
        )
    }

    /// Extract and validate from an arbitrary provider stack.
    pub fn from_figment(figment: Figment) -> StimflowResult<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| StimflowError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Range and consistency checks that serde cannot express.
    pub fn validate(&self) -> StimflowResult<()> {
        if self.compiler.max_nodes == 0 {
            return Err(StimflowError::config("compiler.max_nodes must be > 0"));
        }
        if self.compiler.targets.is_empty() {
            return Err(StimflowError::config(
                "compiler.targets must name at least one target",
            ));
        }
        let level = self.logging.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(StimflowError::config(format!(
                "logging.level '{}' must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
