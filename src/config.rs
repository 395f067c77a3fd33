//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/svgtree/svgtree.toml`
//! 3. Local config: `<dir>/.svgtree.toml` (usually the working directory)
//! 4. Environment variables: `SVGTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::RenderStyle;

/// External converter invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Converter program, called as `<program> [args...] <source> <destination>`
    pub program: String,
    /// Extra arguments placed before source and destination
    pub args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: "svg_handler_cli".into(),
            args: vec![],
        }
    }
}

/// Upper bound for `render.indent`.
pub const MAX_INDENT: usize = 16;

/// Tree printing options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Colorize tags and attributes
    pub color: bool,
    /// Spaces per depth level
    pub indent: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: true,
            indent: 2,
        }
    }
}

impl RenderConfig {
    pub fn style(&self) -> RenderStyle {
        RenderStyle {
            color: self.color,
            indent: self.indent,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub engine: RawEngineConfig,
    pub render: RawRenderConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawEngineConfig {
    pub program: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub color: Option<bool>,
    pub indent: Option<usize>,
}

/// Unified configuration for svgtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    pub render: RenderConfig,
}

/// Get the XDG config directory for svgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "svgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("svgtree.toml"))
}

/// Get the path to the local config file in `dir`.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".svgtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in the engine program path.
    fn expand_paths(&mut self) {
        self.engine.program = shellexpand::full(&self.engine.program)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| self.engine.program.clone());
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            engine: EngineConfig {
                program: overlay
                    .engine
                    .program
                    .clone()
                    .unwrap_or_else(|| self.engine.program.clone()),
                args: overlay
                    .engine
                    .args
                    .clone()
                    .unwrap_or_else(|| self.engine.args.clone()),
            },
            render: RenderConfig {
                color: overlay.render.color.unwrap_or(self.render.color),
                indent: overlay.render.indent.unwrap_or(self.render.indent),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.svgtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    /// Reject values the renderer cannot use.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.render.indent > MAX_INDENT {
            return Err(ApplicationError::Config {
                message: format!(
                    "render.indent must be at most {}: {}",
                    MAX_INDENT, self.render.indent
                ),
            });
        }
        Ok(())
    }

    /// Apply SVGTREE_* environment variables as explicit overrides,
    /// e.g. `SVGTREE_ENGINE__PROGRAM`, `SVGTREE_RENDER__COLOR`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SVGTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("engine.args")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("engine.program") {
            settings.engine.program = val;
        }
        if let Ok(val) = config.get::<Vec<String>>("engine.args") {
            settings.engine.args = val;
        }
        if let Ok(val) = config.get_bool("render.color") {
            settings.render.color = val;
        }
        if let Ok(val) = config.get_int("render.indent") {
            settings.render.indent = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("render.indent out of range: {}", val),
            })?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# svgtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/svgtree/svgtree.toml
#   Local:  ./.svgtree.toml
#   Env:    SVGTREE_* environment variables (e.g. SVGTREE_ENGINE__PROGRAM)

[engine]
# Converter producing the row table: <program> [args...] <source> <destination>
# program = "svg_handler_cli"
# args = []

[render]
# Colorize tags and attributes (NO_COLOR is honoured as well)
# color = true

# Spaces per depth level (at most 16)
# indent = 2
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
