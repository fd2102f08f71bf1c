//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `mf-scaffold.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use mf_scaffold::generator::{GeneratorConfig, IndentStyle, LineEnding};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "mf-scaffold.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target project.
    pub project: ProjectConfig,

    /// Where the schema comes from.
    pub schema: SchemaConfig,

    /// Generation options.
    pub generation: GenerationConfig,
}

/// Target project configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project directory; `Models/` is created inside it.
    pub dir: PathBuf,

    /// Root namespace of the project. Generated types live in
    /// `<root_namespace>.Models`.
    pub root_namespace: String,
}

/// Schema source configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// JSON schema snapshot exported from the vault.
    pub snapshot: PathBuf,
}

/// Generation options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Split classes into generated and hand-editable partial files.
    pub partials: bool,

    /// Overwrite existing generated files.
    pub force: bool,

    /// Line endings of generated files.
    pub line_ending: LineEnding,

    /// Indentation of generated files.
    pub indent: IndentStyle,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            root_namespace: String::new(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("schema.json"),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            partials: false,
            force: false,
            line_ending: LineEnding::default(),
            indent: IndentStyle::default(),
        }
    }
}

impl Config {
    /// Generator options derived from this configuration.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_root_namespace(self.project.root_namespace.clone())
            .with_partials(self.generation.partials)
            .with_line_ending(self.generation.line_ending)
            .with_indent(self.generation.indent)
    }

    /// Snapshot path, relative paths taken from the project directory.
    pub fn snapshot_path(&self) -> PathBuf {
        if self.schema.snapshot.is_absolute() {
            self.schema.snapshot.clone()
        } else {
            self.project.dir.join(&self.schema.snapshot)
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// Without a path the default file in the working directory is tried;
    /// if it does not exist the defaults are used. An explicitly named
    /// file must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into());
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&config_path, &content)
    }

    /// Parse configuration text; `path` is only used in messages.
    pub fn parse(path: &Path, content: &str) -> CliResult<Config> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref dir) = args.project_dir {
            config.project.dir = dir.clone();
        }

        if let Some(ref namespace) = args.root_namespace {
            config.project.root_namespace = namespace.clone();
        }

        if let Some(ref snapshot) = args.snapshot {
            config.schema.snapshot = snapshot.clone();
        }

        if let Some(partials) = args.partials {
            config.generation.partials = partials;
        }

        if let Some(force) = args.force {
            config.generation.force = force;
        }

        if let Some(line_ending) = args.line_ending {
            config.generation.line_ending = line_ending;
        }

        if let Some(indent) = args.indent {
            config.generation.indent = indent;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# mf-scaffold configuration file

[project]
# Project directory; generated files go to <dir>/Models
dir = "."

# Root namespace of the project; types are generated into <root_namespace>.Models
root_namespace = ""

[schema]
# JSON schema snapshot exported from the vault (relative to the project directory)
snapshot = "schema.json"

[generation]
# Split each class into Models/<Class>.cs and a hand-editable Models/Partials/<Class>.cs
partials = false

# Overwrite existing generated files (partials are never overwritten)
force = false

# Line endings of generated files (lf, crlf)
line_ending = "crlf"

# Indentation of generated files (spaces2, spaces4, tabs)
indent = "spaces4"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Project directory override.
    pub project_dir: Option<PathBuf>,

    /// Root namespace override.
    pub root_namespace: Option<String>,

    /// Snapshot path override.
    pub snapshot: Option<PathBuf>,

    /// Partial splitting override.
    pub partials: Option<bool>,

    /// Overwrite override.
    pub force: Option<bool>,

    /// Line ending override.
    pub line_ending: Option<LineEnding>,

    /// Indentation override.
    pub indent: Option<IndentStyle>,
}
