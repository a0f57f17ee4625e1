//! Configuration file handling for trellis projects.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use trellis_emit::EmitOptions;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "trellis.toml";

/// Represents the trellis.toml configuration file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub emit: EmitConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: String,
    /// Source document, relative to the directory holding trellis.toml.
    pub source: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "app".to_string(),
            source: PathBuf::from("app.kir.json"),
            out_dir: PathBuf::from("out"),
        }
    }
}

/// The `[emit]` section: defaults for every backend run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitConfig {
    pub comments: bool,
    pub indent: String,
    pub verbose: bool,
    /// Backends `trellis emit` runs when none is named.
    pub backends: Vec<String>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            comments: true,
            indent: "    ".to_string(),
            verbose: false,
            backends: vec!["tcltk".to_string()],
        }
    }
}

impl EmitConfig {
    #[must_use]
    pub fn to_options(&self) -> EmitOptions {
        EmitOptions::default()
            .with_comments(self.comments)
            .with_indent(self.indent.clone())
            .with_verbose(self.verbose)
    }
}

impl Config {
    /// Creates a new default configuration with the given project name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            project: ProjectConfig {
                source: PathBuf::from(format!("{name}.kir.json")),
                name,
                ..ProjectConfig::default()
            },
            emit: EmitConfig::default(),
        }
    }

    /// Loads configuration from a trellis.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a trellis.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }

    /// Finds trellis.toml starting from the current directory.
    ///
    /// # Errors
    /// Returns an error if no trellis.toml is found in the current or parent directories.
    pub fn find() -> Result<(Self, PathBuf)> {
        let current_dir =
            std::env::current_dir().with_context(|| "Failed to get current directory")?;
        Self::find_from(current_dir)
    }

    /// Finds trellis.toml starting from `start` and walking up.
    ///
    /// # Errors
    /// Returns an error if no trellis.toml is found in `start` or its ancestors.
    pub fn find_from(start: impl Into<PathBuf>) -> Result<(Self, PathBuf)> {
        let mut current_dir = start.into();

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load(&config_path)?;
                return Ok((config, current_dir));
            }

            if !current_dir.pop() {
                anyhow::bail!(
                    "Could not find {CONFIG_FILE} in current directory or any parent directory"
                );
            }
        }
    }
}
