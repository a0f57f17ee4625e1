//! Project discovery and output paths.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use trellis_utils::{CONFIG_FILE, Config};

/// A trellis project: its root directory and configuration.
///
/// Outside a project the current directory is used with default settings.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Finds the project containing the current directory.
    ///
    /// # Errors
    /// Returns an error if the current directory is unavailable or a
    /// trellis.toml exists but cannot be parsed.
    pub fn discover() -> Result<Self> {
        let current_dir =
            std::env::current_dir().with_context(|| "Failed to get current directory")?;
        Self::discover_from(current_dir)
    }

    /// Finds the project containing `start`.
    ///
    /// # Errors
    /// Returns an error if a trellis.toml exists but cannot be parsed.
    pub fn discover_from(start: impl Into<PathBuf>) -> Result<Self> {
        let start = start.into();
        let mut dir = start.clone();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Config::load(&config_path)?;
                debug!(root = %dir.display(), "found project");
                return Ok(Self::new(dir, config));
            }
            if !dir.pop() {
                debug!("no trellis.toml found, using defaults");
                return Ok(Self::new(start, Config::default()));
            }
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Source document: the explicit path if given, else the configured one.
    #[must_use]
    pub fn source(&self, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => self.root.join(&self.config.project.source),
        }
    }

    #[must_use]
    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.project.out_dir)
    }

    /// Output file for the project with the given extension.
    #[must_use]
    pub fn output_path(&self, out_dir: &Path, extension: &str) -> PathBuf {
        out_dir.join(format!("{}.{extension}", self.config.project.name))
    }
}
