//! Generator configuration.
//!
//! Defaults describe a Rust project: scan `src/`, count `.rs` files, write
//! `src/README.md`. A `srcmap.toml` at the project root can override any
//! field and add curated descriptions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::counter::CommentMarkers;
use crate::descriptions::DescriptionTable;
use crate::walker::WalkOptions;

/// Name of the optional config file looked up at the project root.
pub const CONFIG_FILE: &str = "srcmap.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Title prefix. Falls back to the project root's directory name.
    pub project_name: Option<String>,
    /// Scan root, relative to the project root.
    pub source_dir: PathBuf,
    /// Output filename, written inside the scan root.
    pub output_file: String,
    /// Entry file highlighted at the scan root.
    pub entry_point: String,
    /// Source file extension, without the dot.
    pub extension: String,
    /// Single-line comment prefixes.
    pub comment_markers: Vec<String>,
    /// Directory and file names skipped along with their subtrees.
    pub ignored_names: Vec<String>,
    /// Technology label shown in the overview.
    pub language: String,
    /// Generator name cited in the header and footer.
    pub generator: String,
    /// Also honour `.gitignore` files.
    pub respect_gitignore: bool,
    /// Extra descriptions, merged over the built-in table.
    pub descriptions: BTreeMap<String, String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_name: None,
            source_dir: PathBuf::from("src"),
            output_file: "README.md".to_string(),
            entry_point: "main.rs".to_string(),
            extension: "rs".to_string(),
            comment_markers: vec!["///".to_string(), "//".to_string()],
            ignored_names: vec![
                "target".to_string(),
                "node_modules".to_string(),
                "__pycache__".to_string(),
            ],
            language: "Rust".to_string(),
            generator: "srcmap".to_string(),
            respect_gitignore: false,
            descriptions: BTreeMap::new(),
        }
    }
}

impl GeneratorConfig {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate config from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `srcmap.toml` from the project root, or defaults if there is none.
    pub fn discover(project_root: &Path) -> Result<Self, ConfigError> {
        let path = project_root.join(CONFIG_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_file.is_empty() || self.output_file.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "output_file must be a bare file name, got {:?}",
                self.output_file
            )));
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(ConfigError::Invalid(format!(
                "extension must be non-empty and given without a dot, got {:?}",
                self.extension
            )));
        }
        if self.source_dir.is_absolute() {
            return Err(ConfigError::Invalid(
                "source_dir must be relative to the project root".to_string(),
            ));
        }
        Ok(())
    }

    /// Comment markers used by the line counter.
    pub fn markers(&self) -> CommentMarkers {
        CommentMarkers::new(self.comment_markers.iter().cloned())
    }

    /// Built-in descriptions with this config's entries layered on top.
    pub fn description_table(&self) -> DescriptionTable {
        let mut table = DescriptionTable::builtin();
        table.extend(self.descriptions.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        table
    }

    /// Walk options derived from this config.
    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            extension: self.extension.clone(),
            output_file: self.output_file.clone(),
            ignored_names: self.ignored_names.clone(),
            respect_gitignore: self.respect_gitignore,
            follow_symlinks: true,
            markers: self.markers(),
        }
    }

    /// Title prefix for a project rooted at `project_root`.
    pub fn project_name_for(&self, project_root: &Path) -> String {
        self.project_name.clone().unwrap_or_else(|| {
            project_root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Project".to_string())
        })
    }
}
