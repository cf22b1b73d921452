//! Fluent builder API for srcmap.
//!
//! Ties the pipeline together: scan the source directory, assemble the
//! document in memory, then write it in one go.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::GeneratorConfig;
use crate::counter::count_executable_lines;
use crate::descriptions::DescriptionTable;
use crate::errors::SrcmapError;
use crate::output::{render_document, DocumentOptions, EntryPoint, RenderedDocument};
use crate::report::{write_report, Summary};
use crate::tree::TreeNode;
use crate::walker::build_tree_with_options;

/// The project this binary was built from, used when no root is given.
pub fn default_project_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Builder for a source map run.
///
/// # Examples
///
/// ```no_run
/// use srcmap::builder::SourceMap;
///
/// let result = SourceMap::new("./my-project").build().unwrap();
/// result.write().unwrap();
/// println!("{} files, {} lines", result.total_files(), result.total_lines());
/// ```
pub struct SourceMap {
    project_root: PathBuf,
    config: GeneratorConfig,
    generated_at: Option<DateTime<Local>>,
}

impl SourceMap {
    /// Create a new builder for the given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config: GeneratorConfig::default(),
            generated_at: None,
        }
    }

    /// Use this configuration instead of the defaults.
    pub fn config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the footer timestamp.
    pub fn generated_at(mut self, at: DateTime<Local>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Directory that gets scanned.
    pub fn scan_root(&self) -> PathBuf {
        self.project_root.join(&self.config.source_dir)
    }

    /// Where the document is written.
    pub fn output_path(&self) -> PathBuf {
        self.scan_root().join(&self.config.output_file)
    }

    /// Scan and render. Nothing is written yet.
    pub fn build(self) -> Result<SourceMapResult, SrcmapError> {
        let scan_root = self.scan_root();
        let output_path = self.output_path();
        let descriptions = self.config.description_table();

        tracing::info!(root = %scan_root.display(), "scanning source tree");
        let tree = build_tree_with_options(&scan_root, &descriptions, &self.config.walk_options())?;

        let options = DocumentOptions {
            project_name: self.config.project_name_for(&self.project_root),
            root_label: root_label(&self.config.source_dir),
            language: self.config.language.clone(),
            generator: self.config.generator.clone(),
            entry_point: self.entry_point(&scan_root, &descriptions),
        };

        let generated_at = self.generated_at.unwrap_or_else(Local::now);
        let document = render_document(&tree, &descriptions, &options, &generated_at);

        Ok(SourceMapResult {
            tree,
            document,
            output_path,
        })
    }

    fn entry_point(&self, scan_root: &Path, descriptions: &DescriptionTable) -> Option<EntryPoint> {
        let path = scan_root.join(&self.config.entry_point);
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no entry point");
            return None;
        }
        Some(EntryPoint {
            name: self.config.entry_point.clone(),
            lines: count_executable_lines(&path, &self.config.markers()),
            description: descriptions.describe(scan_root, &path).to_string(),
        })
    }
}

fn root_label(source_dir: &Path) -> String {
    let parts: Vec<_> = source_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    parts.join("/")
}

/// Result of a source map run.
#[derive(Debug)]
pub struct SourceMapResult {
    /// Scanned source tree.
    pub tree: TreeNode,
    /// Rendered document.
    pub document: RenderedDocument,
    /// Destination of [`SourceMapResult::write`].
    pub output_path: PathBuf,
}

impl SourceMapResult {
    pub fn total_files(&self) -> usize {
        self.tree.file_count()
    }

    pub fn total_lines(&self) -> usize {
        self.tree.line_count()
    }

    /// Summary of this run.
    pub fn summary(&self, written: bool) -> Summary {
        Summary {
            output: self.output_path.clone(),
            files: self.total_files(),
            lines: self.total_lines(),
            written,
        }
    }

    /// Write the document, overwriting any previous one.
    pub fn write(&self) -> Result<Summary, SrcmapError> {
        write_report(&self.output_path, &self.document)?;
        Ok(self.summary(true))
    }
}

/// Build a source tree from a path with default options and built-in descriptions.
pub fn tree_from_path(root: impl AsRef<Path>) -> Result<TreeNode, SrcmapError> {
    let config = GeneratorConfig::default();
    let tree = build_tree_with_options(
        root.as_ref(),
        &config.description_table(),
        &config.walk_options(),
    )?;
    Ok(tree)
}
