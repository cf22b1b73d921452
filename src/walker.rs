//! Recursive directory scan.
//!
//! Uses the `ignore` crate with its standard filters switched off, so the
//! only rules applied are ours: skip dot-names and the ignored-name set
//! (whole subtrees), keep files with the source extension or the output
//! file name. Listing and read failures degrade to empty results.
//!
//! With `respect_gitignore`, ignore files in parent directories apply too,
//! so a project-root `.gitignore` covers a `src/` scan root.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::counter::{count_executable_lines, CommentMarkers};
use crate::descriptions::DescriptionTable;
use crate::tree::{FileEntry, TreeNode};

/// Errors that can occur before a scan starts.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

/// Options for directory walking.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Extension of qualifying source files, without the dot.
    pub extension: String,
    /// File name that qualifies regardless of extension.
    pub output_file: String,
    /// Names skipped together with everything under them.
    pub ignored_names: Vec<String>,
    /// Also apply `.gitignore` rules.
    pub respect_gitignore: bool,
    /// Follow symbolic links.
    pub follow_symlinks: bool,
    /// Comment markers for line counting.
    pub markers: CommentMarkers,
}

impl Default for WalkOptions {
    fn default() -> Self {
        GeneratorConfig::default().walk_options()
    }
}

impl WalkOptions {
    /// Whether an entry with this name is skipped along with its subtree.
    pub fn is_excluded(&self, name: &str) -> bool {
        is_excluded(name, &self.ignored_names)
    }

    /// Whether a file with this name belongs in the tree.
    pub fn is_qualifying(&self, name: &str) -> bool {
        name == self.output_file
            || Path::new(name)
                .extension()
                .is_some_and(|ext| ext.to_string_lossy() == self.extension)
    }
}

fn is_excluded(name: &str, ignored: &[String]) -> bool {
    name.starts_with('.') || ignored.iter().any(|i| i == name)
}

/// Build the source tree under `root` with default options.
///
/// # Examples
///
/// ```no_run
/// use srcmap::descriptions::DescriptionTable;
/// use srcmap::walker::build_tree;
/// use std::path::Path;
///
/// let tree = build_tree(Path::new("./src"), &DescriptionTable::builtin()).unwrap();
/// println!("Files: {}", tree.file_count());
/// ```
pub fn build_tree(root: &Path, descriptions: &DescriptionTable) -> Result<TreeNode, WalkError> {
    build_tree_with_options(root, descriptions, &WalkOptions::default())
}

/// Build the source tree under `root` with custom options.
pub fn build_tree_with_options(
    root: &Path,
    descriptions: &DescriptionTable,
    options: &WalkOptions,
) -> Result<TreeNode, WalkError> {
    if !root.exists() {
        return Err(WalkError::NotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .parents(options.respect_gitignore)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .require_git(false)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name(|a, b| a.cmp(b));

    let ignored = options.ignored_names.clone();
    builder.filter_entry(move |entry| {
        entry.depth() == 0 || !is_excluded(&entry.file_name().to_string_lossy(), &ignored)
    });

    let mut tree = TreeNode::new();

    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let mut components: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let Some(name) = components.pop() else {
            continue;
        };

        let Some(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            node_at(&mut tree, &components).dir_mut(&name);
        } else if file_type.is_file() && options.is_qualifying(&name) {
            let lines = count_executable_lines(entry.path(), &options.markers);
            let description = descriptions.describe(root, entry.path());
            tracing::debug!(path = %relative.display(), lines, "counted file");
            node_at(&mut tree, &components).add_file(FileEntry::new(name, description, lines));
        }
    }

    tree.sort();
    Ok(tree)
}

fn node_at<'a>(root: &'a mut TreeNode, components: &[String]) -> &'a mut TreeNode {
    components.iter().fold(root, |node, name| node.dir_mut(name))
}
