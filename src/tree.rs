//! Source tree representation and rendering.
//!
//! A [`TreeNode`] is one directory: the qualifying files it holds directly
//! and its child directories keyed by name. The tree is rendered as a
//! box-drawing diagram with directories listed before files.

use std::collections::BTreeMap;

/// One qualifying file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// File name (not full path).
    pub name: String,
    /// Curated description, or the sentinel placeholder.
    pub description: String,
    /// Executable line count.
    pub lines: usize,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>, lines: usize) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            lines,
        }
    }
}

/// One directory in the scanned tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    files: Vec<FileEntry>,
    dirs: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// Create an empty directory node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file directly under this directory.
    pub fn add_file(&mut self, entry: FileEntry) {
        self.files.push(entry);
    }

    /// Get the child directory `name`, creating it if missing.
    pub fn dir_mut(&mut self, name: &str) -> &mut TreeNode {
        self.dirs.entry(name.to_string()).or_default()
    }

    /// Files held directly by this directory.
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Child directories in name order.
    pub fn dirs(&self) -> impl Iterator<Item = (&str, &TreeNode)> {
        self.dirs.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// Look up a direct child directory.
    pub fn dir(&self, name: &str) -> Option<&TreeNode> {
        self.dirs.get(name)
    }

    /// Look up a file held directly by this directory.
    pub fn file(&self, name: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.name == name)
    }

    /// No files and no child directories.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }

    /// Sort files by name at every level. Directories are always ordered.
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| a.name.cmp(&b.name));
        for child in self.dirs.values_mut() {
            child.sort();
        }
    }

    /// Count files in this subtree.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.dirs.values().map(TreeNode::file_count).sum::<usize>()
    }

    /// Sum of line counts in this subtree.
    pub fn line_count(&self) -> usize {
        self.files.iter().map(|f| f.lines).sum::<usize>()
            + self.dirs.values().map(TreeNode::line_count).sum::<usize>()
    }
}

/// Box-drawing characters for tree rendering.
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "╰── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";

enum Item<'a> {
    Dir(&'a str, &'a TreeNode),
    File(&'a str),
}

/// Render a tree as box-drawing lines, without the root label.
///
/// Empty directories produce their own line but nothing beneath it.
///
/// # Examples
///
/// ```
/// use srcmap::tree::{FileEntry, TreeNode, render_tree_lines};
///
/// let mut root = TreeNode::new();
/// root.dir_mut("fs").add_file(FileEntry::new("dir.rs", "", 10));
/// root.add_file(FileEntry::new("main.rs", "", 5));
///
/// assert_eq!(
///     render_tree_lines(&root),
///     vec!["├── fs/", "│   ╰── dir.rs", "╰── main.rs"],
/// );
/// ```
pub fn render_tree_lines(root: &TreeNode) -> Vec<String> {
    let mut lines = Vec::new();
    render_node(&mut lines, root, "");
    lines
}

/// Render a tree under a root label such as `src/`, one line per entry.
pub fn render_tree(root: &TreeNode, label: &str) -> String {
    let mut output = String::with_capacity(1024);
    output.push_str(label);
    for line in render_tree_lines(root) {
        output.push('\n');
        output.push_str(&line);
    }
    output
}

fn render_node(lines: &mut Vec<String>, node: &TreeNode, prefix: &str) {
    let items: Vec<Item<'_>> = node
        .dirs()
        .map(|(name, child)| Item::Dir(name, child))
        .chain(node.files.iter().map(|f| Item::File(&f.name)))
        .collect();

    let count = items.len();
    for (i, item) in items.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let (branch, continuation) = if is_last {
            (LAST_BRANCH, SPACE)
        } else {
            (BRANCH, VERTICAL)
        };

        match item {
            Item::Dir(name, child) => {
                lines.push(format!("{prefix}{branch}{name}/"));
                render_node(lines, child, &format!("{prefix}{continuation}"));
            }
            Item::File(name) => lines.push(format!("{prefix}{branch}{name}")),
        }
    }
}

/// Format number with thousands separators.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
