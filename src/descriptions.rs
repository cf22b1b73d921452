//! Curated one-line descriptions for files and directories.
//!
//! Keys are paths relative to the scan root, in forward-slash form with no
//! leading slash. The table is built once and only read afterwards.

use std::collections::BTreeMap;
use std::path::Path;

/// Placeholder returned when a path has no curated description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Descriptions for srcmap's own `src/` tree.
const BUILTIN: &[(&str, &str)] = &[
    ("lib.rs", "Library root; module declarations and re-exports."),
    ("main.rs", "Application entry point."),
    ("bin", "Executable targets."),
    ("bin/srcmap.rs", "CLI entry point; argument parsing, logging setup and the generate command."),
    ("builder.rs", "Fluent `SourceMap` API that runs scan, render and write."),
    ("config.rs", "Generator configuration and `srcmap.toml` loading."),
    ("counter.rs", "Executable line counting with a pluggable comment-marker set."),
    ("descriptions.rs", "Curated path-to-description table and lookup."),
    ("errors.rs", "Top-level error type and process exit codes."),
    ("output.rs", "Markdown assembly: overview, tree block, entry point and module sections."),
    ("report.rs", "Writes the rendered document and prints the run summary."),
    ("tree.rs", "Directory/file tree model, totals and box-drawing rendering."),
    ("walker.rs", "Recursive directory scan with name-based exclusion."),
];

/// Read-only mapping from relative path to description.
#[derive(Debug, Clone, Default)]
pub struct DescriptionTable {
    entries: BTreeMap<String, String>,
}

impl DescriptionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in curated table.
    pub fn builtin() -> Self {
        BUILTIN.iter().copied().collect()
    }

    /// Add or replace entries, normalizing keys to forward-slash form.
    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.entries.insert(normalize_key(key.as_ref()), value.into());
        }
    }

    /// Look up a description by relative key.
    pub fn get(&self, relative: &str) -> Option<&str> {
        self.entries.get(relative).map(String::as_str)
    }

    /// Describe `path`, which lives under `root`.
    ///
    /// Returns [`NO_DESCRIPTION`] for anything not in the table, including
    /// paths outside `root`.
    pub fn describe(&self, root: &Path, path: &Path) -> &str {
        relative_key(root, path)
            .and_then(|key| self.get(&key))
            .unwrap_or(NO_DESCRIPTION)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for DescriptionTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

/// Path of `path` relative to `root`, as a forward-slash key.
pub fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}

fn normalize_key(key: &str) -> String {
    key.replace('\\', "/").trim_matches('/').to_string()
}
