//! Markdown assembly for the source map.
//!
//! Produces, in order: title, generated-file warning, overview totals, the
//! box-drawing project structure, the entry point and one nested section
//! per directory under "Modules", then a timestamped footer.

use std::fmt;

use chrono::{DateTime, Local};

use crate::descriptions::{DescriptionTable, NO_DESCRIPTION};
use crate::tree::{format_number, render_tree, TreeNode};

/// Unit label attached to per-file line counts.
pub const LOEC_LABEL: &str = "LoEC (Lines of Executable Code)";

/// Placeholder written under directories without qualifying files.
pub const EMPTY_DIR_PLACEHOLDER: &str = "*No files in this directory.*";

/// Timestamp format used in the footer.
pub const TIMESTAMP_FORMAT: &str = "%x %X";

/// Deepest markdown heading level.
const MAX_HEADING_LEVEL: usize = 6;

/// The highlighted root-level entry file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub name: String,
    pub lines: usize,
    pub description: String,
}

/// Options controlling document content.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Project name used in the title.
    pub project_name: String,
    /// Label for the tree root, e.g. `src`.
    pub root_label: String,
    /// Technology label in the overview.
    pub language: String,
    /// Generator named in the warning and footer.
    pub generator: String,
    /// Entry file, if it exists.
    pub entry_point: Option<EntryPoint>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            project_name: "Project".to_string(),
            root_label: "src".to_string(),
            language: "Rust".to_string(),
            generator: "srcmap".to_string(),
            entry_point: None,
        }
    }
}

/// A fully rendered document, one entry per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    lines: Vec<String>,
}

impl RenderedDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The document text, lines joined with `\n` and no trailing newline.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Assemble the complete document for `tree`.
pub fn render_document(
    tree: &TreeNode,
    descriptions: &DescriptionTable,
    options: &DocumentOptions,
    generated_at: &DateTime<Local>,
) -> RenderedDocument {
    let mut md: Vec<String> = Vec::with_capacity(256);

    md.push(format!("# {}: Source Map (Auto-Generated)", options.project_name));
    md.push(String::new());
    md.push("> [!WARNING]".to_string());
    md.push(format!(
        "> Do not edit manually. This file is generated by `{}`.",
        options.generator
    ));
    md.push(String::new());
    md.push("## Overview".to_string());
    md.push(String::new());
    md.push(format!("- **Total Files**: {}", tree.file_count()));
    md.push(format!("- **Total Lines**: {}", format_number(tree.line_count())));
    md.push(format!("- **Language**: {}", options.language));
    md.push(String::new());
    md.push("## Project Structure".to_string());
    md.push(String::new());
    md.push("```".to_string());
    let tree_block = render_tree(tree, &format!("{}/", options.root_label));
    md.extend(tree_block.lines().map(str::to_string));
    md.push("```".to_string());

    if let Some(entry) = &options.entry_point {
        write_section(&mut md, "## Entry Point");
        md.push(format_entry_point(entry));
    }

    write_section(&mut md, "## Modules");
    write_directory(&mut md, tree, descriptions, "", 0);

    md.push(String::new());
    md.push("---".to_string());
    md.push(String::new());
    md.push(format!(
        "*Generated by `{}` on {}*",
        options.generator,
        generated_at.format(TIMESTAMP_FORMAT)
    ));

    RenderedDocument { lines: md }
}

fn write_section(md: &mut Vec<String>, title: &str) {
    md.push(String::new());
    md.push(title.to_string());
    md.push(String::new());
}

fn format_entry_point(entry: &EntryPoint) -> String {
    format!(
        "- **[{name}]({name})** – `{} lines` – {}",
        entry.lines,
        entry.description,
        name = entry.name
    )
}

fn write_directory(
    md: &mut Vec<String>,
    node: &TreeNode,
    descriptions: &DescriptionTable,
    parent: &str,
    depth: usize,
) {
    for (name, child) in node.dirs() {
        let rel = join_rel(parent, name);

        let level = (3 + depth).min(MAX_HEADING_LEVEL);
        let mut heading = format!("{} {}/", "#".repeat(level), name);
        if let Some(desc) = descriptions.get(&rel).filter(|d| *d != NO_DESCRIPTION) {
            heading.push_str(" – ");
            heading.push_str(desc);
        }
        write_section(md, &heading);

        if child.files().is_empty() {
            md.push(EMPTY_DIR_PLACEHOLDER.to_string());
        } else {
            for file in child.files() {
                let mut line = format!(
                    "- **[{}]({})** – `{} {}`",
                    file.name,
                    join_rel(&rel, &file.name),
                    file.lines,
                    LOEC_LABEL
                );
                if file.description != NO_DESCRIPTION {
                    line.push_str(" – ");
                    line.push_str(&file.description);
                }
                md.push(line);
            }
        }

        write_directory(md, child, descriptions, &rel, depth + 1);
    }
}

fn join_rel(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
