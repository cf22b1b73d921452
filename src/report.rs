//! Persisting the document and reporting the run.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use console::style;
use serde::Serialize;

use crate::errors::SrcmapError;
use crate::output::{RenderedDocument, LOEC_LABEL};
use crate::tree::format_number;

/// Outcome of one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Where the document goes.
    pub output: PathBuf,
    /// Qualifying files in the tree.
    pub files: usize,
    /// Executable lines across those files.
    pub lines: usize,
    /// False for dry runs.
    pub written: bool,
}

/// Write the document to `path`, replacing whatever is there.
///
/// The document is complete before this is called, so the file is written
/// in a single call.
pub fn write_report(path: &Path, document: &RenderedDocument) -> Result<(), SrcmapError> {
    std::fs::write(path, document.text()).map_err(|source| SrcmapError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), lines = document.lines().len(), "wrote source map");
    Ok(())
}

/// Announce the target before a run.
pub fn write_progress<W: Write>(out: &mut W, output: &Path) -> io::Result<()> {
    writeln!(
        out,
        "  {} source map to {}",
        style("Generating").bold().cyan(),
        output.display()
    )
}

/// Print the two-line result summary.
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    let verb = if summary.written { "saved at" } else { "rendered for" };
    writeln!(
        out,
        "   {} source map {} {}",
        style("Generated").bold().green(),
        verb,
        summary.output.display()
    )?;
    writeln!(
        out,
        "       {} {} files, {} {}",
        style("Stats").bold().cyan(),
        summary.files,
        format_number(summary.lines),
        LOEC_LABEL
    )
}
