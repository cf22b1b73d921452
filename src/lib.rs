//! srcmap - Generate a markdown source map of a project.
//!
//! srcmap walks a project's source directory, counts executable lines in
//! each source file, attaches curated descriptions, and writes a single
//! markdown document with a box-drawing tree, totals and per-directory
//! file listings.
//!
//! # Quick Start
//!
//! ```no_run
//! use srcmap::builder::SourceMap;
//!
//! let result = SourceMap::new("./my-project").build().unwrap();
//! let summary = result.write().unwrap();
//!
//! println!("Wrote {}", summary.output.display());
//! println!("{} files, {} lines", summary.files, summary.lines);
//! ```
//!
//! # Modules
//!
//! - [`descriptions`] - Curated path descriptions
//! - [`counter`] - Executable line counting
//! - [`tree`] - Tree model and box-drawing rendering
//! - [`walker`] - Directory scan with exclusion rules
//! - [`output`] - Markdown document assembly
//! - [`report`] - Writing the document and the run summary
//! - [`config`] - Generator settings and `srcmap.toml`
//! - [`builder`] - Fluent API for a full run

pub mod descriptions;
pub mod counter;
pub mod errors;
pub mod tree;
pub mod walker;
pub mod config;
pub mod output;
pub mod report;
pub mod builder;

// Re-export key types at crate root for convenience
pub use builder::{SourceMap, SourceMapResult};
pub use config::{ConfigError, GeneratorConfig};
pub use counter::{count_executable_lines, CommentMarkers};
pub use descriptions::{DescriptionTable, NO_DESCRIPTION};
pub use errors::SrcmapError;
pub use output::{render_document, DocumentOptions, RenderedDocument};
pub use report::Summary;
pub use tree::{FileEntry, TreeNode};
pub use walker::{WalkError, WalkOptions};
