//! Executable line counting.
//!
//! A line counts when, trimmed, it is non-empty and does not start with any
//! of the configured single-line comment markers. Block comments and string
//! literals are not understood.

use std::path::Path;

use smallvec::SmallVec;

/// Set of single-line comment prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMarkers {
    markers: SmallVec<[String; 2]>,
}

impl CommentMarkers {
    /// Build a marker set. Empty markers are dropped since they would match every line.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty())
                .collect(),
        }
    }

    /// `//` and its `///` doc variant.
    pub fn slash() -> Self {
        Self::new(["///", "//"])
    }

    /// `#`, for shell, Python, TOML and similar.
    pub fn hash() -> Self {
        Self::new(["#"])
    }

    /// Whether a trimmed line begins with one of the markers.
    pub fn is_comment(&self, trimmed: &str) -> bool {
        self.iter().any(|m| trimmed.starts_with(m))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.markers.iter().map(String::as_str)
    }
}

impl Default for CommentMarkers {
    fn default() -> Self {
        Self::slash()
    }
}

/// Count executable lines in already-loaded text.
pub fn count_executable_lines_in(text: &str, markers: &CommentMarkers) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !markers.is_comment(line))
        .count()
}

/// Count executable lines in a file.
///
/// Invalid UTF-8 is replaced rather than rejected. Any read failure yields 0.
pub fn count_executable_lines(path: &Path, markers: &CommentMarkers) -> usize {
    match std::fs::read(path) {
        Ok(bytes) => count_executable_lines_in(&String::from_utf8_lossy(&bytes), markers),
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "unreadable file counted as 0 lines");
            0
        }
    }
}
