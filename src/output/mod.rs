//! Filesystem side of the generator: safe path segments, the on-disk layout
//! and the write helper every stage persists through.

mod layout;

pub use layout::{DEFAULT_OUTPUT_DIR, OutputLayout};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turns an arbitrary title into a single path segment.
///
/// Reserved characters are removed, the result is trimmed and spaces become
/// underscores. Length is not capped and distinct titles may collide.
pub fn sanitize(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|ch| !RESERVED_CHARS.contains(ch))
        .collect();
    stripped.trim().replace(' ', "_")
}

/// Writes `content` to `dir/filename`, creating `dir` first. Existing files are
/// overwritten.
pub fn write_file(dir: impl AsRef<Path>, filename: &str, content: &str) -> io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, content.as_bytes())?;
    Ok(path)
}
