use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Creates the file with `content` if it does not already exist.
pub fn create_file(path: &Path, content: &str) -> io::Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = non_empty_parent(path) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())
}

/// Replaces `path` with `content` without ever leaving a half written file behind.
///
/// The content goes to a temporary file next to `path` which is then renamed over it.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = non_empty_parent(path).unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|parent| !parent.as_os_str().is_empty())
}
