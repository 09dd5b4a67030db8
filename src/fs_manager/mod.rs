//! Makes sure the files the binary relies on exist.

use std::io;
use std::path::Path;

use crate::consts;

pub mod utils;

/// Creates the default settings file at `path` if there is none yet. Returns whether it did.
pub fn init<P: AsRef<Path>>(path: P) -> io::Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }

    utils::create_file(path, &consts::file_contents::settings())?;
    Ok(true)
}
