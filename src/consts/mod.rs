//! This module is where we store constants, like default file paths or the layout of region
//! files.

/// Sizes of the region file format.
pub mod region {
    /// A region is a square of 32x32 chunks.
    pub const REGION_CHUNKS: usize = 32;
    pub const CHUNK_BLOCKS: usize = 16;
    /// Width of a region, in blocks.
    pub const REGION_BLOCKS: i32 = (REGION_CHUNKS * CHUNK_BLOCKS) as i32;
    pub const CHUNKS_PER_REGION: usize = REGION_CHUNKS * REGION_CHUNKS;

    pub const SECTOR_SIZE: usize = 4096;
    /// Location table + timestamp table.
    pub const HEADER_SIZE: usize = 2 * SECTOR_SIZE;

    /// Name of the directory holding the region files, inside a world directory.
    pub const REGION_DIRECTORY: &str = "region";
}

/// Logging messages.
pub mod messages {

    use colored::*;
    use once_cell::sync::Lazy;

    pub static STARTING: Lazy<String> = Lazy::new(|| {
        format!("Starting blockmap {}", env!("CARGO_PKG_VERSION"))
            .bold()
            .to_string()
    });

    pub static DONE: Lazy<String> = Lazy::new(|| "[ DONE ]".bright_green().bold().to_string());

    pub static FAILED: Lazy<String> =
        Lazy::new(|| "[ FAILED ]".bright_red().bold().to_string());

    /// Used when exiting with an exit code.
    pub fn shutdown_code(code: i32) -> String {
        format!("[ exited with code: {code} ]")
            .to_uppercase()
            .bright_red()
            .bold()
            .to_string()
    }
}

/// Default file paths, relative to the working directory.
pub mod file_paths {
    /// Settings file read by the binary.
    pub const SETTINGS: &str = "blockmap.properties";
    pub const TEXTURES_ARCHIVE: &str = "blocks.zip";
    pub const COLOR_CACHE: &str = "blockcolors.json";
    pub const WORLD_ROOT: &str = "world";
}

pub mod file_contents {
    use super::file_paths;

    /// Returns the default content of the settings file.
    pub fn settings() -> String {
        format!(
            "# blockmap settings\n\
             # {}\n\
             textures-archive={}\n\
             color-cache={}\n\
             world-root={}\n\
             extraction-policy=mode\n\
             color-tolerance=20\n\
             log-level=info\n",
            chrono::Local::now().format("%a %b %d %H:%M:%S %Y"),
            file_paths::TEXTURES_ARCHIVE,
            file_paths::COLOR_CACHE,
            file_paths::WORLD_ROOT,
        )
    }
}
