//! Settings read from a `key=value` properties file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{warn, LevelFilter};
use thiserror::Error;

use crate::blocks::extract::DEFAULT_TOLERANCE;
use crate::blocks::{ColorExtractor, ExtractionPolicy};
use crate::consts::file_paths;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value '{value}' for '{key}' on line {line}")]
    InvalidValue {
        key: String,
        value: String,
        line: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Zip archive holding one image per block, named `<id>-<meta>.png`.
    pub textures_archive: PathBuf,
    /// JSON file caching the extracted colors.
    pub color_cache: PathBuf,
    /// World directory, the one containing `region/`.
    pub world_root: PathBuf,
    pub extraction_policy: ExtractionPolicy,
    pub color_tolerance: u8,
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            textures_archive: PathBuf::from(file_paths::TEXTURES_ARCHIVE),
            color_cache: PathBuf::from(file_paths::COLOR_CACHE),
            world_root: PathBuf::from(file_paths::WORLD_ROOT),
            extraction_policy: ExtractionPolicy::default(),
            color_tolerance: DEFAULT_TOLERANCE,
            log_level: LevelFilter::Info,
        }
    }
}

impl Settings {
    /// Reads the settings file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses properties text. Keys that are missing keep their default value.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                warn!("Ignoring settings line {}: '{line}'", number + 1);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                line: number + 1,
            };

            match key {
                "textures-archive" => settings.textures_archive = PathBuf::from(value),
                "color-cache" => settings.color_cache = PathBuf::from(value),
                "world-root" => settings.world_root = PathBuf::from(value),
                "extraction-policy" => {
                    settings.extraction_policy = value.parse().map_err(|_| invalid())?
                }
                "color-tolerance" => {
                    settings.color_tolerance = value.parse().map_err(|_| invalid())?
                }
                "log-level" => {
                    settings.log_level = LevelFilter::from_str(value).map_err(|_| invalid())?
                }
                _ => warn!("Unknown setting '{key}'"),
            }
        }

        Ok(settings)
    }

    /// The extractor described by these settings.
    pub fn extractor(&self) -> ColorExtractor {
        ColorExtractor::new(self.extraction_policy).with_tolerance(self.color_tolerance)
    }
}
