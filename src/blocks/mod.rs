//! Block colors extracted from a texture archive.
//!
//! [`BlockColors::load`] walks every texture of a zip archive, reuses the color stored in the
//! JSON cache when the texture's CRC did not change, and extracts it again otherwise. When
//! anything had to be recomputed the cache file is rewritten.

pub mod archive;
pub mod block_id;
pub mod cache;
pub mod color;
pub mod extract;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use thiserror::Error;

pub use archive::{ArchiveError, TextureArchive};
pub use block_id::BlockId;
pub use cache::{CacheError, ColorCache, ColorCacheEntry};
pub use color::{rgb_to_hsv, Hsv8, Rgba8};
pub use extract::{ColorExtractor, ExtractError, ExtractionPolicy};

use crate::report::Reporter;

#[derive(Error, Debug)]
pub enum BlockColorsError {
    #[error("Could not find items archive {path}: {source}")]
    ArchiveNotFound {
        path: PathBuf,
        source: ArchiveError,
    },

    #[error("Failed to read items archive {path}: {source}")]
    Archive {
        path: PathBuf,
        source: ArchiveError,
    },
}

/// What happened during a [`BlockColors::load`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LoadSummary {
    /// Number of texture entries found in the archive.
    pub entries: usize,
    /// Entries whose color came from the cache.
    pub cache_hits: usize,
    /// Entries whose color had to be extracted again.
    pub recomputed: usize,
    /// Entries skipped because an earlier entry already had the same block id.
    pub duplicates: usize,
    /// Whether the cache file was rewritten.
    pub cache_written: bool,
}

impl LoadSummary {
    /// True when at least one color was not found in the cache.
    pub fn is_dirty(&self) -> bool {
        self.recomputed > 0
    }
}

/// Representative colors of every block in a texture archive.
pub struct BlockColors {
    colors: BTreeMap<BlockId, ColorCacheEntry>,
    extractor: ColorExtractor,
    reporter: Arc<dyn Reporter>,
    archive_path: Option<PathBuf>,
    cache_path: Option<PathBuf>,
}

impl BlockColors {
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self {
            colors: BTreeMap::new(),
            extractor: ColorExtractor::default(),
            reporter,
            archive_path: None,
            cache_path: None,
        }
    }

    /// Uses `extractor` for the colors computed by the following loads.
    pub fn with_extractor(mut self, extractor: ColorExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Loads the colors of every texture in `archive_path`, using and refreshing the cache at
    /// `cache_path`.
    ///
    /// On error nothing changes: colors from a previous load stay available.
    pub fn load<A, C>(
        &mut self,
        archive_path: A,
        cache_path: C,
    ) -> Result<LoadSummary, BlockColorsError>
    where
        A: AsRef<Path>,
        C: AsRef<Path>,
    {
        let archive_path = archive_path.as_ref();
        let cache_path = cache_path.as_ref();

        let mut archive = TextureArchive::open(archive_path).map_err(|source| {
            self.reporter.fatal(&format!(
                "Could not find items archive {}: {source}",
                archive_path.display()
            ));
            BlockColorsError::ArchiveNotFound {
                path: archive_path.to_path_buf(),
                source,
            }
        })?;

        let cache = ColorCache::load(cache_path, self.reporter.as_ref());

        let (colors, mut summary) = self.read_archive(&mut archive, &cache).map_err(|source| {
            self.reporter.fatal(&format!(
                "Failed to read items archive {}: {source}",
                archive_path.display()
            ));
            BlockColorsError::Archive {
                path: archive_path.to_path_buf(),
                source,
            }
        })?;

        if summary.is_dirty() {
            match ColorCache::save(cache_path, &colors) {
                Ok(()) => summary.cache_written = true,
                Err(e) => self.reporter.warn(&format!(
                    "Could not save color cache {}: {e}",
                    cache_path.display()
                )),
            }
        }

        debug!(
            "Loaded {} block colors from {} ({} cached, {} recomputed)",
            colors.len(),
            archive_path.display(),
            summary.cache_hits,
            summary.recomputed
        );

        self.colors = colors;
        self.archive_path = Some(archive_path.to_path_buf());
        self.cache_path = Some(cache_path.to_path_buf());
        Ok(summary)
    }

    /// Resolves the color of every archive entry, from `cache` when its CRC still matches.
    ///
    /// When several entries map to the same block id the first one in the archive wins.
    fn read_archive(
        &self,
        archive: &mut TextureArchive,
        cache: &ColorCache,
    ) -> Result<(BTreeMap<BlockId, ColorCacheEntry>, LoadSummary), ArchiveError> {
        let mut colors = BTreeMap::new();
        let mut summary = LoadSummary::default();

        for index in 0..archive.len() {
            let Some(entry) = archive.entry(index)? else {
                continue;
            };
            summary.entries += 1;

            let id = BlockId::parse(&entry.name);
            if colors.contains_key(&id) {
                summary.duplicates += 1;
                self.reporter.warn(&format!(
                    "Skipping texture {} of entry {index}: block {id} is already defined",
                    entry.name
                ));
                continue;
            }

            let color = match cache.lookup(&id.to_string(), entry.crc32) {
                Some(color) => {
                    summary.cache_hits += 1;
                    color
                }
                None => {
                    summary.recomputed += 1;
                    let bytes = archive.read(index)?;
                    self.compute_color(&entry.name, &bytes)
                }
            };

            colors.insert(
                id,
                ColorCacheEntry {
                    color,
                    checksum: entry.crc32,
                },
            );
        }

        Ok((colors, summary))
    }

    fn compute_color(&self, name: &str, bytes: &[u8]) -> Rgba8 {
        match self.extractor.extract(bytes) {
            Ok(color) => color,
            Err(e) => {
                self.reporter
                    .warn(&format!("Texture {name} treated as transparent: {e}"));
                Rgba8::TRANSPARENT
            }
        }
    }

    /// Returns the color of a block, or [`Rgba8::TRANSPARENT`] if the block is unknown.
    pub fn get_block_color(&self, id: u32, meta: u32) -> Rgba8 {
        self.colors
            .get(&BlockId::new(id, meta))
            .map_or(Rgba8::TRANSPARENT, |entry| entry.color)
    }

    /// Converts a color to coarse HSV, see [`rgb_to_hsv`].
    pub fn rgb_to_hsv(rgb: Rgba8) -> Hsv8 {
        color::rgb_to_hsv(rgb)
    }

    pub fn is_loaded(&self) -> bool {
        self.archive_path.is_some()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Every known block with its color and checksum, in block order.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockId, &ColorCacheEntry)> {
        self.colors.iter()
    }

    pub fn archive_path(&self) -> Option<&Path> {
        self.archive_path.as_deref()
    }

    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }
}
