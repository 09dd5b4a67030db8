//! Index of the region files of a world directory.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;
use thiserror::Error;

use crate::blocks::block_id::parse_or_zero;
use crate::consts::region::{REGION_BLOCKS, REGION_DIRECTORY};
use crate::region_parser::Region;
use crate::report::Reporter;

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Could not load region folder in {path}: {source}")]
    RegionDirectoryNotFound {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Region grid coordinates, as found in `r.<x>.<z>.mca`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RegionCoord {
    pub x: i32,
    pub z: i32,
}

impl RegionCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }
}

impl fmt::Display for RegionCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

pub type RegionMap = BTreeMap<RegionCoord, Region>;

/// Extent of a world, in blocks.
///
/// Region coordinates span the whole `i32` range, so the block extent needs 64 bits.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WorldSize {
    pub width: i64,
    pub height: i64,
}

/// Every region file of a world, keyed by its coordinates.
pub struct RegionFileWorld {
    root: PathBuf,
    regions: RegionMap,
}

impl RegionFileWorld {
    /// Loads every region file found in `<root>/region/`.
    ///
    /// Files whose name is not `<prefix>.<x>.<z>.<suffix>` are ignored, region files that fail
    /// to load are skipped with a warning.
    pub fn open<P: AsRef<Path>>(root: P, reporter: Arc<dyn Reporter>) -> Result<Self, WorldError> {
        let root = root.as_ref();
        let directory = root.join(REGION_DIRECTORY);

        let entries = fs::read_dir(&directory).map_err(|source| {
            reporter.fatal(&format!(
                "Could not load region folder in {}: {source}",
                directory.display()
            ));
            WorldError::RegionDirectoryNotFound {
                path: directory.clone(),
                source,
            }
        })?;

        let mut regions = RegionMap::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    reporter.warn(&format!(
                        "Could not read an entry of {}: {e}",
                        directory.display()
                    ));
                    continue;
                }
            };

            let file_name = entry.file_name();
            let Some(coord) = file_name.to_str().and_then(Self::parse_filename) else {
                continue;
            };

            match Region::load_from_file(entry.path(), coord.x, coord.z) {
                Ok(region) => {
                    regions.insert(coord, region);
                }
                Err(e) => reporter.warn(&format!(
                    "Skipping region {coord} from {}: {e}",
                    entry.path().display()
                )),
            }
        }

        debug!(
            "Loaded {} regions from {}",
            regions.len(),
            directory.display()
        );

        Ok(Self {
            root: root.to_path_buf(),
            regions,
        })
    }

    /// Extracts the coordinates of a region file name such as `r.1.-2.mca`.
    ///
    /// Only the dots matter: the name needs three of them, `x` sits between the first and the
    /// second and `z` between the second and the third. Numbers that do not parse are 0.
    pub fn parse_filename(name: &str) -> Option<RegionCoord> {
        let mut segments = name.split('.');
        let _prefix = segments.next()?;
        let x = segments.next()?;
        let z = segments.next()?;
        // The third dot.
        segments.next()?;

        Some(RegionCoord::new(parse_or_zero(x), parse_or_zero(z)))
    }

    /// Returns the world extent in blocks.
    ///
    /// This is `512 * (max + min)` on each axis, with min and max starting at 0. Note that it
    /// adds the extremes rather than subtracting them.
    pub fn size(&self) -> WorldSize {
        let (mut min_x, mut min_z, mut max_x, mut max_z) = (0, 0, 0, 0);
        for coord in self.regions.keys() {
            min_x = min_x.min(coord.x);
            min_z = min_z.min(coord.z);
            max_x = max_x.max(coord.x);
            max_z = max_z.max(coord.z);
        }

        let blocks = i64::from(REGION_BLOCKS);
        WorldSize {
            width: blocks * (i64::from(max_x) + i64::from(min_x)),
            height: blocks * (i64::from(max_z) + i64::from(min_z)),
        }
    }

    pub fn region_map(&self) -> &RegionMap {
        &self.regions
    }

    pub fn region(&self, coord: RegionCoord) -> Option<&Region> {
        self.regions.get(&coord)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region_parser::region::tests::region_bytes;
    use crate::report::testing::RecordingReporter;

    fn world_with(files: &[(&str, Vec<u8>)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let region_dir = dir.path().join(REGION_DIRECTORY);
        fs::create_dir(&region_dir).unwrap();
        for (name, content) in files {
            fs::write(region_dir.join(name), content).unwrap();
        }
        dir
    }

    fn world_of(coords: &[(i32, i32)]) -> RegionFileWorld {
        let regions = coords
            .iter()
            .map(|&(x, z)| (RegionCoord::new(x, z), Region::new(x, z)))
            .collect();
        RegionFileWorld {
            root: PathBuf::new(),
            regions,
        }
    }

    #[test]
    fn test_parse_filename() {
        assert_eq!(
            RegionFileWorld::parse_filename("r.3.-2.mca"),
            Some(RegionCoord::new(3, -2))
        );
        assert_eq!(
            RegionFileWorld::parse_filename("r.0.0.mca"),
            Some(RegionCoord::new(0, 0))
        );
        assert_eq!(RegionFileWorld::parse_filename("garbage"), None);
        assert_eq!(RegionFileWorld::parse_filename("r.1.mca"), None);
        assert_eq!(RegionFileWorld::parse_filename(".."), None);
    }

    #[test]
    fn test_parse_filename_only_counts_dots() {
        assert_eq!(
            RegionFileWorld::parse_filename("x.7.8.mcr"),
            Some(RegionCoord::new(7, 8))
        );
        assert_eq!(
            RegionFileWorld::parse_filename("r.a.b.mca"),
            Some(RegionCoord::new(0, 0))
        );
        assert_eq!(
            RegionFileWorld::parse_filename("r.1.2.mca.bak"),
            Some(RegionCoord::new(1, 2))
        );
        assert_eq!(
            RegionFileWorld::parse_filename("r.4.5."),
            Some(RegionCoord::new(4, 5))
        );
    }

    #[test]
    fn test_size_adds_extremes() {
        assert_eq!(
            world_of(&[(0, 0), (2, 3)]).size(),
            WorldSize {
                width: 1024,
                height: 1536,
            }
        );
        assert_eq!(world_of(&[(-1, 0), (1, 0)]).size().width, 0);
        assert_eq!(world_of(&[(-3, -1)]).size(), WorldSize {
            width: -1536,
            height: -512,
        });
        assert_eq!(world_of(&[]).size(), WorldSize::default());
    }

    #[test]
    fn test_size_of_distant_regions() {
        assert_eq!(
            world_of(&[(5_000_000, 0), (0, -4_200_000)]).size(),
            WorldSize {
                width: 2_560_000_000,
                height: -2_150_400_000,
            }
        );
        assert_eq!(
            world_of(&[(i32::MAX, i32::MIN)]).size(),
            WorldSize {
                width: 512 * i64::from(i32::MAX),
                height: 512 * i64::from(i32::MIN),
            }
        );
    }

    #[test]
    fn test_open_loads_matching_files() {
        let dir = world_with(&[
            ("r.0.0.mca", region_bytes(&[(1, 1, &b"chunk"[..])])),
            ("r.-1.2.mca", Vec::new()),
            ("level.dat", b"not a region".to_vec()),
            ("readme", b"hello".to_vec()),
        ]);
        let reporter = Arc::new(RecordingReporter::default());

        let world = RegionFileWorld::open(dir.path(), reporter.clone()).unwrap();

        assert_eq!(world.len(), 2);
        let keys: Vec<_> = world.region_map().keys().copied().collect();
        assert_eq!(keys, vec![RegionCoord::new(-1, 2), RegionCoord::new(0, 0)]);

        let region = world.region(RegionCoord::new(0, 0)).unwrap();
        assert_eq!(region.chunk_count(), 1);
        assert_eq!((region.x, region.z), (0, 0));
        assert_eq!(world.root(), dir.path());
        assert_eq!(reporter.warning_count(), 0);
    }

    #[test]
    fn test_open_skips_broken_region() {
        let dir = world_with(&[
            ("r.0.0.mca", vec![1, 2, 3]),
            ("r.1.0.mca", Vec::new()),
        ]);
        let reporter = Arc::new(RecordingReporter::default());

        let world = RegionFileWorld::open(dir.path(), reporter.clone()).unwrap();

        assert_eq!(world.len(), 1);
        assert!(world.region(RegionCoord::new(1, 0)).is_some());
        assert_eq!(reporter.warning_count(), 1);
    }

    #[test]
    fn test_open_without_region_directory() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Arc::new(RecordingReporter::default());

        let result = RegionFileWorld::open(dir.path(), reporter.clone());

        assert!(matches!(
            result,
            Err(WorldError::RegionDirectoryNotFound { .. })
        ));
        assert_eq!(reporter.fatal_count(), 1);
    }
}
