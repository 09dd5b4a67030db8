//! The on-disk cache of block colors.
//!
//! The file is one JSON object keyed by the block id string, each value holding the archive CRC
//! the color was computed from and the color packed as RGBA8888:
//!
//! ```json
//! { "2-4": { "crc": 5234231, "color": 2489974272 } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use super::color::Rgba8;
use super::BlockId;
use crate::fs_manager::utils;
use crate::report::Reporter;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to serialize the color cache: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write the color cache: {0}")]
    Write(#[from] std::io::Error),
}

/// A block color together with the checksum of the texture it came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColorCacheEntry {
    pub color: Rgba8,
    pub checksum: u32,
}

/// How one entry is written to disk.
#[derive(Serialize)]
struct CacheRecord {
    crc: u32,
    color: u32,
}

/// Serializes the map in block id order instead of string order.
struct CacheFile<'a>(&'a BTreeMap<BlockId, ColorCacheEntry>);

impl Serialize for CacheFile<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, entry) in self.0 {
            let record = CacheRecord {
                crc: entry.checksum,
                color: entry.color.pack(),
            };
            map.serialize_entry(&id.to_string(), &record)?;
        }
        map.end()
    }
}

/// A parsed cache file. Lookups only succeed when the stored checksum still matches.
#[derive(Debug, Default)]
pub struct ColorCache {
    tree: Map<String, Value>,
}

impl ColorCache {
    /// Reads the cache at `path`. Anything wrong with the file yields an empty cache.
    pub fn load<P: AsRef<Path>>(path: P, reporter: &dyn Reporter) -> Self {
        let path = path.as_ref();

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                reporter.warn(&format!(
                    "Could not read color cache {}: {e}",
                    path.display()
                ));
                return Self::default();
            }
        };

        match Self::parse(&text) {
            Ok(cache) => cache,
            Err(reason) => {
                reporter.warn(&format!(
                    "Could not parse color cache {}: {reason}",
                    path.display()
                ));
                Self::default()
            }
        }
    }

    /// Parses cache text. Fails when it is not JSON or not a JSON object.
    pub fn parse(text: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(text).map_err(|e| e.to_string())? {
            Value::Object(tree) => Ok(Self { tree }),
            other => Err(format!("expected an object at the top level, found {other}")),
        }
    }

    /// Returns the cached color for `key`, but only if it was computed from `checksum`.
    pub fn lookup(&self, key: &str, checksum: u32) -> Option<Rgba8> {
        let record = self.tree.get(key)?.as_object()?;

        let crc = record.get("crc")?.as_u64()?;
        if crc != checksum as u64 {
            return None;
        }

        let color = record.get("color")?.as_u64()?;
        u32::try_from(color).ok().map(Rgba8::unpack)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Renders `colors` in the cache file format.
    pub fn serialize(colors: &BTreeMap<BlockId, ColorCacheEntry>) -> Result<String, CacheError> {
        Ok(serde_json::to_string_pretty(&CacheFile(colors))?)
    }

    /// Writes `colors` to `path`, replacing the previous cache atomically.
    pub fn save<P: AsRef<Path>>(
        path: P,
        colors: &BTreeMap<BlockId, ColorCacheEntry>,
    ) -> Result<(), CacheError> {
        let text = Self::serialize(colors)?;
        utils::write_atomic(path.as_ref(), text.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::testing::RecordingReporter;

    fn sample() -> BTreeMap<BlockId, ColorCacheEntry> {
        let mut colors = BTreeMap::new();
        colors.insert(
            BlockId::new(10, 0),
            ColorCacheEntry {
                color: Rgba8::opaque(1, 2, 3),
                checksum: 42,
            },
        );
        colors.insert(
            BlockId::new(2, 4),
            ColorCacheEntry {
                color: Rgba8::new(0x94, 0x6a, 0x33, 0x00),
                checksum: 5234231,
            },
        );
        colors
    }

    #[test]
    fn test_lookup_checks_crc() {
        let cache =
            ColorCache::parse(r#"{"2-4": {"crc": 5234231, "color": 2489974272}}"#).unwrap();

        assert_eq!(
            cache.lookup("2-4", 5234231),
            Some(Rgba8::unpack(2489974272))
        );
        assert_eq!(cache.lookup("2-4", 1), None);
        assert_eq!(cache.lookup("2-5", 5234231), None);
    }

    #[test]
    fn test_lookup_rejects_malformed_records() {
        let cache = ColorCache::parse(
            r#"{
                "1-0": 7,
                "2-0": {"crc": 1},
                "3-0": {"crc": 1, "color": -5},
                "4-0": {"crc": 1, "color": 99999999999},
                "5-0": {"crc": "1", "color": 3}
            }"#,
        )
        .unwrap();

        for key in ["1-0", "2-0", "3-0", "4-0", "5-0"] {
            assert_eq!(cache.lookup(key, 1), None, "key {key}");
        }
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(ColorCache::parse("[1, 2]").is_err());
        assert!(ColorCache::parse("{ not json").is_err());
    }

    #[test]
    fn test_serialize_is_in_block_order() {
        let text = ColorCache::serialize(&sample()).unwrap();

        let first = text.find("\"2-4\"").expect("2-4 missing");
        let second = text.find("\"10-0\"").expect("10-0 missing");
        assert!(first < second);
        assert!(!text.contains(",\n}"));

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["2-4"]["crc"], 5234231);
        assert_eq!(value["2-4"]["color"], 0x946a_3300u32);
        assert_eq!(value["10-0"]["color"], 0x0102_03ffu32);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("colors.json");
        let reporter = RecordingReporter::default();

        ColorCache::save(&path, &sample()).unwrap();
        let cache = ColorCache::load(&path, &reporter);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.lookup("10-0", 42), Some(Rgba8::opaque(1, 2, 3)));
        assert_eq!(reporter.warning_count(), 0);
    }

    #[test]
    fn test_load_is_soft() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = RecordingReporter::default();

        let missing = ColorCache::load(dir.path().join("missing.json"), &reporter);
        assert!(missing.is_empty());

        let garbage_path = dir.path().join("garbage.json");
        std::fs::write(&garbage_path, "{\"1-0\": ").unwrap();
        let garbage = ColorCache::load(&garbage_path, &reporter);
        assert!(garbage.is_empty());

        assert_eq!(reporter.warning_count(), 2);
        assert_eq!(reporter.fatal_count(), 0);
    }
}
