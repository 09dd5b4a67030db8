//! Block colors from a texture archive, and the region files of a world.
//!
//! [`BlockColors`] extracts one representative color per block texture and caches it on disk
//! keyed by the texture CRC. [`RegionFileWorld`] indexes the region files of a world directory by
//! their coordinates.

pub mod blocks;
pub mod config;
pub mod consts;
pub mod fs_manager;
pub mod logging;
pub mod region_parser;
pub mod report;
pub mod world;

pub use blocks::{BlockColors, BlockColorsError, BlockId, Hsv8, LoadSummary, Rgba8};
pub use report::{LogReporter, Reporter};
pub use world::{RegionCoord, RegionFileWorld, RegionMap, WorldError, WorldSize};
