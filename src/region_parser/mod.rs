//! Minimal reader for Anvil region files (`r.<x>.<z>.mca`).

pub mod chunk;
pub mod compression;
pub mod nbt;
pub mod region;

use thiserror::Error;

pub use chunk::Chunk;
pub use region::Region;

#[derive(Error, Debug)]
pub enum RegionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Region header is truncated ({0} bytes)")]
    TruncatedHeader(usize),

    #[error("Chunk {index} points outside of the region file")]
    ChunkOutOfBounds { index: usize },

    #[error("Unsupported chunk compression type {0}")]
    UnsupportedCompression(u8),

    #[error("Invalid chunk NBT: {0}")]
    Nbt(#[from] ::nbt::Error),
}
