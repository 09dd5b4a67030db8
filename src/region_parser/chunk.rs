use super::compression::{self, CompressionType};
use super::{nbt, RegionError};

/// A chunk as stored in a region file, still compressed.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Global chunk coordinates.
    pub x: i32,
    pub z: i32,
    /// Last modification time, in seconds since the epoch.
    pub timestamp: u32,
    /// The raw compression byte of the chunk header.
    pub compression: u8,
    pub data: Vec<u8>, // Compressed data
}

impl Chunk {
    pub fn new(x: i32, z: i32, compression: u8, data: Vec<u8>) -> Self {
        Self {
            x,
            z,
            timestamp: 0,
            compression,
            data,
        }
    }

    pub fn decompress(&self) -> Result<Vec<u8>, RegionError> {
        let compression = CompressionType::from_byte(self.compression)?;
        Ok(compression::decompress(&self.data, compression)?)
    }

    /// Decompresses and parses the chunk's NBT.
    pub fn nbt(&self) -> Result<nbt::Blob, RegionError> {
        let data = self.decompress()?;
        Ok(nbt::read_chunk_nbt(&data)?)
    }
}
