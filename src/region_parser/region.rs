use std::fs;
use std::path::Path;

use super::chunk::Chunk;
use super::RegionError;
use crate::consts::region::{CHUNKS_PER_REGION, HEADER_SIZE, REGION_CHUNKS, SECTOR_SIZE};

/// A region file: a 32x32 grid of chunks.
///
/// Layout: a 4 KiB table of chunk locations (3 byte sector offset + 1 byte sector count each),
/// a 4 KiB table of timestamps, then the chunks, each starting with its length (u32, big
/// endian, counting the compression byte) and its compression byte.
#[derive(Debug, Clone)]
pub struct Region {
    pub x: i32,
    pub z: i32,
    /// Indexed by `local_x + local_z * 32`.
    pub chunks: Vec<Option<Chunk>>,
}

impl Region {
    pub fn new(x: i32, z: i32) -> Self {
        Self {
            x,
            z,
            chunks: vec![None; CHUNKS_PER_REGION],
        }
    }

    /// Reads the region file at `path`, which sits at region coordinates `(x, z)`.
    pub fn load_from_file<P: AsRef<Path>>(path: P, x: i32, z: i32) -> Result<Self, RegionError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data, x, z)
    }

    /// Parses a region from the content of its file. An empty file is a region without chunks.
    pub fn from_bytes(data: &[u8], x: i32, z: i32) -> Result<Self, RegionError> {
        let mut region = Self::new(x, z);
        if data.is_empty() {
            return Ok(region);
        }

        if data.len() < HEADER_SIZE {
            return Err(RegionError::TruncatedHeader(data.len()));
        }

        for index in 0..CHUNKS_PER_REGION {
            let location = read_u32(data, index * 4);
            let sector_offset = (location >> 8) as usize;
            let sector_count = location & 0xFF;

            if sector_offset == 0 && sector_count == 0 {
                continue;
            }

            let start = sector_offset * SECTOR_SIZE;
            if start < HEADER_SIZE || start + 5 > data.len() {
                return Err(RegionError::ChunkOutOfBounds { index });
            }

            let length = read_u32(data, start) as usize;
            let payload_start = start + 5;
            let payload_end = (start + 4).saturating_add(length);
            if length == 0 || payload_end > data.len() {
                return Err(RegionError::ChunkOutOfBounds { index });
            }

            let local_x = (index % REGION_CHUNKS) as i32;
            let local_z = (index / REGION_CHUNKS) as i32;
            let mut chunk = Chunk::new(
                x * REGION_CHUNKS as i32 + local_x,
                z * REGION_CHUNKS as i32 + local_z,
                data[start + 4],
                data[payload_start..payload_end].to_vec(),
            );
            chunk.timestamp = read_u32(data, SECTOR_SIZE + index * 4);

            region.chunks[index] = Some(chunk);
        }

        Ok(region)
    }

    /// Returns the chunk at local coordinates `(local_x, local_z)`, both in `0..32`.
    pub fn chunk(&self, local_x: usize, local_z: usize) -> Option<&Chunk> {
        if local_x >= REGION_CHUNKS || local_z >= REGION_CHUNKS {
            return None;
        }
        self.chunks[local_x + local_z * REGION_CHUNKS].as_ref()
    }

    /// Number of chunks present in the file.
    pub fn chunk_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.is_some()).count()
    }
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
