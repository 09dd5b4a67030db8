use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;

use super::RegionError;

/// How a chunk payload is compressed, from the byte following the chunk length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    Gzip = 1,
    Zlib = 2,
    Uncompressed = 3,
}

impl CompressionType {
    pub fn from_byte(byte: u8) -> Result<Self, RegionError> {
        match byte {
            1 => Ok(CompressionType::Gzip),
            2 => Ok(CompressionType::Zlib),
            3 => Ok(CompressionType::Uncompressed),
            other => Err(RegionError::UnsupportedCompression(other)),
        }
    }
}

pub fn decompress(data: &[u8], compression: CompressionType) -> std::io::Result<Vec<u8>> {
    let mut decompressed = Vec::new();
    match compression {
        CompressionType::Gzip => {
            GzDecoder::new(data).read_to_end(&mut decompressed)?;
        }
        CompressionType::Zlib => {
            ZlibDecoder::new(data).read_to_end(&mut decompressed)?;
        }
        CompressionType::Uncompressed => decompressed.extend_from_slice(data),
    }
    Ok(decompressed)
}
