use std::io::Cursor;

pub use ::nbt::Blob;

/// Parses an uncompressed chunk payload.
pub fn read_chunk_nbt(data: &[u8]) -> ::nbt::Result<Blob> {
    Blob::from_reader(&mut Cursor::new(data))
}
