//! Read access to the zip archive holding the block textures.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;
use zip::result::ZipError;
use zip::ZipArchive;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Could not open archive: {0}")]
    Open(#[from] std::io::Error),

    #[error("Invalid archive: {0}")]
    Zip(#[from] ZipError),

    #[error("Failed to read entry '{name}': {source}")]
    ReadEntry {
        name: String,
        source: std::io::Error,
    },
}

/// Metadata of one file of the archive.
#[derive(Debug, Clone)]
pub struct TextureEntry {
    /// The file name, without any directory prefix.
    pub name: String,
    /// The CRC-32 stored in the archive for this entry.
    pub crc32: u32,
    /// The uncompressed size.
    pub size: u64,
}

pub struct TextureArchive {
    inner: ZipArchive<BufReader<File>>,
}

impl TextureArchive {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        let file = File::open(path)?;
        let inner = ZipArchive::new(BufReader::new(file))?;
        Ok(Self { inner })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Returns the metadata of entry `index`, or `None` when it is a directory.
    pub fn entry(&mut self, index: usize) -> Result<Option<TextureEntry>, ArchiveError> {
        let file = self.inner.by_index_raw(index)?;
        if file.is_dir() {
            return Ok(None);
        }

        let name = file_name(file.name()).to_string();
        Ok(Some(TextureEntry {
            name,
            crc32: file.crc32(),
            size: file.size(),
        }))
    }

    /// Decompresses entry `index` into memory.
    pub fn read(&mut self, index: usize) -> Result<Vec<u8>, ArchiveError> {
        let mut file = self.inner.by_index(index)?;
        let name = file.name().to_string();

        // The declared size is not trusted for the allocation.
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|source| ArchiveError::ReadEntry { name, source })?;
        Ok(content)
    }
}

/// Strips the directories of an archive path, zip paths always use `/`.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    use super::*;

    pub(crate) fn crc32(data: &[u8]) -> u32 {
        let mut crc = flate2::Crc::new();
        crc.update(data);
        crc.sum()
    }

    /// Writes a zip containing `entries` to `path`. Names ending with `/` are directories.
    pub(crate) fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        write_zip_with(path, entries, SimpleFileOptions::default());
    }

    /// Same as [`write_zip`] but without compression, so entry bytes appear as-is in the file.
    pub(crate) fn write_stored_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        write_zip_with(path, entries, options);
    }

    fn write_zip_with(path: &Path, entries: &[(&str, &[u8])], options: SimpleFileOptions) {
        let file = File::create(path).expect("Failed to create test zip");
        let mut writer = ZipWriter::new(file);

        for (name, content) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content).unwrap();
            }
        }
        writer.finish().expect("Failed to finish test zip");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("blocks/1-0.png"), "1-0.png");
        assert_eq!(file_name("1-0.png"), "1-0.png");
    }

    #[test]
    fn test_entries_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.zip");
        write_zip(
            &path,
            &[("textures/", &b""[..]), ("textures/3-1.png", &b"hello"[..])],
        );

        let mut archive = TextureArchive::open(&path).expect("Failed to open archive");
        assert_eq!(archive.len(), 2);
        assert!(archive.entry(0).unwrap().is_none());

        let entry = archive.entry(1).unwrap().expect("Expected a file entry");
        assert_eq!(entry.name, "3-1.png");
        assert_eq!(entry.size, 5);
        assert_eq!(entry.crc32, crc32(b"hello"));
        assert_eq!(archive.read(1).unwrap(), b"hello");
    }

    #[test]
    fn test_read_detects_bad_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blocks.zip");
        let payload = b"some texture content";
        write_stored_zip(&path, &[("5.png", &payload[..])]);

        let mut data = std::fs::read(&path).unwrap();
        let position = data
            .windows(payload.len())
            .position(|window| window == payload)
            .unwrap();
        data[position + 3] ^= 0x01;
        std::fs::write(&path, &data).unwrap();

        let mut archive = TextureArchive::open(&path).unwrap();
        assert_eq!(archive.entry(0).unwrap().unwrap().crc32, crc32(payload));
        assert!(matches!(
            archive.read(0),
            Err(ArchiveError::ReadEntry { .. })
        ));
    }

    #[test]
    fn test_open_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = TextureArchive::open(dir.path().join("missing.zip"));
        assert!(matches!(result, Err(ArchiveError::Open(_))));
    }
}
