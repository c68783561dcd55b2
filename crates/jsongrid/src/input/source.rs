//! File-like data sources for asynchronous loading.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

/// Something with a known byte length that can be read to text asynchronously.
pub trait FileSource {
    /// Name used as the data set's source name.
    fn name(&self) -> &str;

    /// Size in bytes, known before reading.
    fn byte_len(&self) -> u64;

    /// Read the whole content as UTF-8 text.
    fn read_to_text(&self) -> impl Future<Output = io::Result<String>>;
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size_bytes: u64,
}

impl LocalFile {
    /// Stat the file so its size is known before it is read.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            name,
            size_bytes: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> u64 {
        self.size_bytes
    }

    async fn read_to_text(&self) -> io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }
}

/// An in-memory upload, e.g. a buffer handed over by a UI drop zone.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl FileSource for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn byte_len(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_to_text(&self) -> io::Result<String> {
        String::from_utf8(self.bytes.clone())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_file() {
        let file = MemoryFile::new("upload.json", "[{\"a\":1}]");
        assert_eq!(file.name(), "upload.json");
        assert_eq!(file.byte_len(), 9);
        assert_eq!(file.read_to_text().await.unwrap(), "[{\"a\":1}]");
    }

    #[tokio::test]
    async fn test_memory_file_invalid_utf8() {
        let file = MemoryFile::new("bad.json", vec![0xff, 0xfe]);
        let err = file.read_to_text().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
