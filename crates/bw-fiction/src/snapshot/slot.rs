use std::io;
use std::path::{Path, PathBuf};

/// The single persisted save slot.
///
/// Implementations move an opaque blob; decoding happens in the session.
pub trait SaveSlot {
    /// Overwrite the slot.
    fn write(&mut self, data: &str) -> io::Result<()>;

    /// Read the slot. `Ok(None)` means nothing has been saved yet.
    fn read(&self) -> io::Result<Option<String>>;
}

/// A slot that lives in memory. Used by default and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    data: Option<String>,
}

impl MemorySlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveSlot for MemorySlot {
    fn write(&mut self, data: &str) -> io::Result<()> {
        self.data = Some(data.to_string());
        Ok(())
    }

    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.data.clone())
    }
}

/// A slot backed by one file on disk.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Use the file at `path`. Nothing is touched until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveSlot for FileSlot {
    fn write(&mut self, data: &str) -> io::Result<()> {
        std::fs::write(&self.path, data)
    }

    fn read(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
