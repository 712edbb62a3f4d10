use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::error::StorageError;
use crate::words::Words;

/// Identifies one version of the data file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub len: u64,
    pub modified: Option<SystemTime>,
}

/// Persistence backend for the vocabulary
pub trait Storage: Send {
    /// Load the saved vocabulary
    fn load(&self) -> Result<Words, StorageError>;

    /// Load the bundled dataset used when there is no usable saved vocabulary
    fn load_default(&self) -> Result<Words, StorageError>;

    /// Overwrite the saved vocabulary
    fn save(&self, words: &Words) -> Result<(), StorageError>;

    /// Fingerprint of the saved vocabulary, if there is one
    fn fingerprint(&self) -> Option<Fingerprint>;
}

/// Whole-file JSON storage.
///
/// The default dataset lives next to the data file as `default-<name>`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
    default_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "vocabulary.json".to_string());
        let default_path = path.with_file_name(format!("default-{file_name}"));

        Self { path, default_path }
    }

    pub fn with_default(mut self, default_path: impl Into<PathBuf>) -> Self {
        self.default_path = default_path.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Result<Words, StorageError> {
        read_words(&self.path)
    }

    fn load_default(&self) -> Result<Words, StorageError> {
        read_words(&self.default_path)
    }

    fn save(&self, words: &Words) -> Result<(), StorageError> {
        write_words(&self.path, words)
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        let metadata = fs::metadata(&self.path).ok()?;
        Some(Fingerprint {
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Read a vocabulary file in the `[notes, history]` format.
pub fn read_words(path: &Path) -> Result<Words, StorageError> {
    let data = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => StorageError::Missing(path.to_path_buf()),
        _ => StorageError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_str(&data).map_err(|source| StorageError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a vocabulary file, replacing whatever was there.
pub fn write_words(path: &Path, words: &Words) -> Result<(), StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    words.serialize(&mut serializer)?;

    fs::write(path, buf).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Saved {} words to {}", words.len(), path.display());
    Ok(())
}
