use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Vocabulary file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("Malformed vocabulary file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("Failed to encode vocabulary: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("There are no words with notes")]
    EmptyCollection,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
