pub mod error;
pub mod export;
pub mod storage;
pub mod table;
pub mod vocabulary;
pub mod words;

pub use error::{StorageError, VocabError};
pub use storage::{JsonFileStorage, Storage};
pub use table::{Cell, CellKind, TableDataSource, TableLocation, TableSection};
pub use vocabulary::Vocabulary;
pub use words::{Section, Words};
