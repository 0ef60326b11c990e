pub mod db;
pub mod store;

pub use store::VocabularyStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("word `{0}` already exists")]
    DuplicateWord(String),

    #[error("word and definition are required")]
    MissingRequiredField,

    #[error("could not create data directory: {0}")]
    DataDir(#[from] std::io::Error),
}
