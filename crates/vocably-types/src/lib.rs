pub mod types;

pub use types::{AppEvent, EntryFields, StoreOp, VocabStats, VocabularyEntry, WordInsight};
