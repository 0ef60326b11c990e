use serde::{Deserialize, Serialize};

/// One stored vocabulary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub id: i64,
    pub word: String,
    pub definition: String,
    pub example: String,
    pub pronunciation: String,
    pub part_of_speech: String,
    /// Example sentences, newline-joined.
    pub context_sentences: String,
    /// Comma-joined word list.
    pub synonyms: String,
    /// Comma-joined word list.
    pub antonyms: String,
    pub created_at: String,
    pub last_reviewed: Option<String>,
    pub review_count: i64,
}

/// Writable fields of an entry, as a single value instead of a
/// positional parameter list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryFields {
    pub word: String,
    pub definition: String,
    pub example: String,
    pub pronunciation: String,
    pub part_of_speech: String,
    pub context_sentences: String,
    pub synonyms: String,
    pub antonyms: String,
}

impl EntryFields {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
            ..Self::default()
        }
    }

    /// Copy with every field whitespace-trimmed. The store always trims
    /// before writing.
    pub fn trimmed(&self) -> Self {
        Self {
            word: self.word.trim().to_string(),
            definition: self.definition.trim().to_string(),
            example: self.example.trim().to_string(),
            pronunciation: self.pronunciation.trim().to_string(),
            part_of_speech: self.part_of_speech.trim().to_string(),
            context_sentences: self.context_sentences.trim().to_string(),
            synonyms: self.synonyms.trim().to_string(),
            antonyms: self.antonyms.trim().to_string(),
        }
    }
}

/// Aggregate counters shown on the stats panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabStats {
    pub total_words: i64,
    pub reviewed_words: i64,
    pub unreviewed_words: i64,
    pub today_words: i64,
}

/// Structured result of an AI word lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordInsight {
    pub meaning: String,
    pub word_type: String,
    pub pronunciation: String,
    pub context_sentences: Vec<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

impl WordInsight {
    /// Flatten into storable entry fields for the given word.
    pub fn into_fields(self, word: &str) -> EntryFields {
        EntryFields {
            word: word.to_string(),
            definition: self.meaning,
            example: String::new(),
            pronunciation: self.pronunciation,
            part_of_speech: self.word_type,
            context_sentences: self.context_sentences.join("\n"),
            synonyms: self.synonyms.join(", "),
            antonyms: self.antonyms.join(", "),
        }
    }
}

/// Store operation tag, used when reporting outcomes back to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Add,
    Update,
    Delete,
    MarkReviewed,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Window control, from IPC, signal or tray.
    ShowWindow,
    HideWindow,
    Quit,

    // UI -> app.
    AddEntry(EntryFields),
    UpdateEntry { id: i64, fields: EntryFields },
    DeleteEntry { id: i64 },
    MarkReviewed { id: i64 },
    RefreshList,
    Search(String),
    RequestStats,
    RequestReviewBatch { limit: usize },
    LookupWord(String),

    // App -> UI.
    EntryList(Vec<VocabularyEntry>),
    StatsUpdated(VocabStats),
    ReviewBatch(Vec<VocabularyEntry>),
    LookupFinished {
        word: String,
        insight: Option<WordInsight>,
    },
    OperationFinished {
        op: StoreOp,
        ok: bool,
    },
}
