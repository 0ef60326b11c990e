//! The vocabulary store: durable CRUD and queries over a single local
//! SQLite table.
//!
//! Public operations come in two layers. The `try_*` methods return
//! typed results (with rows affected where that is meaningful); the
//! plain methods are the boolean facade the shell consumes: they catch
//! every storage fault, log it with operation context and report
//! `false` or an empty list. No storage error crosses the facade.

use std::path::Path;

use rusqlite::{Connection, ErrorCode, Row, params};
use vocably_types::{EntryFields, VocabStats, VocabularyEntry};

use crate::db::{apply_schema, open_db, open_db_in_memory};
use crate::{StoreError, StoreResult};

const ENTRY_COLUMNS: &str = "id, word, definition, example, pronunciation, part_of_speech, \
     context_sentences, synonyms, antonyms, created_at, last_reviewed, review_count";

pub struct VocabularyStore {
    conn: Connection,
}

impl VocabularyStore {
    /// Opens (and if needed creates) the backing database file. The
    /// schema is applied before the store is returned.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// In-memory store, for tests.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Re-applies the schema. Idempotent and non-destructive; `open`
    /// already did this once.
    pub fn initialize(&self) -> bool {
        match apply_schema(&self.conn) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("initialize failed: {e}");
                false
            }
        }
    }

    pub fn try_add(&self, fields: &EntryFields) -> StoreResult<()> {
        let fields = fields.trimmed();
        if fields.word.is_empty() || fields.definition.is_empty() {
            return Err(StoreError::MissingRequiredField);
        }

        let result = self.conn.execute(
            "INSERT INTO vocabulary (word, definition, example, pronunciation, part_of_speech, \
                 context_sentences, synonyms, antonyms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                fields.word,
                fields.definition,
                fields.example,
                fields.pronunciation,
                fields.part_of_speech,
                fields.context_sentences,
                fields.synonyms,
                fields.antonyms,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_constraint_violation(&e) => Err(StoreError::DuplicateWord(fields.word)),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts a new entry. `word` and `definition` are required
    /// (trimmed non-empty); a duplicate word is rejected, not
    /// overwritten.
    pub fn add(&self, fields: &EntryFields) -> bool {
        match self.try_add(fields) {
            Ok(()) => {
                tracing::info!("added word: {}", fields.word.trim());
                true
            }
            Err(StoreError::DuplicateWord(word)) => {
                tracing::warn!("word `{word}` already exists");
                false
            }
            Err(e) => {
                tracing::error!("add `{}` failed: {e}", fields.word.trim());
                false
            }
        }
    }

    /// Overwrites every mutable field of the row matching `id`. Returns
    /// rows affected; zero is not an error.
    pub fn try_update(&self, id: i64, fields: &EntryFields) -> StoreResult<usize> {
        let fields = fields.trimmed();
        let changed = self.conn.execute(
            "UPDATE vocabulary
             SET word = ?1, definition = ?2, example = ?3, pronunciation = ?4, \
                 part_of_speech = ?5, context_sentences = ?6, synonyms = ?7, antonyms = ?8
             WHERE id = ?9",
            params![
                fields.word,
                fields.definition,
                fields.example,
                fields.pronunciation,
                fields.part_of_speech,
                fields.context_sentences,
                fields.synonyms,
                fields.antonyms,
                id,
            ],
        )?;
        Ok(changed)
    }

    pub fn update(&self, id: i64, fields: &EntryFields) -> bool {
        match self.try_update(id, fields) {
            Ok(_) => {
                tracing::info!("updated entry {id}");
                true
            }
            Err(e) => {
                tracing::error!("update entry {id} failed: {e}");
                false
            }
        }
    }

    /// Deletes the row matching `id`. Returns rows affected.
    pub fn try_delete(&self, id: i64) -> StoreResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM vocabulary WHERE id = ?1", params![id])?;
        Ok(changed)
    }

    pub fn delete(&self, id: i64) -> bool {
        match self.try_delete(id) {
            Ok(_) => {
                tracing::info!("deleted entry {id}");
                true
            }
            Err(e) => {
                tracing::error!("delete entry {id} failed: {e}");
                false
            }
        }
    }

    pub fn try_list_all(&self) -> StoreResult<Vec<VocabularyEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM vocabulary ORDER BY created_at DESC"
        ))?;
        let mut rows = stmt.query([])?;
        collect_entries(&mut rows)
    }

    /// All entries, newest first.
    pub fn list_all(&self) -> Vec<VocabularyEntry> {
        self.try_list_all().unwrap_or_else(|e| {
            tracing::error!("list_all failed: {e}");
            Vec::new()
        })
    }

    pub fn try_search(&self, term: &str) -> StoreResult<Vec<VocabularyEntry>> {
        let pattern = format!("%{}%", term.trim());
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM vocabulary
             WHERE word LIKE ?1 OR definition LIKE ?1 OR example LIKE ?1 \
                OR context_sentences LIKE ?1 OR synonyms LIKE ?1 OR antonyms LIKE ?1
             ORDER BY created_at DESC"
        ))?;
        let mut rows = stmt.query(params![pattern])?;
        collect_entries(&mut rows)
    }

    /// Case-insensitive substring match against word, definition,
    /// example, context sentences, synonyms and antonyms.
    pub fn search(&self, term: &str) -> Vec<VocabularyEntry> {
        self.try_search(term).unwrap_or_else(|e| {
            tracing::error!("search `{term}` failed: {e}");
            Vec::new()
        })
    }

    /// Stamps `last_reviewed` and bumps `review_count` in one
    /// statement. Returns rows affected.
    pub fn try_mark_reviewed(&self, id: i64) -> StoreResult<usize> {
        let changed = self.conn.execute(
            "UPDATE vocabulary
             SET last_reviewed = CURRENT_TIMESTAMP, review_count = review_count + 1
             WHERE id = ?1",
            params![id],
        )?;
        Ok(changed)
    }

    pub fn mark_reviewed(&self, id: i64) -> bool {
        match self.try_mark_reviewed(id) {
            Ok(_) => {
                tracing::info!("marked entry {id} reviewed");
                true
            }
            Err(e) => {
                tracing::error!("mark_reviewed {id} failed: {e}");
                false
            }
        }
    }

    pub fn try_stats(&self) -> StoreResult<VocabStats> {
        let total_words: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM vocabulary", [], |row| row.get(0))?;
        let reviewed_words: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM vocabulary WHERE last_reviewed IS NOT NULL",
            [],
            |row| row.get(0),
        )?;
        let today_words: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM vocabulary WHERE DATE(created_at) = DATE('now')",
            [],
            |row| row.get(0),
        )?;

        Ok(VocabStats {
            total_words,
            reviewed_words,
            unreviewed_words: total_words - reviewed_words,
            today_words,
        })
    }

    /// Aggregate counters; zeroed on storage fault.
    pub fn stats(&self) -> VocabStats {
        self.try_stats().unwrap_or_else(|e| {
            tracing::error!("stats failed: {e}");
            VocabStats::default()
        })
    }

    pub fn try_random_sample(&self, limit: usize) -> StoreResult<Vec<VocabularyEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM vocabulary ORDER BY RANDOM() LIMIT ?1"
        ))?;
        let mut rows = stmt.query(params![limit as i64])?;
        collect_entries(&mut rows)
    }

    /// A fresh uniformly random subset of at most `limit` entries.
    pub fn random_sample(&self, limit: usize) -> Vec<VocabularyEntry> {
        self.try_random_sample(limit).unwrap_or_else(|e| {
            tracing::error!("random_sample failed: {e}");
            Vec::new()
        })
    }
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation
    )
}

fn collect_entries(rows: &mut rusqlite::Rows<'_>) -> StoreResult<Vec<VocabularyEntry>> {
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(entry_from_row(row)?);
    }
    Ok(entries)
}

fn entry_from_row(row: &Row<'_>) -> Result<VocabularyEntry, rusqlite::Error> {
    // Evolved columns may hold NULL in rows written before the column
    // existed; read them as empty strings.
    Ok(VocabularyEntry {
        id: row.get(0)?,
        word: row.get(1)?,
        definition: row.get(2)?,
        example: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        pronunciation: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        part_of_speech: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        context_sentences: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        synonyms: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
        antonyms: row.get::<_, Option<String>>(8)?.unwrap_or_default(),
        created_at: row.get(9)?,
        last_reviewed: row.get(10)?,
        review_count: row.get(11)?,
    })
}
