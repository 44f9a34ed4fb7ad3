//! NoteStore — topic-indexed note storage
//!
//! The whole store lives in one pretty-printed JSON document. Every operation
//! re-reads the document under the store lock, and every mutation rewrites it
//! with an atomic replace, so concurrent handlers never observe or produce a
//! half-written file.

use crate::error::StoreError;
use crate::file_ops;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Link and summary fetched for a note at creation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrichment {
    pub link: String,
    /// May be empty when only the link could be resolved
    pub extract: String,
}

/// A persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// Informational label, "<topic> note <timestamp>"
    #[serde(default)]
    pub name: String,
    pub text: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_extract: Option<String>,
}

impl NoteRecord {
    pub fn new(topic: &str, text: &str, timestamp: &str, enrichment: Option<Enrichment>) -> Self {
        let (wikipedia_link, wikipedia_extract) = match enrichment {
            Some(e) if !e.link.is_empty() => {
                let extract = (!e.extract.is_empty()).then_some(e.extract);
                (Some(e.link), extract)
            }
            _ => (None, None),
        };

        Self {
            name: format!("{} note {}", topic, timestamp),
            text: text.to_string(),
            timestamp: timestamp.to_string(),
            wikipedia_link,
            wikipedia_extract,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRecord {
    pub name: String,
    #[serde(default)]
    pub notes: Vec<NoteRecord>,
}

/// The persisted document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub topics: Vec<TopicRecord>,
}

impl StoreDocument {
    fn parse(path: &Path, content: &str) -> Result<Self, StoreError> {
        let doc: StoreDocument =
            serde_json::from_str(content).map_err(|e| StoreError::corruption(path, e))?;

        let mut seen = HashSet::new();
        for topic in &doc.topics {
            if !seen.insert(topic.name.as_str()) {
                return Err(StoreError::corruption(
                    path,
                    format!("duplicate topic '{}'", topic.name),
                ));
            }
            if let Some(note) = topic
                .notes
                .iter()
                .find(|n| n.wikipedia_extract.is_some() && n.wikipedia_link.is_none())
            {
                return Err(StoreError::corruption(
                    path,
                    format!("note '{}' has an extract but no link", note.name),
                ));
            }
        }

        Ok(doc)
    }

    /// Find a topic by exact name, appending a new one if absent
    fn topic_mut(&mut self, name: &str) -> &mut TopicRecord {
        let idx = match self.topics.iter().position(|t| t.name == name) {
            Some(idx) => idx,
            None => {
                self.topics.push(TopicRecord {
                    name: name.to_string(),
                    notes: Vec::new(),
                });
                self.topics.len() - 1
            }
        };
        &mut self.topics[idx]
    }
}

/// Result of reading a topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteListing {
    /// Notes in append order; empty if the topic was never used
    Notes(Vec<NoteRecord>),
    /// The database file does not exist
    NoDatabase,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreSummary {
    pub topic_count: usize,
    pub note_count: usize,
}

pub struct NoteStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl NoteStore {
    /// Open the store at `path`, creating an empty database if none exists.
    /// An existing file must parse as a valid store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        match file_ops::read_document(&path).map_err(|e| StoreError::io(&path, e))? {
            Some(content) => {
                let doc = StoreDocument::parse(&path, &content)?;
                log::info!(
                    "[STORE] Loaded {} ({} topics)",
                    path.display(),
                    doc.topics.len()
                );
            }
            None => {
                write_document(&path, &StoreDocument::default())?;
                log::info!("[STORE] Initialized empty database at {}", path.display());
            }
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a note to `topic`, creating the topic if needed, and persist
    /// the store before returning a confirmation message.
    pub fn append_note(
        &self,
        topic: &str,
        text: &str,
        timestamp: &str,
        enrichment: Option<Enrichment>,
    ) -> Result<String, StoreError> {
        let _guard = self.guard();

        let mut doc = match self.load()? {
            Some(doc) => doc,
            None => {
                log::warn!(
                    "[STORE] {} disappeared, re-creating empty database",
                    self.path.display()
                );
                StoreDocument::default()
            }
        };

        let note = NoteRecord::new(topic, text, timestamp, enrichment);
        let link = note.wikipedia_link.clone();
        doc.topic_mut(topic).notes.push(note);

        write_document(&self.path, &doc)?;
        log::debug!("[STORE] Appended note to '{}'", topic);

        let mut message = format!("Note added under topic '{}'", topic);
        if let Some(link) = link {
            message.push_str(&format!(" with Wikipedia link: {}", link));
        }
        Ok(message)
    }

    /// All notes under `topic`, in the order they were added
    pub fn list_notes(&self, topic: &str) -> Result<NoteListing, StoreError> {
        let _guard = self.guard();

        let Some(doc) = self.load()? else {
            return Ok(NoteListing::NoDatabase);
        };

        let notes = doc
            .topics
            .into_iter()
            .find(|t| t.name == topic)
            .map(|t| t.notes)
            .unwrap_or_default();
        Ok(NoteListing::Notes(notes))
    }

    pub fn summary(&self) -> Result<StoreSummary, StoreError> {
        let _guard = self.guard();

        let doc = self.load()?.unwrap_or_default();
        Ok(StoreSummary {
            topic_count: doc.topics.len(),
            note_count: doc.topics.iter().map(|t| t.notes.len()).sum(),
        })
    }

    // The document on disk is only ever replaced atomically, so a panic while
    // holding the lock cannot leave it half-written.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Result<Option<StoreDocument>, StoreError> {
        let content =
            file_ops::read_document(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        content
            .map(|c| StoreDocument::parse(&self.path, &c))
            .transpose()
    }
}

fn write_document(path: &Path, doc: &StoreDocument) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(doc)?;
    file_ops::write_atomic(path, &json).map_err(|e| StoreError::io(path, e))
}
