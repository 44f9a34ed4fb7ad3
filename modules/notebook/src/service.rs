//! Notebook service facade.
//!
//! Validates requests, runs enrichment, and drives the note store. Store
//! I/O is blocking, so it runs on tokio's blocking pool.

use crate::error::NotebookError;
use crate::store::{NoteListing, NoteRecord, NoteStore};
use crate::wikipedia_client::Enricher;
use notebook_types::{AddNoteRequest, Note, NotesListing, ServiceStatus};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct NotebookService {
    store: Arc<NoteStore>,
    enricher: Arc<dyn Enricher>,
    start_time: Instant,
    notes_added: AtomicU64,
}

impl From<NoteRecord> for Note {
    fn from(record: NoteRecord) -> Self {
        Note {
            text: record.text,
            timestamp: record.timestamp,
            wikipedia_link: record.wikipedia_link.unwrap_or_default(),
            wikipedia_extract: record.wikipedia_extract.unwrap_or_default(),
        }
    }
}

/// Trimmed value of a required field
fn required(field: &str, value: &str) -> Result<String, NotebookError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(NotebookError::Validation(format!("{} is empty", field)));
    }
    Ok(value.to_string())
}

impl NotebookService {
    pub fn new(store: Arc<NoteStore>, enricher: Arc<dyn Enricher>) -> Self {
        Self {
            store,
            enricher,
            start_time: Instant::now(),
            notes_added: AtomicU64::new(0),
        }
    }

    /// Add a note, enriching it first when a search term is given.
    /// Returns the store's confirmation message.
    pub async fn add_note(&self, req: AddNoteRequest) -> Result<String, NotebookError> {
        let topic = required("topic", &req.topic)?;
        let text = required("text", &req.text)?;
        let timestamp = req.timestamp;

        let search_term = req.search_term.trim();
        let enrichment = if search_term.is_empty() {
            None
        } else {
            self.enricher.lookup(search_term).await
        };

        let store = Arc::clone(&self.store);
        let message = tokio::task::spawn_blocking(move || {
            store.append_note(&topic, &text, &timestamp, enrichment)
        })
        .await??;

        self.notes_added.fetch_add(1, Ordering::Relaxed);
        log::info!("[RPC] {}", message);
        Ok(message)
    }

    pub async fn get_notes(&self, topic: &str) -> Result<NotesListing, NotebookError> {
        let topic = required("topic", topic)?;

        let store = Arc::clone(&self.store);
        let listing = tokio::task::spawn_blocking(move || store.list_notes(&topic)).await??;

        Ok(match listing {
            NoteListing::Notes(records) => NotesListing::Notes {
                notes: records.into_iter().map(Note::from).collect(),
            },
            NoteListing::NoDatabase => NotesListing::no_database(),
        })
    }

    pub async fn status(&self) -> Result<ServiceStatus, NotebookError> {
        let store = Arc::clone(&self.store);
        let summary = tokio::task::spawn_blocking(move || store.summary()).await??;

        Ok(ServiceStatus {
            running: true,
            uptime_secs: self.start_time.elapsed().as_secs(),
            topic_count: summary.topic_count,
            note_count: summary.note_count,
            notes_added: self.notes_added.load(Ordering::Relaxed),
        })
    }
}
