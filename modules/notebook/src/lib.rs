//! Notebook service — topic-indexed notes over JSON RPC.
//!
//! Notes are kept in a single JSON document guarded by one lock. Adding a note
//! with a search term first looks the term up on Wikipedia and attaches the
//! page link and introduction when found.

pub mod config;
pub mod error;
pub mod file_ops;
pub mod routes;
pub mod rpc_client;
pub mod service;
pub mod store;
pub mod wikipedia_client;

pub use error::{NotebookError, StoreError};
pub use service::NotebookService;
pub use store::NoteStore;
