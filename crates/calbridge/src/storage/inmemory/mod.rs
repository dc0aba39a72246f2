//! In-memory calendar backend.
//!
//! Stores calendars and their objects in BTreeMaps wrapped in
//! `Arc<RwLock<_>>`. Used for development and tests; nothing is persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use calbridge::storage::inmemory::InMemoryBackend;
//!
//! let backend = InMemoryBackend::new("local");
//! let birthdays = InMemoryBackend::new("contacts").read_only();
//! ```

mod backend;

pub use backend::InMemoryBackend;
