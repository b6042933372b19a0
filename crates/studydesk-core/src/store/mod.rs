//! Persistence for admin content edits.
//!
//! `JsonContentStore` keeps the whole content library as one JSON snapshot
//! with the time it was saved and the content file it was seeded from.
//! `seed_from_file` starts the store over when a different file is in use.
//! `execute` runs a `ContentCommand` against the stored library and writes
//! the result back. Nothing touches disk until the first save.

pub mod manager;

pub use manager::{execute, normalize_source, seed_from_file, ContentStore, JsonContentStore, Snapshot};
