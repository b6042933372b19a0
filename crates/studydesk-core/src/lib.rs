//! Core library for studydesk.
//!
//! Data layer behind the education platform's admin tables, student
//! dashboard, help centre and pricing page:
//!
//! - `models`: the Subject → Unit → Topic → Subtopic → LeafItem tree and
//!   other static content
//! - `flatten`: row-span flattening of the tree for merged-cell tables
//! - `stats`: count reducers over the tree
//! - `search`: help centre FAQ filtering
//! - `commands` / `store`: admin edits as commands over immutable snapshots
//! - `progress` / `pricing`: student dashboard and pricing page figures

pub mod commands;
pub mod config;
pub mod flatten;
pub mod models;
pub mod pricing;
pub mod progress;
pub mod search;
pub mod stats;
pub mod store;
pub mod utils;

pub use commands::{apply_command, CommandError, ContentCommand};
pub use config::Config;
pub use flatten::{flatten, FlatRow, Flatten, RowPosition};
pub use search::filter_faq;
pub use stats::{ContentStats, UnitSummary};
pub use store::{ContentStore, JsonContentStore, Snapshot};
