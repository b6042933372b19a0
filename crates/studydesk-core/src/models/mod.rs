//! Data models for platform content.
//!
//! - `Subject`, `Unit`, `Topic`, `Subtopic`, `LeafItem`: the curriculum tree
//! - `FaqCategory`, `FaqItem`: help centre entries
//! - `Plan`, `BillingCycle`: pricing page plans
//! - `ContentLibrary`: the document tying them together

pub mod curriculum;
pub mod help;
pub mod library;
pub mod plan;

pub use curriculum::{
    leaf_items, Difficulty, ItemKind, ItemStatus, LeafItem, Subject, Subtopic, Topic, Unit,
};
pub use help::{FaqCategory, FaqItem};
pub use library::ContentLibrary;
pub use plan::{BillingCycle, Plan};
