//! Summary counts over the curriculum tree.
//!
//! All functions here are folds over the leaf entries reachable from the
//! given units. They never fail and return zero for an empty tree.

use serde::Serialize;

use crate::models::{leaf_items, Difficulty, ItemKind, ItemStatus, Unit};

pub fn total_items(units: &[Unit]) -> usize {
    leaf_items(units).count()
}

pub fn count_by_kind(units: &[Unit], kind: ItemKind) -> usize {
    leaf_items(units).filter(|item| item.kind == kind).count()
}

pub fn count_by_status(units: &[Unit], status: ItemStatus) -> usize {
    leaf_items(units).filter(|item| item.status == status).count()
}

pub fn count_by_difficulty(units: &[Unit], difficulty: Difficulty) -> usize {
    leaf_items(units).filter(|item| item.difficulty == difficulty).count()
}

/// Totals shown on the admin dashboard cards, computed in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub total: usize,
    pub flashcards: usize,
    pub quizzes: usize,
    pub published: usize,
    pub drafts: usize,
    pub archived: usize,
    pub easy: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl ContentStats {
    pub fn collect(units: &[Unit]) -> Self {
        leaf_items(units).fold(Self::default(), |mut stats, item| {
            stats.total += 1;
            match item.kind {
                ItemKind::Flashcard => stats.flashcards += 1,
                ItemKind::Quiz => stats.quizzes += 1,
            }
            match item.status {
                ItemStatus::Published => stats.published += 1,
                ItemStatus::Draft => stats.drafts += 1,
                ItemStatus::Archived => stats.archived += 1,
            }
            match item.difficulty {
                Difficulty::Easy => stats.easy += 1,
                Difficulty::Intermediate => stats.intermediate += 1,
                Difficulty::Advanced => stats.advanced += 1,
            }
            stats
        })
    }

    pub fn kind(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Flashcard => self.flashcards,
            ItemKind::Quiz => self.quizzes,
        }
    }

    pub fn status(&self, status: ItemStatus) -> usize {
        match status {
            ItemStatus::Published => self.published,
            ItemStatus::Draft => self.drafts,
            ItemStatus::Archived => self.archived,
        }
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }

    /// Share of entries that are published, as a whole percentage.
    pub fn published_percent(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            self.published * 100 / self.total
        }
    }
}

/// Per-unit breakdown for the curriculum overview table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitSummary {
    pub unit_id: String,
    pub unit_name: String,
    pub topics: usize,
    pub subtopics: usize,
    pub stats: ContentStats,
}

pub fn unit_summaries(units: &[Unit]) -> Vec<UnitSummary> {
    units
        .iter()
        .map(|unit| UnitSummary {
            unit_id: unit.id.clone(),
            unit_name: unit.name.clone(),
            topics: unit.topics.len(),
            subtopics: unit.topics.iter().map(|t| t.subtopics.len()).sum(),
            stats: ContentStats::collect(std::slice::from_ref(unit)),
        })
        .collect()
}
