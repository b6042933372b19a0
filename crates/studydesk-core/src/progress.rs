//! Student dashboard: subject progress and what to study next.
//!
//! Only published entries count. Drafts and archived entries are invisible
//! to students, so they neither add to totals nor show up as
//! recommendations.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{leaf_items, LeafItem, Subject};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitProgress {
    pub unit_id: String,
    pub unit_name: String,
    pub completed: usize,
    pub total: usize,
    pub percent: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectProgress {
    pub subject_id: String,
    pub subject_name: String,
    pub completed: usize,
    pub total: usize,
    pub percent: usize,
    pub units: Vec<UnitProgress>,
}

/// A subtopic with published entries the student has not finished yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub unit_name: String,
    pub topic_name: String,
    pub subtopic_id: String,
    pub subtopic_name: String,
    pub remaining: usize,
    /// First outstanding entry in the subtopic.
    pub next_item_id: String,
    pub next_item_title: String,
}

/// Whole-number percentage, rounded down. Zero when there is nothing to do.
fn percent(completed: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        completed * 100 / total
    }
}

/// (completed, total) over published entries.
fn tally<'a>(items: impl Iterator<Item = &'a LeafItem>, completed: &HashSet<String>) -> (usize, usize) {
    items
        .filter(|item| item.status.is_visible())
        .fold((0, 0), |(done, total), item| {
            (done + usize::from(completed.contains(&item.id)), total + 1)
        })
}

pub fn subject_progress(subject: &Subject, completed: &HashSet<String>) -> SubjectProgress {
    let units: Vec<UnitProgress> = subject
        .units
        .iter()
        .map(|unit| {
            let (done, total) = tally(leaf_items(std::slice::from_ref(unit)), completed);
            UnitProgress {
                unit_id: unit.id.clone(),
                unit_name: unit.name.clone(),
                completed: done,
                total,
                percent: percent(done, total),
            }
        })
        .collect();

    let done: usize = units.iter().map(|u| u.completed).sum();
    let total: usize = units.iter().map(|u| u.total).sum();

    SubjectProgress {
        subject_id: subject.id.clone(),
        subject_name: subject.name.clone(),
        completed: done,
        total,
        percent: percent(done, total),
        units,
    }
}

/// Up to `limit` subtopics with outstanding published entries, in
/// curriculum order.
pub fn recommendations(
    subject: &Subject,
    completed: &HashSet<String>,
    limit: usize,
) -> Vec<Recommendation> {
    let mut found = Vec::new();

    for unit in &subject.units {
        for topic in &unit.topics {
            for subtopic in &topic.subtopics {
                if found.len() >= limit {
                    return found;
                }
                let mut outstanding = subtopic
                    .items
                    .iter()
                    .filter(|item| item.status.is_visible() && !completed.contains(&item.id));
                let Some(next) = outstanding.next() else {
                    continue;
                };
                found.push(Recommendation {
                    unit_name: unit.name.clone(),
                    topic_name: topic.name.clone(),
                    subtopic_id: subtopic.id.clone(),
                    subtopic_name: subtopic.name.clone(),
                    remaining: 1 + outstanding.count(),
                    next_item_id: next.id.clone(),
                    next_item_title: next.title.clone(),
                });
            }
        }
    }

    found
}
