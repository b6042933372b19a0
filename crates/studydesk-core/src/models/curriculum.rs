//! Curriculum hierarchy: Subject → Unit → Topic → Subtopic → LeafItem.
//!
//! Every level owns its children in insertion order. That order is
//! significant: it decides table row order and which row opens a merged
//! group cell.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a list that may be missing or `null` as an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// What kind of content a leaf entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Flashcard,
    Quiz,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::Flashcard, ItemKind::Quiz];

    pub fn display_name(&self) -> &'static str {
        match self {
            ItemKind::Flashcard => "Flashcard",
            ItemKind::Quiz => "Quiz",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Easy,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Publication state of a leaf entry in the admin back-office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Published,
    Draft,
    Archived,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 3] = [
        ItemStatus::Published,
        ItemStatus::Draft,
        ItemStatus::Archived,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ItemStatus::Published => "Published",
            ItemStatus::Draft => "Draft",
            ItemStatus::Archived => "Archived",
        }
    }

    /// Only published entries are visible to students.
    pub fn is_visible(&self) -> bool {
        matches!(self, ItemStatus::Published)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A terminal content entry: a flashcard or a quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    /// Answer or worked solution, if one has been written yet.
    #[serde(default)]
    pub answer: Option<String>,
    pub difficulty: Difficulty,
    pub status: ItemStatus,
}

impl LeafItem {
    pub fn new(
        id: impl Into<String>,
        kind: ItemKind,
        title: impl Into<String>,
        difficulty: Difficulty,
        status: ItemStatus,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            answer: None,
            difficulty,
            status,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }

    pub fn has_answer(&self) -> bool {
        self.answer.as_ref().map(|a| !a.trim().is_empty()).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub items: Vec<LeafItem>,
}

impl Subtopic {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<LeafItem>) -> Self {
        self.items = items;
        self
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    pub fn new(id: impl Into<String>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            difficulty,
            subtopics: Vec::new(),
        }
    }

    pub fn with_subtopics(mut self, subtopics: Vec<Subtopic>) -> Self {
        self.subtopics = subtopics;
        self
    }

    /// Number of leaf entries under every subtopic of this topic.
    pub fn item_count(&self) -> usize {
        self.subtopics.iter().map(Subtopic::item_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topics: Vec<Topic>,
}

impl Unit {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            topics: Vec::new(),
        }
    }

    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    pub fn item_count(&self) -> usize {
        self.topics.iter().map(Topic::item_count).sum()
    }
}

/// A subject managed from the admin back-office (e.g. "Mathematics").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub units: Vec<Unit>,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            units: Vec::new(),
        }
    }

    pub fn with_units(mut self, units: Vec<Unit>) -> Self {
        self.units = units;
        self
    }

    pub fn item_count(&self) -> usize {
        self.units.iter().map(Unit::item_count).sum()
    }

    /// Iterate every leaf entry in traversal order.
    pub fn items(&self) -> impl Iterator<Item = &LeafItem> {
        leaf_items(&self.units)
    }

    pub fn find_item(&self, item_id: &str) -> Option<&LeafItem> {
        self.items().find(|item| item.id == item_id)
    }
}

/// Iterate every leaf entry under `units` in nested traversal order.
pub fn leaf_items(units: &[Unit]) -> impl Iterator<Item = &LeafItem> {
    units
        .iter()
        .flat_map(|u| u.topics.iter())
        .flat_map(|t| t.subtopics.iter())
        .flat_map(|s| s.items.iter())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_child_lists_become_empty() {
        let json = r#"{
            "id": "u1",
            "name": "Algebra",
            "topics": [
                {"id": "t1", "name": "Equations", "difficulty": "Easy", "subtopics": null},
                {"id": "t2", "name": "Inequalities", "difficulty": "Advanced"}
            ]
        }"#;

        let unit: Unit = serde_json::from_str(json).expect("Failed to parse unit JSON");
        assert_eq!(unit.topics.len(), 2);
        assert!(unit.topics[0].subtopics.is_empty());
        assert!(unit.topics[1].subtopics.is_empty());
        assert_eq!(unit.item_count(), 0);
    }

    #[test]
    fn test_leaf_item_wire_format() {
        let json = r#"{
            "id": "q1",
            "kind": "quiz",
            "title": "Solve 2x + 3 = 7",
            "answer": "x = 2",
            "difficulty": "Intermediate",
            "status": "Draft"
        }"#;

        let item: LeafItem = serde_json::from_str(json).expect("Failed to parse item JSON");
        assert_eq!(item.kind, ItemKind::Quiz);
        assert_eq!(item.difficulty, Difficulty::Intermediate);
        assert_eq!(item.status, ItemStatus::Draft);
        assert!(item.has_answer());
    }

    #[test]
    fn test_has_answer_ignores_blank_text() {
        let item = LeafItem::new("f1", ItemKind::Flashcard, "Define a prime", Difficulty::Easy, ItemStatus::Published);
        assert!(!item.has_answer());
        assert!(!item.clone().with_answer("   ").has_answer());
        assert!(item.with_answer("A number with exactly two factors").has_answer());
    }

    #[test]
    fn test_item_counts_roll_up() {
        let subject = Subject::new("maths", "Mathematics").with_units(vec![
            Unit::new("u1", "Number").with_topics(vec![
                Topic::new("t1", "Fractions", Difficulty::Easy).with_subtopics(vec![
                    Subtopic::new("s1", "Adding").with_items(vec![
                        LeafItem::new("a", ItemKind::Quiz, "1/2 + 1/4", Difficulty::Easy, ItemStatus::Published),
                        LeafItem::new("b", ItemKind::Quiz, "1/3 + 1/6", Difficulty::Easy, ItemStatus::Published),
                    ]),
                    Subtopic::new("s2", "Empty"),
                ]),
            ]),
            Unit::new("u2", "Geometry"),
        ]);

        assert_eq!(subject.item_count(), 2);
        assert_eq!(subject.units[0].topics[0].item_count(), 2);
        assert_eq!(subject.units[1].item_count(), 0);
        assert_eq!(subject.find_item("b").map(|i| i.title.as_str()), Some("1/3 + 1/6"));
        assert!(subject.find_item("missing").is_none());
    }
}
