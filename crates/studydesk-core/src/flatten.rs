//! Row-span flattening of the curriculum tree.
//!
//! Admin tables show one row per leaf entry, with the Unit, Topic and
//! Subtopic labels in merged cells spanning every row beneath them. This
//! module turns the nested tree into that flat row sequence and works out,
//! ahead of rendering, which rows open a merged cell and how many rows the
//! cell spans.
//!
//! Groups with no leaf entries produce no rows, so they never open an
//! empty merged cell.

use std::iter::FusedIterator;

use crate::models::{LeafItem, Subtopic, Topic, Unit};

/// Index path of a row's leaf entry within the tree.
///
/// Ordering is lexicographic, which is also traversal order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowPosition {
    pub unit: usize,
    pub topic: usize,
    pub subtopic: usize,
    pub item: usize,
}

/// One table row: a leaf entry plus its merged-cell bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatRow<'a> {
    pub unit: &'a Unit,
    pub topic: &'a Topic,
    pub subtopic: &'a Subtopic,
    pub item: &'a LeafItem,
    pub position: RowPosition,
    pub is_first_row_of_unit: bool,
    pub is_first_row_of_topic: bool,
    pub is_first_row_of_subtopic: bool,
    pub unit_row_span: usize,
    pub topic_row_span: usize,
    pub subtopic_row_span: usize,
}

/// Lazy iterator over the flattened rows of a unit list.
///
/// Created by [`flatten`]. Holds no state beyond a cursor into the borrowed
/// tree, so cloning it or calling [`flatten`] again restarts the sequence.
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    units: &'a [Unit],
    cursor: RowPosition,
    last: Option<RowPosition>,
    /// Span of the unit at `.0`, computed once when the unit is entered.
    unit_span: Option<(usize, usize)>,
    /// Span of the topic at `(.0, .1)`.
    topic_span: Option<(usize, usize, usize)>,
}

/// Flatten `units` into table rows in nested traversal order.
pub fn flatten(units: &[Unit]) -> Flatten<'_> {
    Flatten {
        units,
        cursor: RowPosition::default(),
        last: None,
        unit_span: None,
        topic_span: None,
    }
}

impl<'a> Flatten<'a> {
    fn unit_span_for(&mut self, index: usize, unit: &Unit) -> usize {
        match self.unit_span {
            Some((cached, span)) if cached == index => span,
            _ => {
                let span = unit.item_count();
                self.unit_span = Some((index, span));
                span
            }
        }
    }

    fn topic_span_for(&mut self, unit_index: usize, topic_index: usize, topic: &Topic) -> usize {
        match self.topic_span {
            Some((u, t, span)) if u == unit_index && t == topic_index => span,
            _ => {
                let span = topic.item_count();
                self.topic_span = Some((unit_index, topic_index, span));
                span
            }
        }
    }

    fn next_unit(&mut self) {
        self.cursor = RowPosition {
            unit: self.cursor.unit + 1,
            ..RowPosition::default()
        };
    }

    fn next_topic(&mut self) {
        self.cursor.topic += 1;
        self.cursor.subtopic = 0;
        self.cursor.item = 0;
    }

    fn next_subtopic(&mut self) {
        self.cursor.subtopic += 1;
        self.cursor.item = 0;
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let units = self.units;
            let unit = units.get(self.cursor.unit)?;
            let Some(topic) = unit.topics.get(self.cursor.topic) else {
                self.next_unit();
                continue;
            };
            let Some(subtopic) = topic.subtopics.get(self.cursor.subtopic) else {
                self.next_topic();
                continue;
            };
            let Some(item) = subtopic.items.get(self.cursor.item) else {
                self.next_subtopic();
                continue;
            };

            let position = self.cursor;
            self.cursor.item += 1;

            // A row opens a group when the previous emitted row sat outside it.
            // Empty groups never emit, so they can never be "previous".
            let (first_unit, first_topic, first_subtopic) = match self.last {
                None => (true, true, true),
                Some(prev) => {
                    let unit_changed = prev.unit != position.unit;
                    let topic_changed = unit_changed || prev.topic != position.topic;
                    let subtopic_changed = topic_changed || prev.subtopic != position.subtopic;
                    (unit_changed, topic_changed, subtopic_changed)
                }
            };
            self.last = Some(position);

            let unit_row_span = self.unit_span_for(position.unit, unit);
            let topic_row_span = self.topic_span_for(position.unit, position.topic, topic);

            return Some(FlatRow {
                unit,
                topic,
                subtopic,
                item,
                position,
                is_first_row_of_unit: first_unit,
                is_first_row_of_topic: first_topic,
                is_first_row_of_subtopic: first_subtopic,
                unit_row_span,
                topic_row_span,
                subtopic_row_span: subtopic.item_count(),
            });
        }
    }
}

impl FusedIterator for Flatten<'_> {}
