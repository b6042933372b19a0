use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CommandError;
use crate::models::{ItemStatus, LeafItem, Subject, Subtopic, Topic};

/// An edit issued from the admin back-office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ContentCommand {
    /// Append a new entry to the end of a subtopic.
    AddItem { subtopic_id: String, item: LeafItem },
    /// Replace the entry with the same id, keeping its position.
    UpdateItem { item: LeafItem },
    SetItemStatus { item_id: String, status: ItemStatus },
    DeleteItem { item_id: String },
    DeleteSubtopic { subtopic_id: String },
    DeleteTopic { topic_id: String },
    DeleteUnit { unit_id: String },
}

impl ContentCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ContentCommand::AddItem { .. } => "add_item",
            ContentCommand::UpdateItem { .. } => "update_item",
            ContentCommand::SetItemStatus { .. } => "set_item_status",
            ContentCommand::DeleteItem { .. } => "delete_item",
            ContentCommand::DeleteSubtopic { .. } => "delete_subtopic",
            ContentCommand::DeleteTopic { .. } => "delete_topic",
            ContentCommand::DeleteUnit { .. } => "delete_unit",
        }
    }
}

fn topics_mut(subject: &mut Subject) -> impl Iterator<Item = &mut Topic> {
    subject.units.iter_mut().flat_map(|u| u.topics.iter_mut())
}

fn subtopics_mut(subject: &mut Subject) -> impl Iterator<Item = &mut Subtopic> {
    topics_mut(subject).flat_map(|t| t.subtopics.iter_mut())
}

fn item_mut<'a>(subject: &'a mut Subject, item_id: &str) -> Option<&'a mut LeafItem> {
    subtopics_mut(subject)
        .flat_map(|s| s.items.iter_mut())
        .find(|item| item.id == item_id)
}

/// Remove the first element matching `pred`. Returns whether one was removed.
fn remove_first<T>(list: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    match list.iter().position(pred) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}

/// Apply `command` to `subject`, returning the edited copy.
pub fn apply_command(subject: &Subject, command: ContentCommand) -> Result<Subject, CommandError> {
    let name = command.name();
    let mut next = subject.clone();

    match command {
        ContentCommand::AddItem { subtopic_id, item } => {
            if subject.find_item(&item.id).is_some() {
                return Err(CommandError::DuplicateItem(item.id));
            }
            let subtopic = subtopics_mut(&mut next)
                .find(|s| s.id == subtopic_id)
                .ok_or(CommandError::SubtopicNotFound(subtopic_id))?;
            subtopic.items.push(item);
        }
        ContentCommand::UpdateItem { item } => {
            let slot = item_mut(&mut next, &item.id)
                .ok_or_else(|| CommandError::ItemNotFound(item.id.clone()))?;
            *slot = item;
        }
        ContentCommand::SetItemStatus { item_id, status } => {
            let slot = item_mut(&mut next, &item_id).ok_or(CommandError::ItemNotFound(item_id))?;
            slot.status = status;
        }
        ContentCommand::DeleteItem { item_id } => {
            let removed = subtopics_mut(&mut next).any(|s| remove_first(&mut s.items, |i| i.id == item_id));
            if !removed {
                return Err(CommandError::ItemNotFound(item_id));
            }
        }
        ContentCommand::DeleteSubtopic { subtopic_id } => {
            let removed = topics_mut(&mut next).any(|t| remove_first(&mut t.subtopics, |s| s.id == subtopic_id));
            if !removed {
                return Err(CommandError::SubtopicNotFound(subtopic_id));
            }
        }
        ContentCommand::DeleteTopic { topic_id } => {
            let removed = next
                .units
                .iter_mut()
                .any(|u| remove_first(&mut u.topics, |t| t.id == topic_id));
            if !removed {
                return Err(CommandError::TopicNotFound(topic_id));
            }
        }
        ContentCommand::DeleteUnit { unit_id } => {
            if !remove_first(&mut next.units, |u| u.id == unit_id) {
                return Err(CommandError::UnitNotFound(unit_id));
            }
        }
    }

    debug!(
        subject = %subject.id,
        command = name,
        items_before = subject.item_count(),
        items_after = next.item_count(),
        "Applied content command"
    );
    Ok(next)
}
