use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("Subtopic not found: {0}")]
    SubtopicNotFound(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("An item with id {0} already exists")]
    DuplicateItem(String),

    #[error("Content store is empty - nothing has been saved yet")]
    EmptyStore,
}
