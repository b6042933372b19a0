use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::commands::{apply_command, CommandError, ContentCommand};
use crate::models::{ContentLibrary, Subject};

/// File name of the saved content library inside the store directory.
const LIBRARY_FILE: &str = "library";

/// Canonical form of a content file path, or the path as given if it
/// cannot be resolved.
pub fn normalize_source(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub data: T,
    pub saved_at: DateTime<Utc>,
    /// Content file the saved data was first seeded from.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

impl<T> Snapshot<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            saved_at: Utc::now(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: Option<PathBuf>) -> Self {
        self.source = source;
        self
    }

    /// Whether this snapshot was seeded from the content file at `path`.
    pub fn is_from(&self, path: &Path) -> bool {
        self.source
            .as_deref()
            .map(|source| source == normalize_source(path).as_path())
            .unwrap_or(false)
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.saved_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            let hours = minutes / 60;
            if minutes % 60 >= 30 {
                format!("{}h ago", hours + 1)
            } else {
                format!("{}h ago", hours)
            }
        } else {
            let days = minutes / 1440;
            if (minutes % 1440) / 60 >= 12 {
                format!("{}d ago", days + 1)
            } else {
                format!("{}d ago", days)
            }
        }
    }
}

/// Where admin edits are persisted.
pub trait ContentStore {
    /// The last saved library, or `None` if nothing has been saved.
    fn load(&self) -> Result<Option<Snapshot<ContentLibrary>>>;

    /// Save `library`, remembering the content file it came from.
    fn save(&self, library: &ContentLibrary, source: Option<&Path>) -> Result<()>;
}

/// Stores the content library as pretty-printed JSON in a directory.
///
/// The directory is only created on the first save.
pub struct JsonContentStore {
    store_dir: PathBuf,
}

impl JsonContentStore {
    pub fn new(store_dir: PathBuf) -> Self {
        Self { store_dir }
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    fn snapshot_path(&self, name: &str) -> PathBuf {
        self.store_dir.join(format!("{}.json", name))
    }

    fn read_snapshot<T: DeserializeOwned>(&self, name: &str) -> Result<Option<Snapshot<T>>> {
        let path = self.snapshot_path(name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store file: {}", name))?;

        let snapshot: Snapshot<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse store file: {}", name))?;

        Ok(Some(snapshot))
    }

    fn write_snapshot<T: Serialize>(&self, name: &str, snapshot: &Snapshot<T>) -> Result<()> {
        std::fs::create_dir_all(&self.store_dir).with_context(|| {
            format!("Failed to create store directory: {}", self.store_dir.display())
        })?;
        let path = self.snapshot_path(name);
        let contents = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write store file: {}", name))?;
        debug!(path = %path.display(), "Saved snapshot");
        Ok(())
    }
}

impl ContentStore for JsonContentStore {
    fn load(&self) -> Result<Option<Snapshot<ContentLibrary>>> {
        self.read_snapshot(LIBRARY_FILE)
    }

    fn save(&self, library: &ContentLibrary, source: Option<&Path>) -> Result<()> {
        let snapshot = Snapshot::new(library).with_source(source.map(normalize_source));
        self.write_snapshot(LIBRARY_FILE, &snapshot)
    }
}

/// Make sure the store holds edits of the content file at `path`.
///
/// An empty store, or one seeded from a different file, is replaced with
/// the file's contents. Returns the snapshot the next edit will start from.
pub fn seed_from_file(store: &dyn ContentStore, path: &Path) -> Result<Snapshot<ContentLibrary>> {
    if let Some(snapshot) = store.load()? {
        if snapshot.is_from(path) {
            return Ok(snapshot);
        }
        warn!(
            previous = ?snapshot.source,
            content = %path.display(),
            "Saved edits belong to another content file, reseeding"
        );
    }

    let library = ContentLibrary::from_json_file(path)?;
    store.save(&library, Some(path))?;
    Ok(Snapshot::new(library).with_source(Some(normalize_source(path))))
}

/// Load the library, apply `command` to one subject and save the result.
///
/// Returns the edited subject. Nothing is written if the command fails.
pub fn execute(
    store: &dyn ContentStore,
    subject_id: &str,
    command: ContentCommand,
) -> Result<Subject> {
    let Snapshot { data: mut library, source, .. } = store.load()?.ok_or(CommandError::EmptyStore)?;

    let slot = library
        .subject_mut(subject_id)
        .ok_or_else(|| CommandError::SubjectNotFound(subject_id.to_string()))?;

    let action = command.name();
    let updated = apply_command(slot, command)?;
    *slot = updated.clone();

    store.save(&library, source.as_deref())?;
    info!(subject = %subject_id, action, "Content command saved");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::models::{Difficulty, ItemKind, ItemStatus, LeafItem, Subtopic, Topic, Unit};

    fn library() -> ContentLibrary {
        ContentLibrary {
            subjects: vec![Subject::new("phys", "Physics").with_units(vec![
                Unit::new("forces", "Forces").with_topics(vec![
                    Topic::new("motion", "Motion", Difficulty::Easy).with_subtopics(vec![
                        Subtopic::new("speed", "Speed").with_items(vec![LeafItem::new(
                            "v1",
                            ItemKind::Quiz,
                            "Define velocity",
                            Difficulty::Easy,
                            ItemStatus::Draft,
                        )]),
                    ]),
                ]),
            ])],
            ..ContentLibrary::default()
        }
    }

    #[test]
    fn test_snapshot_age_display() {
        let mut snapshot = Snapshot::new(());
        assert_eq!(snapshot.age_display(), "just now");

        snapshot.saved_at = Utc::now() - Duration::minutes(5);
        assert_eq!(snapshot.age_display(), "5m ago");

        snapshot.saved_at = Utc::now() - Duration::minutes(95);
        assert_eq!(snapshot.age_display(), "2h ago");

        snapshot.saved_at = Utc::now() - Duration::hours(50);
        assert_eq!(snapshot.age_display(), "2d ago");

        snapshot.saved_at = Utc::now() + Duration::minutes(10);
        assert_eq!(snapshot.age_display(), "just now");
    }

    #[test]
    fn test_load_from_missing_store_dir_creates_nothing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store_dir = dir.path().join("store");
        let store = JsonContentStore::new(store_dir.clone());
        assert!(store.load().expect("load should succeed").is_none());
        assert!(!store_dir.exists());
    }

    #[test]
    fn test_save_creates_dir_then_load() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonContentStore::new(dir.path().join("nested").join("store"));
        store.save(&library(), None).expect("save should succeed");

        let snapshot = store.load().expect("load should succeed").expect("snapshot should exist");
        assert_eq!(snapshot.data, library());
        assert!(snapshot.source.is_none());
        assert!(snapshot.age_minutes() <= 1);
    }

    #[test]
    fn test_snapshot_remembers_source_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let content = write_content(dir.path(), "content.json", &library());
        let other = write_content(dir.path(), "other.json", &library());
        let store = JsonContentStore::new(dir.path().join("store"));
        store.save(&library(), Some(content.as_path())).expect("save should succeed");

        let snapshot = store.load().expect("load should succeed").expect("snapshot should exist");
        assert!(snapshot.is_from(&content));
        assert!(snapshot.is_from(&dir.path().join(".").join("content.json")));
        assert!(!snapshot.is_from(&other));
        assert!(!Snapshot::new(()).is_from(&content));
    }

    fn write_content(dir: &Path, name: &str, library: &ContentLibrary) -> PathBuf {
        let path = dir.join(name);
        let json = serde_json::to_string(library).expect("Failed to serialize library");
        std::fs::write(&path, json).expect("Failed to write content file");
        path
    }

    fn renamed(name: &str) -> ContentLibrary {
        let mut lib = library();
        lib.subjects[0].name = name.to_string();
        lib
    }

    #[test]
    fn test_seed_from_file_keeps_matching_edits() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let content = write_content(dir.path(), "content.json", &library());
        let store = JsonContentStore::new(dir.path().join("store"));

        let seeded = seed_from_file(&store, &content).expect("seed should succeed");
        assert_eq!(seeded.data, library());

        store.save(&renamed("Edited"), Some(content.as_path())).expect("save should succeed");
        let kept = seed_from_file(&store, &content).expect("seed should succeed");
        assert_eq!(kept.data.subjects[0].name, "Edited");
    }

    #[test]
    fn test_seed_from_file_replaces_edits_of_another_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let old = write_content(dir.path(), "old.json", &renamed("Old"));
        let new = write_content(dir.path(), "new.json", &renamed("New"));
        let store = JsonContentStore::new(dir.path().join("store"));
        seed_from_file(&store, &old).expect("seed should succeed");

        let reseeded = seed_from_file(&store, &new).expect("seed should succeed");
        assert_eq!(reseeded.data.subjects[0].name, "New");

        let stored = store.load().expect("load should succeed").expect("snapshot should exist");
        assert_eq!(stored.data.subjects[0].name, "New");
        assert!(stored.is_from(&new));
    }

    #[test]
    fn test_execute_persists_edit_and_keeps_source() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let content = write_content(dir.path(), "content.json", &library());
        let store = JsonContentStore::new(dir.path().join("store"));
        seed_from_file(&store, &content).expect("seed should succeed");

        let cmd = ContentCommand::SetItemStatus {
            item_id: "v1".to_string(),
            status: ItemStatus::Published,
        };
        let updated = execute(&store, "phys", cmd).expect("execute should succeed");
        assert_eq!(updated.find_item("v1").map(|i| i.status), Some(ItemStatus::Published));

        let reloaded = store.load().expect("load should succeed").expect("snapshot should exist");
        assert_eq!(reloaded.data.subject("phys"), Some(&updated));
        assert!(reloaded.is_from(&content));
    }

    #[test]
    fn test_execute_failures_do_not_write() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonContentStore::new(dir.path().to_path_buf());

        let cmd = ContentCommand::DeleteItem { item_id: "v1".to_string() };
        let err = execute(&store, "phys", cmd.clone()).unwrap_err();
        assert_eq!(err.downcast_ref::<CommandError>(), Some(&CommandError::EmptyStore));

        store.save(&library(), None).expect("save should succeed");
        let err = execute(&store, "maths", cmd).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CommandError>(),
            Some(&CommandError::SubjectNotFound("maths".to_string()))
        );

        let missing = ContentCommand::DeleteItem { item_id: "zzz".to_string() };
        assert!(execute(&store, "phys", missing).is_err());
        let reloaded = store.load().expect("load should succeed").expect("snapshot should exist");
        assert_eq!(reloaded.data, library());
    }
}
