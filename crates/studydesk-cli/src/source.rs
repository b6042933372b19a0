//! Choosing which content library to read.
//!
//! Saved admin edits are only used when they were seeded from the same
//! content file the command resolved to. Any other file is read as is.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use studydesk_core::models::ContentLibrary;
use studydesk_core::{Config, ContentStore};

/// Environment variable overriding the content file location
pub const CONTENT_ENV_VAR: &str = "STUDYDESK_CONTENT";

/// Bundled sample library, resolved from the crate so it is found from any
/// working directory.
pub fn default_content_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("data")
        .join("sample_content.json")
}

/// Resolve the content file: flag, then environment, then config, then the bundled sample.
pub fn content_path(flag: Option<PathBuf>, env: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or(env)
        .or_else(|| config.content_path.clone())
        .unwrap_or_else(default_content_path)
}

pub struct LoadedLibrary {
    pub library: ContentLibrary,
    /// Age of the saved edits, when those were used instead of the file.
    pub saved_age: Option<String>,
}

pub fn load_library(path: &Path, store: &dyn ContentStore) -> Result<LoadedLibrary> {
    match store.load() {
        Ok(Some(snapshot)) if snapshot.is_from(path) => {
            return Ok(LoadedLibrary {
                saved_age: Some(snapshot.age_display()),
                library: snapshot.data,
            });
        }
        Ok(Some(snapshot)) => debug!(
            saved_from = ?snapshot.source,
            content = %path.display(),
            "Saved edits belong to another content file"
        ),
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Ignoring unreadable content store"),
    }

    let library = ContentLibrary::from_json_file(path).with_context(|| {
        format!(
            "Could not load content from {} (pass --content PATH or set {})",
            path.display(),
            CONTENT_ENV_VAR
        )
    })?;
    Ok(LoadedLibrary {
        library,
        saved_age: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use studydesk_core::models::Subject;
    use studydesk_core::store::JsonContentStore;

    fn write_library(dir: &Path, name: &str, subject_id: &str) -> PathBuf {
        let library = ContentLibrary {
            subjects: vec![Subject::new(subject_id, subject_id)],
            ..ContentLibrary::default()
        };
        let path = dir.join(name);
        std::fs::write(&path, serde_json::to_string(&library).expect("Failed to serialize library"))
            .expect("Failed to write content file");
        path
    }

    fn subject_ids(loaded: &LoadedLibrary) -> Vec<&str> {
        loaded.library.subjects.iter().map(|s| s.id.as_str()).collect()
    }

    // -------------------------------------------------------------------------
    // content_path
    // -------------------------------------------------------------------------

    #[test]
    fn test_content_path_precedence() {
        let config = Config {
            content_path: Some(PathBuf::from("config.json")),
            ..Config::default()
        };
        let flag = Some(PathBuf::from("flag.json"));
        let env = Some(PathBuf::from("env.json"));

        assert_eq!(content_path(flag.clone(), env.clone(), &config), PathBuf::from("flag.json"));
        assert_eq!(content_path(None, env, &config), PathBuf::from("env.json"));
        assert_eq!(content_path(None, None, &config), PathBuf::from("config.json"));
        assert_eq!(content_path(None, None, &Config::default()), default_content_path());
    }

    #[test]
    fn test_default_content_path_exists() {
        assert!(default_content_path().is_file());
    }

    // -------------------------------------------------------------------------
    // load_library
    // -------------------------------------------------------------------------

    #[test]
    fn test_other_file_is_not_shadowed_by_saved_edits() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let old = write_library(dir.path(), "old.json", "old");
        let other = write_library(dir.path(), "other.json", "new");
        let store = JsonContentStore::new(dir.path().join("store"));
        store
            .save(&ContentLibrary::from_json_file(&old).expect("load old"), Some(old.as_path()))
            .expect("save should succeed");

        let path = content_path(Some(other), None, &Config::default());
        let loaded = load_library(&path, &store).expect("load should succeed");
        assert_eq!(subject_ids(&loaded), vec!["new"]);
        assert!(loaded.saved_age.is_none());
    }

    #[test]
    fn test_saved_edits_of_same_file_are_used() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let content = write_library(dir.path(), "content.json", "original");
        let store = JsonContentStore::new(dir.path().join("store"));
        let edited = ContentLibrary {
            subjects: vec![Subject::new("edited", "Edited")],
            ..ContentLibrary::default()
        };
        store.save(&edited, Some(content.as_path())).expect("save should succeed");

        let loaded = load_library(&content, &store).expect("load should succeed");
        assert_eq!(subject_ids(&loaded), vec!["edited"]);
        assert_eq!(loaded.saved_age.as_deref(), Some("just now"));
    }

    #[test]
    fn test_empty_store_reads_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let content = write_library(dir.path(), "content.json", "maths");
        let store = JsonContentStore::new(dir.path().join("store"));

        let loaded = load_library(&content, &store).expect("load should succeed");
        assert_eq!(subject_ids(&loaded), vec!["maths"]);
        assert!(!dir.path().join("store").exists());
    }

    #[test]
    fn test_missing_file_error_names_flag() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = JsonContentStore::new(dir.path().join("store"));

        let err = load_library(&dir.path().join("missing.json"), &store).err().expect("load should fail");
        let message = format!("{:#}", err);
        assert!(message.contains("--content"));
        assert!(message.contains(CONTENT_ENV_VAR));
    }
}
