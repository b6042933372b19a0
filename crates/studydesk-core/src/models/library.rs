//! The content document the platform loads at startup.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FaqCategory, Plan, Subject};

/// All static content: curriculum subjects, help centre FAQ and plans.
///
/// Every section is optional in the JSON document and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLibrary {
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub faq: Vec<FaqCategory>,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl ContentLibrary {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;
        let library = Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse content file: {}", path.display()))?;

        debug!(
            path = %path.display(),
            subjects = library.subjects.len(),
            faq_categories = library.faq.len(),
            plans = library.plans.len(),
            "Loaded content library"
        );
        Ok(library)
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }

    pub fn subject_mut(&mut self, subject_id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == subject_id)
    }
}
