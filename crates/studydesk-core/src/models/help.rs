//! Help centre and FAQ content.

use serde::{Deserialize, Serialize};

/// A single question with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

impl FaqItem {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A titled group of FAQ entries, e.g. "Billing" or "Getting Started".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqCategory {
    pub category: String,
    #[serde(default)]
    pub items: Vec<FaqItem>,
}

impl FaqCategory {
    pub fn new(category: impl Into<String>, items: Vec<FaqItem>) -> Self {
        Self {
            category: category.into(),
            items,
        }
    }
}
