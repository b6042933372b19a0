//! Help centre search.

use tracing::debug;

use crate::models::{FaqCategory, FaqItem};
use crate::utils::contains_ignore_case;

/// Check if an FAQ entry matches the search query.
/// Query should already be lowercased.
fn item_matches_search(item: &FaqItem, query: &str) -> bool {
    contains_ignore_case(&item.question, query) || contains_ignore_case(&item.answer, query)
}

/// Filter FAQ categories down to entries whose question or answer contains
/// `query`, ignoring case.
///
/// Category and entry order is preserved and categories left with no
/// entries are dropped. A blank query returns everything.
pub fn filter_faq(categories: &[FaqCategory], query: &str) -> Vec<FaqCategory> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return categories.to_vec();
    }

    let filtered: Vec<FaqCategory> = categories
        .iter()
        .filter_map(|category| {
            let items: Vec<FaqItem> = category
                .items
                .iter()
                .filter(|item| item_matches_search(item, &query))
                .cloned()
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(FaqCategory {
                    category: category.category.clone(),
                    items,
                })
            }
        })
        .collect();

    debug!(
        query = %query,
        categories = filtered.len(),
        "Filtered FAQ"
    );
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq() -> Vec<FaqCategory> {
        vec![
            FaqCategory::new("Getting Started", vec![
                FaqItem::new("How do I create an account?", "Click Sign Up on the home page."),
                FaqItem::new("Which subjects are covered?", "Maths, Biology, Chemistry and Physics."),
            ]),
            FaqCategory::new("Billing", vec![
                FaqItem::new("Can I cancel anytime?", "Yes, cancel from your account settings."),
                FaqItem::new("Do you offer refunds?", "Refunds are available within 14 days."),
            ]),
            FaqCategory::new("Empty", vec![]),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(filter_faq(&faq(), ""), faq());
        assert_eq!(filter_faq(&faq(), "   "), faq());
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(filter_faq(&faq(), "quantum entanglement").is_empty());
    }

    #[test]
    fn test_answer_only_match_is_found() {
        let result = filter_faq(&faq(), "home page");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Getting Started");
        assert_eq!(result[0].items.len(), 1);
        assert_eq!(result[0].items[0].question, "How do I create an account?");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let result = filter_faq(&faq(), "home page ");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].items[0].answer, "Click Sign Up on the home page.");
        assert_eq!(filter_faq(&faq(), "  refund\t"), filter_faq(&faq(), "refund"));
    }

    #[test]
    fn test_match_is_case_insensitive_and_keeps_order() {
        let result = filter_faq(&faq(), "ACCOUNT");
        let categories: Vec<&str> = result.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(categories, vec!["Getting Started", "Billing"]);
        assert_eq!(result[1].items[0].question, "Can I cancel anytime?");
    }

    #[test]
    fn test_categories_without_matches_are_dropped() {
        let result = filter_faq(&faq(), "refund");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Billing");
        assert_eq!(result[0].items.len(), 1);
    }
}
