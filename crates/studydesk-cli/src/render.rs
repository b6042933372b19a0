//! Plain-text rendering for terminal output.
//!
//! Tables print a Unit/Topic/Subtopic label only on the row that opens its
//! group, leaving the cell blank on the rows it spans. That is the text
//! equivalent of a `rowspan` cell.

use std::collections::HashSet;
use std::fmt::Write;

use studydesk_core::models::{BillingCycle, ContentLibrary, Difficulty, FaqCategory, Plan, Subject};
use studydesk_core::pricing::quote;
use studydesk_core::progress::{recommendations, subject_progress};
use studydesk_core::stats::unit_summaries;
use studydesk_core::utils::{format_pence, pluralize, truncate};
use studydesk_core::{flatten, ContentStats};

/// Widest a merged label column may grow before truncation.
const MAX_GROUP_WIDTH: usize = 24;

/// Widest the title column may grow before truncation.
const MAX_TITLE_WIDTH: usize = 48;

/// Number of study suggestions shown under progress.
const RECOMMENDATION_LIMIT: usize = 3;

const HEADERS: [&str; 8] = [
    "Unit", "Topic", "Subtopic", "Type", "Title", "Answer", "Difficulty", "Status",
];

/// Build the cell text for every row, blanking spanned group cells.
fn table_cells(subject: &Subject) -> Vec<[String; 8]> {
    flatten(&subject.units)
        .map(|row| {
            let group = |first: bool, name: &str, span: usize| {
                if first {
                    truncate(&format!("{} ({})", name, span), MAX_GROUP_WIDTH)
                } else {
                    String::new()
                }
            };
            [
                group(row.is_first_row_of_unit, &row.unit.name, row.unit_row_span),
                group(row.is_first_row_of_topic, &row.topic.name, row.topic_row_span),
                group(row.is_first_row_of_subtopic, &row.subtopic.name, row.subtopic_row_span),
                row.item.kind.to_string(),
                truncate(&row.item.title, MAX_TITLE_WIDTH),
                if row.item.has_answer() { "yes" } else { "missing" }.to_string(),
                row.item.difficulty.to_string(),
                row.item.status.to_string(),
            ]
        })
        .collect()
}

pub fn render_table(subject: &Subject) -> String {
    let rows = table_cells(subject);
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", subject.name, pluralize(rows.len(), "item", "items"));

    if rows.is_empty() {
        out.push_str("  No content yet.\n");
        return out;
    }

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let _ = writeln!(out, "{}", line(&HEADERS[..]));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{}", line(&cells));
    }
    out
}

pub fn render_stats(library: &ContentLibrary) -> String {
    let mut out = String::new();
    for subject in &library.subjects {
        let stats = ContentStats::collect(&subject.units);
        let _ = writeln!(
            out,
            "{}: {} ({} flashcards, {} quizzes) - {} published, {} draft, {} archived ({}% published)",
            subject.name,
            pluralize(stats.total, "item", "items"),
            stats.flashcards,
            stats.quizzes,
            stats.published,
            stats.drafts,
            stats.archived,
            stats.published_percent(),
        );
        let by_difficulty: Vec<String> = Difficulty::ALL
            .iter()
            .map(|d| format!("{} {}", stats.difficulty(*d), d.display_name().to_lowercase()))
            .collect();
        let _ = writeln!(out, "  Difficulty: {}", by_difficulty.join(", "));
        for summary in unit_summaries(&subject.units) {
            let _ = writeln!(
                out,
                "  {}: {}, {}, {}",
                summary.unit_name,
                pluralize(summary.topics, "topic", "topics"),
                pluralize(summary.subtopics, "subtopic", "subtopics"),
                pluralize(summary.stats.total, "item", "items"),
            );
        }
    }
    out
}

pub fn render_faq(categories: &[FaqCategory]) -> String {
    if categories.is_empty() {
        return "No matching questions.\n".to_string();
    }
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{}", category.category);
        for item in &category.items {
            let _ = writeln!(out, "  Q: {}", item.question);
            let _ = writeln!(out, "     {}", item.answer);
        }
    }
    out
}

pub fn render_progress(subject: &Subject, completed: &HashSet<String>) -> String {
    let progress = subject_progress(subject, completed);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}/{} complete ({}%)",
        progress.subject_name, progress.completed, progress.total, progress.percent
    );
    for unit in &progress.units {
        let _ = writeln!(
            out,
            "  {}: {}/{} ({}%)",
            unit.unit_name, unit.completed, unit.total, unit.percent
        );
    }

    let recs = recommendations(subject, completed, RECOMMENDATION_LIMIT);
    if !recs.is_empty() {
        out.push_str("Up next:\n");
        for rec in recs {
            let _ = writeln!(
                out,
                "  {} > {} > {}: {} ({} left)",
                rec.unit_name, rec.topic_name, rec.subtopic_name, rec.next_item_title, rec.remaining
            );
        }
    }
    out
}

pub fn render_pricing(plans: &[Plan]) -> String {
    let mut out = String::new();
    for plan in plans {
        if plan.is_free() {
            let _ = writeln!(out, "{}: Free", plan.name);
        } else {
            let monthly = quote(plan, BillingCycle::Monthly);
            let annual = quote(plan, BillingCycle::Annual);
            let _ = writeln!(
                out,
                "{}: {}/month or {}/year ({}/month, save {})",
                plan.name,
                format_pence(monthly.total_pence),
                format_pence(annual.total_pence),
                format_pence(annual.per_month_pence),
                format_pence(annual.saving_pence),
            );
        }
        for feature in &plan.features {
            let _ = writeln!(out, "  - {}", feature);
        }
    }
    out
}
