// Colored terminal output for analysis reports.
//
// All terminal-specific formatting lives here; main.rs just decides
// between this and raw JSON.

use colored::Colorize;

use crate::model::{AnalysisReport, Suggestion, Topic};
use crate::output::truncate_chars;

/// Display a full report: topics first, then the suggestion table.
pub fn display_report(report: &AnalysisReport) {
    println!(
        "\n{}",
        format!(
            "=== Audit {} ({} pages analysées) ===",
            report.audit_id, report.page_count
        )
        .bold()
    );

    display_topics(&report.topics);
    display_suggestions(&report.suggestions);
}

pub fn display_topics(topics: &[Topic]) {
    if topics.is_empty() {
        println!("\n  Aucun thème détecté.");
        return;
    }

    println!("\n{}", "Thèmes".bold());
    for topic in topics {
        println!("  {:>2}. {}", topic.id + 1, topic.label.bright_cyan());
        println!(
            "      {}",
            truncate_chars(&topic.terms.join(", "), 100).dimmed()
        );
    }
}

pub fn display_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("\n  Aucune suggestion au-dessus du seuil.");
        return;
    }

    println!("\n{}", "Suggestions de mots-clés".bold());
    println!(
        "  {:>4}  {:<40} {:>6}  Raison",
        "Rang".dimmed(),
        "Mot-clé".dimmed(),
        "Score".dimmed(),
    );
    println!("  {}", "-".repeat(88).dimmed());

    for (i, suggestion) in suggestions.iter().enumerate() {
        let score = format!("{:.2}", suggestion.score);
        let colored_score = if suggestion.score >= 0.7 {
            score.bright_green()
        } else if suggestion.score >= 0.5 {
            score.bright_yellow()
        } else {
            score.bright_blue()
        };

        println!(
            "  {:>4}. {:<40} {:>6}  {}",
            i + 1,
            truncate_chars(&suggestion.keyword, 38).bold(),
            colored_score,
            truncate_chars(&suggestion.reason, 60).dimmed(),
        );

        if let Some(first) = suggestion.evidence.first() {
            println!(
                "        {}",
                format!("vu dans {} ({})", first.field, first.url).dimmed()
            );
        }
    }
    println!();
}
