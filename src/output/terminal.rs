// Colored terminal output for scan summaries.
//
// This module handles all terminal-specific formatting. The main.rs
// command handlers delegate here.

use colored::Colorize;
use std::path::Path;

use super::truncate_chars;
use crate::matching::{MatchReport, ScanStats};

/// How many terms the summary lists.
const TOP_TERMS: usize = 10;

/// Display the result of a completed scan.
pub fn display_scan_summary(report: &MatchReport, stats: &ScanStats, output_path: &Path) {
    println!("\n{}", "Scan complete.".bold());
    println!("  Sentences scanned: {}", stats.records);
    println!("  Tokens tested:     {}", stats.tokens);
    println!("  Documents matched: {}", report.len());
    println!("  Total matches:     {}", report.total_matches());

    if stats.misaligned > 0 {
        println!(
            "  {} {} sentences had mismatched token/tag counts (scanned the shorter prefix)",
            "Warning:".yellow(),
            stats.misaligned
        );
    }

    if report.is_empty() {
        println!("\nNo vocabulary terms found in the corpus.");
    } else {
        display_term_table(report);
    }

    println!("\nReport written to {}", output_path.display().to_string().bold());
}

/// Display the most frequent matched terms across the corpus.
fn display_term_table(report: &MatchReport) {
    let totals = report.term_totals();

    println!(
        "\n{}",
        format!("=== Top terms ({} distinct) ===", totals.len()).bold()
    );
    println!(
        "  {:<32} {:>8}  {:>9}",
        "Term".dimmed(),
        "Matches".dimmed(),
        "Documents".dimmed()
    );
    println!("  {}", "-".repeat(52).dimmed());

    for (term, count, documents) in totals.iter().take(TOP_TERMS) {
        println!(
            "  {:<32} {:>8}  {:>9}",
            truncate_chars(term, 29),
            count,
            documents
        );
    }

    if totals.len() > TOP_TERMS {
        println!(
            "  {}",
            format!("... and {} more", totals.len() - TOP_TERMS).dimmed()
        );
    }
}
