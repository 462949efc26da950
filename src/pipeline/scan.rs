// Scan pipeline: stream the sentence table through the scanner into a report.
//
// Single pass, one record in memory at a time. The report is only handed
// back if the whole table was read; any source error discards it.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::db::SentenceSource;
use crate::matching::{Aggregator, MatchReport, ScanStats, Scanner};

/// Spinner refresh interval, in sentences.
const PROGRESS_EVERY: u64 = 5_000;

/// Run a full scan of `table` and return the finished report.
pub async fn run(
    source: &dyn SentenceSource,
    table: &str,
    scanner: &Scanner,
) -> Result<(MatchReport, ScanStats)> {
    info!(
        backend = source.backend(),
        table,
        terms = scanner.vocabulary().len(),
        tag_policy = scanner.tag_policy().as_str(),
        "Starting scan"
    );

    if scanner.vocabulary().is_empty() {
        warn!("Vocabulary is empty; the report will have no documents");
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} {pos} sentences scanned, {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut aggregator = Aggregator::new();
    let mut stats = ScanStats::default();

    let delivered = source
        .for_each_sentence(table, &mut |record| {
            stats.add(scanner.scan_record(&record, &mut aggregator));
            if stats.records % PROGRESS_EVERY == 0 {
                pb.set_position(stats.records);
                pb.set_message(format!("{} matches", stats.matches));
            }
        })
        .await
        .with_context(|| format!("Scan of {table} failed; no report written"))?;

    pb.finish_and_clear();

    let report = aggregator.into_report();
    info!(
        sentences = delivered,
        documents = report.len(),
        matches = stats.matches,
        "Scan finished"
    );
    if stats.misaligned > 0 {
        warn!(
            count = stats.misaligned,
            "Sentences with mismatched token/tag counts were scanned up to the shorter length"
        );
    }

    Ok((report, stats))
}
