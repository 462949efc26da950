// System status display: config summary, source row count, last report.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::db::SentenceSource;
use crate::output::truncate_chars;

/// How many vocabulary entries to preview.
const VOCAB_PREVIEW: usize = 8;

/// Display system status to the terminal.
///
/// `source` is None when the record source couldn't be opened.
pub async fn show(config: &Config, source: Option<&dyn SentenceSource>) -> Result<()> {
    let analysis = &config.analysis;
    let table = analysis.sentence_table();

    println!("Config: {}", config.config_path.display());

    match source {
        Some(source) => {
            println!("Source: {} ({})", config.source_display(), source.backend());
            match source.count_sentences(&table).await {
                Ok(count) => println!("Sentence table: {table} ({count} sentences)"),
                Err(e) => println!("Sentence table: {table} (unavailable: {e})"),
            }
        }
        None => {
            println!("Source: {} (not reachable)", config.source_display());
            println!("  Run `cuahsi-search init` for a local corpus, or set DATABASE_URL");
        }
    }

    let terms = analysis.vocabulary.sorted_terms();
    if terms.is_empty() {
        println!("Vocabulary: empty (every scan will produce an empty report)");
    } else {
        let preview: Vec<&str> = terms.iter().copied().take(VOCAB_PREVIEW).collect();
        let more = terms.len().saturating_sub(VOCAB_PREVIEW);
        let preview = truncate_chars(&preview.join(", "), 72);
        if more > 0 {
            println!("Vocabulary: {} terms ({preview}, +{more} more)", terms.len());
        } else {
            println!("Vocabulary: {} terms ({preview})", terms.len());
        }
    }
    println!(
        "Matching: tag policy {}, report keys {}",
        analysis.tag_policy.as_str(),
        analysis.key_case.as_str()
    );

    let output = &analysis.output_path;
    match std::fs::metadata(output) {
        Ok(meta) => println!(
            "Last report: {} ({})",
            output.display(),
            format_bytes(meta.len())
        ),
        Err(_) => report_missing(output),
    }

    Ok(())
}

fn report_missing(output: &Path) {
    println!("Last report: none at {}", output.display());
    println!("  Run `cuahsi-search scan` to produce it");
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
