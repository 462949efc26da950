use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

use cuahsi_search::config::Config;

/// cuahsi-search: count vocabulary mentions across a tagged-sentence corpus.
///
/// Scans every sentence of the `<app_name>_sentences_nlp352` table for the
/// configured search terms and writes a per-document tally with a link to
/// each article.
#[derive(Parser)]
#[command(name = "cuahsi-search", version, about)]
struct Cli {
    /// Analysis config file (defaults to $CUAHSI_CONFIG, then ./config.yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Defaults to `scan` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan the sentence table and write the match report
    Scan {
        /// Write the report here instead of the configured output_path
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Create the local SQLite sentence table
    #[cfg(feature = "sqlite")]
    Init,

    /// Load tagged sentences from a JSON-lines file into the local SQLite table
    #[cfg(feature = "sqlite")]
    Import {
        /// One {"docid", "sentid", "words", "poses"} object per line
        path: PathBuf,
    },

    /// Show configuration, sentence count, and last report
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cuahsi_search=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Run failed");
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Scan { output: None }) {
        Commands::Scan { output } => {
            let output_path = output.unwrap_or_else(|| config.analysis.output_path.clone());
            let table = config.analysis.sentence_table();
            let source = open_source(&config).await?;
            let scanner = config.analysis.scanner();

            println!("Scanning {table} for {} terms...", scanner.vocabulary().len());

            let (report, stats) =
                cuahsi_search::pipeline::scan::run(source.as_ref(), &table, &scanner).await?;

            cuahsi_search::output::json::write_report(&output_path, &report)?;
            info!(path = %output_path.display(), documents = report.len(), "Report written");

            cuahsi_search::output::terminal::display_scan_summary(&report, &stats, &output_path);
        }

        #[cfg(feature = "sqlite")]
        Commands::Init => {
            let table = config.analysis.sentence_table();
            info!(path = %config.db_path, %table, "Initializing local corpus");
            let conn = cuahsi_search::db::initialize(&config.db_path, &table)?;
            let table_count = cuahsi_search::db::schema::table_count(&conn)?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables present: {table_count}");
            println!("\nNext step: load sentences with");
            println!("  cuahsi-search import <sentences.jsonl>");
        }

        #[cfg(feature = "sqlite")]
        Commands::Import { path } => {
            let table = config.analysis.sentence_table();
            let conn = cuahsi_search::db::initialize(&config.db_path, &table)?;
            let file = std::fs::File::open(&path)
                .with_context(|| format!("Failed to open {}", path.display()))?;

            println!("Importing {} into {table}...", path.display());
            let stats = cuahsi_search::pipeline::import::import_jsonl(
                &conn,
                &table,
                std::io::BufReader::new(file),
            )?;

            println!(
                "  {} {} sentences imported",
                "✓".green(),
                stats.sentences
            );
            if stats.replaced > 0 {
                println!(
                    "  {} {} sentences replaced an existing (docid, sentid) row",
                    "!".yellow(),
                    stats.replaced
                );
            }
            if stats.skipped_blank > 0 {
                println!("  {} {} blank lines skipped", "-".dimmed(), stats.skipped_blank);
            }
        }

        Commands::Status => match open_source(&config).await {
            Ok(source) => cuahsi_search::status::show(&config, Some(source.as_ref())).await?,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Record source unavailable");
                cuahsi_search::status::show(&config, None).await?;
            }
        },
    }

    Ok(())
}

async fn open_source(
    config: &Config,
) -> Result<std::sync::Arc<dyn cuahsi_search::db::SentenceSource>> {
    cuahsi_search::db::open_source(config.database_url.as_deref(), &config.db_path).await
}
