mod prompt;
mod session;

use anyhow::Context;
use clap::{Parser, Subcommand};
use journal_core::config::{daily_symptom_limit_from_env_value, path_from_env_value};
use journal_core::constants::{
    DEFAULT_ARCHIVE_DIR, DEFAULT_JOURNAL_PATH, DEFAULT_REPORTS_DIR, DEFAULT_REPORT_WINDOW_DAYS,
};
use journal_core::{
    distinct_symptoms, CoreConfig, JournalDate, JournalStore, Report, ReportService,
};
use prompt::Prompter;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Daily symptom journal")]
struct Cli {
    /// Path of the journal file [env: JOURNAL_PATH] [default: journal.json]
    #[arg(short, long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log today's symptoms interactively
    Log {
        /// Journal archive directory [env: JOURNAL_ARCHIVE_DIR] [default: journal_archive]
        #[arg(short, long)]
        archive: Option<PathBuf>,
        /// Number of daily symptoms to log [env: JOURNAL_DAILY_SYMPTOMS] [default: 5]
        #[arg(short, long)]
        num_daily_symptoms: Option<usize>,
    },
    /// Write a report for a date range
    Report {
        /// Start date of the report (MM-DD-YYYY) [default: 30 days before the end date]
        #[arg(short, long)]
        start_date: Option<JournalDate>,
        /// End date of the report (MM-DD-YYYY) [default: today]
        #[arg(short, long)]
        end_date: Option<JournalDate>,
        /// Directory to store reports in [env: JOURNAL_REPORTS_DIR] [default: reports]
        #[arg(short, long)]
        reports: Option<PathBuf>,
        /// Also export the per-symptom series for plotting
        #[arg(short, long)]
        plot: bool,
    },
    /// List previously logged symptom names
    Symptoms,
}

/// Resolves the core configuration once, before any command runs.
///
/// Command-line values win over environment values, which win over defaults.
fn resolve_config(
    journal: Option<PathBuf>,
    archive: Option<PathBuf>,
    reports: Option<PathBuf>,
    daily_symptoms: Option<usize>,
) -> anyhow::Result<Arc<CoreConfig>> {
    let journal_path = journal.unwrap_or_else(|| {
        path_from_env_value(std::env::var("JOURNAL_PATH").ok(), DEFAULT_JOURNAL_PATH)
    });
    let archive_dir = archive.unwrap_or_else(|| {
        path_from_env_value(std::env::var("JOURNAL_ARCHIVE_DIR").ok(), DEFAULT_ARCHIVE_DIR)
    });
    let reports_dir = reports.unwrap_or_else(|| {
        path_from_env_value(std::env::var("JOURNAL_REPORTS_DIR").ok(), DEFAULT_REPORTS_DIR)
    });
    let daily_symptom_limit = match daily_symptoms {
        Some(limit) => limit,
        None => daily_symptom_limit_from_env_value(std::env::var("JOURNAL_DAILY_SYMPTOMS").ok())?,
    };

    let cfg = CoreConfig::new(journal_path, archive_dir, reports_dir, daily_symptom_limit)?;
    tracing::debug!(?cfg, "resolved configuration");
    Ok(Arc::new(cfg))
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("journal=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Log {
            archive,
            num_daily_symptoms,
        }) => {
            let cfg = resolve_config(cli.journal, archive, None, num_daily_symptoms)?;
            let store = JournalStore::new(cfg.clone());

            println!("=============================");
            println!("=== Daily Symptom Journal ===");
            println!("=============================");

            let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
            let logged = session::run_log_session(
                &store,
                cfg.daily_symptom_limit(),
                JournalDate::today(),
                &mut prompter,
            )?;
            tracing::debug!(
                entry = logged.entry_number,
                archive = %logged.archive_path.display(),
                "logging session complete"
            );
        }
        Some(Commands::Report {
            start_date,
            end_date,
            reports,
            plot,
        }) => {
            let cfg = resolve_config(cli.journal, None, reports, None)?;
            let end = end_date.unwrap_or_else(JournalDate::today);
            let start = start_date.unwrap_or_else(|| end.days_before(DEFAULT_REPORT_WINDOW_DAYS));

            let journal = JournalStore::new(cfg.clone())
                .load_existing()
                .context("failed to read journal")?;
            let report = Report::generate(&journal, start, end);
            let artifacts = ReportService::new(cfg)
                .write(&report, plot)
                .context("failed to write report")?;

            println!(
                "Report for {} ({} entries): {}",
                journal.patient(),
                report.entry_count(),
                artifacts.text_path.display()
            );
            if let Some(series_path) = artifacts.series_path {
                println!("Series: {}", series_path.display());
            }
        }
        Some(Commands::Symptoms) => {
            let cfg = resolve_config(cli.journal, None, None, None)?;
            let journal = JournalStore::new(cfg)
                .load_existing()
                .context("failed to read journal")?;
            let names = distinct_symptoms(&journal);
            if names.is_empty() {
                println!("No symptoms logged yet.");
            } else {
                for name in names {
                    println!("{name}");
                }
            }
        }
        None => {
            println!("Use 'journal --help' for commands");
        }
    }

    Ok(())
}
