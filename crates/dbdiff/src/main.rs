//! dbdiff CLI
//!
//! Command-line tool for comparing MySQL schemas.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use dbdiff::output::{append_sql, render};
use dbdiff::runner::ignore_pattern;
use dbdiff::{run_all, Config, Format, LoadOptions};

/// Calculates the differences between database schemas.
#[derive(Parser)]
#[command(name = "dbdiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file listing the groups to compare.
    #[arg(env = "DBDIFF_CONFIG")]
    config: PathBuf,

    /// Append the migration script of every group to this file.
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Regex of table names to leave out (case-insensitive).
    #[arg(long)]
    ignore_table: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Report)]
    format: Format,

    /// Fail on the first malformed statement instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::load(&cli.config)?;
    let ignore = cli.ignore_table.as_deref().map(ignore_pattern).transpose()?;
    let options = LoadOptions {
        strict: cli.strict,
        ..LoadOptions::default()
    };

    let outcomes = run_all(&config, &options, ignore.as_ref()).await?;

    if let Some(path) = &cli.output_file {
        append_sql(path, &outcomes)?;
        info!(path = %path.display(), groups = outcomes.len(), "migration scripts written");
    } else {
        print!("{}", render(&outcomes, cli.format)?);
    }

    let differing = outcomes.iter().filter(|o| o.diff.has_difference()).count();
    if differing == 0 {
        info!("no differences");
        Ok(ExitCode::SUCCESS)
    } else {
        info!(groups = differing, "differences found");
        Ok(ExitCode::FAILURE)
    }
}
