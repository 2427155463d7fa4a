mod cli;
mod config;
mod error;
mod sync;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;
use config::Config;
use error::format_bytes;
use sync::output::{OutputMode, SyncEvent};
use sync::{SyncEngine, SyncStats};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // Wrong argument count exits here with a usage message
    let mut cli = Cli::parse();

    if !cli.no_config {
        let config = Config::load(cli.config.as_deref())?;
        cli.apply_config(&config);
    }

    // Setup logging (stderr, so stdout stays clean for action lines and JSON)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().as_str()));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    cli.validate()?;

    let output = cli.output_mode();
    if output == OutputMode::Human && cli.dry_run {
        println!("Mode: Dry-run (no changes will be made)\n");
    }

    let engine = SyncEngine::new(cli.dry_run, output);
    let stats = match engine.sync(&cli.folder_a, &cli.folder_b) {
        Ok(stats) => stats,
        Err(e) => {
            if output == OutputMode::Json {
                SyncEvent::Error {
                    message: e.to_string(),
                }
                .emit();
            }
            return Err(e.into());
        }
    };

    if output == OutputMode::Human {
        print_summary(&cli, &stats);
    }

    Ok(())
}

fn print_summary(cli: &Cli, stats: &SyncStats) {
    if cli.dry_run {
        println!("\n{}\n", "✓ Dry-run complete (no changes made)".green().bold());
    } else if stats.changes() == 0 {
        println!("\n{}\n", "✓ Already in sync".green().bold());
    } else {
        println!("\n{}\n", "✓ Sync complete".green().bold());
    }

    let count = |n: usize| {
        if n > 0 {
            n.to_string().yellow()
        } else {
            n.to_string().bright_black()
        }
    };

    println!("  Directories created: {}", count(stats.dirs_created));
    println!("  Files created:       {}", count(stats.files_created));
    println!("  Files updated:       {}", count(stats.files_updated));
    println!(
        "  Files skipped:       {}",
        stats.files_skipped.to_string().bright_black()
    );
    println!();
    println!(
        "  Bytes transferred:   {}",
        format_bytes(stats.bytes_transferred).cyan()
    );
    println!("  Duration:            {}", format_duration(stats.duration).cyan());
    println!();
    println!(
        "Synchronization between {} and {} completed.",
        cli.folder_a.display(),
        cli.folder_b.display()
    );
}

fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if secs >= 60 {
        let mins = secs / 60;
        let secs = secs % 60;
        if mins >= 60 {
            let hours = mins / 60;
            let mins = mins % 60;
            format!("{}h {}m {}s", hours, mins, secs)
        } else {
            format!("{}m {}s", mins, secs)
        }
    } else if secs > 0 {
        format!("{}.{:03}s", secs, millis)
    } else {
        format!("{}ms", millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.500s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
