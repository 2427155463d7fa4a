use crate::config::Config;
use crate::sync::output::OutputMode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sync-folders")]
#[command(about = "Two-way folder synchronization: the newest copy of each file wins", long_about = None)]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Make both folders contain the newest version of every file
    sync-folders ~/notes /mnt/usb/notes

    # Preview what would change
    sync-folders ~/notes /mnt/usb/notes --dry-run

    # Machine-readable output (NDJSON)
    sync-folders ~/notes /mnt/usb/notes --json

Files are compared by size and modification time only. Nothing is ever
deleted: a file removed from one side is copied back from the other.")]
pub struct Cli {
    /// First folder
    pub folder_a: PathBuf,

    /// Second folder (created if missing and the first folder has entries)
    pub folder_b: PathBuf,

    /// Show changes without applying them (dry-run)
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only show errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output NDJSON events instead of human-readable lines
    #[arg(long)]
    pub json: bool,

    /// Read defaults from this config file instead of the standard location
    #[arg(long, env = "SYNC_FOLDERS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore any config file (wins over --config)
    #[arg(long)]
    pub no_config: bool,
}

impl Cli {
    /// Fill in flags the user didn't pass from the config file
    pub fn apply_config(&mut self, config: &Config) {
        if !self.dry_run {
            self.dry_run = config.dry_run.unwrap_or(false);
        }
        if !self.json {
            self.json = config.json.unwrap_or(false);
        }
        // An explicit -v on the command line overrides a configured quiet, and vice versa
        if !self.quiet && self.verbose == 0 {
            self.quiet = config.quiet.unwrap_or(false);
            if !self.quiet {
                self.verbose = config.verbose.unwrap_or(0);
            }
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.quiet && self.verbose > 0 {
            anyhow::bail!("--quiet and --verbose cannot be used together");
        }

        for root in [&self.folder_a, &self.folder_b] {
            if root.exists() && !root.is_dir() {
                anyhow::bail!("Not a directory: {}", root.display());
            }
        }

        Ok(())
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Human
        }
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.quiet || self.json {
            return tracing::Level::ERROR;
        }

        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["sync-folders"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_requires_exactly_two_folders() {
        assert!(Cli::try_parse_from(["sync-folders"]).is_err());
        assert!(Cli::try_parse_from(["sync-folders", "/a"]).is_err());
        assert!(Cli::try_parse_from(["sync-folders", "/a", "/b", "/c"]).is_err());
        assert!(Cli::try_parse_from(["sync-folders", "/a", "/b"]).is_ok());
    }

    #[test]
    fn test_validate_ok() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        let cli = cli(&[a.path().to_str().unwrap(), b.path().to_str().unwrap()]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_second_folder_ok() {
        let a = TempDir::new().unwrap();
        let b = a.path().join("not-yet");
        let cli = cli(&[a.path().to_str().unwrap(), b.to_str().unwrap()]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_file_root() {
        let a = TempDir::new().unwrap();
        let file = a.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let other = TempDir::new().unwrap();

        let cli = cli(&[file.to_str().unwrap(), other.path().to_str().unwrap()]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_same_folder_twice() {
        // Every file compares equal to itself, so the run is a no-op
        let a = TempDir::new().unwrap();
        let dotted = a.path().join(".");
        let cli = cli(&[a.path().to_str().unwrap(), dotted.to_str().unwrap()]);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_validate_quiet_and_verbose() {
        let cli = cli(&["/a", "/b", "-q", "-v"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        assert_eq!(cli(&["/a", "/b"]).log_level(), tracing::Level::WARN);
        assert_eq!(cli(&["/a", "/b", "-v"]).log_level(), tracing::Level::INFO);
        assert_eq!(cli(&["/a", "/b", "-vv"]).log_level(), tracing::Level::DEBUG);
        assert_eq!(cli(&["/a", "/b", "-vvv"]).log_level(), tracing::Level::TRACE);
        assert_eq!(cli(&["/a", "/b", "-q"]).log_level(), tracing::Level::ERROR);
        assert_eq!(cli(&["/a", "/b", "--json"]).log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_output_mode() {
        assert_eq!(cli(&["/a", "/b"]).output_mode(), OutputMode::Human);
        assert_eq!(cli(&["/a", "/b", "-q"]).output_mode(), OutputMode::Quiet);
        assert_eq!(cli(&["/a", "/b", "-q", "--json"]).output_mode(), OutputMode::Json);
    }

    #[test]
    fn test_apply_config_fills_unset_flags() {
        let mut cli = cli(&["/a", "/b"]);
        let config = Config {
            dry_run: Some(true),
            quiet: None,
            json: None,
            verbose: Some(2),
        };
        cli.apply_config(&config);
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_apply_config_cli_wins() {
        let mut cli = cli(&["/a", "/b", "-v"]);
        let config = Config {
            dry_run: None,
            quiet: Some(true),
            json: None,
            verbose: None,
        };
        cli.apply_config(&config);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 1);
    }
}
