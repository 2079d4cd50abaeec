//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::SearchCriteria;
use crate::query::MAX_RESULTS;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// yuag - search the YUAG collection catalog
///
/// Look up museum objects by label, date, agent or classification,
/// or show the full record for a single object.
///
/// Examples:
///   yuag search --classifier painting
///   yuag search -a rembrandt -d 16
///   yuag --format json show 42
///   yuag --database ./lux.sqlite search -l "self-portrait"
///   yuag --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the catalog database
    ///
    /// Defaults to lux.sqlite, or the path in .yuag.toml.
    #[arg(long, value_name = "FILE", env = "YUAG_DATABASE")]
    pub database: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .yuag.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Maximum number of search results (at most 1000)
    #[arg(long, value_name = "COUNT")]
    pub limit: Option<usize>,

    /// Query timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .yuag.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search objects; every given term must match (substring, case-insensitive)
    Search(SearchArgs),

    /// Show the full record for one object
    Show {
        /// Object identifier
        #[arg(value_name = "ID", allow_negative_numbers = true)]
        id: i64,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Text contained in the object label
    #[arg(short, long)]
    pub label: Option<String>,

    /// Text contained in the object date
    #[arg(short, long)]
    pub date: Option<String>,

    /// Text contained in an agent name or role
    #[arg(short, long)]
    pub agent: Option<String>,

    /// Text contained in a classification
    #[arg(short = 'c', long)]
    pub classifier: Option<String>,
}

impl From<&SearchArgs> for SearchCriteria {
    fn from(args: &SearchArgs) -> Self {
        Self {
            label: args.label.clone(),
            date: args.date.clone(),
            agent: args.agent.clone(),
            classifier: args.classifier.clone(),
        }
    }
}

/// Output format for rendered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        match self.command {
            None => return Err("A command is required: 'search' or 'show'".to_string()),
            Some(Command::Show { id }) if id <= 0 => {
                return Err(format!("Object id must be a positive integer, not '{}'", id));
            }
            _ => {}
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(limit) = self.limit {
            if limit == 0 || limit > MAX_RESULTS {
                return Err(format!("Limit must be between 1 and {}", MAX_RESULTS));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command: Some(command),
            database: None,
            config: None,
            format: None,
            output: None,
            limit: None,
            timeout: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_search() {
        let args = Args::try_parse_from([
            "yuag", "--format", "json", "search", "-a", "rembrandt", "-c", "prints",
        ])
        .unwrap();

        assert_eq!(args.format, Some(OutputFormat::Json));
        match args.command {
            Some(Command::Search(ref search)) => {
                let criteria = SearchCriteria::from(search);
                assert_eq!(criteria.agent.as_deref(), Some("rembrandt"));
                assert_eq!(criteria.classifier.as_deref(), Some("prints"));
                assert_eq!(criteria.label, None);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_parse_show() {
        let args = Args::try_parse_from(["yuag", "show", "42"]).unwrap();
        assert!(matches!(args.command, Some(Command::Show { id: 42 })));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_show_rejects_non_numeric_id() {
        assert!(Args::try_parse_from(["yuag", "show", "abc"]).is_err());
    }

    #[test]
    fn test_validation_non_positive_id() {
        let args = make_args(Command::Show { id: 0 });
        assert!(args.validate().is_err());

        let args = make_args(Command::Show { id: -4 });
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_command() {
        let mut args = make_args(Command::Show { id: 1 });
        args.command = None;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_limit() {
        let mut args = make_args(Command::Search(SearchArgs::default()));
        args.limit = Some(0);
        assert!(args.validate().is_err());

        args.limit = Some(MAX_RESULTS + 1);
        assert!(args.validate().is_err());

        args.limit = Some(MAX_RESULTS);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Show { id: 1 });
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Show { id: 1 });
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
