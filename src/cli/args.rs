//! CLI argument definitions for `amalstats`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use amal_stats::config::ConfigOverrides;
use amal_stats::core::models::video::is_valid_position;
use amal_stats::core::models::EntityId;
use amal_stats::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to
/// [`Level`] for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        f.write_str(as_str)
    }
}

/// Parse a playback position; must be a finite, non-negative number of seconds
fn parse_position(value: &str) -> Result<f64, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if is_valid_position(seconds) {
        Ok(seconds)
    } else {
        Err(format!("'{value}' must be a finite, non-negative number of seconds"))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Configuration key (`level`, `file`, `verbose`, `data_dir`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Reset one configuration value to its default.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Load categories, courses, videos and users from a JSON bundle.
    Import {
        /// Path to the bundle file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Enroll a student in a course.
    Enroll {
        /// Course id
        #[arg(long)]
        course: EntityId,
        /// Student id
        #[arg(long)]
        student: EntityId,
    },
    /// Report a student's course progress (0-100; lower values are ignored).
    Progress {
        /// Course id
        #[arg(long)]
        course: EntityId,
        /// Student id
        #[arg(long)]
        student: EntityId,
        /// Progress percentage
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    /// Rate a course (1-5 stars). Re-rating replaces the earlier rating.
    Rate {
        /// Course id
        #[arg(long)]
        course: EntityId,
        /// Student id
        #[arg(long)]
        student: EntityId,
        /// Star rating
        #[arg(long)]
        stars: u8,
        /// Optional review text
        #[arg(long)]
        review: Option<String>,
    },
    /// Report how far a student has watched a video.
    Watch {
        /// Video id
        #[arg(long)]
        video: EntityId,
        /// Student id
        #[arg(long)]
        student: EntityId,
        /// Furthest point reached, in seconds
        #[arg(long, value_parser = parse_position)]
        seconds: f64,
        /// Mark the video as completed regardless of watch time
        #[arg(long)]
        completed: bool,
    },
    /// Like a video, or withdraw the like when sent twice.
    Like {
        /// Video id
        #[arg(long)]
        video: EntityId,
        /// Student id
        #[arg(long)]
        student: EntityId,
        /// Vote down instead of up
        #[arg(long)]
        dislike: bool,
    },
    /// Recompute a category's statistics.
    ///
    /// Refreshes the watch time of every member course first.
    Rollup {
        /// Category id
        #[arg(value_name = "CATEGORY")]
        category: EntityId,
    },
    /// Render a category report.
    Report {
        /// Category id
        #[arg(value_name = "CATEGORY")]
        category: EntityId,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "md")]
        format: String,

        /// Output file path (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "amalstats",
    about = "Amal Academy statistics command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Override the document store directory for this run
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the reports directory for this run
    #[arg(long, value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Only the storage and report paths are overridden here; the logging
    /// flags are applied directly to the runtime logger.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            data_dir: self
                .data_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            ..ConfigOverrides::default()
        }
    }
}
