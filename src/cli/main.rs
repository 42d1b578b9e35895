//! Command-line interface entry point for `amalstats`

mod args;
mod commands;

use amal_stats::config::Config;
use amal_stats::core::store::JsonFileStore;
use amal_stats::core::AcademyService;
use amal_stats::info;
use amal_stats::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use args::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config; fall back to warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = (!config.logging.file.is_empty())
        .then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let command = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            return ExitCode::SUCCESS;
        }
        other => other,
    };

    let store = match JsonFileStore::open(&config.storage.data_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!(
                "✗ Failed to open data directory {}: {e}",
                config.storage.data_dir
            );
            return ExitCode::FAILURE;
        }
    };
    let service = AcademyService::new(store);

    let result = match command {
        Command::Config { .. } => Ok(()),
        Command::Import { file } => commands::import::run(&service, &file),
        Command::Enroll { course, student } => commands::academy::enroll(&service, course, student),
        Command::Progress {
            course,
            student,
            value,
        } => commands::academy::progress(&service, course, student, value),
        Command::Rate {
            course,
            student,
            stars,
            review,
        } => commands::academy::rate(&service, course, student, stars, review),
        Command::Watch {
            video,
            student,
            seconds,
            completed,
        } => commands::academy::watch(&service, video, student, seconds, completed),
        Command::Like {
            video,
            student,
            dislike,
        } => commands::academy::like(&service, video, student, dislike),
        Command::Rollup { category } => commands::report::rollup(&service, category),
        Command::Report {
            category,
            format,
            output,
        } => commands::report::run(&service, category, &format, output.as_deref(), &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
