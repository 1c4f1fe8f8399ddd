//! Electoral roll checker CLI.

use clap::{ColorChoice, Parser};
use electoral_cli::commands::{CheckRequest, run_check, run_count, run_inspect};
use electoral_cli::logging::{LogConfig, LogFormat, init_logging};
use electoral_cli::settings::{Settings, SettingsOverrides};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{CheckArgs, Cli, Command, InspectArgs, LogFormatArg, LogLevelArg};
use crate::summary::{print_check_report, print_count, print_json, print_preview};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match cli.command {
        Command::Check(args) => check(&settings, args),
        Command::Count => {
            print_count(run_count(&settings));
            0
        }
        Command::Inspect(args) => inspect(&settings, &args),
    };
    std::process::exit(exit_code);
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    settings.apply_overrides(SettingsOverrides {
        reference: cli.reference.clone(),
        timeout_secs: cli.timeout_secs,
        log_personal_data: cli.log_data,
    });
    Ok(settings)
}

fn check(settings: &Settings, args: CheckArgs) -> i32 {
    let json = args.json;
    let request = CheckRequest {
        family_name: args.family,
        given_names: args.given,
        birth_date: args.birth_date,
        birth_place: args.birth_place,
        card_number: args.card_number,
    };
    let report = run_check(settings, &request);
    if json {
        if let Err(error) = print_json(&report) {
            eprintln!("error: {error}");
            return 1;
        }
    } else {
        print_check_report(&report);
    }
    report.exit_code()
}

fn inspect(settings: &Settings, args: &InspectArgs) -> i32 {
    let result = run_inspect(settings, args.rows).and_then(|preview| {
        if args.json {
            print_json(&preview)
        } else {
            print_preview(&preview);
            Ok(())
        }
    });
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
