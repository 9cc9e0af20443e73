pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use planfit_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};
use planfit_core::ApplicationError;

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "planfit",
    about = "Planfit mobile plan diagnosis CLI",
    long_about = "Rank mobile plans for a person or household, inspect the plan catalog, and show effective configuration.",
    after_help = "Examples:\n  planfit diagnose --input household.json --pretty\n  planfit catalog\n  planfit config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a planfit.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override logging.level (trace|debug|info|warn|error)")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Diagnose the persons in an input document and print the ranked result")]
    Diagnose {
        #[arg(long, help = "JSON diagnosis input with `persons` and `common`")]
        input: PathBuf,
        #[arg(long, help = "Plan catalog JSON; defaults to catalog.path or the bundled catalog")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Ranked plans kept per person")]
        top_n: Option<usize>,
        #[arg(long, help = "Pretty-print the JSON payload")]
        pretty: bool,
    },
    #[command(about = "Summarize the plans and carriers in the active catalog")]
    Catalog {
        #[arg(long, help = "Plan catalog JSON; defaults to catalog.path or the bundled catalog")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Diagnose { .. } => "diagnose",
            Self::Catalog { .. } => "catalog",
            Self::Config => "config",
        }
    }

    fn overrides(&self) -> ConfigOverrides {
        match self {
            Self::Diagnose { catalog, top_n, .. } => {
                ConfigOverrides { top_n: *top_n, catalog_path: catalog.clone(), ..Default::default() }
            }
            Self::Catalog { catalog } => {
                ConfigOverrides { catalog_path: catalog.clone(), ..Default::default() }
            }
            Self::Config => ConfigOverrides::default(),
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let command_name = cli.command.name();

    let mut overrides = cli.command.overrides();
    overrides.log_level = cli.log_level.clone();
    let options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: overrides.clone(),
    };

    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            let result = CommandResult::from_error(command_name, &ApplicationError::from(error));
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Diagnose { input, pretty, .. } => {
            commands::diagnose::run(&config, &input, pretty)
        }
        Command::Catalog { .. } => commands::catalog::run(&config),
        Command::Config => commands::config::run(&config, cli.config.as_deref(), &overrides),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout carries only the command payload.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}
