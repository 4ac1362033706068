use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::{load_config, Config};
use commands::filters::FiltersOptions;
use commands::serialize::SerializeOptions;
use commands::{CommandContext, CommandError};
use lucene_filters::PositiveOperator;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                match serde_json::to_string_pretty(&error_json) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("Error: {e}");
            }
            error_exit_code(&e)
        }
    }
}

/// Sends diagnostics to stderr. `RUST_LOG` overrides the level picked from
/// `--verbose`/`--quiet`.
fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> commands::Result<()> {
    // Config and completions work without a loadable config.
    match &cli.command {
        None => {
            Cli::command().print_help()?;
            return Ok(());
        }
        Some(Commands::Completions { shell }) => {
            return Ok(commands::completions::execute(shell)?);
        }
        Some(Commands::Config { command }) => {
            let ctx = CommandContext::from_cli(cli, &Config::default());
            return match command.unwrap_or(ConfigCommands::Show) {
                ConfigCommands::Show => commands::config::execute_show(&ctx),
                ConfigCommands::Path => commands::config::execute_path(&ctx),
                ConfigCommands::Init => commands::config::execute_init(&ctx),
            };
        }
        Some(_) => {}
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);
    let registry = commands::load_registry(cli, &config)?;

    match &cli.command {
        Some(Commands::Filters { query, operator }) => {
            let opts = FiltersOptions {
                query: query.clone(),
                operator: operator
                    .map(PositiveOperator::from)
                    .or(config.default_operator)
                    .unwrap_or_default(),
            };
            commands::filters::execute(&ctx, &registry, &opts)
        }
        Some(Commands::Serialize { field, values }) => {
            let opts = SerializeOptions {
                field: field.clone(),
                values: values.clone(),
            };
            commands::serialize::execute(&ctx, &registry, &opts)
        }
        Some(Commands::Fields) => commands::fields::execute(&ctx, &registry),
        Some(Commands::Config { .. } | Commands::Completions { .. }) | None => Ok(()),
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Parse(_) => "PARSE_ERROR",
        CommandError::Rejected(_) => "UNSUPPORTED_QUERY",
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::Registry(_) => "REGISTRY_ERROR",
        CommandError::UnknownField { .. } => "UNKNOWN_FIELD",
        CommandError::InvalidArguments(_) => "INVALID_ARGUMENTS",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    match e {
        CommandError::Parse(_)
        | CommandError::Rejected(_)
        | CommandError::Filter(_)
        | CommandError::UnknownField { .. }
        | CommandError::InvalidArguments(_)
        | CommandError::Json(_) => ExitCode::from(1),
        CommandError::Io(_) => ExitCode::from(3),
        CommandError::Config(_) | CommandError::Registry(_) => ExitCode::from(5),
    }
}
