//! Command implementations for the lqf CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod fields;
pub mod filters;
pub mod serialize;

use std::env;

use lucene_filters::{FieldDescriptor, FieldRegistry};

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Query text could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] lucene_ast::ParseError),

    /// Query parsed but has no filter representation.
    #[error("{0}")]
    Rejected(#[from] lucene_filters::Rejection),

    /// A value does not fit its field.
    #[error("filter error: {0}")]
    Filter(#[from] lucene_filters::FilterError),

    /// Field registry could not be loaded.
    #[error("registry error: {0}")]
    Registry(#[from] lucene_filters::RegistryError),

    /// Field name not in the registry.
    #[error("unknown field '{name}'{}", suggestion_hint(.suggestion))]
    UnknownField {
        /// The name as given.
        name: String,
        /// Closest registered name, if any is close enough.
        suggestion: Option<String>,
    },

    /// Command arguments do not fit together.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Builds an unknown field error with a suggestion from the registry.
    pub fn unknown_field(registry: &FieldRegistry, name: &str) -> Self {
        CommandError::UnknownField {
            name: name.to_string(),
            suggestion: registry.suggest(name).map(str::to_string),
        }
    }
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Colors are off when `--no-color` is given, when `NO_COLOR` is set, or
    /// when the config turns them off.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && config.output.color.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}

/// Loads the field registry for query commands.
///
/// `--fields` wins over the `[[fields]]` tables of the config file. With
/// neither, only free text on the implicit field is understood.
pub fn load_registry(cli: &Cli, config: &Config) -> Result<FieldRegistry> {
    if let Some(path) = &cli.fields {
        return Ok(FieldRegistry::load(path)?);
    }
    if config.fields.is_empty() {
        tracing::debug!("no fields configured, using implicit field only");
        return Ok(FieldRegistry::new(vec![FieldDescriptor::implicit("Text")])?);
    }
    Ok(FieldRegistry::new(config.fields.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use lucene_filters::{FieldType, FilterValue};

    #[test]
    fn test_unknown_field_message_with_suggestion() {
        let registry = FieldRegistry::new(vec![FieldDescriptor::new(
            "color",
            "Color",
            FieldType::Enum,
            FilterValue::Enum(vec![]),
        )])
        .unwrap();

        let err = CommandError::unknown_field(&registry, "colr");
        assert_eq!(err.to_string(), "unknown field 'colr' (did you mean 'color'?)");

        let err = CommandError::unknown_field(&registry, "COLOR");
        assert_eq!(err.to_string(), "unknown field 'COLOR' (did you mean 'color'?)");

        let err = CommandError::unknown_field(&registry, "weight");
        assert_eq!(err.to_string(), "unknown field 'weight'");
    }

    #[test]
    fn test_default_registry_has_implicit_field() {
        let cli = Cli::parse_from(["lqf", "fields"]);
        let registry = load_registry(&cli, &Config::default()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("<implicit>").is_some());
    }

    #[test]
    fn test_registry_from_config_fields() {
        let cli = Cli::parse_from(["lqf", "fields"]);
        let config = Config {
            fields: vec![
                FieldDescriptor::implicit("Text"),
                FieldDescriptor::new("size", "Size", FieldType::Integer, FilterValue::Integer(1)),
            ],
            ..Config::default()
        };
        let registry = load_registry(&cli, &config).unwrap();
        assert!(registry.get("size").is_some());
    }

    #[test]
    fn test_config_can_disable_colors() {
        let cli = Cli::parse_from(["lqf", "fields"]);
        let mut config = Config::default();
        config.output.color = Some(false);
        assert!(!CommandContext::from_cli(&cli, &config).use_colors);
    }
}
