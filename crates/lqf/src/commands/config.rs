//! Config command implementation.
//!
//! View and create the configuration file.
//! Config file is located at ~/.config/lqf/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use lucene_filters::{FieldDescriptor, PositiveOperator};
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Default config file contents.
const DEFAULT_CONFIG: &str = r#"# lqf - Lucene query filters configuration

# Config schema version (do not modify)
version = 1

# Operator joining filters: "implicit", "and" or "or"
# default_operator = "implicit"

# Output preferences
[output]
# color = true              # Enable colors (respects NO_COLOR env)

# Searchable fields. `--fields <FILE>` replaces this list.
[[fields]]
name = "<implicit>"
display_name = "Text"
type = "string"
default_value = ""

# [[fields]]
# name = "size"
# display_name = "Size"
# type = "integer"
# default_value = 1
# constraints = { min = 0, max = 100 }
"#;

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Operator used when `--operator` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_operator: Option<PositiveOperator>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Field registry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDescriptor>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            default_operator: None,
            output: OutputConfig::default(),
            fields: Vec::new(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/lqf/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("lqf"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("lqf"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    // Check for override env var first
    if let Ok(path) = env::var("LQF_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    Ok(get_config_dir()?.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), fields = config.fields.len(), "loaded config");
    migrate_config(config)
}

fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        if path.exists() {
            println!("Settings:");
            if let Some(operator) = config.default_operator {
                println!("  default_operator: {}", operator.as_str());
            }
            println!("\n[output]");
            if let Some(color) = config.output.color {
                println!("  color: {}", color);
            }
            println!("\n[[fields]]");
            for field in &config.fields {
                println!("  {} ({})", field.name, field.field_type);
            }
        } else {
            println!("(No config file exists. Run 'lqf config init' to create one.)");
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let created = !path.exists();

    if created {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CommandError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }
        fs::write(&path, DEFAULT_CONFIG)
            .map_err(|e| CommandError::Config(format!("Failed to create config file: {}", e)))?;
    }

    if ctx.json_output {
        let output = serde_json::json!({
            "status": if created { "created" } else { "exists" },
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        if created {
            println!("Created default config at: {}", path.display());
        } else {
            println!("Config already exists at: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucene_filters::{FieldRegistry, FieldType};
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert!(config.default_operator.is_none());
        assert_eq!(config.fields.len(), 1);
        assert!(config.fields[0].is_implicit());
        assert!(FieldRegistry::new(config.fields).is_ok());
    }

    #[test]
    fn test_config_without_version_gets_current() {
        let config = parse_config("default_operator = \"and\"").unwrap();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.default_operator, Some(PositiveOperator::And));
    }

    #[test]
    fn test_config_with_fields() {
        let config = parse_config(
            r#"
[output]
color = false

[[fields]]
name = "size"
display_name = "Size"
type = "integer-range"
default_value = [1, 2]
"#,
        )
        .unwrap();
        assert_eq!(config.output.color, Some(false));
        assert_eq!(config.fields[0].field_type, FieldType::IntegerRange);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        assert!(matches!(
            parse_config("default_operator = \"xor\""),
            Err(CommandError::Config(_))
        ));
    }

    #[test]
    fn test_newer_version_rejected() {
        let config = Config {
            version: CONFIG_VERSION + 1,
            ..Config::default()
        };
        assert!(migrate_config(config).is_err());
    }

    #[test]
    fn test_default_config_serializes_without_fields() {
        let serialized = toml::to_string(&Config::default()).unwrap();
        assert!(serialized.contains("version = 1"));
        assert!(!serialized.contains("fields"));
    }

    #[test]
    #[serial]
    fn test_config_path_env_override() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.toml");
        env::set_var("LQF_CONFIG", &path);

        assert_eq!(get_config_path().unwrap(), path);
        // Missing file falls back to defaults.
        assert!(load_config().unwrap().fields.is_empty());

        env::remove_var("LQF_CONFIG");
    }

    #[test]
    #[serial]
    fn test_init_writes_default_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        env::set_var("LQF_CONFIG", &path);

        let ctx = CommandContext {
            json_output: false,
            use_colors: false,
            quiet: true,
            verbose: false,
        };
        execute_init(&ctx).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

        // A second init leaves an edited file alone.
        fs::write(&path, "version = 1\n").unwrap();
        execute_init(&ctx).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "version = 1\n");

        env::remove_var("LQF_CONFIG");
    }
}
