// Configuration loading (hoopstat.toml) and merging with command-line overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::Cli;

pub const DEFAULT_CONFIG_FILE: &str = "hoopstat.toml";
pub const DEFAULT_INPUT: &str = "players_stats_by_season_full_details.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_DELIMITER: char = ',';

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// File structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    data: DataSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DataSection {
    input: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    delimiter: Option<String>,
}

// ---------------------------------------------------------------------------
// Assembled config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub delimiter: u8,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse a config file. Missing keys fall back to defaults later, in `resolve`.
fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Build the effective config: CLI flags, then the config file, then defaults.
///
/// An explicitly requested config file must exist; the default one is optional.
pub fn resolve(cli: &Cli, base_dir: &Path) -> Result<Config, ConfigError> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => {
            let default_path = base_dir.join(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_file(&default_path)?
            } else {
                ConfigFile::default()
            }
        }
    };
    let data = file.data;

    let input = cli
        .input
        .clone()
        .or(data.input)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output_dir = cli
        .output_dir
        .clone()
        .or(data.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let delimiter = match (cli.delimiter, data.delimiter) {
        (Some(c), _) => c.to_string(),
        (None, Some(s)) => s,
        (None, None) => DEFAULT_DELIMITER.to_string(),
    };

    let config = Config {
        input,
        output_dir,
        delimiter: parse_delimiter(&delimiter)?,
    };
    validate(&config)?;
    Ok(config)
}

/// Loads config relative to the current working directory.
pub fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    resolve(cli, &cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    let mut chars = value.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return Err(ConfigError::ValidationError {
            field: "data.delimiter".into(),
            message: format!("must be a single character, got {value:?}"),
        });
    };
    if !c.is_ascii() || matches!(c, '"' | '\n' | '\r') {
        return Err(ConfigError::ValidationError {
            field: "data.delimiter".into(),
            message: format!("unsupported delimiter {c:?}"),
        });
    }
    Ok(c as u8)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let path_fields: &[(&str, &Path)] = &[
        ("data.input", config.input.as_path()),
        ("data.output_dir", config.output_dir.as_path()),
    ];
    for (name, path) in path_fields {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
