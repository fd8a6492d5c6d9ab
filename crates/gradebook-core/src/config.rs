//! gradebook configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How reports are written to the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered console tables.
    #[default]
    Table,
    /// The fixed-width `|`-separated layout with `#` banners.
    Classic,
    /// Pretty-printed JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Classic => write!(f, "classic"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "classic" | "text" => Ok(OutputFormat::Classic),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Top-level gradebook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Backing data file.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    /// Shown in the menu banner.
    #[serde(default = "default_school_name")]
    pub school_name: String,
    /// Report output format.
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("students.txt")
}

fn default_school_name() -> String {
    "Braemar College".to_string()
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            school_name: default_school_name(),
            format: OutputFormat::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// Environment variable overrides: `GRADEBOOK_DATA_FILE`, `GRADEBOOK_FORMAT`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("gradebook.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|home| home.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(data_file) = std::env::var("GRADEBOOK_DATA_FILE") {
        config.data_file = PathBuf::from(data_file);
    }
    if let Ok(format) = std::env::var("GRADEBOOK_FORMAT") {
        config.format = format
            .parse()
            .map_err(|e: String| anyhow::anyhow!("GRADEBOOK_FORMAT: {e}"))?;
    }

    Ok(config)
}

/// Parse a TOML config string, expanding `${VAR}` in `data_file`.
pub fn parse_config(content: &str) -> Result<GradebookConfig> {
    let mut config: GradebookConfig = toml::from_str(content)?;
    config.data_file = PathBuf::from(resolve_env_vars(&config.data_file.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
