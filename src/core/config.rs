//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.terra/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Theme;
use crate::core::prefs;
use crate::data::sources::rest::DEFAULT_API_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TerraConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub theme: Option<Theme>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourcesConfig {
    pub data_file: Option<String>,
    pub api_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PreferencesConfig {
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_FILE: &str = "data/countries.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_file: PathBuf,
    pub api_url: String,
    /// Theme to use when no preference has been saved yet.
    pub default_theme: Theme,
    /// Theme forced from the command line; beats the saved preference.
    pub cli_theme: Option<Theme>,
    pub prefs_file: Option<PathBuf>,
}

/// Values taken from command-line flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub data_file: Option<String>,
    pub api_url: Option<String>,
    pub theme: Option<Theme>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.terra/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".terra").join("config.toml"))
}

/// Load config from `~/.terra/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TerraConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TerraConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TerraConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<TerraConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(TerraConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TerraConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Terra Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# theme = "dark"                     # "dark" or "light"; a saved toggle wins

# [sources]
# data_file = "data/countries.json"  # Or set TERRA_DATA_FILE, or --data
# api_url = "https://restcountries.com/v3.1/all?fields=name,population,region,subregion,capital,flags,borders,cca3,languages,currencies"

# [preferences]
# file = "/home/me/.terra/preferences.json"   # Or set TERRA_PREFS_FILE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TerraConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env<F>(config: &TerraConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Data file: CLI → env → config → default
    let data_file = cli
        .data_file
        .clone()
        .or_else(|| env("TERRA_DATA_FILE"))
        .or_else(|| config.sources.data_file.clone())
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

    // API URL: CLI → env → config → default
    let api_url = cli
        .api_url
        .clone()
        .or_else(|| env("TERRA_API_URL"))
        .or_else(|| config.sources.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    // Default theme: env → config → dark. CLI is kept apart so it can
    // override a saved preference.
    let default_theme = env("TERRA_THEME")
        .and_then(|t| Theme::parse(&t))
        .or(config.general.theme)
        .unwrap_or_default();

    // Preferences file: env → config → ~/.terra/preferences.json
    let prefs_file = env("TERRA_PREFS_FILE")
        .or_else(|| config.preferences.file.clone())
        .map(PathBuf::from)
        .or_else(prefs::default_prefs_path);

    ResolvedConfig {
        data_file: PathBuf::from(data_file),
        api_url,
        default_theme,
        cli_theme: cli.theme,
        prefs_file,
    }
}

impl ResolvedConfig {
    /// Theme precedence: CLI flag → saved preference → configured default.
    pub fn initial_theme(&self, saved: Option<Theme>) -> Theme {
        self.cli_theme.or(saved).unwrap_or(self.default_theme)
    }
}
