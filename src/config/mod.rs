//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`CREPPL_COMPILER`, `CREPPL_STD`, `CREPPL_WORKDIR`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./creppl.toml in the current directory
//! 4. $XDG_CONFIG_HOME/creppl/creppl.toml (or ~/.config/creppl/creppl.toml)
//! 5. Built-in defaults
//!
//! Only the first file found is read; files are not merged.

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

mod defaults;
mod types;

pub use types::{
    CompilerConfig, Config, ConfigSource, DisplayConfig, LoadedConfig, SessionConfig,
};

/// Name of both the local and the global config file.
pub const CONFIG_FILE_NAME: &str = "creppl.toml";

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    Ok(load_config_with_source(path_override)?.config)
}

/// Load configuration and report which file it came from.
pub fn load_config_with_source(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
        dirs::home_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot, FHome>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
    home_dir: FHome,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
    FHome: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    apply_env_overrides(&mut config, &env_lookup);
    config.session.workdir = expand_home(&config.session.workdir, home_dir());
    validate(&config)?;
    Ok(LoadedConfig { config, source })
}

fn read_config_text_with_sources<FRead, FRoot>(
    path_override: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(p) = path_override {
        let path = PathBuf::from(p);
        let text = read_file(&path)?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(path) = config_root().map(|dir| dir.join("creppl").join(CONFIG_FILE_NAME)) {
        if let Ok(text) = read_file(&path) {
            return Ok((text, ConfigSource::Global(path)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv)
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(command) = env_lookup("CREPPL_COMPILER").as_deref().and_then(normalized_string) {
        config.compiler.command = command;
    }
    if let Some(std) = env_lookup("CREPPL_STD").as_deref().and_then(normalized_string) {
        config.compiler.std = std;
    }
    if let Some(workdir) = env_lookup("CREPPL_WORKDIR").as_deref().and_then(normalized_string) {
        config.session.workdir = PathBuf::from(workdir);
    }
}

/// Reject values the session cannot run with.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.session.history_size == 0 {
        return Err(ConfigError::Invalid(
            "session.history_size must be at least 1".to_string(),
        ));
    }
    if config.compiler.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "compiler.timeout_secs must be at least 1".to_string(),
        ));
    }
    if normalized_string(&config.compiler.command).is_none() {
        return Err(ConfigError::Invalid(
            "compiler.command must not be empty".to_string(),
        ));
    }
    if normalized_string(&config.compiler.std).is_none() {
        return Err(ConfigError::Invalid(
            "compiler.std must not be empty".to_string(),
        ));
    }
    if normalized_string(&config.session.default_file).is_none() {
        return Err(ConfigError::Invalid(
            "session.default_file must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Replace a leading `~` with `home`, when known.
fn expand_home(path: &Path, home: Option<PathBuf>) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match home {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn normalized_string(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
