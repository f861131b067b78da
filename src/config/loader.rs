//! Configuration loading and discovery for `lvsprite.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{BuildConfig, HeaderConfig, LvConfig, OutputConfig, ProjectConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "lvsprite.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse lvsprite.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override input directory
    pub src: Option<PathBuf>,
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override the header file name
    pub header: Option<String>,
    /// Override the included LVGL header
    pub include: Option<String>,
    /// Continue after decode failures
    pub keep_going: Option<bool>,
}

/// Find lvsprite.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a config file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find lvsprite.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start directory,
/// useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a lvsprite.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration with no sprites.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("firmware/lvsprite.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<LvConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<LvConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parse and validate configuration text.
pub fn parse_config(contents: &str) -> Result<LvConfig, ConfigError> {
    let config: LvConfig = toml::from_str(contents)?;
    check(&config)?;
    Ok(config)
}

fn check(config: &LvConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Create a default configuration when no lvsprite.toml is found.
///
/// The project name is the current directory name; the sprite list is empty.
pub fn default_config() -> LvConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unnamed".to_string());

    LvConfig {
        project: ProjectConfig {
            name: project_name,
            src: PathBuf::from("assets"),
            out: PathBuf::from("generated"),
        },
        output: OutputConfig::default(),
        header: HeaderConfig::default(),
        build: BuildConfig::default(),
        sprites: Vec::new(),
        animations: Vec::new(),
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
///
/// # Example
/// ```ignore
/// let mut config = load_config(None)?;
/// let overrides = CliOverrides { out: Some(PathBuf::from("src")), ..Default::default() };
/// merge_cli_overrides(&mut config, &overrides)?;
/// ```
pub fn merge_cli_overrides(
    config: &mut LvConfig,
    overrides: &CliOverrides,
) -> Result<(), ConfigError> {
    if let Some(ref src) = overrides.src {
        config.project.src = src.clone();
    }
    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }
    if let Some(ref header) = overrides.header {
        config.header.file = header.clone();
        // A guard derived from the old file name would be misleading.
        config.header.guard = None;
    }
    if let Some(ref include) = overrides.include {
        config.output.include = include.clone();
    }
    if let Some(keep_going) = overrides.keep_going {
        config.build.keep_going = keep_going;
    }

    check(config)
}

/// Get the project root directory from a config file path.
///
/// Returns the parent directory of the lvsprite.toml file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
