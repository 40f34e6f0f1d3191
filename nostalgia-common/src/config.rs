//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration is read from a TOML file. A missing file is not an
//! error; the caller decides how to report it and falls back to its defaults.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "NOSTALGIA_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "nostalgia.db";

/// Load a TOML configuration file into `T`
///
/// - File missing: `Ok(None)`, nothing logged (callers often load config
///   before logging is initialised)
/// - File present but unreadable or malformed: `Error::Config`
pub fn load_toml_config<T>(path: &Path) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML failed: {}", e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))?;

    Ok(Some(config))
}

/// Default location of the bootstrap TOML file for a module
///
/// `~/.config/nostalgia/<module>.toml` (platform config dir), or `./<module>.toml`
/// when the platform has no config directory.
pub fn default_config_path(module_name: &str) -> PathBuf {
    let file_name = format!("{}.toml", module_name);
    dirs::config_dir()
        .map(|d| d.join("nostalgia").join(&file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

/// Root folder resolution, highest priority first:
/// 1. Command-line argument
/// 2. `NOSTALGIA_ROOT_FOLDER` environment variable
/// 3. TOML `root_folder`
/// 4. OS-dependent compiled default
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            cli_arg: None,
            toml_root: None,
        }
    }

    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    pub fn with_toml_root(mut self, path: Option<PathBuf>) -> Self {
        self.toml_root = path;
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!(module = %self.module_name, "Root folder from command line");
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                debug!(module = %self.module_name, "Root folder from {}", ROOT_FOLDER_ENV);
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            debug!(module = %self.module_name, "Root folder from TOML config");
            return path.clone();
        }

        default_root_folder()
    }
}

/// OS-dependent default root folder
///
/// Linux `~/.local/share/nostalgia`, macOS `~/Library/Application Support/nostalgia`,
/// Windows `%LOCALAPPDATA%\nostalgia`.
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("nostalgia"))
        .unwrap_or_else(|| PathBuf::from("./nostalgia_data"))
}

/// Creates the root folder on first start and locates files inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }
}
