//! Configuration file loading

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::ReportError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .native-image-report.toml in the given directory
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use native_image_report::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Upper bound: {}%", config.thresholds.default.upper_bound);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {} found, using default thresholds", CONFIG_FILE_NAME);
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context(format!("Failed to read {}", CONFIG_FILE_NAME));
            }
        };

        Self::parse(&contents, &config_path)
    }

    /// Load config from an explicitly requested path, which must exist
    pub fn load_from_path(path: &Path) -> Result<ConfigFile> {
        Self::load_from_path_with_fs(path, &RealFileSystem)
    }

    /// Load an explicit config path with a custom filesystem implementation
    pub fn load_from_path_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<ConfigFile> {
        let contents = fs.read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ReportError::ConfigNotFound {
                    path: path.to_path_buf(),
                    source,
                }
            } else {
                ReportError::Io {
                    context: format!("reading {}", path.display()),
                    source,
                }
            }
        })?;

        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> Result<ConfigFile> {
        let config: ConfigFile = toml_edit::de::from_str(contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid thresholds in {}", path.display()))?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}
