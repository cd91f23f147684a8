//! Command handlers for native-image-report CLI
//!
//! This module contains all command implementations, organized by functionality.
//! Each submodule handles a specific CLI command.

pub mod compare;
pub mod completions;
pub mod report;

use crate::config::{ConfigFile, ConfigLoader};
use crate::error::ReportError;
use crate::infra::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};

// Re-export command functions for convenient access
pub use compare::{cmd_compare, CompareOptions, CompareStyle};
pub use completions::cmd_completions;
pub use report::{cmd_report, ReportOptions};

/// Where and how a command writes its result
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Emit the JSON verdict summary instead of markup
    pub json: bool,
    /// Write to this file instead of stdout
    pub output: Option<PathBuf>,
    /// Use emoji in console messages
    pub use_emoji: bool,
}

/// Explicit config path, or `.native-image-report.toml` in the working directory
fn load_config<FS: FileSystem>(explicit: Option<&Path>, fs: &FS) -> Result<ConfigFile> {
    match explicit {
        Some(path) => ConfigLoader::load_from_path_with_fs(path, fs),
        None => ConfigLoader::load_with_fs(Path::new("."), fs),
    }
}

/// Write `text` to the requested file, or stdout
fn emit<FS: FileSystem>(text: &str, options: &OutputOptions, fs: &FS) -> Result<()> {
    let Some(path) = &options.output else {
        print!("{}", text);
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs.create_dir_all(parent).map_err(|source| ReportError::Io {
            context: format!("creating {}", parent.display()),
            source,
        })?;
    }
    fs.write(path, text).map_err(|source| ReportError::Io {
        context: format!("writing {}", path.display()),
        source,
    })?;
    log::info!("Wrote report to {}", path.display());
    Ok(())
}
