//! Report configuration
//!
//! Threshold policies and chart selection come from an optional
//! `.native-image-report.toml`; command-line flags override it.

pub mod file;
pub mod loader;

pub use file::{ChartSettings, ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
