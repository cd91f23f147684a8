//! Configuration file data structures

use crate::classify::Thresholds;
use crate::error::ReportError;
use crate::report::ChartSelection;
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".native-image-report.toml";

/// native-image-report configuration file structure
///
/// ```toml
/// [thresholds.default]
/// lower-bound = 98.0
/// upper-bound = 108.0
/// smaller-is-better = true
///
/// [thresholds.resource-usage]
/// upper-bound = 120.0
///
/// [charts]
/// categories = "image details, resource usage"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Threshold policies per metric class
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Chart style settings
    #[serde(default)]
    pub charts: ChartSettings,
}

/// Which comparison categories render as charts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Free text naming categories, e.g. `"analysis results, image details"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
}

impl ChartSettings {
    /// Parsed selection, empty when no categories are configured
    pub fn selection(&self) -> ChartSelection {
        self.categories
            .as_deref()
            .map(ChartSelection::parse)
            .unwrap_or_default()
    }
}

impl ConfigFile {
    /// Validate that every threshold policy is usable
    pub fn validate(&self) -> Result<(), ReportError> {
        self.thresholds.validate()
    }
}
