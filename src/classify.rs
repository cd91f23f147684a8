//! Threshold classification of compared metrics
//!
//! A metric is classified by the ratio `current / baseline * 100` against a
//! [`ThresholdPolicy`]. Below the lower bound and above the upper bound are
//! the two outer bands; everything in between is neutral. Polarity decides
//! which outer band counts as an improvement.

use crate::error::ReportError;
use crate::fmt;
use serde::{Deserialize, Serialize};

/// Marker rendered next to an improved metric
pub const IMPROVED_MARKER: &str = "🟢";

/// Marker rendered next to a regressed metric
pub const REGRESSED_MARKER: &str = "🔴";

fn default_lower_bound() -> f64 {
    98.0
}

fn default_upper_bound() -> f64 {
    108.0
}

fn default_smaller_is_better() -> bool {
    true
}

/// Ratio bands and polarity for one class of metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThresholdPolicy {
    /// Ratios (in percent) below this fall in the lower band
    #[serde(default = "default_lower_bound")]
    pub lower_bound: f64,
    /// Ratios (in percent) above this fall in the upper band
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,
    /// Whether a decreasing value is an improvement
    #[serde(default = "default_smaller_is_better")]
    pub smaller_is_better: bool,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self {
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
            smaller_is_better: default_smaller_is_better(),
        }
    }
}

impl ThresholdPolicy {
    /// Same bands with the opposite polarity
    pub fn inverted(self) -> Self {
        Self {
            smaller_is_better: !self.smaller_is_better,
            ..self
        }
    }

    /// Ensure both bounds are positive and ordered
    pub fn validate(&self) -> Result<(), ReportError> {
        let ordered = self.lower_bound <= self.upper_bound;
        let positive = self.lower_bound > 0.0 && self.upper_bound > 0.0;
        if ordered && positive && self.upper_bound.is_finite() {
            Ok(())
        } else {
            Err(ReportError::InvalidThresholds {
                lower: self.lower_bound,
                upper: self.upper_bound,
            })
        }
    }
}

/// Report sections whose metrics share a threshold policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricClass {
    /// Reachability counts
    Analysis,
    /// Image section sizes
    ImageDetails,
    /// Build resource consumption
    ResourceUsage,
}

/// Threshold policies per metric class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Thresholds {
    /// Policy for classes without an override
    #[serde(default)]
    pub default: ThresholdPolicy,
    /// Override for analysis results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ThresholdPolicy>,
    /// Override for image details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_details: Option<ThresholdPolicy>,
    /// Override for resource usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_usage: Option<ThresholdPolicy>,
}

impl Thresholds {
    /// Policy applied to `class`
    pub fn for_class(&self, class: MetricClass) -> ThresholdPolicy {
        let specific = match class {
            MetricClass::Analysis => self.analysis,
            MetricClass::ImageDetails => self.image_details,
            MetricClass::ResourceUsage => self.resource_usage,
        };
        specific.unwrap_or(self.default)
    }

    /// Validate every configured policy
    pub fn validate(&self) -> Result<(), ReportError> {
        self.default.validate()?;
        [self.analysis, self.image_details, self.resource_usage]
            .iter()
            .flatten()
            .try_for_each(ThresholdPolicy::validate)
    }
}

/// Three-way classification of one compared metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Moved in the desirable direction beyond the band
    Improved,
    /// Within the band, or not classifiable
    Neutral,
    /// Moved in the undesirable direction beyond the band
    Regressed,
}

impl Verdict {
    /// Visual marker; neutral metrics carry none
    pub fn marker(self) -> &'static str {
        match self {
            Self::Improved => IMPROVED_MARKER,
            Self::Neutral => "",
            Self::Regressed => REGRESSED_MARKER,
        }
    }

    /// Lowercase name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improved => "improved",
            Self::Neutral => "neutral",
            Self::Regressed => "regressed",
        }
    }
}

/// `current / baseline * 100`, `None` for a zero baseline
pub fn ratio(current: f64, baseline: f64) -> Option<f64> {
    fmt::ratio_percent(current, baseline)
}

/// Classify `current` against `baseline` under `policy`
///
/// A zero baseline leaves the ratio undefined and yields [`Verdict::Neutral`].
///
/// # Examples
///
/// ```
/// use native_image_report::classify::{classify, ThresholdPolicy, Verdict};
///
/// let policy = ThresholdPolicy::default();
/// assert_eq!(classify(90.0, 100.0, &policy), Verdict::Improved);
/// assert_eq!(classify(103.0, 100.0, &policy), Verdict::Neutral);
/// assert_eq!(classify(120.0, 100.0, &policy), Verdict::Regressed);
/// assert_eq!(classify(120.0, 100.0, &policy.inverted()), Verdict::Improved);
/// ```
pub fn classify(current: f64, baseline: f64, policy: &ThresholdPolicy) -> Verdict {
    let Some(ratio) = ratio(current, baseline) else {
        return Verdict::Neutral;
    };

    let (below, above) = if policy.smaller_is_better {
        (Verdict::Improved, Verdict::Regressed)
    } else {
        (Verdict::Regressed, Verdict::Improved)
    };

    if ratio < policy.lower_bound {
        below
    } else if ratio > policy.upper_bound {
        above
    } else {
        Verdict::Neutral
    }
}

/// A classified pair of metric values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Value in the current snapshot
    pub current: f64,
    /// Value in the baseline snapshot
    pub baseline: f64,
    /// `current - baseline`
    pub delta: f64,
    /// Signed percentage change, absent for a zero baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    /// Classification under the applied policy
    pub verdict: Verdict,
}

impl Comparison {
    /// Compare two values under `policy`
    pub fn new(current: f64, baseline: f64, policy: &ThresholdPolicy) -> Self {
        Self {
            current,
            baseline,
            delta: current - baseline,
            percent: ratio(current, baseline).map(|r| r - 100.0),
            verdict: classify(current, baseline, policy),
        }
    }

    /// Signed percentage text, e.g. `+10.000%` or `n/a`
    pub fn percent_text(&self) -> String {
        fmt::diff_percent(self.baseline, self.current)
    }

    /// Percentage text followed by the verdict marker, if any
    pub fn marked_percent(&self) -> String {
        match self.verdict.marker() {
            "" => self.percent_text(),
            marker => format!("{} {}", self.percent_text(), marker),
        }
    }
}
