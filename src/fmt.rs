//! Shared formatting utilities for report values
//!
//! Every function here is pure. Percentages and ratios with a zero
//! denominator render as [`NOT_APPLICABLE`] instead of `NaN%` or `inf%`.

use console::Emoji;

/// Placeholder rendered when a percentage or ratio has no defined value
pub const NOT_APPLICABLE: &str = "n/a";

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// `part * 100 / total`, or `None` when the result is not a finite number
pub(crate) fn ratio_percent(part: f64, total: f64) -> Option<f64> {
    if total == 0.0 {
        return None;
    }
    let value = part * 100.0 / total;
    value.is_finite().then_some(value)
}

/// Format `part` as a percentage of `total` with three decimals
///
/// # Examples
///
/// ```
/// use native_image_report::fmt::percent_of;
///
/// assert_eq!(percent_of(1.0, 8.0), "12.500%");
/// assert_eq!(percent_of(5.0, 0.0), "n/a");
/// ```
pub fn percent_of(part: f64, total: f64) -> String {
    match ratio_percent(part, total) {
        Some(value) => format!("{:.3}%", value),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Format bytes with a binary unit (B, KB, MB, GB), always two decimals
///
/// The unit is chosen by absolute value so negative deltas keep their sign.
///
/// # Examples
///
/// ```
/// use native_image_report::fmt::bytes_to_human;
///
/// assert_eq!(bytes_to_human(1023.0), "1023.00B");
/// assert_eq!(bytes_to_human(1024.0), "1.00KB");
/// assert_eq!(bytes_to_human(-3.0 * 1024.0 * 1024.0), "-3.00MB");
/// ```
pub fn bytes_to_human(bytes: f64) -> String {
    let magnitude = bytes.abs();
    if magnitude < KIB {
        format!("{:.2}B", bytes)
    } else if magnitude < MIB {
        format!("{:.2}KB", bytes / KIB)
    } else if magnitude < GIB {
        format!("{:.2}MB", bytes / MIB)
    } else {
        format!("{:.2}GB", bytes / GIB)
    }
}

/// Format a duration in seconds as `12.3s` or `2m 5s`
///
/// # Examples
///
/// ```
/// use native_image_report::fmt::seconds_to_human;
///
/// assert_eq!(seconds_to_human(59.9), "59.9s");
/// assert_eq!(seconds_to_human(125.0), "2m 5s");
/// ```
pub fn seconds_to_human(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.1}s", seconds)
    } else {
        let minutes = (seconds / 60.0).floor();
        let rest = (seconds % 60.0).floor();
        format!("{}m {}s", minutes as u64, rest as u64)
    }
}

/// Signed percentage change from `baseline` to `current`, three decimals
///
/// # Examples
///
/// ```
/// use native_image_report::fmt::diff_percent;
///
/// assert_eq!(diff_percent(100.0, 150.0), "+50.000%");
/// assert_eq!(diff_percent(150.0, 100.0), "-33.333%");
/// assert_eq!(diff_percent(0.0, 10.0), "n/a");
/// ```
pub fn diff_percent(baseline: f64, current: f64) -> String {
    match ratio_percent((current - baseline).abs(), baseline) {
        Some(magnitude) => {
            let sign = if current >= baseline { '+' } else { '-' };
            format!("{}{:.3}%", sign, magnitude.abs())
        }
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Signed byte delta, e.g. `+1.50KB` or `-200.00B`
pub fn bytes_delta_to_human(delta: f64) -> String {
    let sign = if delta >= 0.0 { "+" } else { "-" };
    format!("{}{}", sign, bytes_to_human(delta.abs()))
}

/// Format number with thousand separators
///
/// # Examples
///
/// ```
/// use native_image_report::fmt::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(",")
}
