//! Display formatting for CI/CD results

use super::output::{JsonOutput, MetricEntry};
use crate::classify::Verdict;
use crate::fmt::{CHART, CHECKMARK, WARNING};
use console::{style, Emoji};

fn emoji(emoji: Emoji<'_, '_>, use_emoji: bool) -> String {
    if use_emoji {
        emoji.to_string()
    } else {
        emoji.1.to_string()
    }
}

fn line(entry: &MetricEntry) -> String {
    let percent = entry
        .comparison
        .map(|comparison| comparison.percent_text())
        .unwrap_or_default();
    format!("   {:<28} {}", entry.label, percent)
}

/// Console summary of a comparison, one line per classified metric
pub fn render_comparison_summary(output: &JsonOutput, use_emoji: bool) -> String {
    let mut lines = vec![format!(
        "{} {} compared: {} improved, {} regressed",
        emoji(CHART, use_emoji),
        style(&output.name).bold(),
        output.improved,
        output.regressed
    )];

    if output.regressed > 0 {
        lines.push(format!(
            "\n{} {}",
            emoji(WARNING, use_emoji),
            style("Regressions").red()
        ));
        lines.extend(
            output
                .with_verdict(Verdict::Regressed)
                .map(|entry| style(line(entry)).red().to_string()),
        );
    }

    if output.improved > 0 {
        lines.push(format!(
            "\n{} {}",
            emoji(CHECKMARK, use_emoji),
            style("Improvements").green()
        ));
        lines.extend(
            output
                .with_verdict(Verdict::Improved)
                .map(|entry| style(line(entry)).green().to_string()),
        );
    }

    lines.join("\n")
}

/// Print the comparison summary to stderr, keeping stdout for the report
pub fn print_comparison_summary(output: &JsonOutput, use_emoji: bool) {
    eprintln!("{}", render_comparison_summary(output, use_emoji));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Thresholds;
    use crate::snapshot::test_support;

    #[test]
    fn test_summary_lists_regressions_and_improvements() {
        console::set_colors_enabled(false);
        let baseline = test_support::minimal();
        let mut current = test_support::minimal();
        current.resource_usage.garbage_collection.total_secs = 3.0;
        current.resource_usage.cpu.load = 2.0;

        let output = JsonOutput::from_comparison(&current, &baseline, &Thresholds::default());
        let text = render_comparison_summary(&output, false);
        assert!(text.starts_with("~ helloworld compared: 1 improved, 1 regressed"));
        assert!(text.contains("! Regressions"));
        assert!(text.contains("Garbage collection"));
        assert!(text.contains("+100.000%"));
        assert!(text.contains("[OK] Improvements"));
        assert!(text.contains("-50.000%"));
    }

    #[test]
    fn test_summary_without_changes_is_one_line() {
        console::set_colors_enabled(false);
        let snapshot = test_support::minimal();
        let output = JsonOutput::from_comparison(&snapshot, &snapshot, &Thresholds::default());
        let text = render_comparison_summary(&output, false);
        assert_eq!(text.lines().count(), 1);
    }
}
