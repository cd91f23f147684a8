//! Analysis results section: reachability grid for types, fields and methods

use super::block::{Block, Cell, Row, Table};
use super::{compared_to, glossary, heading};
use crate::classify::Thresholds;
use crate::fmt;
use crate::metric::{AnalysisCount, Metric};
use crate::snapshot::{AnalysisCategory, AnalysisCounts, BuildSnapshot};

const TITLE: &str = "Analysis Results";

fn count_label(count: AnalysisCount) -> Cell {
    let anchor = match count {
        AnalysisCount::Reachable | AnalysisCount::Total => "glossary-reachability",
        AnalysisCount::Reflection => "glossary-reflection-registrations",
        AnalysisCount::Jni => "glossary-jni-access-registrations",
    };
    Cell::markup(glossary(count.label(), anchor)).left()
}

fn value(counts: &AnalysisCounts, count: AnalysisCount) -> u64 {
    match count {
        AnalysisCount::Reachable => counts.reachable,
        AnalysisCount::Reflection => counts.reflection,
        AnalysisCount::Jni => counts.jni,
        AnalysisCount::Total => counts.total,
    }
}

fn header(extra: Option<&str>) -> Row {
    let mut row = Row::new().cell(Cell::text("Category").left());
    for category in AnalysisCategory::ALL {
        row = row
            .cell(Cell::text(category.label()).right())
            .cell(Cell::text("in %").right());
        if let Some(extra) = extra {
            row = row.cell(Cell::markup(extra).right());
        }
    }
    row
}

/// Render the analysis results of one snapshot
pub fn render(snapshot: &BuildSnapshot) -> Vec<Block> {
    let analysis = &snapshot.analysis_results;
    let mut table = Table::new().with_header(header(None));

    for count in AnalysisCount::ALL {
        let mut row = Row::new().cell(count_label(count));
        for category in AnalysisCategory::ALL {
            let counts = analysis.category(category);
            let n = value(counts, count);
            row = row
                .cell(Cell::text(&fmt::format_number(n)).right())
                .cell(Cell::text(&fmt::percent_of(n as f64, counts.total as f64)).right());
        }
        table.push(row);
    }

    vec![heading(TITLE), Block::Table(table)]
}

/// Render the analysis results of `current` with a classified delta per cell
pub fn render_comparison(
    current: &BuildSnapshot,
    baseline: &BuildSnapshot,
    base_label: &str,
    thresholds: &Thresholds,
) -> Vec<Block> {
    let analysis = &current.analysis_results;
    let column = compared_to(base_label);
    let mut table = Table::new().with_header(header(Some(&column)));

    for count in AnalysisCount::ALL {
        let mut row = Row::new().cell(count_label(count));
        for category in AnalysisCategory::ALL {
            let counts = analysis.category(category);
            let n = value(counts, count);
            let delta = Metric::Analysis(category, count)
                .compare(current, baseline, thresholds)
                .map_or_else(|| fmt::NOT_APPLICABLE.to_string(), |c| c.marked_percent());
            row = row
                .cell(Cell::text(&fmt::format_number(n)).right())
                .cell(Cell::text(&fmt::percent_of(n as f64, counts.total as f64)).right())
                .cell(Cell::text(&delta).right());
        }
        table.push(row);
    }

    vec![heading(TITLE), Block::Table(table)]
}
