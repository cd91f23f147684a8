//! Report assembly: header, sections and footer in one document

use super::block::{code, escape_html, link, Block, Document};
use super::chart::{self, BranchLabels, ChartSelection};
use super::{analysis, environment, image, resources};
use crate::classify::{MetricClass, Thresholds};
use crate::context::RunContext;
use crate::fmt;
use crate::snapshot::BuildSnapshot;

const TITLE: &str = "GraalVM Native Image Build Report";

type ChartRenderer =
    fn(&BuildSnapshot, &BuildSnapshot, BranchLabels<'_>, &Thresholds) -> Vec<Block>;

/// Arranges section blocks into complete reports
///
/// # Examples
///
/// ```no_run
/// use native_image_report::context::RunContext;
/// use native_image_report::report::ReportAssembler;
/// use native_image_report::snapshot::BuildSnapshot;
///
/// # fn main() -> anyhow::Result<()> {
/// let json = std::fs::read_to_string("build-output.json")?;
/// let snapshot = BuildSnapshot::from_json(&json)?;
/// let context = RunContext::default();
/// let markup = ReportAssembler::new(&context).single(&snapshot).render();
/// println!("{}", markup);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReportAssembler<'a> {
    context: &'a RunContext,
    thresholds: Thresholds,
    charts: ChartSelection,
}

impl<'a> ReportAssembler<'a> {
    /// Assembler with default thresholds and no charts
    pub fn new(context: &'a RunContext) -> Self {
        Self {
            context,
            thresholds: Thresholds::default(),
            charts: ChartSelection::default(),
        }
    }

    /// Use `thresholds` for every comparison
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Render the `charts` categories as charts in [`Self::comparison`]
    pub fn with_charts(mut self, charts: ChartSelection) -> Self {
        self.charts = charts;
        self
    }

    /// Report on one snapshot
    pub fn single(&self, snapshot: &BuildSnapshot) -> Document {
        let mut doc = Document::new();
        doc.push(Block::Heading(2, TITLE.to_string()));
        doc.push(Block::Paragraph(self.header(snapshot)));
        doc.extend(environment::render(snapshot));
        doc.extend(analysis::render(snapshot));
        doc.extend(image::render(snapshot));
        doc.extend(resources::render(snapshot));
        doc.push(footer());
        doc
    }

    /// Comparison with every category as a table, except those selected as charts
    pub fn comparison(&self, current: &BuildSnapshot, baseline: &BuildSnapshot) -> Document {
        self.compare_with(current, baseline, self.charts)
    }

    /// Comparison with every category as a table
    pub fn tabular_comparison(
        &self,
        current: &BuildSnapshot,
        baseline: &BuildSnapshot,
    ) -> Document {
        self.compare_with(current, baseline, ChartSelection::default())
    }

    /// Charts for the selected categories followed by the footer
    pub fn chart_comparison(&self, current: &BuildSnapshot, baseline: &BuildSnapshot) -> Document {
        let mut doc = Document::new();
        for class in [
            MetricClass::Analysis,
            MetricClass::ImageDetails,
            MetricClass::ResourceUsage,
        ] {
            if self.charts.includes(class) {
                doc.extend(self.chart(class, current, baseline));
            }
        }
        doc.push(footer());
        doc
    }

    fn compare_with(
        &self,
        current: &BuildSnapshot,
        baseline: &BuildSnapshot,
        charts: ChartSelection,
    ) -> Document {
        let base = self.context.base_label();
        let mut doc = Document::new();
        doc.push(Block::Heading(2, TITLE.to_string()));
        doc.push(Block::Paragraph(format!(
            "{} Compared to {}.",
            self.header(current),
            code(base)
        )));
        doc.extend(environment::render(current));

        for class in [
            MetricClass::Analysis,
            MetricClass::ImageDetails,
            MetricClass::ResourceUsage,
        ] {
            let blocks = if charts.includes(class) {
                self.chart(class, current, baseline)
            } else {
                self.table(class, current, baseline)
            };
            doc.extend(blocks);
        }

        doc.push(footer());
        doc
    }

    fn labels(&self) -> BranchLabels<'_> {
        BranchLabels {
            head: self.context.head_label(),
            base: self.context.base_label(),
        }
    }

    fn table(
        &self,
        class: MetricClass,
        current: &BuildSnapshot,
        baseline: &BuildSnapshot,
    ) -> Vec<Block> {
        let base = self.context.base_label();
        match class {
            MetricClass::Analysis => {
                analysis::render_comparison(current, baseline, base, &self.thresholds)
            }
            MetricClass::ImageDetails => {
                image::render_comparison(current, baseline, base, &self.thresholds)
            }
            MetricClass::ResourceUsage => resources::render_comparison(
                current,
                baseline,
                (self.context.head_label(), base),
                &self.thresholds,
            ),
        }
    }

    fn chart(
        &self,
        class: MetricClass,
        current: &BuildSnapshot,
        baseline: &BuildSnapshot,
    ) -> Vec<Block> {
        let render: ChartRenderer = match class {
            MetricClass::Analysis => chart::analysis_chart,
            MetricClass::ImageDetails => chart::image_chart,
            MetricClass::ResourceUsage => chart::resource_chart,
        };
        render(current, baseline, self.labels(), &self.thresholds)
    }

    /// `<name> generated in 2m 5s as part of the 'build' job in run #7.`
    fn header(&self, snapshot: &BuildSnapshot) -> String {
        let mut text = format!("{} generated", code(&snapshot.general_info.name));
        if let Some(secs) = snapshot.resource_usage.total_secs {
            text.push_str(&format!(" in {}", fmt::seconds_to_human(secs)));
        }
        if let Some(job) = &self.context.job {
            text.push_str(&format!(" as part of the '{}' job", escape_html(job)));
        }
        if let Some(number) = &self.context.run_number {
            let run = format!("#{}", escape_html(number));
            let run = match self.context.run_url() {
                Some(url) => link(&run, &escape_html(&url)),
                None => run,
            };
            text.push_str(&format!(" in run {}", run));
        }
        text.push('.');
        text
    }
}

fn footer() -> Block {
    Block::Paragraph(format!(
        "<em>Report generated by native-image-report {}.</em>",
        env!("CARGO_PKG_VERSION")
    ))
}
