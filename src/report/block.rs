//! Typed building blocks for report markup
//!
//! Section renderers only assemble [`Block`] values. All markup syntax
//! (HTML tables, mermaid charts) lives in the `render` methods here, so the
//! classification logic never deals with string templates.

use std::fmt;

/// Horizontal alignment of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `align="left"`
    Left,
    /// `align="right"`
    Right,
}

impl Align {
    fn attr(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Escape text for embedding in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<a>` link opening in a new tab
pub fn link(label: &str, href: &str) -> String {
    format!("<a href=\"{}\" target=\"_blank\">{}</a>", href, label)
}

/// Inline code span
pub fn code(text: &str) -> String {
    format!("<code>{}</code>", escape_html(text))
}

/// Bold text
pub fn strong(markup: &str) -> String {
    format!("<strong>{}</strong>", markup)
}

/// One table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    content: String,
    align: Option<Align>,
    colspan: Option<usize>,
}

impl Cell {
    /// Cell holding plain text, escaped on construction
    pub fn text(text: &str) -> Self {
        Self::markup(escape_html(text))
    }

    /// Cell holding already-formed markup
    pub fn markup(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            align: None,
            colspan: None,
        }
    }

    /// Align left
    pub fn left(mut self) -> Self {
        self.align = Some(Align::Left);
        self
    }

    /// Align right
    pub fn right(mut self) -> Self {
        self.align = Some(Align::Right);
        self
    }

    /// Span `columns` columns
    pub fn colspan(mut self, columns: usize) -> Self {
        self.colspan = Some(columns);
        self
    }

    /// Cell content
    pub fn content(&self) -> &str {
        &self.content
    }

    fn render(&self, tag: &str, out: &mut String) {
        out.push('<');
        out.push_str(tag);
        if let Some(align) = self.align {
            out.push_str(&format!(" align=\"{}\"", align.attr()));
        }
        if let Some(columns) = self.colspan {
            out.push_str(&format!(" colspan=\"{}\"", columns));
        }
        out.push_str(&format!(">{}</{}>", self.content, tag));
    }
}

/// One table row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell
    pub fn cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Cells in order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn render(&self, tag: &str, indent: &str, out: &mut String) {
        out.push_str(&format!("{}<tr>\n", indent));
        for cell in &self.cells {
            out.push_str(indent);
            out.push_str("  ");
            cell.render(tag, out);
            out.push('\n');
        }
        out.push_str(&format!("{}</tr>\n", indent));
    }
}

impl FromIterator<Cell> for Row {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// HTML table with an optional header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Option<Row>,
    rows: Vec<Row>,
}

impl Table {
    /// Empty table without header
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the header row
    pub fn with_header(mut self, header: Row) -> Self {
        self.header = Some(header);
        self
    }

    /// Append a body row
    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Append a body row in place
    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Header row, if any
    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    /// Body rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn render(&self, out: &mut String) {
        out.push_str("<table>\n");
        match &self.header {
            Some(header) => {
                out.push_str("  <thead>\n");
                header.render("th", "    ", out);
                out.push_str("  </thead>\n  <tbody>\n");
                for row in &self.rows {
                    row.render("td", "    ", out);
                }
                out.push_str("  </tbody>\n");
            }
            None => {
                for row in &self.rows {
                    row.render("td", "  ", out);
                }
            }
        }
        out.push_str("</table>");
    }
}

/// How a chart bar is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarStyle {
    /// Baseline value
    Baseline,
    /// Current value
    Current,
    /// Current value that regressed
    Critical,
}

impl BarStyle {
    fn tag(self) -> &'static str {
        match self {
            Self::Baseline => "done",
            Self::Current => "active",
            Self::Critical => "crit",
        }
    }
}

/// One bar spanning `[0, length]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartBar {
    /// Bar label
    pub label: String,
    /// Bar length on the chart axis
    pub length: u64,
    /// Highlighting
    pub style: BarStyle,
}

/// Group of bars describing one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSection {
    /// Section name
    pub name: String,
    /// Bars in order
    pub bars: Vec<ChartBar>,
}

/// Gantt-style chart rendered as a fenced mermaid block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Chart title
    pub title: String,
    /// Sections in order
    pub sections: Vec<ChartSection>,
}

/// Mermaid treats these characters as syntax inside task lines
fn sanitize_mermaid(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ':' | ';' | '#' => ' ',
            c => c,
        })
        .collect()
}

impl Chart {
    /// Chart with no sections
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section
    pub fn section(mut self, section: ChartSection) -> Self {
        self.sections.push(section);
        self
    }

    fn render(&self, out: &mut String) {
        out.push_str("```mermaid\ngantt\n");
        out.push_str(&format!("    title {}\n", sanitize_mermaid(&self.title)));
        out.push_str("    dateFormat X\n    axisFormat %s\n    todayMarker off\n");
        for section in &self.sections {
            out.push_str(&format!("\n    section {}\n", sanitize_mermaid(&section.name)));
            for bar in &section.bars {
                out.push_str(&format!(
                    "    {} : {}, 0, {}\n",
                    sanitize_mermaid(&bar.label),
                    bar.style.tag(),
                    bar.length
                ));
            }
        }
        out.push_str("```");
    }
}

/// A self-contained piece of a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Markdown heading of the given level
    Heading(u8, String),
    /// Paragraph of markup
    Paragraph(String),
    /// HTML table
    Table(Table),
    /// Mermaid chart
    Chart(Chart),
}

impl Block {
    fn render(&self, out: &mut String) {
        match self {
            Self::Heading(level, text) => {
                out.push_str(&format!("{} {}", "#".repeat(usize::from(*level)), text));
            }
            Self::Paragraph(markup) => out.push_str(markup),
            Self::Table(table) => table.render(out),
            Self::Chart(chart) => chart.render(out),
        }
    }
}

/// Ordered sequence of blocks linearised into one markup string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Blocks in order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Render to markup, blocks separated by blank lines
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            block.render(&mut out);
        }
        out.push('\n');
        out
    }
}

impl Extend<Block> for Document {
    fn extend<I: IntoIterator<Item = Block>>(&mut self, iter: I) {
        self.blocks.extend(iter);
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
