use super::escape_cell;

/// Column alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// `:---`
    #[default]
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

impl Align {
    fn separator(self) -> &'static str {
        match self {
            Align::Left => ":---",
            Align::Center => ":---:",
            Align::Right => "---:",
        }
    }
}

/// GitHub flavoured pipe table
#[derive(Debug, Clone)]
pub struct MarkdownTable {
    headers: Vec<String>,
    alignments: Vec<Align>,
}

impl MarkdownTable {
    /// Table with left aligned columns
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let alignments = vec![Align::Left; headers.len()];
        Self {
            headers,
            alignments,
        }
    }

    /// Override the alignment of column `index`
    pub fn align(mut self, index: usize, align: Align) -> Self {
        if let Some(slot) = self.alignments.get_mut(index) {
            *slot = align;
        }
        self
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Header and separator lines
    pub fn header(&self) -> String {
        let header = self.line(self.headers.iter().map(|h| escape_cell(h)));
        let separator = self.line(self.alignments.iter().map(|a| a.separator().to_string()));
        format!("{}\n{}", header, separator)
    }

    /// Render one body row from already formatted cells.
    ///
    /// Cells are escaped; missing trailing cells are left empty and surplus
    /// cells are dropped so the row always matches the header width.
    pub fn row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let cells = (0..self.width()).map(|i| {
            cells
                .get(i)
                .map(|c| escape_cell(c.as_ref()))
                .unwrap_or_default()
        });
        self.line(cells)
    }

    /// Row whose first cell is `first` and every other cell is `fill`
    pub fn filled_row(&self, first: &str, fill: &str) -> String {
        let mut cells = vec![first.to_string()];
        cells.resize(self.width().max(1), fill.to_string());
        self.row(&cells)
    }

    /// Full table from pre-rendered body rows
    pub fn render<I, S>(&self, rows: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = self.header();
        for row in rows {
            out.push('\n');
            out.push_str(row.as_ref());
        }
        out
    }

    fn line(&self, cells: impl Iterator<Item = String>) -> String {
        let cells: Vec<String> = cells.collect();
        format!("| {} |", cells.join(" | "))
    }
}
