/// Ordered, fixed-arity report whose first row is always the header.
///
/// Rows are append-only; document order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report<const N: usize> {
    rows: Vec<[String; N]>,
}

impl<const N: usize> Report<N> {
    pub fn with_header(header: [&str; N]) -> Self {
        Self {
            rows: vec![header.map(str::to_string)],
        }
    }

    pub fn push(&mut self, row: [String; N]) {
        self.rows.push(row);
    }

    pub fn header(&self) -> &[String; N] {
        &self.rows[0]
    }

    /// Every row, header first.
    pub fn rows(&self) -> &[[String; N]] {
        &self.rows
    }

    /// Rows after the header.
    pub fn body(&self) -> &[[String; N]] {
        &self.rows[1..]
    }
}

/// Arity-erased report handed to the output layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn body(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }
}

impl<const N: usize> From<Report<N>> for Table {
    fn from(report: Report<N>) -> Self {
        Self {
            rows: report.rows.into_iter().map(Vec::from).collect(),
        }
    }
}
