//! Generic row/column grid as extracted from an HTML table.

/// Marker strings the source uses for missing observations.
pub const MISSING_MARKERS: [&str; 2] = ["--", "W"];

/// Named columns plus ordered rows of nullable text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string literals; empty strings become null.
    pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Self::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|c| (!c.is_empty()).then(|| c.to_string()))
                    .collect(),
            );
        }
        table
    }

    /// Append a row, padding with nulls or truncating to the column count.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        self.columns.len() == names.len() && self.columns.iter().zip(names).all(|(a, b)| a == b)
    }

    /// Cell text at `(row, col)`, `None` when null or out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// Replace missing-value markers with null in every cell.
    pub fn canonicalize_missing(mut self) -> Self {
        for cell in self.rows.iter_mut().flatten() {
            if cell
                .as_deref()
                .is_some_and(|v| MISSING_MARKERS.contains(&v.trim()))
            {
                *cell = None;
            }
        }
        self
    }
}
