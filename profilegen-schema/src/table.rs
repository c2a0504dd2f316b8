//! Raw tabular input.
//!
//! A profile document arrives as an ordered list of sheets. Each
//! sheet has a header of column labels and an ordered list of rows; a row
//! maps column labels to cell text. A cell that exists but is empty is
//! `Some("")`, a column the row does not reach is `None`.

use crate::error::ReadError;

/// Source of raw tables for one profile document.
pub trait TableReader {
    /// Reads every sheet of the document, in document order.
    ///
    /// # Errors
    /// Returns `ReadError` if the bytes are not a readable document.
    fn read_tables(&self, bytes: &[u8]) -> Result<Vec<RawTable>, ReadError>;
}

/// One sheet of the profile document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Sheet name.
    pub name: String,
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Creates an empty table with the given header.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table from string slices, handy for hand-built input.
    #[must_use]
    pub fn from_rows(name: &str, columns: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Self::new(name, columns.iter().map(|c| (*c).to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|c| (*c).to_string()).collect());
        }
        table
    }

    /// Appends a data row of positional cells.
    ///
    /// Cells beyond the header are dropped; the reader rejects such rows
    /// before they get here.
    pub fn push_row(&mut self, cells: Vec<String>) {
        let number = self.rows.len() + 2;
        let cells = self.columns.iter().cloned().zip(cells).collect();
        self.rows.push(RawRow { number, cells });
    }

    /// Returns the header labels.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns true if the header carries the given label.
    #[must_use]
    pub fn has_column(&self, label: &str) -> bool {
        self.columns.iter().any(|c| label_matches(c, label))
    }

    /// Returns the data rows.
    #[must_use]
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Returns true if the sheet name matches one of the given identities.
    #[must_use]
    pub fn is_named(&self, identities: &[&str]) -> bool {
        identities.iter().any(|id| label_matches(&self.name, id))
    }
}

/// One data row of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    number: usize,
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Returns the 1-based row number within the sheet, header included.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Returns the raw cell text, or `None` if the row has no such column.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(column, _)| label_matches(column, label))
            .map(|(_, text)| text.as_str())
    }

    /// Returns the trimmed cell text, empty for blank or absent cells.
    #[must_use]
    pub fn text(&self, label: &str) -> &str {
        self.get(label).map_or("", str::trim)
    }

    /// Returns the trimmed cell text, or `None` when blank or absent.
    #[must_use]
    pub fn optional(&self, label: &str) -> Option<String> {
        let text = self.text(label);
        (!text.is_empty()).then(|| text.to_string())
    }

    /// Returns true if every cell is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, text)| text.trim().is_empty())
    }
}

fn label_matches(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
