use crate::error::ScaleError;
use anyhow::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

/// A header-indexed table of raw string cells, as read from a spec CSV.
#[derive(Debug, Clone)]
pub struct SpecData {
    /// Name used in error messages (usually the file name)
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SpecData {
    pub fn new(source: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows,
        }
    }

    /// Parse CSV text from any reader. Cells are trimmed; short rows are
    /// padded with empty cells so every row has one cell per header.
    pub fn from_reader<R: Read>(source: impl Into<String>, reader: R) -> Result<Self> {
        let source = source.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .with_context(|| format!("Failed to read headers of {}", source))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record.with_context(|| format!("Failed to read a row of {}", source))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Self::new(source, headers, rows))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(path.display().to_string(), file)
    }

    /// Like [`SpecData::from_path`], but a missing file yields `None`.
    pub fn from_optional_path(path: &Path) -> Result<Option<Self>> {
        match std::fs::File::open(path) {
            Ok(file) => Self::from_reader(path.display().to_string(), file).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context(format!("Failed to open {}", path.display()))),
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize, ScaleError> {
        self.column_index(column).ok_or_else(|| ScaleError::MissingColumn {
            table: self.source.clone(),
            column: column.to_string(),
        })
    }

    pub fn row(&self, index: usize) -> Row<'_> {
        Row {
            data: self,
            cells: &self.rows[index],
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |cells| Row { data: self, cells })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Borrowed view of one row with column lookup by header name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    data: &'a SpecData,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell text, or `None` when the column is absent or the cell is empty
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.data
            .column_index(column)
            .map(|i| self.cells[i].as_str())
            .filter(|s| !s.is_empty())
    }

    pub fn require(&self, column: &str) -> Result<&'a str, ScaleError> {
        self.data.require_column(column)?;
        self.get(column).ok_or_else(|| self.invalid(column, ""))
    }

    pub fn f64(&self, column: &str) -> Result<f64, ScaleError> {
        let text = self.require(column)?;
        parse_number(text).ok_or_else(|| self.invalid(column, text))
    }

    /// Optional numeric cell: empty is `None`, garbage is an error
    pub fn opt_f64(&self, column: &str) -> Result<Option<f64>, ScaleError> {
        match self.get(column) {
            None => Ok(None),
            Some(text) => parse_number(text)
                .map(Some)
                .ok_or_else(|| self.invalid(column, text)),
        }
    }

    fn invalid(&self, column: &str, value: &str) -> ScaleError {
        ScaleError::InvalidField {
            table: self.data.source.clone(),
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

/// Parse a number cell. `nan` and friends count as missing, matching how
/// spreadsheet exports write empty numeric cells.
pub fn parse_number(text: &str) -> Option<f64> {
    let value: f64 = text.trim().parse().ok()?;
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}
