//! Table - rows of cells rendered as HTML or LaTeX.
//!
//! A [`Table`] owns its rows, remembers whether a header row was added, and
//! may carry a table-wide column format (one template per logical column).
//!
//! The first row appended fixes the table's column count. Raw rows appended
//! afterwards are padded to that count, and spanning cells in them are
//! clipped to it. Prepared [`Row`] values are appended as-is.
//!
//! # Examples
//!
//! ## Header and data rows
//!
//! ```
//! use tabmark::{Markup, Row, Table};
//!
//! let table = Table::builder()
//!     .row(Row::header(["a", "b", "c"]))
//!     .row([1, 2, 3])
//!     .row([2, 4, 6])
//!     .build()
//!     .unwrap();
//!
//! assert!(table.has_header());
//! assert!(table.to_html().unwrap().contains("<th>a</th>"));
//! assert!(table.to_latex().unwrap().contains(r"\hline"));
//! ```
//!
//! ## Column formats
//!
//! ```
//! use tabmark::{Markup, Table};
//!
//! let table = Table::builder()
//!     .column_format(["{:.2g}", "{:d}"])
//!     .row([tabmark::CellSource::from(1.5), 2.into()])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     table.to_html().unwrap(),
//!     "<table>\n<tr><td>1.5</td><td>2</td></tr>\n</table>"
//! );
//! ```
//!
//! ## From a column mapping
//!
//! ```
//! use tabmark::Table;
//!
//! let table = Table::from_mapping([("x", vec![1, 2]), ("y", vec![3])]).unwrap();
//! assert_eq!(table.rows().len(), 3);
//! assert_eq!(table.cell(2, 1).unwrap().value().to_string(), "");
//! ```

use crate::cell::Cell;
use crate::error::{IndexKind, Result, TableError};
use crate::latex;
use crate::markup::Markup;
use crate::row::{CellSource, Row, RowOptions, check_format_len};
use crate::value::Value;

/// A row to be appended: prepared, or raw cells to normalize.
#[derive(Debug, Clone, PartialEq)]
pub enum RowSource {
    /// Appended as-is.
    Row(Row),
    /// Turned into a data row padded to the table's column count.
    Cells(Vec<CellSource>),
}

impl From<Row> for RowSource {
    fn from(row: Row) -> Self {
        Self::Row(row)
    }
}

impl<T: Into<CellSource>> From<Vec<T>> for RowSource {
    fn from(cells: Vec<T>) -> Self {
        Self::Cells(cells.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CellSource>, const N: usize> From<[T; N]> for RowSource {
    fn from(cells: [T; N]) -> Self {
        Self::Cells(cells.into_iter().map(Into::into).collect())
    }
}

/// Builder for [`Table`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct TableBuilder {
    rows: Vec<RowSource>,
    column_format: Option<Vec<String>>,
}

impl TableBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an ordered column mapping.
    ///
    /// Keys become a header row. The value sequences are transposed into data
    /// rows; shorter sequences are filled with empty cells up to the length
    /// of the longest one.
    pub fn from_mapping<K, V, I>(mapping: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        let (keys, columns): (Vec<Value>, Vec<Vec<Value>>) = mapping
            .into_iter()
            .map(|(key, values)| (key.into(), values.into_iter().map(Into::into).collect()))
            .unzip();

        let depth = columns.iter().map(Vec::len).max().unwrap_or(0);
        let mut builder = Self::new().row(Row::header(keys));
        for i in 0..depth {
            let cells: Vec<Value> = columns
                .iter()
                .map(|column| column.get(i).cloned().unwrap_or_default())
                .collect();
            builder = builder.row(cells);
        }
        builder
    }

    /// Set the table-wide column format.
    pub fn column_format<S: Into<String>>(mut self, format: impl IntoIterator<Item = S>) -> Self {
        self.column_format = Some(format.into_iter().map(Into::into).collect());
        self
    }

    /// Add a row.
    pub fn row(mut self, row: impl Into<RowSource>) -> Self {
        self.rows.push(row.into());
        self
    }

    /// Add several rows.
    pub fn rows<R: Into<RowSource>>(mut self, rows: impl IntoIterator<Item = R>) -> Self {
        self.rows.extend(rows.into_iter().map(Into::into));
        self
    }

    /// Build the table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if the column format length differs
    /// from the first row's column count, or if a raw row needs more columns
    /// than the first row established.
    pub fn build(self) -> Result<Table> {
        let mut table = Table {
            column_format: self.column_format,
            ..Table::default()
        };
        for row in self.rows {
            table.append_row(row)?;
        }
        Ok(table)
    }
}

/// A table of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
    has_header: bool,
    column_format: Option<Vec<String>>,
    /// Column count fixed by the first row.
    anchor: Option<usize>,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a table.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// Build a table from rows.
    ///
    /// # Errors
    ///
    /// See [`TableBuilder::build`].
    pub fn from_rows<R: Into<RowSource>>(rows: impl IntoIterator<Item = R>) -> Result<Self> {
        Self::builder().rows(rows).build()
    }

    /// Build a table from an ordered column mapping.
    ///
    /// # Errors
    ///
    /// See [`TableBuilder::build`].
    pub fn from_mapping<K, V, I>(mapping: impl IntoIterator<Item = (K, I)>) -> Result<Self>
    where
        K: Into<Value>,
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        TableBuilder::from_mapping(mapping).build()
    }

    /// Append a row.
    ///
    /// Raw rows are padded to the table's column count. A header row marks
    /// the table as having a header; a row carrying a column format installs
    /// it as the table's column format.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if a raw row needs more columns than
    /// the table has, or if a column format does not match the column count.
    /// The table is unchanged on error.
    pub fn append_row(&mut self, row: impl Into<RowSource>) -> Result<()> {
        let mut row = match row.into() {
            RowSource::Row(row) => row,
            RowSource::Cells(cells) => {
                let options = RowOptions {
                    max_columns: self.anchor,
                    ..RowOptions::default()
                };
                Row::with_options(cells, options)?
            }
        };

        let columns = self.anchor.unwrap_or_else(|| row.column_count());
        let installed = row.take_column_format();
        if let Some(format) = installed.as_ref().or(self.column_format.as_ref()) {
            check_format_len("column", format.len(), columns)?;
        }

        if self.anchor.is_none() {
            log::debug!("table column count fixed at {columns} by first row");
            self.anchor = Some(columns);
        }
        if let Some(format) = installed {
            log::debug!("row installs table column format {format:?}");
            self.column_format = Some(format);
        }
        if row.is_header() {
            self.has_header = true;
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append raw values as a data row.
    ///
    /// # Errors
    ///
    /// See [`Table::append_row`].
    pub fn append_values<T: Into<CellSource>>(
        &mut self,
        values: impl IntoIterator<Item = T>,
    ) -> Result<()> {
        self.append_row(RowSource::Cells(values.into_iter().map(Into::into).collect()))
    }

    /// The rows.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Index`] if `index` is out of range.
    pub fn row(&self, index: usize) -> Result<&Row> {
        self.rows
            .get(index)
            .ok_or_else(|| TableError::index(IndexKind::Row, index, self.rows.len()))
    }

    /// Mutable row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Index`] if `index` is out of range.
    pub fn row_mut(&mut self, index: usize) -> Result<&mut Row> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or_else(|| TableError::index(IndexKind::Row, index, len))
    }

    /// Cell at a row index and physical cell index.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Index`] if either index is out of range.
    pub fn cell(&self, row: usize, column: usize) -> Result<&Cell> {
        self.row(row)?.cell(column)
    }

    /// Mutable cell for in-place edits.
    ///
    /// Edits are not re-validated against the table's column count.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Index`] if either index is out of range.
    pub fn cell_mut(&mut self, row: usize, column: usize) -> Result<&mut Cell> {
        self.row_mut(row)?.cell_mut(column)
    }

    /// Whether a header row has been appended.
    #[must_use]
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// The table-wide column format.
    #[must_use]
    pub fn column_format(&self) -> Option<&[String]> {
        self.column_format.as_deref()
    }

    /// Replace the table-wide column format.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if the table has rows and the length
    /// differs from its column count.
    pub fn set_column_format<S: Into<String>>(
        &mut self,
        format: impl IntoIterator<Item = S>,
    ) -> Result<()> {
        let format: Vec<String> = format.into_iter().map(Into::into).collect();
        if let Some(columns) = self.anchor {
            check_format_len("column", format.len(), columns)?;
        }
        self.column_format = Some(format);
        Ok(())
    }

    /// Logical column count of the first row, 0 for an empty table.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Row::column_count)
    }
}

impl Markup for Table {
    fn to_html(&self) -> Result<String> {
        let format = self.column_format();
        let rows = self
            .rows
            .iter()
            .map(|row| row.html_in(format))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!("<table>\n{}\n</table>", rows.join("\n")))
    }

    fn to_latex(&self) -> Result<String> {
        let format = self.column_format();
        let mut body = String::new();
        for row in &self.rows {
            body.push_str(&row.latex_in(format)?);
        }
        if self.has_header {
            body = format!("{}{body}{}", latex::HLINE, latex::HLINE);
        }
        Ok(format!(
            "{}{body}{}",
            latex::begin_tabular(self.column_count()),
            latex::END_TABULAR
        ))
    }
}
