//! Row - an ordered sequence of cells with span-aware column accounting.
//!
//! A cell with `column_span = k` is stored followed by `k - 1` synthetic
//! filler cells, so physical cell indices line up with logical columns.
//! Only a cell whose physical index equals the running logical column counter
//! starts a visible column; [`Row::visible_columns`] performs that walk and
//! both renderers use it.
//!
//! # Hidden cells
//!
//! A cell sitting inside the range covered by an earlier spanning cell is
//! never rendered, even if it holds its own content. This happens when a
//! span is widened after construction:
//!
//! ```
//! use tabmark::{Markup, Row};
//!
//! let mut row = Row::new([1, 2, 3]);
//! row.cell_mut(0).unwrap().set_column_span(2).unwrap();
//!
//! // "2" is kept in the row but covered by the span.
//! assert_eq!(row.cell(1).unwrap().value().to_string(), "2");
//! assert_eq!(row.to_html().unwrap(), r#"<tr><td colspan="2">1</td><td>3</td></tr>"#);
//! ```

use crate::cell::Cell;
use crate::error::{IndexKind, Result, TableError};
use crate::latex;
use crate::markup::Markup;
use crate::value::Value;

/// Whether a row holds data or headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowKind {
    /// Plain data row.
    #[default]
    Data,
    /// Raw values become header cells; the row is followed by a rule in
    /// LaTeX and marks its table as having a header.
    Header,
}

/// Something that can be appended to a row: a raw value or a prepared cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellSource {
    /// A raw value, turned into a cell according to the row kind.
    Value(Value),
    /// A prepared cell, appended as-is.
    Cell(Cell),
}

impl From<Cell> for CellSource {
    fn from(cell: Cell) -> Self {
        Self::Cell(cell)
    }
}

impl<T: Into<Value>> From<T> for CellSource {
    fn from(value: T) -> Self {
        Self::Value(value.into())
    }
}

/// Construction options for [`Row::with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowOptions {
    /// Target logical column count. Shorter rows are padded with empty
    /// cells; spans are clipped to fit.
    pub max_columns: Option<usize>,
    /// One format template per logical column.
    pub row_format: Option<Vec<String>>,
}

impl RowOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_columns(mut self, max: usize) -> Self {
        self.max_columns = Some(max);
        self
    }

    #[must_use]
    pub fn row_format<S: Into<String>>(mut self, format: impl IntoIterator<Item = S>) -> Self {
        self.row_format = Some(format.into_iter().map(Into::into).collect());
        self
    }
}

/// A visible column found by [`Row::visible_columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleColumn {
    /// Physical index of the cell that starts this column. Equal to the
    /// logical column index.
    pub index: usize,
    /// Logical columns consumed.
    pub span: usize,
}

/// Iterator over the visible columns of a row.
#[derive(Debug, Clone)]
pub struct VisibleColumns<'a> {
    cells: std::iter::Enumerate<std::slice::Iter<'a, Cell>>,
    next: usize,
}

impl Iterator for VisibleColumns<'_> {
    type Item = VisibleColumn;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, cell) in self.cells.by_ref() {
            if index == self.next {
                let span = cell.column_span();
                self.next += span;
                return Some(VisibleColumn { index, span });
            }
        }
        None
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    kind: RowKind,
    cells: Vec<Cell>,
    max_columns: Option<usize>,
    row_format: Option<Vec<String>>,
    /// Column format installed on the owning table when appended.
    column_format: Option<Vec<String>>,
}

impl Row {
    /// Create a data row without a column limit.
    #[must_use]
    pub fn new<T: Into<CellSource>>(cells: impl IntoIterator<Item = T>) -> Self {
        Self::build(RowKind::Data, cells)
    }

    /// Create a header row without a column limit.
    ///
    /// Raw values become header cells with the pass-through template `"{}"`;
    /// prepared cells are kept as given.
    #[must_use]
    pub fn header<T: Into<CellSource>>(cells: impl IntoIterator<Item = T>) -> Self {
        Self::build(RowKind::Header, cells)
    }

    fn build<T: Into<CellSource>>(kind: RowKind, cells: impl IntoIterator<Item = T>) -> Self {
        let mut row = Self {
            kind,
            ..Self::default()
        };
        for source in cells {
            let cell = row.normalize(source.into());
            row.push_cell(cell);
        }
        row
    }

    /// Create a data row with a column limit and/or a row format.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if the cells need more than
    /// `max_columns` logical columns, or if the row format length differs
    /// from `max_columns` (or from the natural column count when no limit is
    /// set).
    pub fn with_options<T: Into<CellSource>>(
        cells: impl IntoIterator<Item = T>,
        options: RowOptions,
    ) -> Result<Self> {
        Self::with_kind(RowKind::Data, cells, options)
    }

    /// Like [`Row::with_options`] with an explicit row kind.
    ///
    /// # Errors
    ///
    /// See [`Row::with_options`].
    pub fn with_kind<T: Into<CellSource>>(
        kind: RowKind,
        cells: impl IntoIterator<Item = T>,
        options: RowOptions,
    ) -> Result<Self> {
        let RowOptions {
            max_columns,
            row_format,
        } = options;

        if let (Some(max), Some(format)) = (max_columns, &row_format) {
            check_format_len("row", format.len(), max)?;
        }

        let mut row = Self {
            kind,
            max_columns,
            ..Self::default()
        };
        for source in cells {
            row.append_cell(source)?;
        }

        if let Some(max) = max_columns {
            let missing = max.saturating_sub(row.column_count());
            if missing > 0 {
                log::trace!("padding row with {missing} empty cells to {max} columns");
                for _ in 0..missing {
                    let pad = row.normalize(CellSource::Value(Value::Empty));
                    row.cells.push(pad);
                }
            }
        }

        if let Some(format) = row_format {
            check_format_len("row", format.len(), row.column_count())?;
            row.row_format = Some(format);
        }

        Ok(row)
    }

    /// Attach a table column format, usually to a header row.
    ///
    /// When the row is appended to a table the format becomes the table's
    /// column format, replacing any previous one.
    #[must_use]
    pub fn column_format<S: Into<String>>(mut self, format: impl IntoIterator<Item = S>) -> Self {
        self.column_format = Some(format.into_iter().map(Into::into).collect());
        self
    }

    fn normalize(&self, source: CellSource) -> Cell {
        match (source, self.kind) {
            (CellSource::Cell(cell), _) => cell,
            (CellSource::Value(value), RowKind::Data) => Cell::new(value),
            (CellSource::Value(value), RowKind::Header) => Cell::header(value).with_format("{}"),
        }
    }

    /// Push a cell and its span fillers, honoring `max_columns`.
    fn push_cell(&mut self, mut cell: Cell) {
        if let Some(max) = self.max_columns {
            let room = max.saturating_sub(self.column_count()).max(1);
            if cell.column_span() > room {
                log::debug!(
                    "clipping column span {} to {room} to stay within {max} columns",
                    cell.column_span()
                );
                // room >= 1, so this cannot fail
                let _ = cell.set_column_span(room);
            }
        }
        let fillers = cell.column_span() - 1;
        self.cells.push(cell);
        self.cells
            .extend(std::iter::repeat_with(Cell::filler).take(fillers));
    }

    /// Append a raw value or a prepared cell.
    ///
    /// A cell spanning `k` columns is followed by `k - 1` empty filler cells.
    /// With a column limit, a span that would overhang the limit is clipped
    /// and the surplus fillers are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if the row already occupies
    /// `max_columns` logical columns. The row is unchanged on error.
    pub fn append_cell(&mut self, source: impl Into<CellSource>) -> Result<()> {
        if let Some(max) = self.max_columns
            && self.column_count() >= max
        {
            return Err(TableError::validation(format!(
                "row already spans its maximum of {max} columns"
            )));
        }
        let cell = self.normalize(source.into());
        self.push_cell(cell);
        Ok(())
    }

    /// Walk the cells and yield the ones that start a visible column.
    #[must_use]
    pub fn visible_columns(&self) -> VisibleColumns<'_> {
        VisibleColumns {
            cells: self.cells.iter().enumerate(),
            next: 0,
        }
    }

    /// Number of logical columns: the summed spans of the visible cells.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.visible_columns().map(|column| column.span).sum()
    }

    #[must_use]
    pub fn kind(&self) -> RowKind {
        self.kind
    }

    #[must_use]
    pub fn is_header(&self) -> bool {
        self.kind == RowKind::Header
    }

    /// All physical cells, fillers included.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of physical cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The column limit fixed at construction.
    #[must_use]
    pub fn max_columns(&self) -> Option<usize> {
        self.max_columns
    }

    #[must_use]
    pub fn row_format(&self) -> Option<&[String]> {
        self.row_format.as_deref()
    }

    /// Replace the row format.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if the length differs from
    /// `max_columns` (or the current column count without a limit).
    pub fn set_row_format<S: Into<String>>(
        &mut self,
        format: impl IntoIterator<Item = S>,
    ) -> Result<()> {
        let format: Vec<String> = format.into_iter().map(Into::into).collect();
        let expected = self.max_columns.unwrap_or_else(|| self.column_count());
        check_format_len("row", format.len(), expected)?;
        self.row_format = Some(format);
        Ok(())
    }

    pub(crate) fn take_column_format(&mut self) -> Option<Vec<String>> {
        self.column_format.take()
    }

    /// Cell at a physical index.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Index`] if `index` is out of range.
    pub fn cell(&self, index: usize) -> Result<&Cell> {
        self.cells
            .get(index)
            .ok_or_else(|| TableError::index(IndexKind::Cell, index, self.cells.len()))
    }

    /// Mutable cell at a physical index.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Index`] if `index` is out of range.
    pub fn cell_mut(&mut self, index: usize) -> Result<&mut Cell> {
        let len = self.cells.len();
        self.cells
            .get_mut(index)
            .ok_or_else(|| TableError::index(IndexKind::Cell, index, len))
    }

    /// Row and table format entries for a logical column.
    ///
    /// Header rows never consult the table column format.
    fn formats_at<'a>(
        &'a self,
        column: usize,
        table_format: Option<&'a [String]>,
    ) -> (Option<&'a str>, Option<&'a str>) {
        let row = self
            .row_format
            .as_deref()
            .and_then(|format| format.get(column))
            .map(String::as_str);
        let table = if self.is_header() {
            None
        } else {
            table_format
                .and_then(|format| format.get(column))
                .map(String::as_str)
        };
        (row, table)
    }

    /// Render as `<tr>` with an optional table column format.
    pub(crate) fn html_in(&self, table_format: Option<&[String]>) -> Result<String> {
        let mut html = String::from("<tr>");
        for column in self.visible_columns() {
            let (row_fmt, table_fmt) = self.formats_at(column.index, table_format);
            html.push_str(&self.cells[column.index].html_in(row_fmt, table_fmt)?);
        }
        html.push_str("</tr>");
        Ok(html)
    }

    /// Render as one tabular line with an optional table column format.
    pub(crate) fn latex_in(&self, table_format: Option<&[String]>) -> Result<String> {
        let parts = self
            .visible_columns()
            .map(|column| {
                let (row_fmt, table_fmt) = self.formats_at(column.index, table_format);
                self.cells[column.index].latex_in(row_fmt, table_fmt)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut out = parts.join(latex::CELL_SEP);
        out.push_str(latex::ROW_END);
        if self.is_header() {
            out.push_str(latex::HLINE);
        }
        Ok(out)
    }
}

impl Markup for Row {
    fn to_html(&self) -> Result<String> {
        self.html_in(None)
    }

    fn to_latex(&self) -> Result<String> {
        self.latex_in(None)
    }
}

pub(crate) fn check_format_len(what: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(TableError::validation(format!(
            "wrong number of {what} format strings: expected {expected}, got {got}"
        )));
    }
    Ok(())
}
