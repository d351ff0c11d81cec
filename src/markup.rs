//! The rendering contract shared by cells, rows, and tables.

use crate::error::Result;

/// Something that renders itself as HTML and LaTeX markup.
///
/// Rendering walks the model bottom-up: a table renders its rows, a row
/// renders the cells that start a visible column. Structural problems are
/// rejected when the model is built, so the only error a renderer reports is
/// a value that cannot be formatted with its template.
pub trait Markup {
    /// Render as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Format`](crate::TableError::Format) when a
    /// value does not fit its format template.
    fn to_html(&self) -> Result<String>;

    /// Render as LaTeX.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Format`](crate::TableError::Format) when a
    /// value does not fit its format template.
    fn to_latex(&self) -> Result<String>;
}
