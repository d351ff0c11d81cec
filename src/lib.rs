//! # tabmark
//!
//! In-memory tables rendered as HTML and LaTeX markup.
//!
//! Build a [`Table`] from rows of values (or prepared [`Row`]s and
//! [`Cell`]s), then render it with [`Markup::to_html`] or
//! [`Markup::to_latex`].
//!
//! ## Quick Start
//!
//! ```rust
//! use tabmark::prelude::*;
//!
//! let table = Table::builder()
//!     .row(Row::header(["Name", "Score"]))
//!     .row(cells!["Alice", 9.5])
//!     .row(cells![Cell::new("Bob and Carol").with_column_span(2).unwrap()])
//!     .build()
//!     .unwrap();
//!
//! let html = table.to_html().unwrap();
//! assert!(html.contains(r#"<td colspan="2">Bob and Carol</td>"#));
//!
//! let latex = table.to_latex().unwrap();
//! assert!(latex.starts_with(r"\begin{tabular}{*{2}{l}}"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Cell**: a value with a header flag, colors, a column span, and an
//!   optional format template
//! - **Row**: cells plus span fillers; [`Row::visible_columns`] decides which
//!   cells are rendered
//! - **Table**: rows plus the header flag and a table-wide column format
//! - **Format templates**: `"{:.2f}"`-style templates, resolved with cell >
//!   row > table precedence (see [`format`])

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cell;
pub mod error;
pub mod format;
pub mod latex;
pub mod markup;
pub mod row;
pub mod table;
pub mod value;

#[cfg(feature = "json")]
pub mod json;

/// Build a `Vec<CellSource>` from mixed values and cells.
///
/// ```
/// use tabmark::{Cell, cells};
///
/// let row = cells![1, "two", Cell::header("three")];
/// assert_eq!(row.len(), 3);
/// ```
#[macro_export]
macro_rules! cells {
    ($($item:expr),* $(,)?) => {
        vec![$($crate::CellSource::from($item)),*]
    };
}

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::cell::Cell;
    pub use crate::cells;
    pub use crate::error::{FormatError, IndexKind, Result, TableError};
    pub use crate::markup::Markup;
    pub use crate::row::{CellSource, Row, RowKind, RowOptions, VisibleColumn};
    pub use crate::table::{RowSource, Table, TableBuilder};
    pub use crate::value::Value;
}

// Re-export key types at crate root
pub use cell::Cell;
pub use error::{FormatError, IndexKind, Result, TableError};
pub use markup::Markup;
pub use row::{CellSource, Row, RowKind, RowOptions, VisibleColumn, VisibleColumns};
pub use table::{RowSource, Table, TableBuilder};
pub use value::Value;
