//! Cell - the smallest renderable unit of a table.
//!
//! A [`Cell`] holds a [`Value`], a header flag, optional colors, a column
//! span, and an optional format template.
//!
//! # Examples
//!
//! ```
//! use tabmark::{Cell, Markup};
//!
//! let cell = Cell::new(3.5678)
//!     .with_format("{:.2f}")
//!     .with_background("yellow")
//!     .with_column_span(2)
//!     .unwrap();
//!
//! assert_eq!(
//!     cell.to_html().unwrap(),
//!     r#"<td colspan="2" style="background-color:yellow">3.57</td>"#
//! );
//! assert_eq!(cell.to_latex().unwrap(), r"\multicolumn{2}{l}{3.57}");
//! ```

use std::fmt;

use crate::error::{FormatError, Result, TableError};
use crate::format::{self, format_value};
use crate::latex;
use crate::markup::Markup;
use crate::value::Value;

/// A table cell.
#[derive(Clone, PartialEq)]
pub struct Cell {
    value: Value,
    header: bool,
    background: Option<String>,
    text_color: Option<String>,
    column_span: usize,
    format: Option<String>,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            value: Value::Empty,
            header: false,
            background: None,
            text_color: None,
            column_span: 1,
            format: None,
        }
    }
}

/// Validate a column span.
fn check_span(span: usize) -> Result<usize> {
    if span < 1 {
        return Err(TableError::validation(format!(
            "column span must be greater or equal to 1, got {span}"
        )));
    }
    Ok(span)
}

/// Coerce a value to a column span the way integer conversion does.
///
/// Integers are taken as-is, floats are truncated toward zero, strings are
/// parsed as decimal integers, and booleans count as 0 or 1.
///
/// # Errors
///
/// Returns [`TableError::Validation`] when the value cannot be converted or
/// the result is less than 1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn coerce_span(value: &Value) -> Result<usize> {
    let not_integer =
        || TableError::validation(format!("column span {value:?} is not an integer"));
    let below_one = |shown: &dyn fmt::Display| {
        TableError::validation(format!(
            "column span must be greater or equal to 1, got {shown}"
        ))
    };

    let n: i64 = match value {
        Value::Int(i) => *i,
        Value::Bool(b) => i64::from(*b),
        Value::Float(x) if x.is_finite() => {
            let t = x.trunc();
            if t < 1.0 {
                return Err(below_one(&t));
            }
            if t >= usize::MAX as f64 {
                return Err(not_integer());
            }
            return Ok(t as usize);
        }
        Value::Str(s) => s.trim().parse().map_err(|_| not_integer())?,
        Value::Float(_) | Value::Empty => return Err(not_integer()),
    };

    let span = usize::try_from(n).map_err(|_| below_one(&n))?;
    check_span(span)
}

impl Cell {
    /// Create a data cell.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Create a header cell.
    ///
    /// Header cells render as `<th>` and in bold, and ignore row and table
    /// column formats.
    #[must_use]
    pub fn header(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            header: true,
            ..Self::default()
        }
    }

    /// A synthetic empty cell used for span fillers and padding.
    pub(crate) fn filler() -> Self {
        Self::default()
    }

    /// Set the format template.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    /// Set the text color.
    #[must_use]
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// Set the column span.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if `span` is 0.
    pub fn with_column_span(mut self, span: usize) -> Result<Self> {
        self.column_span = check_span(span)?;
        Ok(self)
    }

    /// The payload.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replace the payload.
    pub fn set_value(&mut self, value: impl Into<Value>) {
        self.value = value.into();
    }

    /// Whether this is a header cell.
    #[must_use]
    pub fn is_header(&self) -> bool {
        self.header
    }

    pub fn set_header(&mut self, header: bool) {
        self.header = header;
    }

    /// The format template, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = Some(format.into());
    }

    pub fn clear_format(&mut self) {
        self.format = None;
    }

    /// The background color, if any.
    #[must_use]
    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background = Some(color.into());
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    /// The text color, if any.
    #[must_use]
    pub fn text_color(&self) -> Option<&str> {
        self.text_color.as_deref()
    }

    pub fn set_text_color(&mut self, color: impl Into<String>) {
        self.text_color = Some(color.into());
    }

    pub fn clear_text_color(&mut self) {
        self.text_color = None;
    }

    /// Number of logical columns this cell occupies.
    #[must_use]
    pub fn column_span(&self) -> usize {
        self.column_span
    }

    /// Change the column span in place.
    ///
    /// The containing row is not re-materialized: a wider span hides the
    /// cells it now covers, a narrower one exposes former fillers.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Validation`] if `span` is 0. The cell is left
    /// unchanged on error.
    pub fn set_column_span(&mut self, span: usize) -> Result<()> {
        self.column_span = check_span(span)?;
        Ok(())
    }

    /// Change the column span from an untyped value.
    ///
    /// # Errors
    ///
    /// See [`coerce_span`].
    pub fn set_column_span_value(&mut self, span: impl Into<Value>) -> Result<()> {
        self.column_span = coerce_span(&span.into())?;
        Ok(())
    }

    /// Display string for this cell.
    ///
    /// Uses the cell's own template, else `column_format` unless this is a
    /// header, else the value's default stringification.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the chosen template does not apply to the
    /// value.
    pub fn stringify(&self, column_format: Option<&str>) -> Result<String, FormatError> {
        self.stringify_in(column_format, None)
    }

    /// Stringify with separate row and table column formats.
    pub(crate) fn stringify_in(
        &self,
        row_format: Option<&str>,
        table_format: Option<&str>,
    ) -> Result<String, FormatError> {
        match format::resolve(self.format(), row_format, table_format, self.header) {
            Some(template) => format_value(template, &self.value),
            None => Ok(self.value.to_string()),
        }
    }

    /// Inline CSS for the colors.
    fn css(&self) -> String {
        let mut rules = Vec::with_capacity(2);
        if let Some(bg) = &self.background {
            rules.push(format!("background-color:{bg}"));
        }
        if let Some(color) = &self.text_color {
            rules.push(format!("color:{color}"));
        }
        rules.join("; ")
    }

    /// Render as `<th>`/`<td>` with `column_format` as the fallback template.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Format`] if the value cannot be formatted.
    pub fn html(&self, column_format: Option<&str>) -> Result<String> {
        self.html_in(column_format, None)
    }

    pub(crate) fn html_in(
        &self,
        row_format: Option<&str>,
        table_format: Option<&str>,
    ) -> Result<String> {
        let tag = if self.header { "th" } else { "td" };
        let mut attrs = Vec::with_capacity(2);
        if self.column_span > 1 {
            attrs.push(format!("colspan=\"{}\"", self.column_span));
        }
        let style = self.css();
        if !style.is_empty() {
            attrs.push(format!("style=\"{style}\""));
        }

        let text = self.stringify_in(row_format, table_format)?;
        if attrs.is_empty() {
            Ok(format!("<{tag}>{text}</{tag}>"))
        } else {
            Ok(format!("<{tag} {}>{text}</{tag}>", attrs.join(" ")))
        }
    }

    /// Render as escaped LaTeX with `column_format` as the fallback template.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Format`] if the value cannot be formatted.
    pub fn latex(&self, column_format: Option<&str>) -> Result<String> {
        self.latex_in(column_format, None)
    }

    pub(crate) fn latex_in(
        &self,
        row_format: Option<&str>,
        table_format: Option<&str>,
    ) -> Result<String> {
        let text = self.stringify_in(row_format, table_format)?;
        let escaped = latex::escape(&text);
        // bold goes next to the text, inside any multicolumn wrapper
        let body = if self.header {
            format!("{}{escaped}", latex::BOLD)
        } else {
            escaped.into_owned()
        };
        if self.column_span > 1 {
            Ok(latex::multicolumn(self.column_span, &body))
        } else {
            Ok(body)
        }
    }
}

impl Markup for Cell {
    fn to_html(&self) -> Result<String> {
        self.html(None)
    }

    fn to_latex(&self) -> Result<String> {
        self.latex(None)
    }
}

impl fmt::Debug for Cell {
    /// Shows the value plus every field that differs from its default.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Cell");
        out.field("value", &self.value);
        if self.header {
            out.field("header", &self.header);
        }
        if let Some(bg) = &self.background {
            out.field("background", bg);
        }
        if let Some(color) = &self.text_color {
            out.field("text_color", color);
        }
        if self.column_span != 1 {
            out.field("column_span", &self.column_span);
        }
        if let Some(format) = &self.format {
            out.field("format", format);
        }
        out.finish()
    }
}

impl<T: Into<Value>> From<T> for Cell {
    fn from(value: T) -> Self {
        Cell::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_format_on_creation() {
        let cases = [("{}", "1.6789"), ("{:.4g}", "1.679")];
        for (template, expected) in cases {
            let cell = Cell::new(1.6789).with_format(template);
            assert_eq!(cell.stringify(None).unwrap(), expected);
        }
    }

    #[test]
    fn test_cell_format_after_creation() {
        let cases = [("{}", "1.6789"), ("{:.4g}", "1.679")];
        for (template, expected) in cases {
            let mut cell = Cell::new(1.6789);
            cell.set_format(template);
            assert_eq!(cell.stringify(None).unwrap(), expected);
        }
    }

    #[test]
    fn test_column_format_fallback() {
        let cell = Cell::new(3.5678);
        assert_eq!(cell.stringify(Some("{:.2f}")).unwrap(), "3.57");
        assert_eq!(cell.stringify(None).unwrap(), "3.5678");

        let own = Cell::new(3.5678).with_format("{:.1f}");
        assert_eq!(own.stringify(Some("{:.2f}")).unwrap(), "3.6");
    }

    #[test]
    fn test_header_ignores_column_format() {
        let header = Cell::header("Total");
        assert_eq!(header.stringify(Some("{:d}")).unwrap(), "Total");

        let formatted = Cell::header(2.5).with_format("{:.2f}");
        assert_eq!(formatted.stringify(Some("{:d}")).unwrap(), "2.50");
    }

    #[test]
    fn test_html_plain_cell_has_no_attributes() {
        assert_eq!(Cell::new(1).to_html().unwrap(), "<td>1</td>");
        assert_eq!(Cell::header("a").to_html().unwrap(), "<th>a</th>");
    }

    #[test]
    fn test_html_attributes() {
        let cell = Cell::new("x")
            .with_background("red")
            .with_text_color("#fff");
        assert_eq!(
            cell.to_html().unwrap(),
            r#"<td style="background-color:red; color:#fff">x</td>"#
        );

        let cell = Cell::header("h").with_column_span(3).unwrap();
        assert_eq!(cell.to_html().unwrap(), r#"<th colspan="3">h</th>"#);
    }

    #[test]
    fn test_latex_header_bold_inside_multicolumn() {
        let cell = Cell::header("a_b").with_column_span(2).unwrap();
        assert_eq!(cell.to_latex().unwrap(), r"\multicolumn{2}{l}{\bf a\_b}");
        assert_eq!(Cell::header("x").to_latex().unwrap(), r"\bf x");
    }

    #[test]
    fn test_latex_escapes_formatted_text() {
        let cell = Cell::new("~_$\r\n{}");
        assert_eq!(
            cell.to_latex().unwrap(),
            r"{\textasciitilde}\_\${\linebreak}\{\}"
        );
        assert_eq!(Cell::new("").to_latex().unwrap(), "");
    }

    #[test]
    fn test_span_validation() {
        assert!(Cell::new(1).with_column_span(0).is_err());

        let mut cell = Cell::new(1).with_column_span(2).unwrap();
        let err = cell.set_column_span(0).unwrap_err();
        assert!(matches!(err, TableError::Validation(_)));
        assert_eq!(cell.column_span(), 2, "failed update leaves span unchanged");
    }

    #[test]
    fn test_span_coercion() {
        assert_eq!(coerce_span(&Value::from(3)).unwrap(), 3);
        assert_eq!(coerce_span(&Value::from(2.9)).unwrap(), 2);
        assert_eq!(coerce_span(&Value::from(" 4 ")).unwrap(), 4);
        assert_eq!(coerce_span(&Value::from(true)).unwrap(), 1);

        assert!(coerce_span(&Value::from(0)).is_err());
        assert!(coerce_span(&Value::from(-2)).is_err());
        assert!(coerce_span(&Value::from(0.5)).is_err());
        assert!(coerce_span(&Value::from("two")).is_err());
        assert!(coerce_span(&Value::from(f64::NAN)).is_err());
        assert!(coerce_span(&Value::Empty).is_err());
        assert!(coerce_span(&Value::from(false)).is_err());

        let mut cell = Cell::new(1);
        cell.set_column_span_value("3").unwrap();
        assert_eq!(cell.column_span(), 3);
        assert!(cell.set_column_span_value(-1).is_err());
        assert_eq!(cell.column_span(), 3);
    }

    #[test]
    fn test_debug_lists_non_default_fields() {
        let plain = format!("{:?}", Cell::new(1));
        assert_eq!(plain, "Cell { value: Int(1) }");

        let styled = format!(
            "{:?}",
            Cell::header("h").with_column_span(2).unwrap().with_format("{}")
        );
        assert_eq!(
            styled,
            r#"Cell { value: Str("h"), header: true, column_span: 2, format: "{}" }"#
        );
    }

    #[test]
    fn test_format_error_propagates() {
        let cell = Cell::new(1.5).with_format("{:d}");
        assert!(matches!(cell.to_html(), Err(TableError::Format(_))));
        assert!(matches!(cell.to_latex(), Err(TableError::Format(_))));
    }
}
