//! Error types for table construction, addressing, and formatting.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T, E = TableError> = std::result::Result<T, E>;

/// What an out-of-range index was addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// A row within a table.
    Row,
    /// A physical cell within a row.
    Cell,
    /// A logical column.
    Column,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => write!(f, "row"),
            Self::Cell => write!(f, "cell"),
            Self::Column => write!(f, "column"),
        }
    }
}

/// Error type for table operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TableError {
    /// A structural invariant was violated (span < 1, format length mismatch,
    /// column count overflow).
    Validation(String),
    /// Positional access outside the addressed sequence.
    Index {
        kind: IndexKind,
        index: usize,
        len: usize,
    },
    /// A cell value could not be formatted with its template.
    Format(FormatError),
}

impl TableError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn index(kind: IndexKind, index: usize, len: usize) -> Self {
        Self::Index { kind, index, len }
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::Index { kind, index, len } => {
                write!(f, "{kind} index {index} out of range (len {len})")
            }
            Self::Format(err) => write!(f, "format error: {err}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for TableError {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

/// Error type for format-template evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// A `{` without a closing `}`.
    UnclosedField,
    /// A lone `}` outside a replacement field.
    SingleClosingBrace,
    /// Field references an argument other than the cell value.
    IndexOutOfRange(usize),
    /// Automatic and manual field numbering used together.
    MixedNumbering,
    /// Attribute or item access inside a field name.
    UnsupportedField(String),
    /// Unknown `!` conversion character.
    UnknownConversion(char),
    /// The spec after `:` could not be parsed.
    InvalidSpec(String),
    /// Type code not valid for the value kind.
    UnknownCode { code: char, kind: &'static str },
    /// Precision given for an integer presentation type.
    PrecisionNotAllowed,
    /// Sign flag given for a string.
    SignNotAllowed,
    /// `=` alignment given for a string.
    AlignNotAllowed,
    /// Integer out of range for the `c` presentation type.
    InvalidChar(i64),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedField => write!(f, "expected '}}' before end of string"),
            Self::SingleClosingBrace => {
                write!(f, "single '}}' encountered in format string")
            }
            Self::IndexOutOfRange(i) => write!(f, "replacement index {i} out of range"),
            Self::MixedNumbering => write!(
                f,
                "cannot switch between automatic and manual field numbering"
            ),
            Self::UnsupportedField(name) => write!(f, "unsupported field name: {name}"),
            Self::UnknownConversion(c) => {
                write!(f, "unknown conversion specifier {c}")
            }
            Self::InvalidSpec(spec) => write!(f, "invalid format specifier '{spec}'"),
            Self::UnknownCode { code, kind } => {
                write!(f, "unknown format code '{code}' for object of type '{kind}'")
            }
            Self::PrecisionNotAllowed => {
                write!(f, "precision not allowed in integer format specifier")
            }
            Self::SignNotAllowed => write!(f, "sign not allowed in string format specifier"),
            Self::AlignNotAllowed => write!(
                f,
                "'=' alignment not allowed in string format specifier"
            ),
            Self::InvalidChar(v) => write!(f, "%c arg not in range: {v}"),
        }
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_error_display() {
        let err = TableError::validation("column span must be >= 1");
        assert_eq!(err.to_string(), "validation error: column span must be >= 1");

        let err = TableError::index(IndexKind::Row, 4, 2);
        assert_eq!(err.to_string(), "row index 4 out of range (len 2)");
    }

    #[test]
    fn test_format_error_converts_and_chains() {
        use std::error::Error;

        let err: TableError = FormatError::UnknownCode {
            code: 'd',
            kind: "float",
        }
        .into();
        assert!(matches!(err, TableError::Format(_)));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "format error: unknown format code 'd' for object of type 'float'"
        );
    }
}
