//! LaTeX output helpers.
//!
//! Text placed in a tabular cell is escaped through a fixed replacement
//! table. Matching is longest-first, so `\r\n` becomes a single line break.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Replacement table for characters with special meaning in LaTeX.
pub const ESCAPE_TABLE: [(&str, &str); 10] = [
    ("&", r"\&"),
    ("\\", r"{\textbackslash}"),
    ("~", r"{\textasciitilde}"),
    ("$", r"\$"),
    ("\r\n", r"{\linebreak}"),
    ("\n", r"{\linebreak}"),
    ("\r", r"{\linebreak}"),
    ("_", r"\_"),
    ("{", r"\{"),
    ("}", r"\}"),
];

/// Alternation over the table keys, longest key first.
static ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut keys: Vec<&str> = ESCAPE_TABLE.iter().map(|(key, _)| *key).collect();
    keys.sort_by_key(|key| std::cmp::Reverse(key.len()));
    let pattern = keys
        .iter()
        .map(|key| regex::escape(key))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&pattern).expect("escape table keys form a valid pattern")
});

/// Escape text for use inside a tabular cell.
///
/// # Examples
///
/// ```
/// use tabmark::latex::escape;
///
/// assert_eq!(escape("r&d"), r"r\&d");
/// assert_eq!(escape("a\r\nb"), r"a{\linebreak}b");
/// ```
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    ESCAPE_RE.replace_all(text, |caps: &Captures<'_>| {
        let matched = &caps[0];
        ESCAPE_TABLE
            .iter()
            .find(|(key, _)| *key == matched)
            .map_or(matched, |(_, replacement)| *replacement)
            .to_string()
    })
}

/// Bold directive placed before header text.
pub const BOLD: &str = r"\bf ";

/// Horizontal rule line.
pub const HLINE: &str = "\\hline\n";

/// Row terminator.
pub const ROW_END: &str = "\\\\\n";

/// Separator between cells of one row.
pub const CELL_SEP: &str = " & ";

/// Wrap `content` in a left-aligned multi-column directive.
#[must_use]
pub fn multicolumn(span: usize, content: &str) -> String {
    format!(r"\multicolumn{{{span}}}{{l}}{{{content}}}")
}

/// Opening of a tabular environment with `columns` left-aligned columns.
#[must_use]
pub fn begin_tabular(columns: usize) -> String {
    format!("\\begin{{tabular}}{{*{{{columns}}}{{l}}}}\n")
}

/// Closing of a tabular environment.
pub const END_TABULAR: &str = r"\end{tabular}";
