//! Cell payloads.
//!
//! A [`Value`] is what a cell displays. Values are stringified either through
//! their [`Display`](fmt::Display) implementation or through a format template
//! (see [`crate::format`]).

use std::fmt;

/// The payload of a table cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Synthetic fill: span fillers, row padding, and mapping fill.
    /// Always renders as the empty string.
    #[default]
    Empty,
    /// Text.
    Str(String),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean, shown as `True`/`False`.
    Bool(bool),
}

impl Value {
    /// Returns true for synthetic fill values.
    #[must_use]
    pub fn is_empty_fill(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Name of the value kind, used in format error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Empty | Self::Str(_) => "str",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
        }
    }

    /// Quoted representation used by the `!r` conversion.
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Empty => "''".to_string(),
            Self::Str(s) => {
                let quote = if s.contains('\'') && !s.contains('"') {
                    '"'
                } else {
                    '\''
                };
                let mut out = String::with_capacity(s.len() + 2);
                out.push(quote);
                for ch in s.chars() {
                    match ch {
                        '\\' => out.push_str("\\\\"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        '\t' => out.push_str("\\t"),
                        c if c == quote => {
                            out.push('\\');
                            out.push(c);
                        }
                        c => out.push(c),
                    }
                }
                out.push(quote);
                out
            }
            other => other.to_string(),
        }
    }
}

/// Shortest round-trip representation of a float.
///
/// Integral values keep a trailing `.0`; magnitudes outside `[1e-4, 1e16)`
/// switch to scientific notation with a signed, two-digit exponent.
pub(crate) fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sci = format!("{x:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return x.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return x.to_string();
    };

    if (-4..16).contains(&exp) {
        let fixed = x.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            format!("{fixed}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => f.write_str(&float_repr(*x)),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Empty
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}
