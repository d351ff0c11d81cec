//! Format templates.
//!
//! Cells, rows, and tables carry optional format templates such as `"{}"`,
//! `"{:.2g}"`, or `"{:>10,d} units"`. A template is literal text with
//! replacement fields; every field refers to the cell value.
//!
//! # Template Syntax
//!
//! ```text
//! field  ::= "{" [index] ["!" conversion] [":" spec] "}"
//! index  ::= "" | "0"
//! spec   ::= [[fill]align][sign]["#"]["0"][width][grouping]["." precision][type]
//! align  ::= "<" | ">" | "^" | "="
//! sign   ::= "+" | "-" | " "
//! grouping ::= "," | "_"
//! ```
//!
//! `{{` and `}}` produce literal braces.
//!
//! # Examples
//!
//! ```
//! use tabmark::format::format_value;
//! use tabmark::Value;
//!
//! assert_eq!(format_value("{:.3g}", &Value::from(3.5678)).unwrap(), "3.57");
//! assert_eq!(format_value("{:>6}", &Value::from("ab")).unwrap(), "    ab");
//! assert_eq!(format_value("{:,d}", &Value::from(1234567)).unwrap(), "1,234,567");
//! ```

use crate::error::FormatError;
use crate::value::{Value, float_repr};

/// Field alignment inside the requested width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
    /// Padding goes between the sign and the digits.
    AfterSign,
}

/// Sign display for numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Sign {
    #[default]
    Minus,
    Plus,
    Space,
}

/// A parsed format spec (the part after `:`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Spec {
    fill: Option<char>,
    align: Option<Align>,
    sign: Option<Sign>,
    alternate: bool,
    zero: bool,
    width: Option<usize>,
    grouping: Option<char>,
    precision: Option<usize>,
    ty: Option<char>,
}

impl Spec {
    fn parse(spec: &str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidSpec(spec.to_string());
        let chars: Vec<char> = spec.chars().collect();
        let mut i = 0;

        let align_of = |c: char| match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            '=' => Some(Align::AfterSign),
            _ => None,
        };

        let mut fill = None;
        let mut align = None;
        if let Some(a) = chars.get(1).copied().and_then(align_of) {
            fill = Some(chars[0]);
            align = Some(a);
            i = 2;
        } else if let Some(a) = chars.first().copied().and_then(align_of) {
            align = Some(a);
            i = 1;
        }

        let sign = match chars.get(i) {
            Some('+') => Some(Sign::Plus),
            Some('-') => Some(Sign::Minus),
            Some(' ') => Some(Sign::Space),
            _ => None,
        };
        if sign.is_some() {
            i += 1;
        }

        let alternate = chars.get(i) == Some(&'#');
        if alternate {
            i += 1;
        }

        let zero = chars.get(i) == Some(&'0');
        if zero {
            i += 1;
        }

        let width = take_number(&chars, &mut i).map_err(|()| invalid())?;

        let grouping = match chars.get(i) {
            Some(&c @ (',' | '_')) => {
                i += 1;
                Some(c)
            }
            _ => None,
        };

        let precision = if chars.get(i) == Some(&'.') {
            i += 1;
            let p = take_number(&chars, &mut i).map_err(|()| invalid())?;
            Some(p.ok_or_else(invalid)?)
        } else {
            None
        };

        let ty = chars.get(i).copied();
        if ty.is_some() {
            i += 1;
        }
        if i != chars.len() {
            return Err(invalid());
        }

        Ok(Self {
            fill,
            align,
            sign,
            alternate,
            zero,
            width,
            grouping,
            precision,
            ty,
        })
    }

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Pick the template that applies to a cell.
///
/// Precedence is the cell's own template, then the row's entry for the
/// column, then the table's column entry. Header cells only honor their own
/// template so that labels are never run through a numeric column format.
#[must_use]
pub fn resolve<'a>(
    cell: Option<&'a str>,
    row: Option<&'a str>,
    table: Option<&'a str>,
    header: bool,
) -> Option<&'a str> {
    if header {
        return cell;
    }
    cell.or(row).or(table)
}

/// Read a run of ASCII digits starting at `*i`.
fn take_number(chars: &[char], i: &mut usize) -> Result<Option<usize>, ()> {
    let start = *i;
    while chars.get(*i).is_some_and(char::is_ascii_digit) {
        *i += 1;
    }
    if start == *i {
        return Ok(None);
    }
    let digits: String = chars[start..*i].iter().collect();
    digits.parse().map(Some).map_err(|_| ())
}

/// Field numbering state across one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Unset,
    Auto(usize),
    Manual,
}

/// Format `value` with `template`.
///
/// Synthetic fill ([`Value::Empty`]) renders as the empty string regardless
/// of the template.
///
/// # Errors
///
/// Returns a [`FormatError`] when the template is malformed, references an
/// argument other than the value, or requests a presentation type that does
/// not apply to the value.
pub fn format_value(template: &str, value: &Value) -> Result<String, FormatError> {
    if value.is_empty_fill() {
        return Ok(String::new());
    }

    let mut out = String::with_capacity(template.len() + 8);
    let mut numbering = Numbering::Unset;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                let mut depth = 1usize;
                loop {
                    match chars.next() {
                        None => return Err(FormatError::UnclosedField),
                        Some('{') => {
                            depth += 1;
                            field.push('{');
                        }
                        Some('}') => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                            field.push('}');
                        }
                        Some(other) => field.push(other),
                    }
                }
                out.push_str(&render_field(&field, value, &mut numbering)?);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(FormatError::SingleClosingBrace),
            other => out.push(other),
        }
    }

    Ok(out)
}

fn render_field(
    field: &str,
    value: &Value,
    numbering: &mut Numbering,
) -> Result<String, FormatError> {
    let name_end = field.find(['!', ':']).unwrap_or(field.len());
    let name = &field[..name_end];
    let rest = &field[name_end..];

    let index = if name.is_empty() {
        let next = match *numbering {
            Numbering::Manual => return Err(FormatError::MixedNumbering),
            Numbering::Unset => 0,
            Numbering::Auto(n) => n,
        };
        *numbering = Numbering::Auto(next + 1);
        next
    } else if name.chars().all(|c| c.is_ascii_digit()) {
        if matches!(*numbering, Numbering::Auto(_)) {
            return Err(FormatError::MixedNumbering);
        }
        *numbering = Numbering::Manual;
        name.parse::<usize>()
            .map_err(|_| FormatError::UnsupportedField(name.to_string()))?
    } else {
        return Err(FormatError::UnsupportedField(name.to_string()));
    };
    if index != 0 {
        return Err(FormatError::IndexOutOfRange(index));
    }

    let (conversion, spec) = if let Some(after) = rest.strip_prefix('!') {
        let mut it = after.chars();
        let conv = it
            .next()
            .ok_or_else(|| FormatError::InvalidSpec(field.to_string()))?;
        let tail = it.as_str();
        let spec = if tail.is_empty() {
            ""
        } else {
            tail.strip_prefix(':')
                .ok_or_else(|| FormatError::InvalidSpec(field.to_string()))?
        };
        (Some(conv), spec)
    } else {
        (None, rest.strip_prefix(':').unwrap_or(""))
    };

    if spec.contains(['{', '}']) {
        return Err(FormatError::UnsupportedField(field.to_string()));
    }

    let converted;
    let value = match conversion {
        None => value,
        Some('s') => {
            converted = Value::Str(value.to_string());
            &converted
        }
        Some('r') => {
            converted = Value::Str(value.repr());
            &converted
        }
        Some(other) => return Err(FormatError::UnknownConversion(other)),
    };

    apply_spec(value, &Spec::parse(spec)?)
}

fn apply_spec(value: &Value, spec: &Spec) -> Result<String, FormatError> {
    match value {
        Value::Empty => Ok(String::new()),
        Value::Str(s) => format_str(s, spec),
        Value::Bool(_) if spec.is_empty() => Ok(value.to_string()),
        Value::Bool(b) => format_int(i64::from(*b), spec, "bool"),
        Value::Int(i) => format_int(*i, spec, "int"),
        Value::Float(x) => format_float(*x, spec),
    }
}

fn format_str(s: &str, spec: &Spec) -> Result<String, FormatError> {
    match spec.ty {
        None | Some('s') => {}
        Some(code) => return Err(FormatError::UnknownCode { code, kind: "str" }),
    }
    if spec.sign.is_some() {
        return Err(FormatError::SignNotAllowed);
    }
    if spec.align == Some(Align::AfterSign) {
        return Err(FormatError::AlignNotAllowed);
    }
    if spec.grouping.is_some() {
        return Err(FormatError::InvalidSpec(
            "cannot specify grouping with 's'".to_string(),
        ));
    }

    let text: String = match spec.precision {
        Some(p) => s.chars().take(p).collect(),
        None => s.to_string(),
    };
    let fill = spec.fill.unwrap_or(if spec.zero { '0' } else { ' ' });
    Ok(pad(
        "",
        &text,
        spec.width,
        fill,
        spec.align.unwrap_or(Align::Left),
    ))
}

#[allow(clippy::cast_precision_loss)]
fn format_int(i: i64, spec: &Spec, kind: &'static str) -> Result<String, FormatError> {
    let (radix, prefix) = match spec.ty {
        None | Some('d' | 'n') => (10, ""),
        Some('b') => (2, "0b"),
        Some('o') => (8, "0o"),
        Some('x') => (16, "0x"),
        Some('X') => (16, "0X"),
        Some('c') => {
            if spec.sign.is_some() {
                return Err(FormatError::SignNotAllowed);
            }
            let ch = u32::try_from(i)
                .ok()
                .and_then(char::from_u32)
                .ok_or(FormatError::InvalidChar(i))?;
            let fill = spec.fill.unwrap_or(' ');
            return Ok(pad(
                "",
                &ch.to_string(),
                spec.width,
                fill,
                spec.align.unwrap_or(Align::Left),
            ));
        }
        Some('e' | 'E' | 'f' | 'F' | 'g' | 'G' | '%') => {
            return format_float(i as f64, spec);
        }
        Some(code) => return Err(FormatError::UnknownCode { code, kind }),
    };
    if spec.precision.is_some() {
        return Err(FormatError::PrecisionNotAllowed);
    }

    let magnitude = i.unsigned_abs();
    let mut digits = match radix {
        2 => format!("{magnitude:b}"),
        8 => format!("{magnitude:o}"),
        16 if spec.ty == Some('X') => format!("{magnitude:X}"),
        16 => format!("{magnitude:x}"),
        _ => magnitude.to_string(),
    };

    if let Some(sep) = spec.grouping {
        let size = if radix == 10 {
            3
        } else if sep == '_' {
            4
        } else {
            return Err(FormatError::InvalidSpec(format!(
                "cannot specify ',' with '{}'",
                spec.ty.unwrap_or('d')
            )));
        };
        digits = group_digits(&digits, sep, size);
    }

    let mut lead = sign_str(i < 0, spec.sign).to_string();
    if spec.alternate {
        lead.push_str(prefix);
    }
    Ok(pad_number(&lead, &digits, spec))
}

fn format_float(x: f64, spec: &Spec) -> Result<String, FormatError> {
    let negative = x.is_sign_negative() && !x.is_nan();
    let magnitude = x.abs();
    let upper = matches!(spec.ty, Some('E' | 'F' | 'G'));

    let mut body = if !x.is_finite() {
        let word = if x.is_nan() { "nan" } else { "inf" };
        let word = if upper {
            word.to_uppercase()
        } else {
            word.to_string()
        };
        if spec.ty == Some('%') {
            format!("{word}%")
        } else {
            word
        }
    } else {
        match spec.ty {
            Some('f' | 'F') => {
                let body = fixed(magnitude, spec.precision.unwrap_or(6));
                force_point(body, spec.alternate)
            }
            Some('e' | 'E') => {
                let body = scientific(magnitude, spec.precision.unwrap_or(6), upper);
                force_point(body, spec.alternate)
            }
            Some('g' | 'G' | 'n') => general(
                magnitude,
                spec.precision.unwrap_or(6),
                spec.alternate,
                upper,
                false,
            ),
            Some('%') => {
                let body = fixed(magnitude * 100.0, spec.precision.unwrap_or(6));
                format!("{}%", force_point(body, spec.alternate))
            }
            None => match spec.precision {
                Some(p) => general(magnitude, p, spec.alternate, false, true),
                None => float_repr(magnitude),
            },
            Some(code) => return Err(FormatError::UnknownCode { code, kind: "float" }),
        }
    };

    if let Some(sep) = spec.grouping {
        let int_end = body
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(body.len());
        let grouped = group_digits(&body[..int_end], sep, 3);
        body = format!("{grouped}{}", &body[int_end..]);
    }

    Ok(pad_number(sign_str(negative, spec.sign), &body, spec))
}

/// Fixed-point digits of a non-negative finite number.
fn fixed(x: f64, precision: usize) -> String {
    format!("{x:.precision$}")
}

/// Scientific notation with a signed, at least two-digit exponent.
fn scientific(x: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{x:.precision$e}");
    let (mantissa, exp) = split_exponent(&raw);
    let sign = if exp < 0 { '-' } else { '+' };
    let e = if upper { 'E' } else { 'e' };
    format!("{mantissa}{e}{sign}{:02}", exp.unsigned_abs())
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

/// General format: fixed or scientific depending on the exponent.
///
/// `repr_style` is the behavior of an empty presentation type with a
/// precision: scientific from `exp >= precision - 1` and at least one
/// fractional digit in fixed notation.
fn general(x: f64, precision: usize, alternate: bool, upper: bool, repr_style: bool) -> String {
    let p = precision.max(1);
    let probe = format!("{x:.prec$e}", prec = p - 1);
    let (_, exp) = split_exponent(&probe);
    let exp = i64::from(exp);
    let p_signed = i64::try_from(p).unwrap_or(i64::MAX);
    let limit = if repr_style { p_signed - 1 } else { p_signed };

    let use_fixed = exp >= -4 && exp < limit;
    let mut body = if use_fixed {
        fixed(x, usize::try_from(p_signed - 1 - exp).unwrap_or(0))
    } else {
        scientific(x, p - 1, upper)
    };

    if !alternate {
        body = strip_trailing_zeros(&body);
    }
    if repr_style && use_fixed && !body.contains('.') {
        body.push_str(".0");
    }
    body
}

/// Remove trailing fractional zeros (and a dangling point) from the mantissa.
fn strip_trailing_zeros(body: &str) -> String {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => body.split_at(pos),
        None => (body, ""),
    };
    if !mantissa.contains('.') {
        return body.to_string();
    }
    let trimmed = mantissa.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}{exponent}")
}

fn force_point(body: String, alternate: bool) -> String {
    if !alternate || body.contains('.') {
        return body;
    }
    match body.find(['e', 'E']) {
        Some(pos) => format!("{}.{}", &body[..pos], &body[pos..]),
        None => format!("{body}."),
    }
}

fn sign_str(negative: bool, sign: Option<Sign>) -> &'static str {
    match (negative, sign.unwrap_or_default()) {
        (true, _) => "-",
        (false, Sign::Plus) => "+",
        (false, Sign::Space) => " ",
        (false, Sign::Minus) => "",
    }
}

fn group_digits(digits: &str, sep: char, size: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / size);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % size == 0 {
            out.push(sep);
        }
        out.push(*c);
    }
    out
}

fn pad_number(lead: &str, body: &str, spec: &Spec) -> String {
    let (fill, align) = match (spec.fill, spec.align) {
        (fill, Some(align)) => (fill.unwrap_or(if spec.zero { '0' } else { ' ' }), align),
        (_, None) if spec.zero => ('0', Align::AfterSign),
        (_, None) => (' ', Align::Right),
    };
    pad(lead, body, spec.width, fill, align)
}

/// Pad `lead` + `body` to `width` characters.
fn pad(lead: &str, body: &str, width: Option<usize>, fill: char, align: Align) -> String {
    let len = lead.chars().count() + body.chars().count();
    let missing = width.unwrap_or(0).saturating_sub(len);
    let fill_n = |n: usize| std::iter::repeat_n(fill, n).collect::<String>();

    match align {
        Align::Left => format!("{lead}{body}{}", fill_n(missing)),
        Align::Right => format!("{}{lead}{body}", fill_n(missing)),
        Align::Center => {
            let left = missing / 2;
            format!("{}{lead}{body}{}", fill_n(left), fill_n(missing - left))
        }
        Align::AfterSign => format!("{lead}{}{body}", fill_n(missing)),
    }
}
