//! printf-style number formats for minimum reports.
//!
//! A [`NumberFormat`] is parsed from strings such as `"%12.6f"`, `"%.3e"` or
//! `"%g"` and renders `f64` values the way C's `printf` does for the same
//! conversion: fixed (`f`), scientific with a signed two-digit exponent
//! (`e`), or shortest-of-both with trailing zeros removed (`g`). Values are
//! right-aligned to the optional width.
use crate::minimum::errors::{FormatError, FormatResult};
use std::{fmt, str::FromStr};

/// Largest accepted precision; more digits carry no information for `f64`.
pub const MAX_PRECISION: usize = 17;

/// Precision used when a format does not give one.
pub const DEFAULT_PRECISION: usize = 6;

/// printf conversion style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatStyle {
    /// `%f`
    Fixed,
    /// `%e`
    Scientific,
    /// `%g`
    General,
}

impl FormatStyle {
    fn conversion(self) -> char {
        match self {
            FormatStyle::Fixed => 'f',
            FormatStyle::Scientific => 'e',
            FormatStyle::General => 'g',
        }
    }
}

/// Validated numeric format.
///
/// Fields:
/// - `style`: conversion style.
/// - `width`: minimum field width; values are right-aligned with spaces.
/// - `precision`: digits after the point (`f`, `e`) or significant digits
///   (`g`); `None` means [`DEFAULT_PRECISION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub style: FormatStyle,
    pub width: Option<usize>,
    pub precision: Option<usize>,
}

impl NumberFormat {
    /// Build a format.
    ///
    /// # Errors
    /// [`FormatError::InvalidPrecision`] when `precision > MAX_PRECISION`.
    pub fn new(
        style: FormatStyle, width: Option<usize>, precision: Option<usize>,
    ) -> FormatResult<Self> {
        if let Some(p) = precision {
            if p > MAX_PRECISION {
                return Err(FormatError::InvalidPrecision { precision: p, max: MAX_PRECISION });
            }
        }
        Ok(NumberFormat { style, width, precision })
    }

    /// Render `value` into a new string.
    pub fn format(&self, value: f64) -> String {
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        let body = if !value.is_finite() {
            format_non_finite(value)
        } else {
            match self.style {
                FormatStyle::Fixed => format!("{value:.precision$}"),
                FormatStyle::Scientific => format_scientific(value, precision),
                FormatStyle::General => format_general(value, precision),
            }
        };
        match self.width {
            Some(width) => format!("{body:>width$}"),
            None => body,
        }
    }

    /// Append `value` to `out`.
    ///
    /// # Errors
    /// Propagates writer failures.
    pub fn write_value<W: fmt::Write + ?Sized>(&self, out: &mut W, value: f64) -> fmt::Result {
        out.write_str(&self.format(value))
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat { style: FormatStyle::General, width: None, precision: None }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("%")?;
        if let Some(w) = self.width {
            write!(f, "{w}")?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{p}")?;
        }
        write!(f, "{}", self.style.conversion())
    }
}

impl FromStr for NumberFormat {
    type Err = FormatError;

    /// Parse `%[width][.precision](f|e|g)`.
    ///
    /// A `.` with no digits means precision 0, as in printf.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FormatError::InvalidSpec { spec: s.to_string() };

        let rest = s.trim().strip_prefix('%').ok_or_else(invalid)?;
        let (digits, rest) = split_digits(rest);
        let width = parse_count(digits).map_err(|_| invalid())?;

        let (precision, rest) = match rest.strip_prefix('.') {
            Some(after) => {
                let (digits, rest) = split_digits(after);
                let p = parse_count(digits).map_err(|_| invalid())?.unwrap_or(0);
                (Some(p), rest)
            }
            None => (None, rest),
        };

        let style = match rest {
            "f" => FormatStyle::Fixed,
            "e" => FormatStyle::Scientific,
            "g" => FormatStyle::General,
            _ => return Err(invalid()),
        };
        NumberFormat::new(style, width, precision)
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

fn parse_count(digits: &str) -> Result<Option<usize>, std::num::ParseIntError> {
    if digits.is_empty() { Ok(None) } else { digits.parse().map(Some) }
}

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value > 0.0 {
        "inf".to_string()
    } else {
        "-inf".to_string()
    }
}

/// Split Rust's `{:e}` output into mantissa and exponent.
fn split_exponent(rendered: &str) -> (&str, i32) {
    match rendered.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (rendered, 0),
    }
}

fn printf_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

fn format_scientific(value: f64, precision: usize) -> String {
    let rendered = format!("{value:.precision$e}");
    let (mantissa, exp) = split_exponent(&rendered);
    printf_exponent(mantissa, exp)
}

fn format_general(value: f64, precision: usize) -> String {
    let sig = precision.max(1);
    let rendered = format!("{value:.prec$e}", prec = sig - 1);
    let (mantissa, exp) = split_exponent(&rendered);
    if exp < -4 || exp >= sig as i32 {
        printf_exponent(trim_fraction(mantissa), exp)
    } else {
        let decimals = (sig as i32 - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s }
}
