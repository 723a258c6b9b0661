use crate::prelude::*;
use crate::types::DateValue;
use chrono::NaiveDate;

/// Error produced while compiling a date pattern or parsing a value with it.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CodecError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Value {value:?} does not match date format {pattern:?}: {reason}")]
    Mismatch {
        value:   String,
        pattern: String,
        reason:  chrono::format::ParseError,
    },
    #[display(fmt = "Unsupported field '{}' (x{}) in date format {:?}", letter, width, pattern)]
    UnsupportedField {
        letter:  char,
        width:   usize,
        pattern: String,
    },
    #[display(fmt = "Unterminated quote in date format {_0:?}")]
    UnterminatedQuote(String),
    #[display(fmt = "Date format {_0:?} must contain a year, a month and a day")]
    IncompleteFormat(String),
}

impl std::error::Error for CodecError {}

/// Parses column values written with a `SimpleDateFormat`-style pattern such as
/// `yyyy-MM-dd` or `yyyyMMdd HH:mm:ss`.
///
/// The pattern is compiled once into a chrono format string. Parsing keeps no
/// state between calls, so one codec can be shared by any number of threads.
/// Text left over after a complete match (for instance the time part of a
/// `DATETIME` literal under a date-only pattern) is ignored as long as it does not
/// continue a number; time-of-day fields in the pattern are checked but do not
/// affect the resulting date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCodec {
    pattern:  String,
    strftime: String,
}

impl DateCodec {
    /// Compiles `pattern`.
    ///
    /// Supported letters: `y`, `M` (numeric, `MMM` short name, `MMMM` full name),
    /// `d`, `D` (day of year), `H`, `h`, `m`, `s`, `SSS`, `a`, `E`, `Z`. Text in
    /// single quotes is literal and `''` is a quote character.
    ///
    /// # Errors
    /// Returns `CodecError` if the pattern uses an unsupported letter, leaves a quote
    /// open or cannot identify a calendar day.
    pub fn new(pattern: &str) -> Result<Self, CodecError> {
        let strftime = translate(pattern)?;
        Ok(Self {
            pattern: pattern.to_owned(),
            strftime,
        })
    }

    /// The pattern as configured
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent chrono format string
    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Parses `value` into a calendar date.
    ///
    /// Field values are checked strictly (no month 13, no February 30th), but
    /// spacing is lenient: surrounding whitespace is trimmed and whitespace in
    /// front of a numeric field is skipped, so `2024- 03-15` reads as March 15th.
    /// Leftover text is ignored unless it starts with a digit, which means the
    /// last numeric field was cut short (`2024-03-150`) and the value is rejected.
    ///
    /// # Errors
    /// Returns `CodecError::EmptyInput` for blank input and `CodecError::Mismatch`
    /// when the value does not follow the pattern or names an impossible date.
    pub fn parse(&self, value: &str) -> Result<DateValue, CodecError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mismatch = |reason| CodecError::Mismatch {
            value: value.to_owned(),
            pattern: self.pattern.clone(),
            reason,
        };
        let (date, rest) = NaiveDate::parse_and_remainder(trimmed, &self.strftime).map_err(mismatch)?;
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            // a full-length parse fails on the extra digits and names the reason
            return NaiveDate::parse_from_str(trimmed, &self.strftime)
                .map(DateValue::from)
                .map_err(mismatch);
        }
        Ok(DateValue::from(date))
    }
}

fn translate(pattern: &str) -> Result<String, CodecError> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();
    let (mut has_year, mut has_month, mut has_day) = (false, false, false);

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.next_if_eq(&'\'').is_some() {
                out.push('\'');
                continue;
            }
            loop {
                match chars.next() {
                    None => return Err(CodecError::UnterminatedQuote(pattern.to_owned())),
                    Some('\'') => {
                        if chars.next_if_eq(&'\'').is_some() {
                            out.push('\'');
                        } else {
                            break;
                        }
                    },
                    Some(literal) => push_literal(&mut out, literal),
                }
            }
        } else if c.is_ascii_alphabetic() {
            let mut width = 1;
            while chars.next_if_eq(&c).is_some() {
                width += 1;
            }
            let spec = field_spec(c, width).ok_or_else(|| CodecError::UnsupportedField {
                letter: c,
                width,
                pattern: pattern.to_owned(),
            })?;
            match c {
                'y' => has_year = true,
                'M' => has_month = true,
                'd' => has_day = true,
                'D' => (has_month, has_day) = (true, true),
                _ => {},
            }
            out.push_str(spec);
        } else {
            push_literal(&mut out, c);
        }
    }

    if !(has_year && has_month && has_day) {
        return Err(CodecError::IncompleteFormat(pattern.to_owned()));
    }
    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn field_spec(letter: char, width: usize) -> Option<&'static str> {
    let spec = match (letter, width) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1 | 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1 | 2) => "%d",
        ('D', 1..=3) => "%j",
        ('H', 1 | 2) => "%H",
        ('h', 1 | 2) => "%I",
        ('m', 1 | 2) => "%M",
        ('s', 1 | 2) => "%S",
        ('S', 3) => "%3f",
        ('a', _) => "%p",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('Z', _) => "%z",
        _ => return None,
    };
    Some(spec)
}
