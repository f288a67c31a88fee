//! Format specifier mini-grammar.
//!
//! ```text
//! specifier := [kind] [precision]
//! kind      := 'G' | 'g' | 'D' | 'd' | 'X' | 'x'
//! precision := [0-9]+            (at most 99, requires a kind)
//! ```
//!
//! The empty string is [`FormatSpecifier::GENERAL`]. `X` selects uppercase
//! hex letters and `x` lowercase ones; `G` and `D` are case-insensitive.
//! Precision is a minimum digit count: shorter outputs are left-padded with
//! the table's `0` digit and longer ones are never truncated.

use core::{fmt, str::FromStr};

use crate::error::{FormatError, FormatErrorKind};

/// Largest accepted precision.
pub const MAX_PRECISION: u8 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatKind {
    #[default]
    General,
    Decimal,
    Hex,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatKind::General => "General",
            FormatKind::Decimal => "Decimal",
            FormatKind::Hex => "Hex",
        })
    }
}

/// Parsed form of a format specifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FormatSpecifier {
    pub kind: FormatKind,
    /// Only meaningful for [`FormatKind::Hex`].
    pub uppercase: bool,
    pub precision: Option<u8>,
}

impl FormatSpecifier {
    pub const GENERAL: Self = Self::new(FormatKind::General);
    pub const DECIMAL: Self = Self::new(FormatKind::Decimal);
    pub const HEX_UPPERCASE: Self = Self {
        kind: FormatKind::Hex,
        uppercase: true,
        precision: None,
    };
    pub const HEX_LOWERCASE: Self = Self::new(FormatKind::Hex);

    #[must_use]
    pub const fn new(kind: FormatKind) -> Self {
        Self {
            kind,
            uppercase: false,
            precision: None,
        }
    }

    #[must_use]
    pub const fn with_precision(mut self, precision: u8) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Parses `text` according to the module grammar.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidFormat`] for anything outside the grammar. No
    /// best-effort parse is attempted.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let bytes = text.as_bytes();
        let Some((&first, rest)) = bytes.split_first() else {
            return Ok(Self::GENERAL);
        };

        let spec = match first {
            b'G' | b'g' => Self::GENERAL,
            b'D' | b'd' => Self::DECIMAL,
            b'X' => Self::HEX_UPPERCASE,
            b'x' => Self::HEX_LOWERCASE,
            b'0'..=b'9' => {
                return Err(FormatError::invalid_format(text, FormatErrorKind::MissingKind));
            }
            _ => {
                return Err(FormatError::invalid_format(
                    text,
                    FormatErrorKind::UnknownKind(leading_char(text)),
                ));
            }
        };

        if rest.is_empty() {
            return Ok(spec);
        }

        let mut precision: u8 = 0;
        for (i, &b) in rest.iter().enumerate() {
            if !b.is_ascii_digit() {
                // `first` is ASCII, so the precision starts at byte 1.
                return Err(FormatError::invalid_format(
                    text,
                    FormatErrorKind::InvalidPrecision(leading_char(&text[1 + i..])),
                ));
            }
            precision = precision
                .checked_mul(10)
                .and_then(|p| p.checked_add(b - b'0'))
                .filter(|&p| p <= MAX_PRECISION)
                .ok_or_else(|| {
                    FormatError::invalid_format(text, FormatErrorKind::PrecisionOutOfRange)
                })?;
        }

        Ok(spec.with_precision(precision))
    }
}

fn leading_char(text: &str) -> char {
    text.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
}

impl FromStr for FormatSpecifier {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FormatSpecifier {
    type Error = FormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Renders the canonical specifier text, e.g. `G`, `D5`, `x8`.
impl fmt::Display for FormatSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match (self.kind, self.uppercase) {
            (FormatKind::General, _) => 'G',
            (FormatKind::Decimal, _) => 'D',
            (FormatKind::Hex, true) => 'X',
            (FormatKind::Hex, false) => 'x',
        };
        match self.precision {
            Some(precision) => write!(f, "{letter}{precision}"),
            None => write!(f, "{letter}"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FormatSpecifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FormatSpecifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = <alloc::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", FormatSpecifier::GENERAL)]
    #[case("G", FormatSpecifier::GENERAL)]
    #[case("g", FormatSpecifier::GENERAL)]
    #[case("D", FormatSpecifier::DECIMAL)]
    #[case("d", FormatSpecifier::DECIMAL)]
    #[case("X", FormatSpecifier::HEX_UPPERCASE)]
    #[case("x", FormatSpecifier::HEX_LOWERCASE)]
    #[case("D2", FormatSpecifier::DECIMAL.with_precision(2))]
    #[case("X08", FormatSpecifier::HEX_UPPERCASE.with_precision(8))]
    #[case("G0", FormatSpecifier::GENERAL.with_precision(0))]
    #[case("d99", FormatSpecifier::DECIMAL.with_precision(99))]
    fn parses(#[case] text: &str, #[case] expected: FormatSpecifier) {
        assert_eq!(FormatSpecifier::parse(text), Ok(expected));
    }

    #[rstest]
    #[case("N", FormatErrorKind::UnknownKind('N'))]
    #[case("é", FormatErrorKind::UnknownKind('é'))]
    #[case(" D", FormatErrorKind::UnknownKind(' '))]
    #[case("D2x", FormatErrorKind::InvalidPrecision('x'))]
    #[case("X-1", FormatErrorKind::InvalidPrecision('-'))]
    #[case("Dé", FormatErrorKind::InvalidPrecision('é'))]
    #[case("12", FormatErrorKind::MissingKind)]
    #[case("D100", FormatErrorKind::PrecisionOutOfRange)]
    #[case("X99999999999999999999", FormatErrorKind::PrecisionOutOfRange)]
    fn rejects(#[case] text: &str, #[case] reason: FormatErrorKind) {
        assert_eq!(
            FormatSpecifier::parse(text),
            Err(FormatError::InvalidFormat {
                text: text.to_string(),
                reason
            })
        );
    }

    #[rstest]
    #[case("g", "G")]
    #[case("d7", "D7")]
    #[case("X", "X")]
    #[case("x12", "x12")]
    fn displays_canonical_form(#[case] text: &str, #[case] canonical: &str) {
        let spec: FormatSpecifier = text.parse().unwrap();
        assert_eq!(spec.to_string(), canonical);
    }

    #[test]
    fn error_message_names_input() {
        let err = FormatSpecifier::try_from("Q4").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid format specifier \"Q4\": unknown format letter 'Q'"
        );
    }
}
