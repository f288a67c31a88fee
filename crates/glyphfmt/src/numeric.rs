//! Integer and float conversion.
//!
//! Every writer computes the exact encoded size of its output first and
//! reserves it in one call, so a failed reservation leaves the buffer
//! untouched and the remaining appends cannot fail.
//!
//! Decimal digits are produced by repeated division into a fixed stack array
//! sized for the widest type of each family (20 digits for 64-bit values, 39
//! for 128-bit ones) and then emitted most significant first. Negative values
//! take their magnitude through `unsigned_abs`, which is exact for `MIN`.
//!
//! Hex walks nibbles from the most significant non-zero one. Signed values
//! format their two's-complement bit pattern, so the caller passes them in
//! already reinterpreted as unsigned of the same width.

use core::fmt::{self, Write as _};

use crate::{
    buffer::ByteBuffer,
    encoding::Encoding,
    error::FormatError,
    format::{FormatKind, FormatSpecifier},
    formatting_data::{FormattingData, Symbol},
};

const U64_DIGITS: usize = 20;
const U128_DIGITS: usize = 39;

/// Enough room for `f64::MAX` with the maximum precision.
const FLOAT_SCRATCH: usize = 512;

macro_rules! decimal_digits {
    ($name:ident, $ty:ty, $len:expr) => {
        /// Writes the decimal digit values (0-9) of `value` into the tail of
        /// `stack`, returning the index of the most significant one.
        #[inline]
        #[expect(clippy::cast_possible_truncation)]
        fn $name(mut value: $ty, stack: &mut [u8; $len]) -> usize {
            let mut start = $len;
            loop {
                start -= 1;
                stack[start] = (value % 10) as u8;
                value /= 10;
                if value == 0 {
                    return start;
                }
            }
        }
    };
}

decimal_digits!(digits_u64, u64, U64_DIGITS);
decimal_digits!(digits_u128, u128, U128_DIGITS);

/// Formats an unsigned 64-bit value.
///
/// # Errors
///
/// [`FormatError::OutOfMemory`] if the buffer cannot grow.
pub fn format_u64(
    out: &mut ByteBuffer,
    value: u64,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    match format.kind {
        FormatKind::Hex => write_hex(out, u128::from(value), format, data),
        FormatKind::General | FormatKind::Decimal => {
            let mut stack = [0u8; U64_DIGITS];
            let start = digits_u64(value, &mut stack);
            write_decimal(out, false, &mut stack[start..], decimal_precision(format), data)
        }
    }
}

/// Formats a signed 64-bit value. Hex formats the two's-complement pattern.
///
/// # Errors
///
/// [`FormatError::OutOfMemory`] if the buffer cannot grow.
#[expect(clippy::cast_sign_loss)]
pub fn format_i64(
    out: &mut ByteBuffer,
    value: i64,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    match format.kind {
        FormatKind::Hex => write_hex(out, u128::from(value as u64), format, data),
        FormatKind::General | FormatKind::Decimal => {
            let mut stack = [0u8; U64_DIGITS];
            let start = digits_u64(value.unsigned_abs(), &mut stack);
            write_decimal(out, value < 0, &mut stack[start..], decimal_precision(format), data)
        }
    }
}

/// Formats an unsigned 128-bit value.
///
/// # Errors
///
/// [`FormatError::OutOfMemory`] if the buffer cannot grow.
pub fn format_u128(
    out: &mut ByteBuffer,
    value: u128,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    match format.kind {
        FormatKind::Hex => write_hex(out, value, format, data),
        FormatKind::General | FormatKind::Decimal => {
            let mut stack = [0u8; U128_DIGITS];
            let start = digits_u128(value, &mut stack);
            write_decimal(out, false, &mut stack[start..], decimal_precision(format), data)
        }
    }
}

/// Formats a signed 128-bit value. Hex formats the two's-complement pattern.
///
/// # Errors
///
/// [`FormatError::OutOfMemory`] if the buffer cannot grow.
#[expect(clippy::cast_sign_loss)]
pub fn format_i128(
    out: &mut ByteBuffer,
    value: i128,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    match format.kind {
        FormatKind::Hex => write_hex(out, value as u128, format, data),
        FormatKind::General | FormatKind::Decimal => {
            let mut stack = [0u8; U128_DIGITS];
            let start = digits_u128(value.unsigned_abs(), &mut stack);
            write_decimal(out, value < 0, &mut stack[start..], decimal_precision(format), data)
        }
    }
}

/// Minimum digit count for a decimal rendering. The general kind always
/// renders the natural digits of an integer.
#[inline]
fn decimal_precision(format: FormatSpecifier) -> Option<u8> {
    match format.kind {
        FormatKind::Decimal => format.precision,
        FormatKind::General | FormatKind::Hex => None,
    }
}

fn write_decimal(
    out: &mut ByteBuffer,
    negative: bool,
    digits: &mut [u8],
    precision: Option<u8>,
    data: &FormattingData,
) -> Result<(), FormatError> {
    let pad = usize::from(precision.unwrap_or(0)).saturating_sub(digits.len());
    let minus: &[u8] = if negative {
        data.symbol(Symbol::MinusSign)
    } else {
        &[]
    };
    let zero = data.digit(0);

    if data.has_ascii_digits() {
        out.reserve(minus.len() + pad + digits.len())?;
        for d in digits.iter_mut() {
            *d += b'0';
        }
        out.append(minus)?;
        out.append_repeated(zero, pad)?;
        return out.append(digits);
    }

    let digit_bytes: usize = digits.iter().map(|&d| data.digit(d).len()).sum();
    out.reserve(minus.len() + pad * zero.len() + digit_bytes)?;
    out.append(minus)?;
    out.append_repeated(zero, pad)?;
    for &d in digits.iter() {
        out.append(data.digit(d))?;
    }
    Ok(())
}

#[inline]
fn nibble_glyph(data: &FormattingData, nibble: u8, uppercase: bool) -> &[u8] {
    if nibble < 10 {
        data.digit(nibble)
    } else {
        data.hex_letter(nibble, uppercase)
    }
}

#[expect(clippy::cast_possible_truncation)]
fn write_hex(
    out: &mut ByteBuffer,
    value: u128,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    let significant_bits = 128 - value.leading_zeros() as usize;
    let nibbles = significant_bits.div_ceil(4).max(1);
    let pad = usize::from(format.precision.unwrap_or(0)).saturating_sub(nibbles);
    let nibble_at = |i: usize| ((value >> (4 * i)) & 0xF) as u8;

    let zero = data.digit(0);
    let glyph_bytes: usize = (0..nibbles)
        .map(|i| nibble_glyph(data, nibble_at(i), format.uppercase).len())
        .sum();
    out.reserve(pad * zero.len() + glyph_bytes)?;

    out.append_repeated(zero, pad)?;
    for i in (0..nibbles).rev() {
        out.append(nibble_glyph(data, nibble_at(i), format.uppercase))?;
    }
    Ok(())
}

/// Fixed-capacity `fmt::Write` target that refuses to truncate.
struct Scratch<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Scratch<N> {
    const fn new() -> Self {
        Self {
            buf: [0u8; N],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<const N: usize> fmt::Write for Scratch<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        if end > N {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Formats a float in general notation: shortest round-trip digits without
/// a precision, fixed notation with `precision` fractional digits otherwise.
///
/// Digits, `.` and `-` are substituted through `data`; the letters of `NaN`
/// and `inf` are written as plain text.
///
/// # Errors
///
/// [`FormatError::UnsupportedKind`] for decimal or hex requests and
/// [`FormatError::OutOfMemory`] if the buffer cannot grow.
pub fn format_f64(
    out: &mut ByteBuffer,
    value: f64,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    format_float(out, value, "f64", format, data)
}

/// Single-precision counterpart of [`format_f64`]; the shortest rendering is
/// the one that round-trips through `f32`.
///
/// # Errors
///
/// See [`format_f64`].
pub fn format_f32(
    out: &mut ByteBuffer,
    value: f32,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    format_float(out, value, "f32", format, data)
}

fn format_float<T: fmt::Display>(
    out: &mut ByteBuffer,
    value: T,
    type_name: &'static str,
    format: FormatSpecifier,
    data: &FormattingData,
) -> Result<(), FormatError> {
    if format.kind != FormatKind::General {
        return Err(FormatError::UnsupportedKind {
            kind: format.kind,
            type_name,
        });
    }

    let mut scratch = Scratch::<FLOAT_SCRATCH>::new();
    let rendered = match format.precision {
        Some(precision) => write!(scratch, "{:.*}", usize::from(precision), value),
        None => write!(scratch, "{value}"),
    };
    // The scratch size covers the longest possible rendering.
    debug_assert!(rendered.is_ok(), "float scratch overflow");
    if rendered.is_err() {
        return Err(FormatError::OutOfMemory {
            requested: FLOAT_SCRATCH,
        });
    }

    let encoding = data.encoding();
    let total: usize = scratch
        .as_bytes()
        .iter()
        .map(|&b| float_glyph(data, b, encoding).len())
        .sum();
    out.reserve(total)?;
    for &b in scratch.as_bytes() {
        out.append(float_glyph(data, b, encoding).as_slice())?;
    }
    Ok(())
}

/// Glyph for one ASCII byte of a rendered float.
enum FloatGlyph<'a> {
    Table(&'a [u8]),
    Literal([u8; 2], usize),
}

impl FloatGlyph<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            FloatGlyph::Table(bytes) => bytes,
            FloatGlyph::Literal(unit, len) => &unit[..*len],
        }
    }

    fn len(&self) -> usize {
        self.as_slice().len()
    }
}

fn float_glyph(data: &FormattingData, b: u8, encoding: Encoding) -> FloatGlyph<'_> {
    match b {
        b'0'..=b'9' => FloatGlyph::Table(data.digit(b - b'0')),
        b'.' => FloatGlyph::Table(data.symbol(Symbol::DecimalSeparator)),
        b'-' => FloatGlyph::Table(data.symbol(Symbol::MinusSign)),
        _ => match encoding {
            Encoding::Utf8 => FloatGlyph::Literal([b, 0], 1),
            Encoding::Utf16 => FloatGlyph::Literal([b, 0], 2),
        },
    }
}
