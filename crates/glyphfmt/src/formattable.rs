//! The self-formatting capability.
//!
//! [`Formattable`] is the only extension point of the engine. Built-in
//! numeric types implement it by calling straight into [`crate::numeric`], so
//! a generic `append` monomorphizes to a direct call; a `&dyn Formattable`
//! costs exactly one indirect call.
//!
//! ```rust
//! use glyphfmt::{
//!     ByteBuffer, FormatError, FormatSpecifier, Formattable, FormattingData, StringFormatter,
//! };
//!
//! struct Age(u32);
//!
//! impl Formattable for Age {
//!     fn format(
//!         &self,
//!         out: &mut ByteBuffer,
//!         format: FormatSpecifier,
//!         data: &FormattingData,
//!     ) -> Result<(), FormatError> {
//!         self.0.format(out, format, data)?;
//!         "y".format(out, FormatSpecifier::GENERAL, data)
//!     }
//! }
//!
//! let mut sb = StringFormatter::new();
//! sb.append(Age(7)).unwrap();
//! assert_eq!(sb.to_text().unwrap(), "7y");
//! ```

use alloc::{boxed::Box, string::String};

use crate::{
    buffer::ByteBuffer,
    error::FormatError,
    format::{FormatKind, FormatSpecifier},
    formatting_data::FormattingData,
    numeric,
};

/// A value that can write its own textual form.
pub trait Formattable {
    /// Writes `self` into `out` using `data`'s digits and symbols.
    ///
    /// Implementations should not leave partial output behind on error;
    /// [`StringFormatter`](crate::StringFormatter) rolls the buffer back for
    /// them, but direct callers of this method do not get that guarantee.
    ///
    /// # Errors
    ///
    /// Any [`FormatError`], typically [`FormatError::UnsupportedKind`] for a
    /// kind the type has no rendering for, or
    /// [`FormatError::OutOfMemory`] from the buffer.
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError>;
}

impl<T: Formattable + ?Sized> Formattable for &T {
    #[inline]
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        (**self).format(out, format, data)
    }
}

impl<T: Formattable + ?Sized> Formattable for Box<T> {
    #[inline]
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        (**self).format(out, format, data)
    }
}

macro_rules! impl_unsigned {
    ($($ty:ty => $widen:ty, $write:path);* $(;)?) => {$(
        impl Formattable for $ty {
            #[inline]
            #[allow(clippy::cast_lossless, clippy::unnecessary_cast, trivial_numeric_casts)]
            fn format(
                &self,
                out: &mut ByteBuffer,
                format: FormatSpecifier,
                data: &FormattingData,
            ) -> Result<(), FormatError> {
                $write(out, *self as $widen, format, data)
            }
        }
    )*};
}

// Signed hex reinterprets at the native width before widening, so `-1i8`
// prints `FF` rather than sixteen `F`s.
macro_rules! impl_signed {
    ($($ty:ty => $unsigned:ty, $widen:ty, $uwiden:ty, $write:path, $uwrite:path);* $(;)?) => {$(
        impl Formattable for $ty {
            #[inline]
            #[allow(
                clippy::cast_lossless,
                clippy::cast_sign_loss,
                clippy::cast_possible_wrap,
                clippy::unnecessary_cast,
                trivial_numeric_casts
            )]
            fn format(
                &self,
                out: &mut ByteBuffer,
                format: FormatSpecifier,
                data: &FormattingData,
            ) -> Result<(), FormatError> {
                if format.kind == FormatKind::Hex {
                    $uwrite(out, *self as $unsigned as $uwiden, format, data)
                } else {
                    $write(out, *self as $widen, format, data)
                }
            }
        }
    )*};
}

impl_unsigned! {
    u8 => u64, numeric::format_u64;
    u16 => u64, numeric::format_u64;
    u32 => u64, numeric::format_u64;
    u64 => u64, numeric::format_u64;
    usize => u64, numeric::format_u64;
    u128 => u128, numeric::format_u128;
}

impl_signed! {
    i8 => u8, i64, u64, numeric::format_i64, numeric::format_u64;
    i16 => u16, i64, u64, numeric::format_i64, numeric::format_u64;
    i32 => u32, i64, u64, numeric::format_i64, numeric::format_u64;
    i64 => u64, i64, u64, numeric::format_i64, numeric::format_u64;
    isize => usize, i64, u64, numeric::format_i64, numeric::format_u64;
    i128 => u128, i128, u128, numeric::format_i128, numeric::format_u128;
}

impl Formattable for f64 {
    #[inline]
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        numeric::format_f64(out, *self, format, data)
    }
}

impl Formattable for f32 {
    #[inline]
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        numeric::format_f32(out, *self, format, data)
    }
}

/// Text values only have a general rendering; precision is ignored.
fn require_general(format: FormatSpecifier, type_name: &'static str) -> Result<(), FormatError> {
    if format.kind == FormatKind::General {
        Ok(())
    } else {
        Err(FormatError::UnsupportedKind {
            kind: format.kind,
            type_name,
        })
    }
}

impl Formattable for str {
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        require_general(format, "str")?;
        data.encode_str(self, out)
    }
}

impl Formattable for String {
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        require_general(format, "String")?;
        data.encode_str(self, out)
    }
}

impl Formattable for char {
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        require_general(format, "char")?;
        data.encode_char(*self, out)
    }
}

impl Formattable for bool {
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        require_general(format, "bool")?;
        data.encode_str(if *self { "True" } else { "False" }, out)
    }
}
