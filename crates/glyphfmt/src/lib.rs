//! Allocation-free formatting of integers (and any type implementing
//! [`Formattable`]) into encoded byte buffers.
//!
//! Digits and numeric symbols come from a [`FormattingData`] table whose
//! entries are opaque byte runs in either UTF-8 or UTF-16LE, so a formatter
//! can emit, say, Thai numerals or multi-character minus signs without ever
//! building an intermediate `String` per value.
//!
//! ```rust
//! use glyphfmt::StringFormatter;
//!
//! let mut sb = StringFormatter::with_capacity(64);
//! sb.append_with(i64::MIN, "D").unwrap();
//! assert_eq!(sb.to_text().unwrap(), "-9223372036854775808");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod encoding;
mod error;
mod format;
mod formattable;
mod formatter;
mod formatting_data;
pub mod numeric;

#[cfg(test)]
mod tests;

pub use buffer::ByteBuffer;
pub use encoding::Encoding;
pub use error::{ConfigError, DecodeError, FormatError, FormatErrorKind};
pub use format::{FormatKind, FormatSpecifier, MAX_PRECISION};
pub use formattable::Formattable;
pub use formatter::StringFormatter;
pub use formatting_data::{FormattingData, INVARIANT_UTF8, INVARIANT_UTF16, Symbol, TABLE_LEN};
