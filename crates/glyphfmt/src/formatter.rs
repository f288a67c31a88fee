use alloc::string::String;
use core::fmt;

use crate::{
    buffer::ByteBuffer,
    error::FormatError,
    format::FormatSpecifier,
    formattable::Formattable,
    formatting_data::{FormattingData, INVARIANT_UTF8},
};

/// Accumulates formatted values as encoded bytes.
///
/// A `StringFormatter` owns its [`ByteBuffer`] and borrows a
/// [`FormattingData`] that decides which byte runs stand for digits and
/// symbols, and how the result is decoded by [`StringFormatter::to_text`].
/// It can be cleared and reused indefinitely; clearing keeps the allocation.
///
/// Each `append*` call either writes the complete rendering of its value or,
/// on error, leaves the buffer exactly as it was.
///
/// # Examples
///
/// ```rust
/// use glyphfmt::StringFormatter;
///
/// let mut sb = StringFormatter::with_capacity(32);
/// sb.append(12345).unwrap();
/// sb.append(' ').unwrap();
/// sb.append_with(255, "x4").unwrap();
/// assert_eq!(sb.to_text().unwrap(), "12345 00ff");
///
/// assert!(sb.append_with(1, "Q").is_err());
/// assert_eq!(sb.to_text().unwrap(), "12345 00ff");
/// ```
#[derive(Clone)]
pub struct StringFormatter<'d> {
    buffer: ByteBuffer,
    data: &'d FormattingData,
}

impl StringFormatter<'static> {
    /// An empty formatter bound to the invariant UTF-8 table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_formatting_data(0, &INVARIANT_UTF8)
    }

    /// A formatter bound to the invariant UTF-8 table with room for
    /// `capacity` bytes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_formatting_data(capacity, &INVARIANT_UTF8)
    }
}

impl Default for StringFormatter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'d> StringFormatter<'d> {
    #[must_use]
    pub fn with_formatting_data(capacity: usize, data: &'d FormattingData) -> Self {
        Self {
            buffer: ByteBuffer::with_capacity(capacity),
            data,
        }
    }

    /// Appends `value` in its general form.
    ///
    /// # Errors
    ///
    /// Whatever `value`'s [`Formattable`] implementation reports.
    #[inline]
    pub fn append<T: Formattable>(&mut self, value: T) -> Result<(), FormatError> {
        self.append_format(value, FormatSpecifier::GENERAL)
    }

    /// Parses `format` and appends `value` with it.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidFormat`] if `format` does not parse; nothing
    /// is written in that case.
    #[inline]
    pub fn append_with<T: Formattable>(
        &mut self,
        value: T,
        format: &str,
    ) -> Result<(), FormatError> {
        let format = FormatSpecifier::parse(format)?;
        self.append_format(value, format)
    }

    /// Appends `value` with an already parsed specifier.
    ///
    /// # Errors
    ///
    /// Whatever `value`'s [`Formattable`] implementation reports; the buffer
    /// is rolled back to its previous length.
    #[inline]
    pub fn append_format<T: Formattable>(
        &mut self,
        value: T,
        format: FormatSpecifier,
    ) -> Result<(), FormatError> {
        let mark = self.buffer.len();
        let result = value.format(&mut self.buffer, format, self.data);
        if result.is_err() {
            self.buffer.truncate(mark);
        }
        result
    }

    /// Empties the output; the bound table and the capacity are kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn formatting_data(&self) -> &'d FormattingData {
        self.data
    }

    /// Rebinds the formatter to another table.
    ///
    /// # Errors
    ///
    /// [`FormatError::EncodingMismatch`] if the buffer holds content and
    /// `data` uses a different encoding than the current table.
    pub fn set_formatting_data(&mut self, data: &'d FormattingData) -> Result<(), FormatError> {
        if !self.buffer.is_empty() && data.encoding() != self.data.encoding() {
            return Err(FormatError::EncodingMismatch);
        }
        self.data = data;
        Ok(())
    }

    /// Length of the output in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Encoded output so far. The view ends at the next mutation.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    #[must_use]
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Decodes the output using the bound table's encoding. Repeatable and
    /// non-mutating.
    ///
    /// # Errors
    ///
    /// [`FormatError::Decode`] if a custom formatter wrote bytes that are
    /// not valid in that encoding.
    pub fn to_text(&self) -> Result<String, FormatError> {
        Ok(self.buffer.materialize(self.data.encoding())?)
    }

    /// Consumes the formatter, returning the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> alloc::vec::Vec<u8> {
        self.buffer.into_bytes()
    }
}

/// Lossy rendering of the output.
impl fmt::Display for StringFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer.materialize_lossy(self.data.encoding()))
    }
}

impl fmt::Debug for StringFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringFormatter")
            .field("buffer", &self.buffer)
            .field("encoding", &self.data.encoding())
            .finish_non_exhaustive()
    }
}

/// Literal text via `write!`, encoded in the bound table's encoding.
impl fmt::Write for StringFormatter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.data
            .encode_str(s, &mut self.buffer)
            .map_err(|_| fmt::Error)
    }
}
