//! Digit and symbol tables.
//!
//! A [`FormattingData`] maps each decimal digit and each numeric symbol to an
//! opaque, already-encoded byte run. Runs are copied verbatim into the output
//! buffer: a "digit" may be several code units long, and formatting never
//! looks inside it.
//!
//! The invariant tables ([`INVARIANT_UTF8`], [`INVARIANT_UTF16`]) are plain
//! statics; pass them by reference wherever a table is needed.
//!
//! ```rust
//! use glyphfmt::{Encoding, FormattingData, StringFormatter};
//!
//! let thai = FormattingData::from_strs(
//!     ["๐", "๑", "๒", "๓", "๔", "๕", "๖", "๗", "๘", "๙"],
//!     [".", ",", "-"],
//!     Encoding::Utf8,
//! )
//! .unwrap();
//! let mut sb = StringFormatter::with_formatting_data(16, &thai);
//! sb.append(-42).unwrap();
//! assert_eq!(sb.to_text().unwrap(), "-๔๒");
//! ```

use alloc::{borrow::Cow, vec::Vec};

use crate::{
    buffer::ByteBuffer,
    encoding::Encoding,
    error::{ConfigError, FormatError},
};

/// Number of entries in a table: ten digits followed by three symbols.
pub const TABLE_LEN: usize = 13;

/// Non-digit entries of a [`FormattingData`], in table order after the ten
/// digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Symbol {
    DecimalSeparator = 0,
    GroupSeparator = 1,
    MinusSign = 2,
}

impl Symbol {
    const fn table_index(self) -> usize {
        10 + self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingData {
    entries: [Cow<'static, [u8]>; TABLE_LEN],
    encoding: Encoding,
    /// Digits are exactly the ASCII bytes `0`-`9` in UTF-8, which lets the
    /// numeric writer copy its scratch digits in one run.
    ascii_digits: bool,
}

const fn borrowed(bytes: &'static [u8]) -> Cow<'static, [u8]> {
    Cow::Borrowed(bytes)
}

/// Invariant table: ASCII digits, `.`, `,` and `-`, encoded as UTF-8.
pub static INVARIANT_UTF8: FormattingData = FormattingData {
    entries: [
        borrowed(b"0"),
        borrowed(b"1"),
        borrowed(b"2"),
        borrowed(b"3"),
        borrowed(b"4"),
        borrowed(b"5"),
        borrowed(b"6"),
        borrowed(b"7"),
        borrowed(b"8"),
        borrowed(b"9"),
        borrowed(b"."),
        borrowed(b","),
        borrowed(b"-"),
    ],
    encoding: Encoding::Utf8,
    ascii_digits: true,
};

/// Invariant table encoded as UTF-16LE.
pub static INVARIANT_UTF16: FormattingData = FormattingData {
    entries: [
        borrowed(b"0\0"),
        borrowed(b"1\0"),
        borrowed(b"2\0"),
        borrowed(b"3\0"),
        borrowed(b"4\0"),
        borrowed(b"5\0"),
        borrowed(b"6\0"),
        borrowed(b"7\0"),
        borrowed(b"8\0"),
        borrowed(b"9\0"),
        borrowed(b".\0"),
        borrowed(b",\0"),
        borrowed(b"-\0"),
    ],
    encoding: Encoding::Utf16,
    ascii_digits: false,
};

const HEX_UPPER_UTF8: [&[u8]; 6] = [b"A", b"B", b"C", b"D", b"E", b"F"];
const HEX_LOWER_UTF8: [&[u8]; 6] = [b"a", b"b", b"c", b"d", b"e", b"f"];
const HEX_UPPER_UTF16: [&[u8]; 6] = [b"A\0", b"B\0", b"C\0", b"D\0", b"E\0", b"F\0"];
const HEX_LOWER_UTF16: [&[u8]; 6] = [b"a\0", b"b\0", b"c\0", b"d\0", b"e\0", b"f\0"];

impl FormattingData {
    /// Builds a table from ten digit runs and three symbol runs (decimal
    /// separator, group separator, minus sign), each already encoded in
    /// `encoding`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if any run is empty or is not valid text in
    /// `encoding`.
    pub fn new<B: Into<Vec<u8>>>(
        digits: [B; 10],
        symbols: [B; 3],
        encoding: Encoding,
    ) -> Result<Self, ConfigError> {
        let mut digits = digits.into_iter();
        let mut symbols = symbols.into_iter();
        let entries: [Vec<u8>; TABLE_LEN] = core::array::from_fn(|i| {
            let next = if i < 10 { digits.next() } else { symbols.next() };
            next.map(Into::into).unwrap_or_default()
        });
        Self::from_owned(entries, encoding)
    }

    /// Builds a table from the 13-entry layout: digits `0`-`9` at indices
    /// 0-9, then the symbols in [`Symbol`] order.
    ///
    /// # Errors
    ///
    /// See [`FormattingData::new`].
    pub fn from_table<B: Into<Vec<u8>>>(
        entries: [B; TABLE_LEN],
        encoding: Encoding,
    ) -> Result<Self, ConfigError> {
        Self::from_owned(entries.map(Into::into), encoding)
    }

    /// Builds a table from text entries, encoding them into `encoding`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyEntry`] for an empty string.
    pub fn from_strs(
        digits: [&str; 10],
        symbols: [&str; 3],
        encoding: Encoding,
    ) -> Result<Self, ConfigError> {
        let encode = |text: &str| {
            let mut bytes = Vec::with_capacity(encoding.encoded_len(text));
            encoding.encode_into(text, &mut bytes);
            bytes
        };
        Self::new(digits.map(encode), symbols.map(encode), encoding)
    }

    fn from_owned(entries: [Vec<u8>; TABLE_LEN], encoding: Encoding) -> Result<Self, ConfigError> {
        for (index, entry) in entries.iter().enumerate() {
            if entry.is_empty() {
                log::debug!("Rejecting formatting data: entry {index} is empty.");
                return Err(ConfigError::EmptyEntry { index });
            }
            if !encoding.is_valid_text(entry) {
                log::debug!("Rejecting formatting data: entry {index} is not valid {encoding}.");
                return Err(ConfigError::InvalidEncoding { index, encoding });
            }
        }

        let ascii_digits = encoding == Encoding::Utf8
            && entries[..10]
                .iter()
                .zip(b'0'..=b'9')
                .all(|(entry, ascii)| entry.as_slice() == [ascii]);

        Ok(Self {
            entries: entries.map(Cow::Owned),
            encoding,
            ascii_digits,
        })
    }

    /// The invariant UTF-8 table.
    #[must_use]
    pub fn invariant_utf8() -> &'static FormattingData {
        &INVARIANT_UTF8
    }

    /// The invariant UTF-16LE table.
    #[must_use]
    pub fn invariant_utf16() -> &'static FormattingData {
        &INVARIANT_UTF16
    }

    /// Encoded run for `digit`.
    ///
    /// # Panics
    ///
    /// If `digit > 9`.
    #[inline]
    #[must_use]
    pub fn digit(&self, digit: u8) -> &[u8] {
        &self.entries[..10][usize::from(digit)]
    }

    #[inline]
    #[must_use]
    pub fn symbol(&self, symbol: Symbol) -> &[u8] {
        &self.entries[symbol.table_index()]
    }

    #[inline]
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    #[inline]
    #[must_use]
    pub fn is_utf16(&self) -> bool {
        self.encoding == Encoding::Utf16
    }

    /// Appends literal `text` to `out` in this table's encoding.
    ///
    /// # Errors
    ///
    /// [`FormatError::OutOfMemory`] if `out` cannot grow.
    #[inline]
    pub fn encode_str(&self, text: &str, out: &mut ByteBuffer) -> Result<(), FormatError> {
        out.append_str(text, self.encoding)
    }

    /// Appends a single character in this table's encoding.
    ///
    /// # Errors
    ///
    /// [`FormatError::OutOfMemory`] if `out` cannot grow.
    #[inline]
    pub fn encode_char(&self, ch: char, out: &mut ByteBuffer) -> Result<(), FormatError> {
        let mut utf8 = [0u8; 4];
        self.encode_str(ch.encode_utf8(&mut utf8), out)
    }

    #[inline]
    pub(crate) fn has_ascii_digits(&self) -> bool {
        self.ascii_digits
    }

    /// Fixed Latin letter for hex nibbles 10-15, encoded in this table's
    /// encoding. Tables only customise decimal numerals.
    #[inline]
    pub(crate) fn hex_letter(&self, nibble: u8, uppercase: bool) -> &'static [u8] {
        debug_assert!((10..16).contains(&nibble));
        let index = usize::from(nibble - 10);
        match (self.encoding, uppercase) {
            (Encoding::Utf8, true) => HEX_UPPER_UTF8[index],
            (Encoding::Utf8, false) => HEX_LOWER_UTF8[index],
            (Encoding::Utf16, true) => HEX_UPPER_UTF16[index],
            (Encoding::Utf16, false) => HEX_LOWER_UTF16[index],
        }
    }
}

impl Default for FormattingData {
    fn default() -> Self {
        INVARIANT_UTF8.clone()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rstest::rstest;

    use super::*;

    fn ascii_entries() -> [Vec<u8>; TABLE_LEN] {
        core::array::from_fn(|i| INVARIANT_UTF8.entries[i].to_vec())
    }

    #[test]
    fn invariant_tables_are_valid() {
        for data in [&INVARIANT_UTF8, &INVARIANT_UTF16] {
            let rebuilt =
                FormattingData::from_table(data.entries.clone().map(Cow::into_owned), data.encoding)
                    .unwrap();
            assert_eq!(&rebuilt, data);
        }
    }

    #[test]
    fn symbols_follow_digits() {
        let data = FormattingData::invariant_utf8();
        assert_eq!(data.digit(7), b"7");
        assert_eq!(data.symbol(Symbol::DecimalSeparator), b".");
        assert_eq!(data.symbol(Symbol::GroupSeparator), b",");
        assert_eq!(data.symbol(Symbol::MinusSign), b"-");
        assert_eq!(FormattingData::invariant_utf16().symbol(Symbol::MinusSign), b"-\0");
    }

    #[rstest]
    #[case(0)]
    #[case(9)]
    #[case(12)]
    fn empty_entry_is_rejected(#[case] index: usize) {
        let mut entries = ascii_entries();
        entries[index].clear();
        assert_eq!(
            FormattingData::from_table(entries, Encoding::Utf8),
            Err(ConfigError::EmptyEntry { index })
        );
    }

    #[test]
    fn invalid_utf8_entry_is_rejected() {
        let mut entries = ascii_entries();
        entries[4] = vec![0xC3];
        assert_eq!(
            FormattingData::from_table(entries, Encoding::Utf8),
            Err(ConfigError::InvalidEncoding {
                index: 4,
                encoding: Encoding::Utf8
            })
        );
    }

    #[test]
    fn single_byte_entries_are_not_utf16() {
        assert_eq!(
            FormattingData::from_table(ascii_entries(), Encoding::Utf16),
            Err(ConfigError::InvalidEncoding {
                index: 0,
                encoding: Encoding::Utf16
            })
        );
    }

    #[test]
    fn multi_unit_entries_are_kept_verbatim() {
        let data = FormattingData::from_strs(
            ["zero", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
            ["\u{066B}", "\u{066C}", "_?"],
            Encoding::Utf16,
        )
        .unwrap();
        assert_eq!(data.digit(0), b"z\0e\0r\0o\0");
        assert_eq!(data.symbol(Symbol::MinusSign), b"_\0?\0");
        assert!(!data.has_ascii_digits());
    }

    #[test]
    fn ascii_digit_detection() {
        assert!(INVARIANT_UTF8.has_ascii_digits());
        assert!(!INVARIANT_UTF16.has_ascii_digits());
        let owned = FormattingData::from_table(ascii_entries(), Encoding::Utf8).unwrap();
        assert!(owned.has_ascii_digits());
        let mut entries = ascii_entries();
        entries[3] = b"three".to_vec();
        let custom = FormattingData::from_table(entries, Encoding::Utf8).unwrap();
        assert!(!custom.has_ascii_digits());
    }

    #[test]
    fn hex_letters_follow_encoding() {
        assert_eq!(INVARIANT_UTF8.hex_letter(10, true), b"A");
        assert_eq!(INVARIANT_UTF8.hex_letter(15, false), b"f");
        assert_eq!(INVARIANT_UTF16.hex_letter(11, true), b"B\0");
        assert_eq!(INVARIANT_UTF16.hex_letter(12, false), b"c\0");
    }

    #[test]
    fn invariant_accessors_return_the_statics() {
        assert!(core::ptr::eq(FormattingData::invariant_utf8(), &INVARIANT_UTF8));
        assert!(core::ptr::eq(FormattingData::invariant_utf16(), &INVARIANT_UTF16));
        assert_eq!(FormattingData::default(), INVARIANT_UTF8);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn digit_lookup_stops_at_nine() {
        let _ = INVARIANT_UTF8.digit(10);
    }

    #[rstest]
    #[case(&INVARIANT_UTF8, b"x=\xC3\xA9".as_slice())]
    #[case(&INVARIANT_UTF16, b"x\0=\0\xE9\0".as_slice())]
    fn literal_text_uses_table_encoding(#[case] data: &FormattingData, #[case] expected: &[u8]) {
        let mut out = ByteBuffer::new();
        data.encode_str("x=", &mut out).unwrap();
        data.encode_char('é', &mut out).unwrap();
        assert_eq!(out.as_bytes(), expected);
    }
}
