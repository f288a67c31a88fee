#![allow(dead_code)]

use glyphfmt::{
    ByteBuffer, Encoding, FormatError, FormatSpecifier, Formattable, FormattingData,
};

/// Number of values written by the bulk scenarios.
pub const NUMBERS_TO_WRITE: usize = 10_000;

/// A composite value that renders as its number followed by `y`.
#[derive(Debug, Clone, Copy)]
pub struct Age {
    pub years: i32,
}

impl Age {
    pub fn new(years: i32) -> Self {
        Self { years }
    }
}

impl Formattable for Age {
    fn format(
        &self,
        out: &mut ByteBuffer,
        format: FormatSpecifier,
        data: &FormattingData,
    ) -> Result<(), FormatError> {
        self.years.format(out, format, data)?;
        'y'.format(out, FormatSpecifier::GENERAL, data)
    }
}

/// Digits `A`-`J`, separators `.`/`,`, minus sign `_?`.
pub fn letter_culture(encoding: Encoding) -> FormattingData {
    FormattingData::from_strs(
        ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"],
        [".", ",", "_?"],
        encoding,
    )
    .expect("letter culture is valid")
}

pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}
