//! Text encodings understood by the formatter.
//!
//! [`Encoding::Utf8`] is the variable-width single-byte encoding and
//! [`Encoding::Utf16`] the fixed-width double-byte one. UTF-16 content is
//! always little endian, matching the layout produced by
//! `str::encode_utf16` followed by `u16::to_le_bytes`.

use alloc::string::String;
use core::fmt;

use bstr::ByteSlice;

use crate::error::DecodeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => f.write_str("UTF-8"),
            Encoding::Utf16 => f.write_str("UTF-16LE"),
        }
    }
}

impl Encoding {
    /// Size in bytes of one code unit.
    #[must_use]
    pub const fn code_unit_size(self) -> usize {
        match self {
            Encoding::Utf8 => 1,
            Encoding::Utf16 => 2,
        }
    }

    /// Whether `bytes` is a complete, valid encoding of at least one
    /// character.
    #[must_use]
    pub fn is_valid_text(self, bytes: &[u8]) -> bool {
        !bytes.is_empty() && self.decode(bytes).is_ok()
    }

    /// Encoded byte length of `text`.
    #[must_use]
    pub fn encoded_len(self, text: &str) -> usize {
        match self {
            Encoding::Utf8 => text.len(),
            Encoding::Utf16 => text.encode_utf16().count() * 2,
        }
    }

    /// Appends the encoding of `text` to `dst`.
    ///
    /// `dst` must already have room for [`Self::encoded_len`] bytes for the
    /// write to be allocation free.
    pub(crate) fn encode_into(self, text: &str, dst: &mut alloc::vec::Vec<u8>) {
        match self {
            Encoding::Utf8 => dst.extend_from_slice(text.as_bytes()),
            Encoding::Utf16 => {
                for unit in text.encode_utf16() {
                    dst.extend_from_slice(&unit.to_le_bytes());
                }
            }
        }
    }

    /// Strictly decodes `bytes`.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] describing the first malformed position.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            Encoding::Utf8 => match core::str::from_utf8(bytes) {
                Ok(text) => Ok(text.into()),
                Err(err) => Err(DecodeError::InvalidUtf8 {
                    valid_up_to: err.valid_up_to(),
                }),
            },
            Encoding::Utf16 => {
                if bytes.len() % 2 != 0 {
                    return Err(DecodeError::OddLength { len: bytes.len() });
                }
                let mut text = String::with_capacity(bytes.len() / 2);
                for (i, decoded) in char::decode_utf16(utf16_units(bytes)).enumerate() {
                    match decoded {
                        Ok(c) => text.push(c),
                        Err(_) => {
                            return Err(DecodeError::UnpairedSurrogate {
                                offset: unit_offset(bytes, i),
                            });
                        }
                    }
                }
                Ok(text)
            }
        }
    }

    /// Decodes `bytes`, replacing malformed sequences with U+FFFD.
    #[must_use]
    pub fn decode_lossy(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => bytes.to_str_lossy().into_owned(),
            Encoding::Utf16 => {
                let mut text: String = char::decode_utf16(utf16_units(bytes))
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect();
                if bytes.len() % 2 != 0 {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
        }
    }
}

fn utf16_units(bytes: &[u8]) -> impl Iterator<Item = u16> + '_ {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
}

/// Byte offset of the `nth` decoded item, counting surrogate pairs as two
/// units.
fn unit_offset(bytes: &[u8], nth: usize) -> usize {
    let mut offset = 0;
    for decoded in char::decode_utf16(utf16_units(bytes)).take(nth) {
        offset += decoded.map_or(2, |c| c.len_utf16() * 2);
    }
    offset
}
