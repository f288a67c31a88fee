use alloc::string::String;

use thiserror::Error;

use crate::{encoding::Encoding, format::FormatKind};

/// Rejection of a [`FormattingData`](crate::FormattingData) table at
/// construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The entry at `index` (0-9 digits, 10-12 symbols) has no bytes.
    #[error("table entry {index} is empty")]
    EmptyEntry {
        /// Position of the entry in the 13-entry table.
        index: usize,
    },
    /// The entry at `index` is not valid text in the declared encoding.
    #[error("table entry {index} is not valid {encoding}")]
    InvalidEncoding {
        /// Position of the entry in the 13-entry table.
        index: usize,
        /// Encoding the table was declared with.
        encoding: Encoding,
    },
}

/// Why a format specifier was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("unknown format letter '{0}'")]
    UnknownKind(char),
    #[error("unexpected character '{0}' in precision")]
    InvalidPrecision(char),
    #[error("precision must be preceded by a format letter")]
    MissingKind,
    #[error("precision exceeds {}", crate::format::MAX_PRECISION)]
    PrecisionOutOfRange,
}

/// Failure to decode the buffer contents into text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
    #[error("UTF-16 content has odd byte length {len}")]
    OddLength { len: usize },
    #[error("unpaired UTF-16 surrogate at byte {offset}")]
    UnpairedSurrogate { offset: usize },
}

/// Errors reported by formatting operations.
///
/// Every variant is raised before the buffer is modified, or after the buffer
/// has been rolled back to its previous length.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid format specifier {text:?}: {reason}")]
    InvalidFormat {
        text: String,
        reason: FormatErrorKind,
    },
    #[error("format kind {kind} is not supported for {type_name}")]
    UnsupportedKind {
        kind: FormatKind,
        type_name: &'static str,
    },
    #[error("cannot reserve {requested} additional bytes")]
    OutOfMemory { requested: usize },
    #[error("formatting data encoding differs from the buffered content")]
    EncodingMismatch,
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// Raised by [`Formattable`](crate::Formattable) implementations outside
    /// this crate.
    #[error("{0}")]
    Custom(&'static str),
}

impl FormatError {
    pub(crate) fn invalid_format(text: &str, reason: FormatErrorKind) -> Self {
        FormatError::InvalidFormat {
            text: text.into(),
            reason,
        }
    }
}
