//! Growable output buffer.
//!
//! `ByteBuffer` is an owned byte vector with explicit amortized doubling
//! growth. All allocation goes through [`ByteBuffer::reserve`], which uses
//! fallible allocation so exhaustion is reported as
//! [`FormatError::OutOfMemory`] and the bytes already written stay intact.
//!
//! Views returned by [`ByteBuffer::as_bytes`] borrow the buffer and therefore
//! cannot outlive a later write that might reallocate.

#![expect(clippy::inline_always)]

use alloc::{string::String, vec::Vec};
use core::fmt;

use bstr::ByteSlice;

use crate::{
    encoding::Encoding,
    error::{DecodeError, FormatError},
};

#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates a buffer with room for `capacity` bytes.
    ///
    /// Like `Vec::with_capacity`, this aborts if the initial allocation
    /// fails; use [`ByteBuffer::reserve`] on an empty buffer to observe the
    /// failure instead.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    #[inline(always)]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Ensures at least `additional` more bytes fit without reallocating.
    ///
    /// Capacity grows to the larger of the required size and twice the
    /// current capacity, and never shrinks.
    ///
    /// # Errors
    ///
    /// [`FormatError::OutOfMemory`] when the allocation fails or the
    /// required size overflows `usize`. The buffer is left unchanged.
    #[inline]
    pub fn reserve(&mut self, additional: usize) -> Result<(), FormatError> {
        if self.data.capacity() - self.data.len() >= additional {
            return Ok(());
        }
        self.grow(additional)
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self, additional: usize) -> Result<(), FormatError> {
        let len = self.data.len();
        let required = len
            .checked_add(additional)
            .ok_or(FormatError::OutOfMemory {
                requested: additional,
            })?;
        let target = required.max(self.data.capacity().saturating_mul(2));

        // Fall back to the exact requirement when doubling is refused.
        let result = self
            .data
            .try_reserve_exact(target - len)
            .or_else(|_| self.data.try_reserve_exact(additional));
        match result {
            Ok(()) => {
                log::trace!(
                    "ByteBuffer grew to {} byte(s) ({} in use).",
                    self.data.capacity(),
                    len
                );
                Ok(())
            }
            Err(_) => {
                log::warn!("ByteBuffer cannot reserve {additional} additional byte(s).");
                Err(FormatError::OutOfMemory {
                    requested: additional,
                })
            }
        }
    }

    /// Copies `bytes` to the end of the buffer.
    ///
    /// # Errors
    ///
    /// [`FormatError::OutOfMemory`] if growth fails.
    #[inline]
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), FormatError> {
        self.reserve(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Copies `bytes` `count` times, reserving once up front.
    ///
    /// # Errors
    ///
    /// [`FormatError::OutOfMemory`] if growth fails or the total size
    /// overflows.
    pub fn append_repeated(&mut self, bytes: &[u8], count: usize) -> Result<(), FormatError> {
        let total = bytes
            .len()
            .checked_mul(count)
            .ok_or(FormatError::OutOfMemory {
                requested: usize::MAX,
            })?;
        self.reserve(total)?;
        for _ in 0..count {
            self.data.extend_from_slice(bytes);
        }
        Ok(())
    }

    /// Appends `text` encoded in `encoding`.
    ///
    /// # Errors
    ///
    /// [`FormatError::OutOfMemory`] if growth fails.
    pub fn append_str(&mut self, text: &str, encoding: Encoding) -> Result<(), FormatError> {
        self.reserve(encoding.encoded_len(text))?;
        encoding.encode_into(text, &mut self.data);
        Ok(())
    }

    /// Empties the buffer, keeping its capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Shortens the buffer to `len` bytes; no-op if already shorter.
    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Decodes the written bytes as text in `encoding`.
    ///
    /// # Errors
    ///
    /// A [`DecodeError`] when the content is not valid in `encoding`, which
    /// can only happen if a custom formatter wrote raw bytes.
    pub fn materialize(&self, encoding: Encoding) -> Result<String, DecodeError> {
        encoding.decode(&self.data)
    }

    /// Decodes the written bytes, replacing malformed sequences.
    #[must_use]
    pub fn materialize_lossy(&self, encoding: Encoding) -> String {
        encoding.decode_lossy(&self.data)
    }

    /// Consumes the buffer, returning the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("data", &self.data.as_bstr())
            .field("capacity", &self.data.capacity())
            .finish()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}
