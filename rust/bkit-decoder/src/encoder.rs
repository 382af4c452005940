//! Producer side of the [`crate::BufferDecoder`] wire format.

use bkit_bytes::{AlignedByteVec, Buffer};
use bkit_common::{Result, verify_arg};
use num_bigint::BigUint;

use crate::{
    element::{Element, ElementKind},
    varint::{self, VUINT_LIMIT},
};

/// Appends encoded values to a growable aligned byte buffer.
///
/// Element bytes of typed arrays are written in native byte order, which is what a
/// decoder on the same platform views in place.
#[derive(Debug, Default)]
pub struct BufferEncoder {
    buf: AlignedByteVec,
}

impl BufferEncoder {
    pub fn new() -> BufferEncoder {
        BufferEncoder::default()
    }

    pub fn with_capacity(capacity: usize) -> BufferEncoder {
        BufferEncoder {
            buf: AlignedByteVec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Appends a single raw byte, e.g. a caller-defined tag.
    pub fn byte(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(data);
        self
    }

    /// Writes a `vuint`; `value` must be below 2^35.
    pub fn vuint(&mut self, value: u64) -> Result<&mut Self> {
        verify_arg!(value, value < VUINT_LIMIT);
        varint::encode_vuint(value, &mut self.buf);
        Ok(self)
    }

    pub fn vbigint(&mut self, value: &BigUint) -> &mut Self {
        varint::encode_vbigint(value, &mut self.buf);
        self
    }

    /// Writes `s` followed by a zero byte; `s` must not contain one itself.
    pub fn ntu8_string(&mut self, s: &str) -> Result<&mut Self> {
        verify_arg!(s, !s.as_bytes().contains(&0));
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(0);
        Ok(self)
    }

    pub fn lpu8_string(&mut self, s: &str) -> Result<&mut Self> {
        self.vuint(s.len() as u64)?;
        self.buf.extend_from_slice(s.as_bytes());
        Ok(self)
    }

    pub fn typed_array<T: Element>(&mut self, values: &[T]) -> Result<&mut Self> {
        self.raw_typed_array(T::KIND, bytemuck::cast_slice(values))
    }

    /// Writes a typed array of `kind` from its raw element bytes.
    ///
    /// # Arguments
    ///
    /// * `kind` - element kind recorded in the tag byte.
    /// * `data` - element bytes in native byte order; the element count written is
    ///   `data.len() / kind.width()`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `data` does not hold a whole number of elements, or if the
    /// count does not fit a `vuint`.
    pub fn raw_typed_array(&mut self, kind: ElementKind, data: &[u8]) -> Result<&mut Self> {
        verify_arg!(data, data.len() % kind.width() == 0);
        self.buf.push(kind.tag());
        self.vuint((data.len() / kind.width()) as u64)?;
        self.buf.extend_from_slice(data);
        Ok(self)
    }

    /// Seals the encoded bytes into a shareable [`Buffer`] without copying.
    pub fn finish(self) -> Buffer {
        Buffer::from_byte_vec(self.buf)
    }
}
