//! The streaming buffer decoder.

use bkit_bytes::Buffer;
use bkit_common::{Result, error::Error, verify_data};
use num_bigint::BigUint;

use crate::{
    element::ElementKind,
    typed_array::TypedArray,
    varint::{self, DEFAULT_VBIGINT_MAX_BYTES},
};

/// A forward-reading cursor over an immutable byte buffer.
///
/// # Zero-copy views and relocation
///
/// [`sub`](Self::sub), and [`typed_array`](Self::typed_array) when the data is already
/// aligned, hand out views that share the decoder's backing memory. The first such view
/// marks the decoder as *referenced*, and the mark is never cleared. Once referenced,
/// the decoder refuses to relocate its contents in [`typed_array`](Self::typed_array),
/// so that a caller reading through an earlier view and the decoder always agree on
/// which memory holds the stream. [`typed_array_grow`](Self::typed_array_grow) copies
/// just the array instead and never relocates. [`grab`](Self::grab) always returns a
/// detached copy.
///
/// A failed read leaves the cursor where it was.
#[derive(Debug)]
pub struct BufferDecoder {
    contents: Buffer,
    read: usize,
    referenced: bool,
}

impl BufferDecoder {
    /// Creates a decoder positioned at the start of `contents`.
    ///
    /// # Arguments
    ///
    /// * `contents` - the encoded stream. A [`Buffer`] is shared without copying, so
    ///   arrays viewed in place alias the caller's memory; byte slices and vectors are
    ///   copied into fresh aligned memory first.
    pub fn new(contents: impl Into<Buffer>) -> BufferDecoder {
        BufferDecoder {
            contents: contents.into(),
            read: 0,
            referenced: false,
        }
    }

    /// Current read offset within [`contents`](Self::contents).
    ///
    /// Offsets are relative to the current backing memory, which changes on
    /// [`grab`](Self::grab) and on a relocating [`typed_array`](Self::typed_array); both
    /// reset the position to 0.
    #[inline]
    pub fn position(&self) -> usize {
        self.read
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.contents.len() - self.read
    }

    /// The current backing memory, including bytes already read.
    ///
    /// Holding a clone of the returned buffer keeps the memory alive but does not mark
    /// the decoder referenced. Use [`sub`](Self::sub) for views the decoder must respect.
    pub fn contents(&self) -> &Buffer {
        &self.contents
    }

    /// The unread bytes.
    #[inline]
    pub fn unread(&self) -> &[u8] {
        &self.contents[self.read..]
    }

    /// Whether a zero-copy view of the contents has been handed out.
    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    /// Moves the cursor to the absolute `offset` within the current contents.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `offset` is past the end; the cursor is left unchanged.
    pub fn seek(&mut self, offset: usize) -> Result<()> {
        if offset > self.contents.len() {
            return Err(Error::out_of_range(format!(
                "seek to {offset} in a buffer of {} bytes",
                self.contents.len()
            )));
        }
        self.read = offset;
        Ok(())
    }

    /// Advances the cursor by `count` bytes without reading them.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(Error::out_of_range(format!(
                "skip of {count} bytes with {} remaining",
                self.remaining()
            )));
        }
        self.read += count;
        Ok(())
    }

    /// Returns the byte at the cursor without advancing.
    pub fn peek(&self) -> Result<u8> {
        self.unread()
            .first()
            .copied()
            .ok_or_else(|| Error::malformed("byte", "read past the end of the buffer"))
    }

    /// Reads one byte.
    pub fn byte(&mut self) -> Result<u8> {
        let byte = self.peek()?;
        self.read += 1;
        Ok(byte)
    }

    /// Reads a `vuint` of at most 5 bytes (values below 2^35).
    pub fn vuint(&mut self) -> Result<u64> {
        let (value, len) = varint::decode_vuint(self.unread())?;
        self.read += len;
        Ok(value)
    }

    /// Reads a `vbigint` of at most [`DEFAULT_VBIGINT_MAX_BYTES`] bytes.
    pub fn vbigint(&mut self) -> Result<BigUint> {
        self.vbigint_with_limit(DEFAULT_VBIGINT_MAX_BYTES)
    }

    /// Reads a `vbigint` of at most `max_bytes` bytes.
    ///
    /// # Arguments
    ///
    /// * `max_bytes` - encoding length limit. The first four bytes are accumulated
    ///   natively, so small values never allocate.
    ///
    /// # Errors
    ///
    /// `EncodingLimitExceeded` if byte `max_bytes` still carries a continuation bit, and
    /// `MalformedInput` if the buffer ends first.
    pub fn vbigint_with_limit(&mut self, max_bytes: usize) -> Result<BigUint> {
        let (value, len) = varint::decode_vbigint(self.unread(), max_bytes)?;
        self.read += len;
        Ok(value)
    }

    /// Reads a UTF-8 string terminated by a zero byte and moves past the terminator.
    pub fn ntu8_string(&mut self) -> Result<String> {
        let unread = self.unread();
        let end = unread.iter().position(|&b| b == 0).ok_or_else(|| {
            Error::malformed("ntu8_string", "no null terminator before the end of the buffer")
        })?;
        let s = std::str::from_utf8(&unread[..end])?.to_owned();
        self.read += end + 1;
        Ok(s)
    }

    /// Reads a UTF-8 string prefixed by its byte length as a `vuint`.
    pub fn lpu8_string(&mut self) -> Result<String> {
        let unread = self.unread();
        let (len, prefix) = varint::decode_vuint(unread)?;
        let end = usize::try_from(len)
            .ok()
            .and_then(|len| prefix.checked_add(len))
            .filter(|&end| end <= unread.len())
            .ok_or_else(|| Error::malformed("lpu8_string", "string extends past the end of the buffer"))?;
        let s = std::str::from_utf8(&unread[prefix..end])?.to_owned();
        self.read += end;
        Ok(s)
    }

    /// Reads a typed array, preferring to keep memory usage low.
    ///
    /// When the first element is aligned to the element width, the array is a zero-copy
    /// view of the contents. Otherwise the unread rest of the buffer, starting at the
    /// first element, is moved into freshly aligned memory that becomes the decoder's
    /// new contents, and the array is a view of that. The move is refused with
    /// `UnsafeRelocation` if the decoder is already referenced.
    ///
    /// Empty arrays are returned detached and affect neither the contents nor the
    /// referenced state.
    pub fn typed_array(&mut self) -> Result<TypedArray> {
        let header = self.array_header()?;
        if header.byte_len == 0 {
            self.read = header.start;
            return Ok(TypedArray::empty(header.kind));
        }
        if self.contents.is_aligned_at(header.start, header.kind.width()) {
            return Ok(self.view_array(&header));
        }
        if self.referenced {
            log::debug!(
                "refusing to realign {:?} array at offset {}: contents are referenced",
                header.kind,
                header.start
            );
            return Err(Error::unsafe_relocation());
        }

        log::trace!(
            "relocating {} unread bytes to align {:?} array",
            self.contents.len() - header.start,
            header.kind
        );
        self.contents = Buffer::copy_from_slice(&self.contents[header.start..]);
        let header = ArrayHeader { start: 0, ..header };
        Ok(self.view_array(&header))
    }

    /// Reads a typed array, never relocating the contents.
    ///
    /// Aligned arrays are zero-copy views as in [`typed_array`](Self::typed_array) and
    /// mark the decoder referenced; misaligned ones are copied on their own into fresh
    /// aligned memory.
    pub fn typed_array_grow(&mut self) -> Result<TypedArray> {
        let header = self.array_header()?;
        if header.byte_len == 0 {
            self.read = header.start;
            return Ok(TypedArray::empty(header.kind));
        }

        let end = header.start + header.byte_len;
        let values = self
            .contents
            .aligned_slice(header.start..end, header.kind.width());
        if values.shares_memory(&self.contents) {
            self.referenced = true;
        } else {
            log::trace!("copied {} bytes of misaligned {:?} array", header.byte_len, header.kind);
        }
        self.read = end;
        Ok(TypedArray::from_buffer(header.kind, values))
    }

    /// Copies the next `size` bytes (all remaining if `None`) into new memory.
    ///
    /// Afterwards the decoder owns fresh memory holding only the bytes after the grabbed
    /// region and its cursor is at 0. When the grab reaches the end of unreferenced
    /// contents, the old contents are simply released.
    pub fn grab(&mut self, size: Option<usize>) -> Result<Buffer> {
        let end = self.region_end("grab", size)?;
        let grabbed = Buffer::copy_from_slice(&self.contents[self.read..end]);

        if end == self.contents.len() && !self.referenced {
            log::trace!("grab reached the end of unreferenced contents, releasing them");
            self.contents = Buffer::new();
        } else {
            log::trace!(
                "grab moving {} trailing bytes into fresh contents",
                self.contents.len() - end
            );
            self.contents = Buffer::copy_from_slice(&self.contents[end..]);
        }
        self.read = 0;
        Ok(grabbed)
    }

    /// Returns a zero-copy view of the next `size` bytes (all remaining if `None`) and
    /// marks the decoder as referenced.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `size` exceeds [`remaining`](Self::remaining).
    ///
    /// The view keeps the whole backing memory alive; use [`grab`](Self::grab) for data
    /// that outlives the rest of the stream.
    pub fn sub(&mut self, size: Option<usize>) -> Result<Buffer> {
        let end = self.region_end("sub", size)?;
        let view = self.contents.slice(self.read..end);
        self.read = end;
        self.referenced = true;
        Ok(view)
    }
}

struct ArrayHeader {
    kind: ElementKind,
    /// Offset of the first element within the contents.
    start: usize,
    byte_len: usize,
}

impl BufferDecoder {
    fn array_header(&self) -> Result<ArrayHeader> {
        let unread = self.unread();
        verify_data!(typed_array_tag, !unread.is_empty());
        let kind = ElementKind::from_tag(unread[0])?;
        let (count, prefix) = varint::decode_vuint(&unread[1..])?;

        let start = self.read + 1 + prefix;
        let byte_len = usize::try_from(count)
            .unwrap_or(usize::MAX)
            .saturating_mul(kind.width());
        verify_data!(typed_array_len, byte_len <= self.contents.len() - start);
        Ok(ArrayHeader {
            kind,
            start,
            byte_len,
        })
    }

    fn view_array(&mut self, header: &ArrayHeader) -> TypedArray {
        let end = header.start + header.byte_len;
        let view = self.contents.slice(header.start..end);
        self.read = end;
        self.referenced = true;
        TypedArray::from_buffer(header.kind, view)
    }

    fn region_end(&self, element: &str, size: Option<usize>) -> Result<usize> {
        let size = size.unwrap_or_else(|| self.remaining());
        if size > self.remaining() {
            return Err(Error::out_of_range(format!(
                "{element} of {size} bytes with {} remaining",
                self.remaining()
            )));
        }
        Ok(self.read + size)
    }
}
