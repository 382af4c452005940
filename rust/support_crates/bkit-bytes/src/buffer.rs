use std::{
    ops::{Bound, Range, RangeBounds},
    sync::Arc,
};

use crate::align::{align_up, is_ptr_aligned};

/// A growable byte vector whose first byte sits on a [`AlignedByteVec::ALIGNMENT`]
/// boundary.
///
/// The inner `Vec<u8>` is over-allocated by the alignment and the data starts after a
/// short zero padding. Every time the vector runs out of room the data moves to a new
/// allocation padded the same way, so the alignment holds across growth.
pub struct AlignedByteVec {
    inner: Vec<u8>,
    /// Padding in front of the data.
    start: usize,
}

impl AlignedByteVec {
    /// Alignment of the first byte, in bytes.
    pub const ALIGNMENT: usize = 128;

    /// Creates an empty vector without allocating.
    pub fn new() -> AlignedByteVec {
        AlignedByteVec {
            inner: Vec::new(),
            start: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> AlignedByteVec {
        let mut vec = AlignedByteVec::new();
        vec.reserve(capacity);
        vec
    }

    /// Creates a vector of `len` zero bytes.
    pub fn zeroed(len: usize) -> AlignedByteVec {
        let mut vec = AlignedByteVec::with_capacity(len);
        vec.inner.resize(vec.start + len, 0);
        vec
    }

    pub fn copy_from_slice(data: &[u8]) -> AlignedByteVec {
        let mut vec = AlignedByteVec::with_capacity(data.len());
        vec.inner.extend_from_slice(data);
        vec
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len() - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of bytes the vector holds before it has to move to a new allocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity() - self.start
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.as_slice().as_ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner[self.start..]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.inner[self.start..]
    }

    /// Makes room for at least `additional` more bytes, at least doubling the capacity
    /// when it has to move.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self
            .len()
            .checked_add(additional)
            .expect("aligned byte vector capacity overflow");
        if needed > self.capacity() {
            self.relocate(needed.max(self.capacity() * 2));
        }
    }

    #[inline]
    pub fn push(&mut self, value: u8) {
        self.reserve(1);
        self.inner.push(value);
    }

    #[inline]
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.reserve(data.len());
        self.inner.extend_from_slice(data);
    }

    #[cold]
    fn relocate(&mut self, capacity: usize) {
        let total = capacity
            .checked_add(Self::ALIGNMENT)
            .expect("aligned byte vector capacity overflow");
        let mut inner = Vec::with_capacity(total);
        let addr = inner.as_ptr() as usize;
        let start = align_up(addr, Self::ALIGNMENT) - addr;
        inner.resize(start, 0);
        inner.extend_from_slice(self.as_slice());
        debug_assert!(is_ptr_aligned(inner[start..].as_ptr(), Self::ALIGNMENT));
        *self = AlignedByteVec { inner, start };
    }
}

impl std::ops::Deref for AlignedByteVec {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::ops::DerefMut for AlignedByteVec {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl std::fmt::Debug for AlignedByteVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedByteVec")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl Default for AlignedByteVec {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<u8> for AlignedByteVec {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for byte in iter {
            self.push(byte);
        }
    }
}

/// An immutable, reference-counted view into an [`AlignedByteVec`].
///
/// Cloning and slicing never copy: every view keeps the whole backing allocation alive
/// until the last view referencing it is dropped, so a small slice of a large buffer
/// retains the large buffer. Use [`Buffer::copy_from_slice`] to detach.
#[derive(Clone)]
pub struct Buffer {
    owner: Arc<AlignedByteVec>,
    offset: usize,
    len: usize,
}

impl Buffer {
    /// Alignment of a buffer that owns a fresh allocation, i.e. one created by copying
    /// or from an [`AlignedByteVec`].
    pub const ALIGNMENT: usize = AlignedByteVec::ALIGNMENT;

    pub fn new() -> Buffer {
        Self::from_byte_vec(AlignedByteVec::new())
    }

    /// Takes ownership of `vec` without copying.
    pub fn from_byte_vec(vec: AlignedByteVec) -> Buffer {
        Buffer {
            len: vec.len(),
            owner: Arc::new(vec),
            offset: 0,
        }
    }

    pub fn copy_from_slice(data: &[u8]) -> Buffer {
        Self::from_byte_vec(AlignedByteVec::copy_from_slice(data))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.owner[self.offset..self.offset + self.len]
    }

    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.as_slice().as_ptr()
    }

    /// Returns a zero-copy view of `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is inverted or extends past the end of the buffer.
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Buffer {
        let range = self.resolve(range);
        Buffer {
            owner: Arc::clone(&self.owner),
            offset: self.offset + range.start,
            len: range.len(),
        }
    }

    /// Checks whether the address of byte `offset` is a multiple of `alignment`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is greater than the buffer's length.
    pub fn is_aligned_at(&self, offset: usize, alignment: usize) -> bool {
        assert!(offset <= self.len, "offset {offset} past the end of the buffer");
        is_ptr_aligned(self.as_ptr().wrapping_add(offset), alignment)
    }

    /// Returns `range` with its start aligned to `alignment`.
    ///
    /// The result is a zero-copy view when the range already starts on such a
    /// boundary, and a detached aligned copy otherwise. Tell the two apart with
    /// [`Buffer::shares_memory`].
    ///
    /// # Arguments
    ///
    /// * `range` - byte range within this buffer.
    /// * `alignment` - a power of two no larger than [`Buffer::ALIGNMENT`].
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is out of bounds or `range` is invalid.
    pub fn aligned_slice(&self, range: impl RangeBounds<usize>, alignment: usize) -> Buffer {
        assert!(alignment.is_power_of_two() && alignment <= Self::ALIGNMENT);
        let range = self.resolve(range);
        if self.is_aligned_at(range.start, alignment) {
            self.slice(range)
        } else {
            Buffer::copy_from_slice(&self.as_slice()[range])
        }
    }

    /// Whether both buffers are views into the same allocation.
    pub fn shares_memory(&self, other: &Buffer) -> bool {
        Arc::ptr_eq(&self.owner, &other.owner)
    }

    /// Number of live views, this one included, on the backing allocation.
    pub fn view_count(&self) -> usize {
        Arc::strong_count(&self.owner)
    }

    /// Reinterprets the bytes as a slice of `T`. An empty buffer is an empty slice
    /// whatever its address.
    ///
    /// # Panics
    ///
    /// Panics if a non-empty buffer is not aligned for `T` or its length is not a
    /// multiple of `size_of::<T>()`.
    #[inline]
    pub fn typed_data<T>(&self) -> &[T]
    where
        T: bytemuck::AnyBitPattern,
    {
        if self.is_empty() {
            return &[];
        }
        bytemuck::cast_slice(self.as_slice())
    }

    fn resolve(&self, range: impl RangeBounds<usize>) -> Range<usize> {
        let start = match range.start_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => n.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        let end = match range.end_bound() {
            Bound::Included(&n) => n.checked_add(1),
            Bound::Excluded(&n) => Some(n),
            Bound::Unbounded => Some(self.len),
        };
        match (start, end) {
            (Some(start), Some(end)) if start > end => {
                panic!("range start must not be greater than end: {start} > {end}")
            }
            (Some(start), Some(end)) if end <= self.len => start..end,
            _ => panic!("range end out of bounds for a buffer of {} bytes", self.len),
        }
    }
}

impl std::ops::Deref for Buffer {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Buffer {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Buffer {}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len)
            .field("offset", &self.offset)
            .field("views", &self.view_count())
            .finish_non_exhaustive()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&[u8]> for Buffer {
    fn from(data: &[u8]) -> Buffer {
        Buffer::copy_from_slice(data)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(vec: Vec<u8>) -> Buffer {
        Buffer::copy_from_slice(&vec)
    }
}
