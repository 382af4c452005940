//! Typed element views over aligned [`Buffer`] regions.

use std::marker::PhantomData;

use crate::buffer::Buffer;

/// A [`Buffer`] read as a contiguous slice of `T` in native byte order.
///
/// A non-empty buffer must start on an address aligned for `T` and hold a whole number
/// of elements; the slice is then formed in place.
#[derive(Clone)]
pub struct TypedBuffer<T> {
    buffer: Buffer,
    _p: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// # Panics
    ///
    /// Panics if a non-empty `buffer` is not aligned for `T`, or if its length is not a
    /// multiple of `size_of::<T>()`.
    pub fn new(buffer: Buffer) -> TypedBuffer<T> {
        let width = std::mem::size_of::<T>();
        assert_eq!(
            buffer.len() % width,
            0,
            "buffer of {} bytes does not hold whole elements of {width} bytes",
            buffer.len()
        );
        assert!(
            buffer.is_empty() || buffer.is_aligned_at(0, std::mem::align_of::<T>()),
            "buffer is not aligned for its element type"
        );
        TypedBuffer {
            buffer,
            _p: PhantomData,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len() / std::mem::size_of::<T>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.buffer.typed_data()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> Buffer {
        self.buffer
    }
}

impl<T: bytemuck::Pod> std::ops::Deref for TypedBuffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: bytemuck::Pod + std::fmt::Debug> std::fmt::Debug for TypedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_slice().fmt(f)
    }
}
