//! Typed arrays produced by [`crate::BufferDecoder`].

use bkit_bytes::{Buffer, TypedBuffer};

use crate::element::{Element, ElementKind};

/// A decoded typed array: one [`TypedBuffer`] per element kind.
///
/// The buffer may be a zero-copy view of the decoder's contents or a detached copy;
/// use [`TypedArray::buffer`] and [`Buffer::shares_memory`] to tell them apart.
#[derive(Clone, Debug)]
pub enum TypedArray {
    I8(TypedBuffer<i8>),
    U8(TypedBuffer<u8>),
    U8Clamped(TypedBuffer<u8>),
    I16(TypedBuffer<i16>),
    U16(TypedBuffer<u16>),
    I32(TypedBuffer<i32>),
    U32(TypedBuffer<u32>),
    F32(TypedBuffer<f32>),
    F64(TypedBuffer<f64>),
    I64(TypedBuffer<i64>),
    U64(TypedBuffer<u64>),
}

macro_rules! with_values {
    ($self:expr, $v:ident => $body:expr) => {
        match $self {
            TypedArray::I8($v) => $body,
            TypedArray::U8($v) => $body,
            TypedArray::U8Clamped($v) => $body,
            TypedArray::I16($v) => $body,
            TypedArray::U16($v) => $body,
            TypedArray::I32($v) => $body,
            TypedArray::U32($v) => $body,
            TypedArray::F32($v) => $body,
            TypedArray::F64($v) => $body,
            TypedArray::I64($v) => $body,
            TypedArray::U64($v) => $body,
        }
    };
}

impl TypedArray {
    /// Wraps `buffer` as an array of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if a non-empty `buffer` is not aligned to the element width or does not
    /// hold a whole number of elements.
    pub fn from_buffer(kind: ElementKind, buffer: Buffer) -> TypedArray {
        match kind {
            ElementKind::I8 => TypedArray::I8(TypedBuffer::new(buffer)),
            ElementKind::U8 => TypedArray::U8(TypedBuffer::new(buffer)),
            ElementKind::U8Clamped => TypedArray::U8Clamped(TypedBuffer::new(buffer)),
            ElementKind::I16 => TypedArray::I16(TypedBuffer::new(buffer)),
            ElementKind::U16 => TypedArray::U16(TypedBuffer::new(buffer)),
            ElementKind::I32 => TypedArray::I32(TypedBuffer::new(buffer)),
            ElementKind::U32 => TypedArray::U32(TypedBuffer::new(buffer)),
            ElementKind::F32 => TypedArray::F32(TypedBuffer::new(buffer)),
            ElementKind::F64 => TypedArray::F64(TypedBuffer::new(buffer)),
            ElementKind::I64 => TypedArray::I64(TypedBuffer::new(buffer)),
            ElementKind::U64 => TypedArray::U64(TypedBuffer::new(buffer)),
        }
    }

    pub fn empty(kind: ElementKind) -> TypedArray {
        Self::from_buffer(kind, Buffer::new())
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            TypedArray::I8(_) => ElementKind::I8,
            TypedArray::U8(_) => ElementKind::U8,
            TypedArray::U8Clamped(_) => ElementKind::U8Clamped,
            TypedArray::I16(_) => ElementKind::I16,
            TypedArray::U16(_) => ElementKind::U16,
            TypedArray::I32(_) => ElementKind::I32,
            TypedArray::U32(_) => ElementKind::U32,
            TypedArray::F32(_) => ElementKind::F32,
            TypedArray::F64(_) => ElementKind::F64,
            TypedArray::I64(_) => ElementKind::I64,
            TypedArray::U64(_) => ElementKind::U64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.byte_len() == 0
    }

    pub fn byte_len(&self) -> usize {
        self.buffer().len()
    }

    pub fn buffer(&self) -> &Buffer {
        with_values!(self, v => v.buffer())
    }

    pub fn into_buffer(self) -> Buffer {
        with_values!(self, v => v.into_buffer())
    }

    /// Returns the elements as `T`, or `None` if `T` does not match the array's kind.
    pub fn values<T: Element>(&self) -> Option<&[T]> {
        if T::KIND.is_compatible(self.kind()) {
            Some(self.buffer().typed_data())
        } else {
            None
        }
    }
}
