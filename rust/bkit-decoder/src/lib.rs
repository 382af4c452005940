//! Streaming decoder for compact byte encodings: base-128 varints (bounded and
//! arbitrary precision), length-prefixed and null-terminated UTF-8 strings, and tagged
//! typed numeric arrays.
//!
//! The decoder works over a shared [`bkit_bytes::Buffer`] and decides explicitly when
//! data is handed out as a zero-copy view of its contents and when it has to be copied
//! into fresh aligned memory. See [`BufferDecoder`] for the ownership rules.
//!
//! [`BufferEncoder`] writes the same wire format.

pub mod decoder;
pub mod element;
pub mod encoder;
pub mod typed_array;
pub mod varint;

pub use decoder::BufferDecoder;
pub use element::{Element, ElementKind};
pub use encoder::BufferEncoder;
pub use num_bigint::BigUint;
pub use typed_array::TypedArray;

#[cfg(test)]
mod tests;
