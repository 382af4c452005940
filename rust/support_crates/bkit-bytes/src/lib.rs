//! Byte buffers for the bkit codecs: a growable aligned byte vector, a shared immutable
//! slice of one, and typed views over aligned regions.

pub mod align;
pub mod buffer;
pub mod typed;

pub use buffer::{AlignedByteVec, Buffer};
pub use typed::TypedBuffer;
