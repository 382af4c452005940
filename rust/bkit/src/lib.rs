//! # bkit: compact binary codecs
//!
//! bkit bundles two low-level building blocks for reading and writing compact binary
//! payloads:
//!
//! * [`bitseq`] - succinct bit sequences built from gap-encoded positions, with rank and
//!   select queries over the finished bytes
//! * [`decoder`] - a streaming decoder (and the matching encoder) for varints, UTF-8
//!   strings and tagged typed arrays, which hands out zero-copy views of its input
//!   where alignment allows and tracks when it may no longer move its memory
//!
//! ## Module Organization
//!
//! * [`common`] - error and result types shared by all crates
//!
//! ### Support Modules
//!
//! * [`support::bytes`] - aligned, reference-counted byte buffers used as storage by
//!   both the bit sequences and the decoder
//!
//! ## Getting Started
//!
//! A bit sequence written into a stream as a `U8` typed array and queried after
//! decoding:
//!
//! ```
//! use bkit::bitseq::{BitSequenceReader, BitSequenceWriterHi};
//! use bkit::decoder::{BufferDecoder, BufferEncoder, ElementKind};
//!
//! let bits = BitSequenceWriterHi::from_positions(64, [3, 17, 40]).unwrap();
//!
//! let mut encoder = BufferEncoder::new();
//! encoder.lpu8_string("marks").unwrap();
//! encoder.raw_typed_array(ElementKind::U8, &bits).unwrap();
//!
//! let mut decoder = BufferDecoder::new(encoder.finish());
//! assert_eq!(decoder.lpu8_string().unwrap(), "marks");
//! let array = decoder.typed_array().unwrap();
//!
//! let reader = BitSequenceReader::new(array.into_buffer());
//! assert_eq!(reader.rank_1(18), 2);
//! assert_eq!(reader.select_1(3), Some(41));
//! ```

pub use bkit_bitseq as bitseq;
pub use bkit_common as common;
pub use bkit_decoder as decoder;

pub mod support {
    pub use bkit_bytes as bytes;
}
