//! Succinct bit sequences: a gap-encoding writer with selectable intra-byte bit order,
//! and an unindexed rank/select reader over the MSB-first layout.
//!
//! A bit sequence is built from a strictly increasing set of positions by feeding the
//! writer successive gaps:
//!
//! ```
//! use bkit_bitseq::{BitSequenceReader, BitSequenceWriterHi};
//!
//! let mut writer = BitSequenceWriterHi::new(32);
//! for delta in [1, 2, 3] {
//!     writer.advance(delta);
//! }
//! let bits = writer.close().unwrap();
//! assert_eq!(bits[0], 0b1010_0100);
//!
//! let reader = BitSequenceReader::new(bits);
//! assert_eq!(reader.rank_1(3), 2);
//! assert_eq!(reader.select_1(3), Some(6));
//! ```

pub mod order;
pub mod popcount;
pub mod reader;
pub mod writer;

pub use order::{BitOrder, Lsb0, Msb0};
pub use popcount::{PopcountFn, popcount_u16, popcount_u32};
pub use reader::BitSequenceReader;
pub use writer::{BitSequenceWriter, BitSequenceWriterHi, BitSequenceWriterLo};
