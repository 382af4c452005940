//! Gap-encoding bit sequence writer.

use std::marker::PhantomData;

use bkit_bytes::{AlignedByteVec, Buffer};
use bkit_common::{Result, error::Error, verify_arg};

use crate::order::{BitOrder, Lsb0, Msb0};

/// Writer with the MSB-first ("hi") layout.
pub type BitSequenceWriterHi = BitSequenceWriter<Msb0>;

/// Writer with the LSB-first ("lo") layout.
pub type BitSequenceWriterLo = BitSequenceWriter<Lsb0>;

/// Builds a fixed-length bit sequence from a strictly increasing set of positions,
/// supplied as successive gaps.
///
/// The writer owns a zeroed byte buffer sized for `capacity_bits` and moves a cursor
/// that starts just before bit 0. Each [`advance`](Self::advance) moves the cursor
/// forward and sets the bit it lands on; the untouched bits in between stay zero.
/// Bits of the byte under the cursor accumulate in a single pending byte, which is
/// committed to the buffer when the cursor leaves that byte and once more by
/// [`close`](Self::close).
///
/// The intra-byte bit numbering is chosen by the `O` policy, see [`BitOrder`].
pub struct BitSequenceWriter<O = Msb0> {
    contents: AlignedByteVec,
    capacity_bits: usize,
    /// Byte under the cursor.
    byte_index: usize,
    /// Bit of `byte_index` the cursor rests on, `None` before the first advance.
    bit_in_byte: Option<u8>,
    /// Bits set in `byte_index` that are not yet committed to `contents`.
    pending: u8,
    ones: usize,
    /// Set when a committed byte fell outside `contents`.
    out_of_range: bool,
    _order: PhantomData<O>,
}

impl<O: BitOrder> BitSequenceWriter<O> {
    /// Creates a writer for a sequence of `capacity_bits` bits.
    pub fn new(capacity_bits: usize) -> BitSequenceWriter<O> {
        BitSequenceWriter {
            contents: AlignedByteVec::zeroed(capacity_bits.div_ceil(8)),
            capacity_bits,
            byte_index: 0,
            bit_in_byte: None,
            pending: 0,
            ones: 0,
            out_of_range: false,
            _order: PhantomData,
        }
    }

    /// Builds a complete sequence with a bit set at each of `positions`, which must be
    /// strictly increasing.
    pub fn from_positions(
        capacity_bits: usize,
        positions: impl IntoIterator<Item = usize>,
    ) -> Result<Buffer> {
        let mut writer = Self::new(capacity_bits);
        for pos in positions {
            let next = writer.position().map_or(0, |last| last.saturating_add(1));
            verify_arg!(positions, pos >= next);
            writer.advance(pos + 1 - next);
        }
        writer.close()
    }

    pub fn capacity_bits(&self) -> usize {
        self.capacity_bits
    }

    /// Absolute position of the most recently set bit. Saturates at `usize::MAX` once
    /// the cursor has run past the addressable range.
    pub fn position(&self) -> Option<usize> {
        self.bit_in_byte
            .map(|bit| self.byte_index.saturating_mul(8).saturating_add(bit as usize))
    }

    /// Number of bits set so far.
    pub fn count_ones(&self) -> usize {
        self.ones
    }

    /// Moves the cursor forward by `delta` bits and sets the bit at the new position.
    ///
    /// Advancing past the end of the buffer is not detected here; it is reported by
    /// [`close`](Self::close). This includes a `delta` so large that the cursor would
    /// leave the `usize` range.
    ///
    /// # Panics
    ///
    /// Panics if `delta` is zero.
    pub fn advance(&mut self, delta: usize) {
        assert!(delta > 0, "bit sequence cursor must advance by at least one bit");

        let next = self.bit_in_byte.map_or(0, |bit| bit as usize + 1);
        let Some(bit) = next.checked_add(delta - 1) else {
            return self.overflow();
        };
        let bytes_moved = bit >> 3;
        if bytes_moved != 0 {
            self.commit();
            let Some(byte_index) = self.byte_index.checked_add(bytes_moved) else {
                return self.overflow();
            };
            self.byte_index = byte_index;
        }

        let bit = (bit & 7) as u8;
        self.bit_in_byte = Some(bit);
        self.pending |= O::mask(bit);
        self.ones += 1;
    }

    /// Flushes the pending byte and returns the finished sequence.
    ///
    /// Fails with an out-of-range error if any advance landed past the allocated buffer.
    pub fn close(mut self) -> Result<Buffer> {
        self.commit();
        if self.out_of_range {
            return Err(Error::out_of_range(format!(
                "bit sequence of {} bits was written up to bit {}",
                self.capacity_bits,
                self.position().unwrap_or_default(),
            )));
        }
        Ok(Buffer::from_byte_vec(self.contents))
    }

    /// Records an advance whose target is not addressable at all.
    fn overflow(&mut self) {
        self.commit();
        self.byte_index = usize::MAX;
        self.bit_in_byte = Some(7);
        self.out_of_range = true;
        self.ones += 1;
    }

    fn commit(&mut self) {
        if self.pending == 0 {
            return;
        }
        match self.contents.get_mut(self.byte_index) {
            Some(byte) => *byte = self.pending,
            None => self.out_of_range = true,
        }
        self.pending = 0;
    }
}

impl<O> std::fmt::Debug for BitSequenceWriter<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitSequenceWriter")
            .field("capacity_bits", &self.capacity_bits)
            .field("byte_index", &self.byte_index)
            .field("bit_in_byte", &self.bit_in_byte)
            .field("pending", &self.pending)
            .field("ones", &self.ones)
            .finish_non_exhaustive()
    }
}
