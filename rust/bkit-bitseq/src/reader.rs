//! Rank and select over an MSB-first bit sequence.

use bkit_bytes::Buffer;

use crate::popcount::{PopcountFn, popcount_u32};

/// Answers rank and select queries over a finished MSB-first ("hi") bit sequence, as
/// produced by [`crate::BitSequenceWriterHi`].
///
/// The storage is read at byte, 16-bit and 32-bit width through index arithmetic over
/// the same bytes; words are assembled little-endian, and bytes past the end of the
/// storage read as zero. No auxiliary index is built: every query rescans the sequence
/// from the start in 16-bit words, then walks at most 16 bits of the final word.
///
/// The reader never mutates its storage, so it can be shared between threads whenever
/// `S` can.
#[derive(Clone)]
pub struct BitSequenceReader<S = Buffer> {
    storage: S,
    popcount: PopcountFn,
}

impl<S: AsRef<[u8]>> BitSequenceReader<S> {
    pub fn new(storage: S) -> BitSequenceReader<S> {
        Self::with_popcount(storage, popcount_u32)
    }

    /// Creates a reader using an alternative population count. 16-bit words are
    /// zero-extended before being passed to `popcount`.
    pub fn with_popcount(storage: S, popcount: PopcountFn) -> BitSequenceReader<S> {
        BitSequenceReader { storage, popcount }
    }

    /// The raw sequence bytes, bit 0 being the most significant bit of byte 0.
    pub fn as_bytes(&self) -> &[u8] {
        self.storage.as_ref()
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Number of bits held by the storage.
    pub fn len_bits(&self) -> usize {
        self.as_bytes().len() * 8
    }

    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        self.as_bytes().get(index).copied().unwrap_or(0)
    }

    #[inline]
    pub fn word16(&self, index: usize) -> u16 {
        u16::from_le_bytes([self.byte(index * 2), self.byte(index * 2 + 1)])
    }

    #[inline]
    pub fn word32(&self, index: usize) -> u32 {
        let i = index * 4;
        u32::from_le_bytes([
            self.byte(i),
            self.byte(i + 1),
            self.byte(i + 2),
            self.byte(i + 3),
        ])
    }

    /// Total number of set bits.
    pub fn count_ones(&self) -> usize {
        (0..self.as_bytes().len().div_ceil(4))
            .map(|i| (self.popcount)(self.word32(i)) as usize)
            .sum()
    }

    /// Counts the set bits at positions strictly less than `pos`.
    pub fn rank_1(&self, pos: usize) -> usize {
        let target_word = pos >> 4;
        let whole_words = target_word.min(self.word16_count());
        let mut count: usize = (0..whole_words).map(|i| self.word_popcount(i)).sum();

        let mut byte = self.byte(target_word << 1);
        for bit in 0..(pos & 15) {
            if byte & 0x80 != 0 {
                count += 1;
            }
            byte <<= 1;
            if bit == 7 {
                byte = self.byte((target_word << 1) + 1);
            }
        }
        count
    }

    /// Returns the number of bits up to and including the `k`-th set bit, i.e. one
    /// past its position, so that `rank_1(select_1(k)) == k`.
    ///
    /// `select_1(0)` is `Some(0)`: the scan stops before looking at any bit.
    ///
    /// # Returns
    ///
    /// `None` if the sequence holds fewer than `k` set bits.
    pub fn select_1(&self, k: usize) -> Option<usize> {
        let word_count = self.word16_count();
        let mut count = 0;
        let mut word = 0;
        loop {
            let ones = self.word_popcount(word);
            if count + ones >= k {
                break;
            }
            count += ones;
            word += 1;
            if word >= word_count {
                return None;
            }
        }

        // The k-th set bit lies within `word`, so this terminates within 16 bits.
        let mut byte = self.byte(word << 1);
        let mut scanned = 0;
        while count < k {
            if byte & 0x80 != 0 {
                count += 1;
            }
            byte <<= 1;
            if scanned == 7 {
                byte = self.byte((word << 1) + 1);
            }
            scanned += 1;
        }
        Some((word << 4) + scanned)
    }

    #[inline]
    fn word16_count(&self) -> usize {
        self.as_bytes().len().div_ceil(2)
    }

    #[inline]
    fn word_popcount(&self, index: usize) -> usize {
        (self.popcount)(self.word16(index) as u32) as usize
    }
}

impl<S: AsRef<[u8]>> std::fmt::Debug for BitSequenceReader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitSequenceReader")
            .field("len_bits", &self.len_bits())
            .finish_non_exhaustive()
    }
}
