//! Intra-byte bit numbering policies.

/// Maps a bit index within a byte (`0..8`) to the mask selecting that bit.
pub trait BitOrder {
    fn mask(bit: u8) -> u8;

    #[inline]
    fn test(byte: u8, bit: u8) -> bool {
        byte & Self::mask(bit) != 0
    }
}

/// Most-significant bit first: bit 0 is `0x80`. This is the "hi" layout read by
/// [`crate::BitSequenceReader`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Msb0;

/// Least-significant bit first: bit 0 is `0x01`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lsb0;

impl BitOrder for Msb0 {
    #[inline]
    fn mask(bit: u8) -> u8 {
        debug_assert!(bit < 8);
        0x80 >> bit
    }
}

impl BitOrder for Lsb0 {
    #[inline]
    fn mask(bit: u8) -> u8 {
        debug_assert!(bit < 8);
        1 << bit
    }
}
