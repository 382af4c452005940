//! Population count primitives.

/// Signature of a pluggable 32-bit population count. Narrower words are zero-extended.
pub type PopcountFn = fn(u32) -> u32;

#[inline]
pub fn popcount_u16(word: u16) -> u32 {
    word.count_ones()
}

#[inline]
pub fn popcount_u32(word: u32) -> u32 {
    word.count_ones()
}

/// Branch-free SWAR population count, independent of hardware popcount support.
#[inline]
pub fn popcount_u32_portable(word: u32) -> u32 {
    let mut x = word;
    x -= (x >> 1) & 0x5555_5555;
    x = (x & 0x3333_3333) + ((x >> 2) & 0x3333_3333);
    x = (x + (x >> 4)) & 0x0f0f_0f0f;
    x.wrapping_mul(0x0101_0101) >> 24
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popcount_agrees() {
        fastrand::seed(1183256);
        for x in [0u32, 1, 0x8000_0000, u32::MAX, 0xf0f0_0f0f] {
            assert_eq!(popcount_u32_portable(x), popcount_u32(x));
        }
        for _ in 0..1000 {
            let x = fastrand::u32(..);
            assert_eq!(popcount_u32_portable(x), x.count_ones());
        }
        assert_eq!(popcount_u16(0xffff), 16);
        assert_eq!(popcount_u16(0x0101), 2);
    }
}
