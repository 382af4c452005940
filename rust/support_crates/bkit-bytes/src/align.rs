/// Rounds `n` up to the next multiple of `alignment`.
///
/// ```
/// use bkit_bytes::align::align_up;
///
/// assert_eq!(align_up(0, 8), 0);
/// assert_eq!(align_up(1, 8), 8);
/// assert_eq!(align_up(9, 8), 16);
/// ```
///
/// # Panics
///
/// Panics in debug builds if `alignment` is not a power of two, and always panics if
/// the result overflows `usize`.
#[inline]
pub fn align_up(n: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    let mask = alignment - 1;
    n.checked_add(mask).expect("align_up overflow") & !mask
}

/// Whether `n` is a multiple of `alignment`, a power of two.
#[inline]
pub fn is_aligned(n: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    n & (alignment - 1) == 0
}

/// Whether the address of `ptr` is a multiple of `alignment`. Always `false` for an
/// `alignment` that is not a power of two.
#[inline]
pub fn is_ptr_aligned(ptr: *const u8, alignment: usize) -> bool {
    alignment.is_power_of_two() && is_aligned(ptr as usize, alignment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_aligned() {
        assert!(is_aligned(0, 4));
        assert!(!is_aligned(6, 4));
        assert!(is_aligned(16, 16));
        assert!(!is_ptr_aligned(std::ptr::null::<u8>().wrapping_add(8), 3));
    }
}
