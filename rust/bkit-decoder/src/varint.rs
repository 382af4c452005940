//! Little-endian base-128 variable-length integers.
//!
//! Every byte carries 7 value bits, least significant group first; a set high bit
//! (`0x80`) means more bytes follow.

use bkit_common::{Result, error::Error};
use num_bigint::BigUint;

/// Longest encoding accepted by [`decode_vuint`]: 5 bytes, 35 value bits.
pub const VUINT_MAX_BYTES: usize = 5;

/// Exclusive upper bound of values representable by a `vuint`.
pub const VUINT_LIMIT: u64 = 1 << (7 * VUINT_MAX_BYTES);

/// Default byte limit for [`decode_vbigint`].
pub const DEFAULT_VBIGINT_MAX_BYTES: usize = 36;

/// Number of bytes decoded into a native accumulator before switching to `BigUint`.
const VBIGINT_NATIVE_BYTES: usize = 4;

const CONTINUATION: u8 = 0x80;

/// Decodes a `vuint` from the start of `bytes`, returning the value and the number of
/// bytes consumed.
///
/// Fails with a malformed-input error when `bytes` ends mid-value, and with an
/// encoding-limit error when the 5th byte still has its continuation bit set (such
/// values must be read with [`decode_vbigint`]).
pub fn decode_vuint(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut value = 0u64;
    for i in 0..VUINT_MAX_BYTES {
        let byte = next_byte(bytes, i, "vuint")?;
        value |= u64::from(byte & !CONTINUATION) << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(Error::limit_exceeded("vuint", VUINT_MAX_BYTES))
}

/// Decodes an arbitrary-precision `vbigint` of at most `max_bytes` bytes from the start
/// of `bytes`, returning the value and the number of bytes consumed.
pub fn decode_vbigint(bytes: &[u8], max_bytes: usize) -> Result<(BigUint, usize)> {
    let mut native = 0u32;
    for i in 0..VBIGINT_NATIVE_BYTES.min(max_bytes) {
        let byte = next_byte(bytes, i, "vbigint")?;
        native |= u32::from(byte & !CONTINUATION) << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((BigUint::from(native), i + 1));
        }
    }

    let mut value = BigUint::from(native);
    for i in VBIGINT_NATIVE_BYTES..max_bytes {
        let byte = next_byte(bytes, i, "vbigint")?;
        value |= BigUint::from(byte & !CONTINUATION) << (7 * i);
        if byte & CONTINUATION == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(Error::limit_exceeded("vbigint", max_bytes))
}

/// Appends the `vuint` encoding of `value` to `out`.
///
/// Values at or above [`VUINT_LIMIT`] are encoded all the same, but need
/// [`decode_vbigint`] to be read back.
pub fn encode_vuint(mut value: u64, out: &mut impl Extend<u8>) {
    loop {
        let group = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.extend([group]);
            return;
        }
        out.extend([group | CONTINUATION]);
    }
}

/// Appends the `vbigint` encoding of `value` to `out`.
pub fn encode_vbigint(value: &BigUint, out: &mut impl Extend<u8>) {
    let groups = value.to_radix_le(128);
    let last = groups.len() - 1;
    out.extend(
        groups
            .into_iter()
            .enumerate()
            .map(|(i, group)| if i < last { group | CONTINUATION } else { group }),
    );
}

/// Number of bytes [`encode_vuint`] emits for `value`.
pub fn vuint_len(value: u64) -> usize {
    let bits = u64::BITS - value.leading_zeros();
    (bits as usize).div_ceil(7).max(1)
}

#[inline]
fn next_byte(bytes: &[u8], index: usize, element: &str) -> Result<u8> {
    bytes
        .get(index)
        .copied()
        .ok_or_else(|| Error::malformed(element, "buffer ends in the middle of a value"))
}
