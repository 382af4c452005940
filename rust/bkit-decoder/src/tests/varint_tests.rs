use bkit_common::error::ErrorKind;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::{
    BufferDecoder, BufferEncoder,
    varint::{self, DEFAULT_VBIGINT_MAX_BYTES, VUINT_LIMIT},
};

fn encoded_vuint(value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    varint::encode_vuint(value, &mut out);
    out
}

#[test]
fn test_vuint_roundtrip_boundaries() {
    for bytes in 1..=5u32 {
        for value in [(1u64 << (7 * bytes)) - 1, 1u64 << (7 * (bytes - 1))] {
            let encoded = encoded_vuint(value);
            assert_eq!(encoded.len(), bytes as usize, "value {value}");
            let mut dec = BufferDecoder::new(encoded);
            assert_eq!(dec.vuint().unwrap(), value);
            assert_eq!(dec.position(), bytes as usize);
        }
    }
}

#[test]
fn test_vuint_roundtrip_random() {
    fastrand::seed(650391127);
    let values: Vec<u64> = (0..5000)
        .map(|_| fastrand::u64(..VUINT_LIMIT) >> fastrand::u32(0..35))
        .collect();

    let mut enc = BufferEncoder::new();
    for &value in &values {
        enc.vuint(value).unwrap();
    }
    let mut dec = BufferDecoder::new(enc.finish());
    for &value in &values {
        let start = dec.position();
        assert_eq!(dec.vuint().unwrap(), value);
        assert_eq!(dec.position() - start, varint::vuint_len(value));
    }
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn test_vuint_out_of_contract() {
    let mut dec = BufferDecoder::new(encoded_vuint(VUINT_LIMIT));
    let err = dec.vuint().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::EncodingLimitExceeded { .. }));
    assert_eq!(dec.position(), 0);
    assert_eq!(dec.vbigint().unwrap(), BigUint::from(VUINT_LIMIT));
    assert_eq!(dec.position(), 6);
}

#[test]
fn test_vbigint_small_values() {
    for value in [0u64, 1, 127, 128, 300, (1 << 28) - 1, 1 << 28, u64::MAX] {
        let mut enc = BufferEncoder::new();
        enc.vbigint(&BigUint::from(value));
        let mut dec = BufferDecoder::new(enc.finish());
        assert_eq!(dec.vbigint().unwrap().to_u64(), Some(value));
        assert_eq!(dec.remaining(), 0);
    }
}

#[test]
fn test_vbigint_roundtrip_random() {
    fastrand::seed(31290077);
    for _ in 0..500 {
        let len = fastrand::usize(0..=31);
        let bytes: Vec<u8> = (0..len).map(|_| fastrand::u8(..)).collect();
        let value = BigUint::from_bytes_le(&bytes);

        let mut enc = BufferEncoder::new();
        enc.vbigint(&value).byte(0x5a);
        let mut dec = BufferDecoder::new(enc.finish());
        assert_eq!(dec.vbigint().unwrap(), value);
        assert_eq!(dec.byte().unwrap(), 0x5a);
    }
}

#[test]
fn test_vbigint_limit() {
    let max: BigUint = (BigUint::one() << (7 * DEFAULT_VBIGINT_MAX_BYTES)) - 1u32;
    let mut enc = BufferEncoder::new();
    enc.vbigint(&max);
    assert_eq!(enc.len(), DEFAULT_VBIGINT_MAX_BYTES);
    let mut dec = BufferDecoder::new(enc.finish());
    assert_eq!(dec.vbigint().unwrap(), max);

    let too_big = BigUint::one() << (7 * DEFAULT_VBIGINT_MAX_BYTES);
    let mut enc = BufferEncoder::new();
    enc.vbigint(&too_big);
    let mut dec = BufferDecoder::new(enc.finish());
    let err = dec.vbigint().unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::EncodingLimitExceeded { limit: DEFAULT_VBIGINT_MAX_BYTES, .. }
    ));
    assert_eq!(dec.position(), 0);
}

#[test]
fn test_vbigint_custom_limit() {
    let mut enc = BufferEncoder::new();
    enc.vbigint(&BigUint::from(1u64 << 35));
    let encoded = enc.finish();
    assert_eq!(encoded.len(), 6);

    let mut dec = BufferDecoder::new(encoded.clone());
    assert!(dec.vbigint_with_limit(5).is_err());
    assert_eq!(dec.vbigint_with_limit(6).unwrap(), BigUint::from(1u64 << 35));

    let mut dec = BufferDecoder::new(encoded);
    assert!(dec.vbigint_with_limit(0).is_err());
}

#[test]
fn test_vbigint_truncated() {
    let mut dec = BufferDecoder::new(vec![0x80u8, 0x80, 0x80, 0x80, 0x80]);
    assert!(dec.vbigint().unwrap_err().is_malformed());
    let mut dec = BufferDecoder::new(vec![0x80u8; 2]);
    assert!(dec.vbigint().unwrap_err().is_malformed());
}

#[test]
fn test_vbigint_zero_with_padding_groups() {
    // Non-minimal encodings decode to the same value.
    let mut dec = BufferDecoder::new(vec![0x80u8, 0x80, 0x80, 0x80, 0x80, 0x00]);
    assert!(dec.vbigint().unwrap().is_zero());
    assert_eq!(dec.position(), 6);
}
