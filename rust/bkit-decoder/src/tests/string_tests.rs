use bkit_common::error::ErrorKind;

use crate::{BufferDecoder, BufferEncoder};

const SAMPLES: &[&str] = &[
    "",
    "a",
    "hello, world",
    "gr\u{fc}\u{df}e aus K\u{f6}ln",
    "\u{65e5}\u{672c}\u{8a9e}\u{30c6}\u{30ad}\u{30b9}\u{30c8}",
    "emoji \u{1f980} and \u{1f9ea}",
];

#[test]
fn test_lpu8_roundtrip() {
    let mut enc = BufferEncoder::new();
    for s in SAMPLES {
        enc.lpu8_string(s).unwrap();
    }
    let long = "x".repeat(1000);
    enc.lpu8_string(&long).unwrap();

    let mut dec = BufferDecoder::new(enc.finish());
    for s in SAMPLES {
        assert_eq!(dec.lpu8_string().unwrap(), *s);
    }
    assert_eq!(dec.lpu8_string().unwrap(), long);
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn test_ntu8_roundtrip() {
    let mut enc = BufferEncoder::new();
    for s in SAMPLES {
        enc.ntu8_string(s).unwrap();
    }
    let mut dec = BufferDecoder::new(enc.finish());
    for s in SAMPLES {
        assert_eq!(dec.ntu8_string().unwrap(), *s);
    }
    assert_eq!(dec.remaining(), 0);
}

#[test]
fn test_lpu8_starts_after_prefix() {
    let mut dec = BufferDecoder::new(&[3u8, b'a', b'b', b'c', b'd'][..]);
    assert_eq!(dec.lpu8_string().unwrap(), "abc");
    assert_eq!(dec.position(), 4);
    assert_eq!(dec.byte().unwrap(), b'd');
}

#[test]
fn test_ntu8_missing_terminator() {
    let mut dec = BufferDecoder::new(&b"abc"[..]);
    assert!(dec.ntu8_string().unwrap_err().is_malformed());
    assert_eq!(dec.position(), 0);
}

#[test]
fn test_lpu8_truncated() {
    let mut dec = BufferDecoder::new(&[5u8, b'a', b'b'][..]);
    assert!(dec.lpu8_string().unwrap_err().is_malformed());
    assert_eq!(dec.position(), 0);
}

#[test]
fn test_invalid_utf8() {
    let mut dec = BufferDecoder::new(&[0xc3u8, 0x28, 0x00][..]);
    let err = dec.ntu8_string().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidUtf8 { .. }));

    let mut dec = BufferDecoder::new(&[2u8, 0xff, 0xfe][..]);
    let err = dec.lpu8_string().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidUtf8 { .. }));
}

#[test]
fn test_mixed_stream() {
    let mut enc = BufferEncoder::new();
    enc.ntu8_string("key").unwrap();
    enc.vuint(1 << 20).unwrap();
    enc.lpu8_string("value").unwrap();
    enc.byte(0xee);

    let mut dec = BufferDecoder::new(enc.finish());
    assert_eq!(dec.ntu8_string().unwrap(), "key");
    assert_eq!(dec.vuint().unwrap(), 1 << 20);
    assert_eq!(dec.lpu8_string().unwrap(), "value");
    assert_eq!(dec.byte().unwrap(), 0xee);
}
