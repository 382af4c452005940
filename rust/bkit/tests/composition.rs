use bkit::bitseq::{BitSequenceReader, BitSequenceWriterHi};
use bkit::decoder::{BigUint, BufferDecoder, BufferEncoder, ElementKind, TypedArray};
use bkit::support::bytes::Buffer;

fn random_positions(capacity_bits: usize, density: f32) -> Vec<usize> {
    (0..capacity_bits)
        .filter(|_| fastrand::f32() < density)
        .collect()
}

#[test]
fn test_bit_sequence_through_stream() {
    fastrand::seed(90210);
    let capacity_bits = 1000;
    let positions = random_positions(capacity_bits, 0.2);
    let bits = BitSequenceWriterHi::from_positions(capacity_bits, positions.iter().copied()).unwrap();

    let mut encoder = BufferEncoder::new();
    encoder.ntu8_string("set").unwrap();
    encoder.vuint(positions.len() as u64).unwrap();
    encoder.raw_typed_array(ElementKind::U8, &bits).unwrap();
    encoder.vbigint(&BigUint::from(u128::MAX));
    let encoded = encoder.finish();

    let mut decoder = BufferDecoder::new(encoded.clone());
    assert_eq!(decoder.ntu8_string().unwrap(), "set");
    let count = decoder.vuint().unwrap() as usize;
    let array = decoder.typed_array().unwrap();
    assert!(matches!(array, TypedArray::U8(_)));
    assert!(array.buffer().shares_memory(&encoded));
    assert_eq!(decoder.vbigint().unwrap(), BigUint::from(u128::MAX));

    let reader = BitSequenceReader::new(array.into_buffer());
    assert_eq!(reader.count_ones(), count);
    for (i, &pos) in positions.iter().enumerate() {
        assert_eq!(reader.select_1(i + 1), Some(pos + 1));
        assert_eq!(reader.rank_1(pos), i);
        assert_eq!(reader.rank_1(pos + 1), i + 1);
    }
    assert_eq!(reader.select_1(count + 1), None);
}

#[test]
fn test_bit_sequence_as_u16_words() {
    // An even-length sequence stored as U16 words keeps its byte layout.
    let positions = [0, 9, 15, 16, 100, 127];
    let bits = BitSequenceWriterHi::from_positions(128, positions).unwrap();
    let words: Vec<u16> = bits
        .chunks_exact(2)
        .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
        .collect();

    let mut encoder = BufferEncoder::new();
    encoder.byte(0x01);
    encoder.typed_array(&words).unwrap();
    let mut decoder = BufferDecoder::new(encoder.finish());
    assert_eq!(decoder.byte().unwrap(), 0x01);

    let array = decoder.typed_array().unwrap();
    assert_eq!(array.values::<u16>().unwrap(), words.as_slice());
    let reader = BitSequenceReader::new(array.buffer().clone());
    assert_eq!(reader.as_bytes(), bits.as_slice());
    for (i, &pos) in positions.iter().enumerate() {
        assert_eq!(reader.select_1(i + 1), Some(pos + 1));
    }
}

#[test]
fn test_grabbed_payload_outlives_stream() {
    let bits = BitSequenceWriterHi::from_positions(64, [1, 2, 63]).unwrap();
    let mut encoder = BufferEncoder::new();
    encoder.lpu8_string("header").unwrap();
    encoder.bytes(&bits);
    encoder.byte(0xff);

    let mut decoder = BufferDecoder::new(encoder.finish());
    decoder.lpu8_string().unwrap();
    let payload: Buffer = decoder.grab(Some(bits.len())).unwrap();
    assert_eq!(decoder.unread(), &[0xff]);
    drop(decoder);

    let reader = BitSequenceReader::new(payload);
    assert_eq!(reader.rank_1(64), 3);
    assert_eq!(reader.select_1(3), Some(64));
}
