use bytestream::{
    decode_number, decode_string, encode_number, encode_string, EoReader, EoWriter, CHAR_MAX,
    INT_MAX, SHORT_MAX, THREE_MAX,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Byte(u8),
    Char(u32),
    Short(u32),
    Three(u32),
    Int(u32),
    Padded(String),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<u8>().prop_map(Op::Byte),
        (0..=CHAR_MAX).prop_map(Op::Char),
        (0..=SHORT_MAX).prop_map(Op::Short),
        (0..=THREE_MAX).prop_map(Op::Three),
        (0..=INT_MAX).prop_map(Op::Int),
        "[a-zA-Z0-9 ]{0,8}".prop_map(Op::Padded),
    ]
}

proptest! {
    #[test]
    fn prop_number_roundtrip(value in 0..=INT_MAX) {
        prop_assert_eq!(decode_number(&encode_number(value)), value);
    }

    #[test]
    fn prop_decode_never_exceeds_max(bytes in prop::collection::vec(any::<u8>(), 0..=4)) {
        prop_assert!(decode_number(&bytes) <= INT_MAX);
    }

    #[test]
    fn prop_string_roundtrip(
        bytes in prop::collection::vec(any::<u8>().prop_filter("tilde", |b| *b != 0x7E), 0..64)
    ) {
        let mut encoded = bytes.clone();
        encode_string(&mut encoded);
        decode_string(&mut encoded);
        prop_assert_eq!(encoded, bytes);
    }

    #[test]
    fn prop_roundtrip_ops(ops in prop::collection::vec(op_strategy(), 1..32)) {
        let mut writer = EoWriter::new();
        for op in &ops {
            match op {
                Op::Byte(v) => writer.add_byte(*v),
                Op::Char(v) => writer.add_char(*v).unwrap(),
                Op::Short(v) => writer.add_short(*v).unwrap(),
                Op::Three(v) => writer.add_three(*v).unwrap(),
                Op::Int(v) => writer.add_int(*v).unwrap(),
                Op::Padded(s) => writer.add_padded_string(s, 8).unwrap(),
            }
        }
        let bytes = writer.finish();

        let mut reader = EoReader::new(&bytes);
        for op in &ops {
            match op {
                Op::Byte(v) => prop_assert_eq!(reader.get_byte(), *v),
                Op::Char(v) => prop_assert_eq!(reader.get_char(), *v),
                Op::Short(v) => prop_assert_eq!(reader.get_short(), *v),
                Op::Three(v) => prop_assert_eq!(reader.get_three(), *v),
                Op::Int(v) => prop_assert_eq!(reader.get_int(), *v),
                Op::Padded(s) => prop_assert_eq!(&reader.get_padded_string(8), s),
            }
        }
        prop_assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn prop_reader_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..128),
        reads in prop::collection::vec(0u8..8, 0..64),
    ) {
        let mut reader = EoReader::new(&bytes);
        reader.set_chunked_reading_mode(true);
        for read in reads {
            match read {
                0 => { reader.get_byte(); }
                1 => { reader.get_char(); }
                2 => { reader.get_short(); }
                3 => { reader.get_int(); }
                4 => { reader.get_encoded_string(); }
                5 => { reader.get_padded_string(3); }
                6 => { let _ = reader.next_chunk(); }
                _ => { reader.get_bytes(5); }
            }
            prop_assert!(reader.position() <= bytes.len());
        }
    }
}
