use bytestream::{EoError, EoReader, EoWriter};

#[test]
fn chunk_literal_from_the_wire() {
    let bytes = [0x7C, b'g', b'a', b'r', b'b', b'a', b'g', b'e', 0xFF, 0xCA, 0x31];

    let mut reader = EoReader::new(&bytes);
    reader.set_chunked_reading_mode(true);
    assert_eq!(reader.get_char(), 123);
    reader.next_chunk().unwrap();
    assert_eq!(reader.get_short(), 12_345);
}

#[test]
fn writer_output_reads_back_in_order() {
    let mut writer = EoWriter::new();
    writer.add_byte(0x05);
    writer.add_char(200).unwrap();
    writer.add_three(1_000_000).unwrap();
    writer.add_fixed_string("name", 4).unwrap();
    writer.add_padded_encoded_string("pad", 6).unwrap();
    writer.add_int(3_000_000_000).unwrap();
    let bytes = writer.finish();

    let mut reader = EoReader::new(&bytes);
    assert_eq!(reader.get_byte(), 0x05);
    assert_eq!(reader.get_char(), 200);
    assert_eq!(reader.get_three(), 1_000_000);
    assert_eq!(reader.get_fixed_string(4), "name");
    assert_eq!(reader.get_padded_encoded_string(6), "pad");
    assert_eq!(reader.get_int(), 3_000_000_000);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn sanitized_strings_do_not_split_chunks() {
    let mut writer = EoWriter::new();
    {
        let mut guard = writer.preserve_sanitize_strings();
        guard.set_sanitize_strings(true);
        guard.add_string("a\u{ff}b");
        guard.add_break();
        guard.add_char(7).unwrap();
    }
    let bytes = writer.finish();

    let mut reader = EoReader::new(&bytes);
    reader.set_chunked_reading_mode(true);
    assert_eq!(reader.get_string(), "ayb");
    reader.next_chunk().unwrap();
    assert_eq!(reader.get_char(), 7);
}

#[test]
fn next_chunk_requires_chunked_mode() {
    let mut reader = EoReader::new(&[0x01, 0xFF, 0x02]);
    assert_eq!(reader.next_chunk(), Err(EoError::NotChunked));
    reader.set_chunked_reading_mode(true);
    assert_eq!(reader.next_chunk(), Ok(()));
    assert_eq!(reader.get_char(), 1);
}

#[test]
fn reads_past_the_end_are_lenient() {
    let mut reader = EoReader::new(&[0x02]);
    assert_eq!(reader.get_int(), 1);
    assert_eq!(reader.get_byte(), 0);
    assert_eq!(reader.get_short(), 0);
    assert_eq!(reader.get_string(), "");
    assert!(reader.get_bytes(4).is_empty());
}
