#![no_main]

use bytestream::EoReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = EoReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 10;
        idx += 1;

        match op {
            0 => {
                let _ = reader.get_byte();
            }
            1 => {
                let _ = reader.get_char();
            }
            2 => {
                let _ = reader.get_short();
            }
            3 => {
                let _ = reader.get_three();
            }
            4 => {
                let _ = reader.get_int();
            }
            5 => {
                let length = usize::from(data[idx.saturating_sub(1)] % 16);
                let _ = reader.get_fixed_encoded_string(length);
            }
            6 => {
                let length = usize::from(data[idx.saturating_sub(1)] % 16);
                let _ = reader.get_padded_string(length);
            }
            7 => {
                let chunked = !reader.is_chunked();
                reader.set_chunked_reading_mode(chunked);
            }
            8 => {
                let _ = reader.next_chunk();
            }
            _ => {
                let _ = reader.get_string();
            }
        }
        assert!(reader.position() <= data.len());
    }
});
