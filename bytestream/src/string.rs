//! String obfuscation and single-byte text conversion.

/// Encodes string bytes in place: inverts printable characters, then reverses.
pub fn encode_string(bytes: &mut [u8]) {
    invert_characters(bytes);
    bytes.reverse();
}

/// Decodes string bytes in place; the inverse of [`encode_string`].
pub fn decode_string(bytes: &mut [u8]) {
    bytes.reverse();
    invert_characters(bytes);
}

fn invert_characters(bytes: &mut [u8]) {
    let mut flippy = bytes.len() % 2 == 1;

    for byte in bytes.iter_mut() {
        let c = *byte;
        if (0x22..=0x7E).contains(&c) {
            *byte = match (flippy, c >= 0x50) {
                (false, _) => 0x9F - c,
                (true, false) => 0x9F - c - 0x2E,
                (true, true) => 0x9F - c + 0x2E,
            };
        }
        flippy = !flippy;
    }
}

/// Converts protocol string bytes to text, one code point per byte.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Converts text to protocol string bytes.
///
/// Characters outside the single-byte range become `?`.
pub fn string_to_bytes(string: &str) -> Vec<u8> {
    string
        .chars()
        .map(|c| u8::try_from(c).unwrap_or(b'?'))
        .collect()
}
