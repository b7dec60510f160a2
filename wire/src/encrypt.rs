//! Packet encryption and the server verification hash.
//!
//! Encryption is a fixed sequence of reversible byte shuffles keyed by a
//! "multiple" agreed during the connection handshake. Init packets are sent
//! in the clear.

/// Interleaves bytes in place.
///
/// Bytes from the front of the input fill the even positions left to right,
/// the rest fill the odd positions right to left.
///
/// `"Hello, World!"` becomes `"H!edlllroo,W "`.
pub fn interleave(data: &mut [u8]) {
    let source = data.to_vec();
    for (index, byte) in shuffle_order(data.len()).zip(source) {
        data[index] = byte;
    }
}

/// Reverses [`interleave`] in place.
pub fn deinterleave(data: &mut [u8]) {
    let source = data.to_vec();
    for (slot, index) in data.iter_mut().zip(shuffle_order(source.len())) {
        *slot = source[index];
    }
}

fn shuffle_order(len: usize) -> impl Iterator<Item = usize> {
    (0..len)
        .step_by(2)
        .chain((1..len).step_by(2).rev())
}

/// Flips the most significant bit of every byte whose low seven bits are
/// not all zero.
pub fn flip_msb(data: &mut [u8]) {
    for byte in data.iter_mut() {
        if *byte & 0x7F != 0 {
            *byte ^= 0x80;
        }
    }
}

/// Reverses every run of consecutive bytes divisible by `multiple`.
///
/// A `multiple` of zero leaves the data unchanged.
pub fn swap_multiples(data: &mut [u8], multiple: u8) {
    if multiple == 0 {
        return;
    }

    let mut run = 0;
    for index in 0..=data.len() {
        if index < data.len() && data[index] % multiple == 0 {
            run += 1;
            continue;
        }
        if run > 1 {
            data[index - run..index].reverse();
        }
        run = 0;
    }
}

/// Encrypts a packet body in place.
pub fn encrypt_packet(data: &mut [u8], multiple: u8) {
    swap_multiples(data, multiple);
    interleave(data);
    flip_msb(data);
}

/// Decrypts a packet body in place.
pub fn decrypt_packet(data: &mut [u8], multiple: u8) {
    flip_msb(data);
    deinterleave(data);
    swap_multiples(data, multiple);
}

/// Computes the response a server sends to a client's verification
/// challenge.
///
/// The result can be negative for challenges above 11,092,003.
#[allow(clippy::cast_possible_truncation)]
pub fn server_verification_hash(challenge: u32) -> i32 {
    let challenge = i64::from(challenge) + 1;
    let hash = 110_905
        + (challenge % 9 + 1) * ((11_092_004 - challenge) % ((challenge % 11 + 1) * 119)) * 119
        + challenge % 2004;
    // |hash| stays below two million for any u32 challenge
    hash as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interleaved(text: &[u8]) -> Vec<u8> {
        let mut bytes = text.to_vec();
        interleave(&mut bytes);
        bytes
    }

    #[test]
    fn interleave_literals() {
        assert_eq!(interleaved(b"Hello, World!"), b"H!edlllroo,W ".to_vec());
        assert_eq!(
            interleaved(b"We're ;) going to ba"),
            b"Waeb' roet  ;g)n igo".to_vec()
        );
        assert_eq!(interleaved(b"abc"), b"acb".to_vec());
        assert!(interleaved(b"").is_empty());
    }

    #[test]
    fn deinterleave_literal() {
        let mut bytes = b"Hello, World!".to_vec();
        deinterleave(&mut bytes);
        assert_eq!(bytes, b"Hlo ol!drW,le".to_vec());
    }

    #[test]
    fn deinterleave_inverts_interleave() {
        for text in [&b""[..], b"a", b"ab", b"Hello, World!", b"We're ;) going to ba"] {
            let mut bytes = text.to_vec();
            interleave(&mut bytes);
            deinterleave(&mut bytes);
            assert_eq!(bytes, text);
        }
    }

    #[test]
    fn flip_msb_skips_zero_low_bits() {
        let mut bytes = vec![0x00, 0x01, 0x7F, 0x80, 0x81, 0xFF];
        flip_msb(&mut bytes);
        assert_eq!(bytes, vec![0x00, 0x81, 0xFF, 0x80, 0x01, 0x7F]);
    }

    #[test]
    fn swap_multiples_literals() {
        let mut bytes = b"Hello, World!".to_vec();
        swap_multiples(&mut bytes, 3);
        assert_eq!(bytes, b"Heoll, lroWd!".to_vec());

        let mut bytes = vec![10, 12, 14, 3, 6, 9, 7];
        swap_multiples(&mut bytes, 2);
        assert_eq!(bytes, vec![14, 12, 10, 3, 6, 9, 7]);

        let mut bytes = vec![10, 12, 14, 3, 6, 9, 7];
        swap_multiples(&mut bytes, 3);
        assert_eq!(bytes, vec![10, 12, 14, 9, 6, 3, 7]);
    }

    #[test]
    fn swap_multiples_zero_is_noop() {
        let mut bytes = vec![0, 2, 4];
        swap_multiples(&mut bytes, 0);
        assert_eq!(bytes, vec![0, 2, 4]);
    }

    #[test]
    fn encrypt_literal() {
        let mut bytes = b"Hello, World!".to_vec();
        encrypt_packet(&mut bytes, 6);
        assert_eq!(
            bytes,
            vec![
                0xC8, 0xA1, 0xE5, 0xE4, 0xEC, 0xF2, 0xEC, 0xEC, 0xEF, 0xEF, 0xAC, 0xD7, 0xA0
            ]
        );

        decrypt_packet(&mut bytes, 6);
        assert_eq!(bytes, b"Hello, World!".to_vec());
    }

    #[test]
    fn server_verification_hash_values() {
        let cases = [
            (0, 114_000),
            (1, 115_191),
            (5, 613_210),
            (12_345, 266_403),
            (100_000, 145_554),
            (5_000_000, 339_168),
            (11_092_003, 112_773),
            (11_092_004, 112_655),
            (11_092_005, 112_299),
            (16_194_276, 105_960),
        ];
        for (challenge, expected) in cases {
            assert_eq!(
                server_verification_hash(challenge),
                expected,
                "challenge {challenge}"
            );
        }
    }
}
