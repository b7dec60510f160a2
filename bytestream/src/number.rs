//! Base-253 number encoding.
//!
//! Numbers are written as up to four "digits" in base 253, least significant
//! first. Each digit is stored as `digit + 1`, so encoded digits never collide
//! with the 0xFE "absent digit" sentinel or the 0xFF chunk break byte.

/// Largest value encodable in one byte.
pub const CHAR_MAX: u32 = 252;
/// Largest value encodable in two bytes.
pub const SHORT_MAX: u32 = 64_008;
/// Largest value encodable in three bytes.
pub const THREE_MAX: u32 = 16_194_276;
/// Largest value encodable in four bytes.
pub const INT_MAX: u32 = 4_097_152_080;

/// Marks a digit position the value never reached.
pub const NUMBER_ABSENT: u8 = 0xFE;

const ORDERS: [u32; 4] = [1, CHAR_MAX + 1, SHORT_MAX + 1, THREE_MAX + 1];

/// Encodes a number into its 4-byte representation.
///
/// Values above [`INT_MAX`] do not fail: the most significant digit wraps,
/// which matches what deployed clients tolerate on the wire.
#[allow(clippy::cast_possible_truncation)]
pub const fn encode_number(number: u32) -> [u8; 4] {
    let mut encoded = [NUMBER_ABSENT; 4];
    let mut value = number;

    let mut index = 3;
    while index > 0 {
        let order = ORDERS[index];
        if number >= order {
            encoded[index] = (value / order + 1) as u8;
            value %= order;
        }
        index -= 1;
    }

    encoded[0] = (value + 1) as u8;
    encoded
}

/// Decodes a number from up to four encoded bytes.
///
/// Decoding stops at the first [`NUMBER_ABSENT`] byte; missing bytes count as
/// zero. Digits are clamped to the base, so the result never exceeds
/// [`INT_MAX`].
pub fn decode_number(bytes: &[u8]) -> u32 {
    let mut result = 0u32;
    for (&byte, order) in bytes.iter().zip(ORDERS) {
        if byte == NUMBER_ABSENT {
            break;
        }
        let digit = u32::from(byte.saturating_sub(1)).min(CHAR_MAX);
        result += digit * order;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_small_values() {
        assert_eq!(encode_number(0), [0x01, 0xFE, 0xFE, 0xFE]);
        assert_eq!(encode_number(1), [0x02, 0xFE, 0xFE, 0xFE]);
        assert_eq!(encode_number(CHAR_MAX), [0xFD, 0xFE, 0xFE, 0xFE]);
    }

    #[test]
    fn encode_crosses_orders() {
        assert_eq!(encode_number(253), [0x01, 0x02, 0xFE, 0xFE]);
        assert_eq!(encode_number(12_345), [0xCA, 0x31, 0xFE, 0xFE]);
        assert_eq!(encode_number(64_009), [0x01, 0x01, 0x02, 0xFE]);
        assert_eq!(encode_number(16_194_277), [0x01, 0x01, 0x01, 0x02]);
    }

    #[test]
    fn encode_maximum() {
        assert_eq!(encode_number(INT_MAX), [0xFD; 4]);
    }

    #[test]
    fn encode_overflow_is_deterministic() {
        let first = encode_number(u32::MAX);
        let second = encode_number(u32::MAX);
        assert_eq!(first, second);
        // 4_294_967_295 / 16_194_277 = 265, + 1 wraps to 10.
        assert_eq!(first[3], 10);
    }

    #[test]
    fn decode_stops_at_sentinel() {
        assert_eq!(decode_number(&[0x01, 0xFE, 0xFE, 0xFE]), 0);
        assert_eq!(decode_number(&[0x02, 0xFE, 0x05, 0x05]), 1);
    }

    #[test]
    fn decode_maximum() {
        assert_eq!(decode_number(&[0xFD, 0xFD, 0xFD, 0xFD]), INT_MAX);
    }

    #[test]
    fn decode_short_input() {
        assert_eq!(decode_number(&[]), 0);
        assert_eq!(decode_number(&[0xCA]), 201);
        assert_eq!(decode_number(&[0xCA, 0x31]), 12_345);
    }

    #[test]
    fn decode_ignores_extra_bytes() {
        assert_eq!(decode_number(&[0x02, 0x01, 0x01, 0x01, 0x09]), 1);
    }

    #[test]
    fn decode_clamps_out_of_alphabet_digits() {
        assert_eq!(decode_number(&[0x00]), 0);
        assert_eq!(decode_number(&[0xFF]), CHAR_MAX);
        assert_eq!(decode_number(&[0xFF, 0xFF, 0xFF, 0xFF]), INT_MAX);
    }

    #[test]
    fn roundtrip_width_maxima() {
        for value in [0, CHAR_MAX, SHORT_MAX, THREE_MAX, INT_MAX] {
            assert_eq!(decode_number(&encode_number(value)), value);
        }
    }
}
