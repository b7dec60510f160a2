//! Packet sequence numbers.
//!
//! Clients prefix every packet after the handshake with a sequence number:
//! a start value agreed with the server plus a counter cycling through 0..10.
//! The start value is carried on the wire as a pair of numbers whose shape
//! depends on the packet that delivers it.

use rand::Rng;

const COUNTER_CYCLE: u32 = 10;
const MAX_INIT_START: u32 = 1757;
const MAX_PING_OFFSET: u32 = 252;
const MAX_ACCOUNT_REPLY_START: u32 = 240;

/// A sequence start value.
pub trait SequenceStart {
    fn value(&self) -> u32;
}

/// Sequence start delivered by the connection init reply.
///
/// On the wire `value = seq1 * 7 + seq2 - 13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitSequenceStart {
    value: u32,
    seq1: u32,
    seq2: u32,
}

impl InitSequenceStart {
    /// Reconstructs the start from the two numbers a client received.
    ///
    /// Pairs that would produce a negative value yield zero.
    #[must_use]
    pub const fn from_init_values(seq1: u32, seq2: u32) -> Self {
        let value = seq1.saturating_mul(7).saturating_add(seq2).saturating_sub(13);
        Self { value, seq1, seq2 }
    }

    /// Generates a random start and the pair that encodes it.
    ///
    /// Both numbers of the pair fit in a single encoded byte.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value = rng.random_range(0..MAX_INIT_START);
        let seq1_max = (value + 13) / 7;
        let seq1_min = value.saturating_sub(233) / 7;
        let seq1 = rng.random_range(seq1_min..seq1_max);
        let seq2 = value + 13 - seq1 * 7;
        Self { value, seq1, seq2 }
    }

    pub const fn seq1(&self) -> u32 {
        self.seq1
    }

    pub const fn seq2(&self) -> u32 {
        self.seq2
    }
}

impl SequenceStart for InitSequenceStart {
    fn value(&self) -> u32 {
        self.value
    }
}

/// Sequence start delivered by a ping.
///
/// On the wire `value = seq1 - seq2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingSequenceStart {
    value: u32,
    seq1: u32,
    seq2: u32,
}

impl PingSequenceStart {
    /// Reconstructs the start from the two numbers a client received.
    ///
    /// Pairs that would produce a negative value yield zero.
    #[must_use]
    pub const fn from_ping_values(seq1: u32, seq2: u32) -> Self {
        Self {
            value: seq1.saturating_sub(seq2),
            seq1,
            seq2,
        }
    }

    /// Generates a random start and the pair that encodes it.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let value = rng.random_range(0..MAX_INIT_START);
        let seq1 = value + rng.random_range(0..MAX_PING_OFFSET);
        let seq2 = seq1 - value;
        Self { value, seq1, seq2 }
    }

    pub const fn seq1(&self) -> u32 {
        self.seq1
    }

    pub const fn seq2(&self) -> u32 {
        self.seq2
    }
}

impl SequenceStart for PingSequenceStart {
    fn value(&self) -> u32 {
        self.value
    }
}

/// Sequence start delivered by an account reply, sent as a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountReplySequenceStart {
    value: u32,
}

impl AccountReplySequenceStart {
    #[must_use]
    pub const fn from_value(value: u32) -> Self {
        Self { value }
    }

    /// Generates a random start.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            value: rng.random_range(0..MAX_ACCOUNT_REPLY_START),
        }
    }
}

impl SequenceStart for AccountReplySequenceStart {
    fn value(&self) -> u32 {
        self.value
    }
}

/// Produces the sequence number for each outgoing packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketSequencer {
    start: u32,
    counter: u32,
}

impl PacketSequencer {
    pub fn new(start: impl SequenceStart) -> Self {
        Self {
            start: start.value(),
            counter: 0,
        }
    }

    /// Returns the next sequence number and advances the counter.
    pub fn next_sequence(&mut self) -> u32 {
        let sequence = self.start + self.counter;
        self.counter = (self.counter + 1) % COUNTER_CYCLE;
        sequence
    }

    /// Replaces the start value; the counter keeps cycling.
    pub fn set_start(&mut self, start: impl SequenceStart) {
        self.start = start.value();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sequencer_cycles_counter() {
        let mut sequencer = PacketSequencer::new(AccountReplySequenceStart::from_value(123));
        let sequences: Vec<u32> = (0..12).map(|_| sequencer.next_sequence()).collect();
        assert_eq!(
            sequences,
            vec![123, 124, 125, 126, 127, 128, 129, 130, 131, 132, 123, 124]
        );
    }

    #[test]
    fn set_start_keeps_counter() {
        let mut sequencer = PacketSequencer::new(AccountReplySequenceStart::from_value(10));
        sequencer.next_sequence();
        sequencer.next_sequence();
        sequencer.set_start(AccountReplySequenceStart::from_value(100));
        assert_eq!(sequencer.next_sequence(), 102);
    }

    #[test]
    fn init_values() {
        let start = InitSequenceStart::from_init_values(110, 122);
        assert_eq!(start.value(), 879);
        assert_eq!(InitSequenceStart::from_init_values(0, 5).value(), 0);
    }

    #[test]
    fn ping_values() {
        assert_eq!(PingSequenceStart::from_ping_values(1_000, 122).value(), 878);
        assert_eq!(PingSequenceStart::from_ping_values(5, 10).value(), 0);
    }

    #[test]
    fn generated_init_pairs_decode_to_their_value() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let start = InitSequenceStart::generate(&mut rng);
            assert!(start.value() < MAX_INIT_START);
            assert!(start.seq1() <= 252 && start.seq2() <= 252);
            let decoded = InitSequenceStart::from_init_values(start.seq1(), start.seq2());
            assert_eq!(decoded.value(), start.value());
        }
    }

    #[test]
    fn generated_ping_pairs_decode_to_their_value() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let start = PingSequenceStart::generate(&mut rng);
            assert!(start.seq2() < MAX_PING_OFFSET);
            let decoded = PingSequenceStart::from_ping_values(start.seq1(), start.seq2());
            assert_eq!(decoded.value(), start.value());
        }
    }

    #[test]
    fn generated_account_reply_start_is_bounded() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let start = AccountReplySequenceStart::generate(&mut rng);
            assert!(start.value() < MAX_ACCOUNT_REPLY_START);
        }
    }
}
