// Branch output function and convolutional encoder

use convlink_config::CodecConfig;
use convlink_core::{BitBuffer, CodecErr};

use crate::taps::TapSet;

/// Register contents packed as an integer in `[0, 2^X)`.
///
/// The newest cell occupies the most significant of the X bits and the
/// oldest the least significant, so ascending integer order equals the
/// survivor enumeration order used by the decoder's tie-break.
pub type RegisterState = u32;

/// Shift `bit` into the register as the newest cell, discarding the oldest.
#[inline]
pub fn shift_in(state: RegisterState, bit: u8, register_len: usize) -> RegisterState {
    (state >> 1) | ((bit as RegisterState) << (register_len - 1))
}

/// Ideal 2-bit encoder output for feeding `bit` into a register holding
/// `state`: XOR-reductions of the branch buffer `[bit] ++ cells` at the
/// upper and lower tap positions.
pub fn branch_output(bit: u8, state: RegisterState, taps: &TapSet) -> (u8, u8) {
    let x = taps.register_len;
    let buffer_bit = |idx: usize| -> u8 {
        if idx == 0 { bit } else { ((state >> (x - idx)) & 1) as u8 }
    };

    let y = taps.upper.iter().fold(0u8, |acc, &i| acc ^ buffer_bit(i));
    let z = taps.lower.iter().fold(0u8, |acc, &i| acc ^ buffer_bit(i));
    (y, z)
}

/// Encode a message-bit sequence (one 0/1 value per byte) into its rate-1/2
/// stream of exactly `2*(X+N)` bits. An empty message still produces the
/// `2*X` flush bits.
///
/// The conceptual input is `X flush zeros ++ message bits`, consumed back to
/// front: the last message bit is encoded against an all-zero register, and
/// the register accumulates the bits that *follow* the one being encoded.
/// The emitted pair order is then reversed, so the pair produced while
/// consuming the first flush zero leads the stream and the pair for the last
/// message bit ends it. Golden vectors pin this construction; do not replace
/// it with a causal left-to-right pass.
pub fn encode_bits(message_bits: &[u8], cfg: &CodecConfig) -> Result<BitBuffer, CodecErr> {
    let taps = TapSet::derive(cfg)?;
    let x = cfg.register_len;

    let mut state: RegisterState = 0;
    let mut pairs: Vec<(u8, u8)> = Vec::with_capacity(x + message_bits.len());
    for bit in message_bits.iter().rev().copied().chain(std::iter::repeat(0).take(x)) {
        pairs.push(branch_output(bit, state, &taps));
        state = shift_in(state, bit, x);
    }

    // Reverse the order of the pairs; each pair keeps its internal (y, z) order
    let mut stream = BitBuffer::new(2 * pairs.len());
    for &(y, z) in pairs.iter().rev() {
        stream.write_bit(y);
        stream.write_bit(z);
    }
    stream.seek(0);
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_in_discards_oldest() {
        // X=3: state 0b101, shift in 1 -> 0b110 (oldest LSB dropped)
        assert_eq!(shift_in(0b101, 1, 3), 0b110);
        assert_eq!(shift_in(0b101, 0, 3), 0b010);
    }

    #[test]
    fn test_branch_output_default_taps() {
        let taps = TapSet::derive(&CodecConfig::default()).unwrap();
        // All-zero register: both outputs mirror the input bit (tap 0 set in both)
        assert_eq!(branch_output(0, 0, &taps), (0, 0));
        assert_eq!(branch_output(1, 0, &taps), (1, 1));
        // Newest cell set (buffer position 1): upper taps it, lower does not
        let state = 1 << 4;
        assert_eq!(branch_output(0, state, &taps), (1, 0));
    }

    #[test]
    fn test_encode_bits_golden_a() {
        // Message bits of 'A' under the stock parameters
        let stream = encode_bits(&[0, 1, 0, 0, 0, 0, 0, 1], &CodecConfig::default()).unwrap();
        assert_eq!(stream.to_bitstr(), "00100111011011100111011011");
    }

    #[test]
    fn test_encode_no_bits_emits_flush_only() {
        let stream = encode_bits(&[], &CodecConfig::default()).unwrap();
        assert_eq!(stream.to_bitstr(), "0000000000");
    }

    #[test]
    fn test_encode_bits_minimal_register() {
        // X=1, schemes 1: each pair duplicates the previously consumed bit
        let stream = encode_bits(&[1, 0, 1], &CodecConfig::new(1, 1, 1)).unwrap();
        assert_eq!(stream.to_bitstr(), "11001100");
    }

    #[test]
    fn test_encode_propagates_config_errors() {
        assert!(encode_bits(&[1], &CodecConfig::new(0, 1, 1)).is_err());
        assert_eq!(
            encode_bits(&[1], &CodecConfig::new(5, 64, 46)).unwrap_err(),
            CodecErr::EmptyTapSet { scheme: "upper" }
        );
    }
}
