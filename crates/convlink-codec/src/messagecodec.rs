// Message-level pipeline: text <-> rate-1/2 bit stream

use convlink_config::CodecConfig;
use convlink_core::{BitBuffer, CodecErr};

use crate::convenc;
use crate::viterbi::ViterbiDecoder;

/// Expand a message into its bit sequence: each character contributes its
/// 8-bit MSB-first representation, in message order. Callers restrict the
/// message to ASCII alphanumerics before handing it in.
pub fn message_to_bits(message: &str) -> Vec<u8> {
    let mut bits = Vec::with_capacity(message.len() * 8);
    for byte in message.bytes() {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    bits
}

/// Encode a text message into its rate-1/2 stream of `2*(X + 8*N)` bits.
/// An empty message still emits the `2*X` flush bits.
pub fn encode_message(message: &str, cfg: &CodecConfig) -> Result<BitBuffer, CodecErr> {
    let message_bits = message_to_bits(message);
    tracing::trace!("encode_message: {} chars -> {} message bits", message.len(), message_bits.len());

    let stream = convenc::encode_bits(&message_bits, cfg)?;
    tracing::trace!("encode_message: stream {}", stream.to_bitstr());
    Ok(stream)
}

/// Decode a received bit stream back into text.
///
/// The first X decoded bits are the flush prefix and are discarded; the
/// rest is grouped into 8-bit chunks (a trailing partial chunk is ignored).
/// Chunk values of 128 and above contribute no character, so the result may
/// be shorter than the conceptual message.
pub fn decode_message(mut stream: BitBuffer, cfg: &CodecConfig) -> Result<String, CodecErr> {
    let decoder = ViterbiDecoder::new(cfg)?;

    stream.seek(0);
    let mut received = vec![0u8; stream.get_len()];
    stream.to_bitarr(&mut received);

    let decoded = decoder.decode(&received);
    tracing::trace!("decode_message: {} received bits -> {} decoded bits", received.len(), decoded.len());

    let message_bits = decoded.get(cfg.register_len..).unwrap_or_default();
    let mut out = String::with_capacity(message_bits.len() / 8);
    for chunk in message_bits.chunks_exact(8) {
        let value = chunk.iter().fold(0u32, |acc, &bit| (acc << 1) | bit as u32);
        if value < 128 {
            out.push(value as u8 as char);
        } else {
            tracing::debug!("decode_message: dropping non-ASCII byte value {}", value);
        }
    }
    Ok(out)
}
