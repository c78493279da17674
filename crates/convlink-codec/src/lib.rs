//! Rate-1/2 convolutional codec for short text messages
//!
//! The codec pairs a shift-register convolutional encoder with a
//! hard-decision maximum-likelihood sequence decoder (Viterbi-style trellis
//! search). Both sides share the generator tap model and branch output
//! function, so the decoder scores candidate transitions by re-running the
//! encoder step it hypothesizes:
//! - taps: tap index sets derived from the generator polynomials
//! - convenc: branch output function and the encoder
//! - viterbi: trellis search with one survivor per register state
//! - messagecodec: the message-level encode/decode pipeline

pub mod convenc;
pub mod messagecodec;
pub mod taps;
pub mod viterbi;

// Re-export commonly used items
pub use convenc::{RegisterState, branch_output, encode_bits, shift_in};
pub use messagecodec::{decode_message, encode_message, message_to_bits};
pub use taps::TapSet;
pub use viterbi::ViterbiDecoder;
