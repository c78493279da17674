// Hard-decision Viterbi decoder over the register-state trellis

use convlink_config::CodecConfig;
use convlink_core::CodecErr;

use crate::convenc::{RegisterState, branch_output, shift_in};
use crate::taps::TapSet;

/// Type used to accumulate path metrics. Each trellis step adds at most 2,
/// so 32 bits leave ample headroom for any realistic message length.
type Metric = u32;

/// One retained candidate history per reachable register state.
#[derive(Debug, Clone)]
struct SurvivorPath {
    /// Decoded bits in step order (the bit for the last pair first);
    /// reversed once after the final selection.
    decoded: Vec<u8>,
    metric: Metric,
}

/// Maximum-likelihood sequence decoder for the rate-1/2 code.
///
/// Survivors live in a table indexed by register state as an integer, one
/// slot per state, so the per-depth reduction needs no sorting and the
/// tie-break is fixed by the enumeration order below.
pub struct ViterbiDecoder {
    taps: TapSet,
    register_len: usize,
    num_states: usize,
}

impl ViterbiDecoder {
    pub fn new(cfg: &CodecConfig) -> Result<Self, CodecErr> {
        let taps = TapSet::derive(cfg)?;
        Ok(ViterbiDecoder {
            register_len: cfg.register_len,
            num_states: cfg.num_states(),
            taps,
        })
    }

    /// Decode a received hard-bit sequence (one 0/1 value per byte) into the
    /// most likely transmitted bit sequence, flush prefix included.
    ///
    /// A trailing bit on odd-length input is dropped (documented truncation,
    /// not an error). Returns exactly `floor(len/2)` decoded bits.
    pub fn decode(&self, received: &[u8]) -> Vec<u8> {
        let x = self.register_len;
        let num_pairs = received.len() / 2;
        let num_states = self.num_states;

        // Before the first step only the all-zero register is reachable.
        let mut survivors: Vec<Option<SurvivorPath>> = vec![None; num_states];
        survivors[0] = Some(SurvivorPath { decoded: Vec::with_capacity(num_pairs), metric: 0 });

        // Pairs are consumed in reverse index order, mirroring the encoder's
        // reverse construction.
        for pair_idx in (0..num_pairs).rev() {
            let pair = (received[2 * pair_idx], received[2 * pair_idx + 1]);
            let mut reduced: Vec<Option<SurvivorPath>> = vec![None; num_states];

            // Candidate enumeration order is the tie-break: survivors in
            // ascending state order, then hypothesis bit 0 before bit 1.
            // A candidate only displaces a strictly worse occupant.
            for state in 0..num_states {
                let Some(survivor) = &survivors[state] else { continue };
                for next_bit in [0u8, 1] {
                    let expected = branch_output(next_bit, state as RegisterState, &self.taps);
                    let metric = survivor.metric + hamming_pair(expected, pair);
                    let successor = shift_in(state as RegisterState, next_bit, x) as usize;

                    let replace = match &reduced[successor] {
                        None => true,
                        Some(occupant) => metric < occupant.metric,
                    };
                    if replace {
                        let mut decoded = survivor.decoded.clone();
                        decoded.push(next_bit);
                        reduced[successor] = Some(SurvivorPath { decoded, metric });
                    }
                }
            }
            survivors = reduced;
        }

        // Globally best survivor. The ascending scan keeps the first of any
        // equal-metric set, matching the per-step tie-break direction.
        let mut best: Option<&SurvivorPath> = None;
        for survivor in survivors.iter().flatten() {
            let better = match best {
                None => true,
                Some(b) => survivor.metric < b.metric,
            };
            if better {
                best = Some(survivor);
            }
        }
        let best = best.expect("state 0 always carries a survivor");
        tracing::trace!("viterbi: best path metric {} over {} pairs", best.metric, num_pairs);

        // Step order is last pair first; flip into pair index order.
        let mut decoded = best.decoded.clone();
        decoded.reverse();
        decoded
    }
}

/// Branch metric: number of differing bits between two 2-bit pairs (0..=2).
#[inline]
fn hamming_pair(a: (u8, u8), b: (u8, u8)) -> Metric {
    ((a.0 ^ b.0) + (a.1 ^ b.1)) as Metric
}
