use convlink_config::CodecConfig;
use convlink_core::CodecErr;

/// Tap index sets over the branch buffer `[input bit] ++ register cells`.
///
/// Position 0 is the newly shifted-in bit; positions `1..=X` are the
/// register cells, newest first, matching the register layout used by the
/// encoder and decoder. One set per output bit of the rate-1/2 pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapSet {
    pub register_len: usize,
    pub upper: Vec<usize>,
    pub lower: Vec<usize>,
}

impl TapSet {
    /// Derive both tap sets from a validated configuration.
    ///
    /// Each scheme value is aligned to exactly `X+1` bits: shorter values
    /// are implicitly left-zero-padded, and bits above the low `X+1` are
    /// silently ignored. A scheme whose low `X+1` bits are all zero selects
    /// nothing and is rejected.
    pub fn derive(cfg: &CodecConfig) -> Result<TapSet, CodecErr> {
        cfg.validate()?;

        let upper = scheme_taps(cfg.upper_scheme, cfg.register_len);
        if upper.is_empty() {
            return Err(CodecErr::EmptyTapSet { scheme: "upper" });
        }
        let lower = scheme_taps(cfg.lower_scheme, cfg.register_len);
        if lower.is_empty() {
            return Err(CodecErr::EmptyTapSet { scheme: "lower" });
        }

        Ok(TapSet { register_len: cfg.register_len, upper, lower })
    }
}

/// Positions selected by one scheme value. Position `i` is tapped iff bit
/// `X - i` of the value is set, so position 0 corresponds to the most
/// significant bit of the aligned pattern.
fn scheme_taps(scheme: u32, register_len: usize) -> Vec<usize> {
    (0..=register_len)
        .filter(|i| (scheme >> (register_len - i)) & 1 == 1)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_taps() {
        let taps = TapSet::derive(&CodecConfig::default()).unwrap();
        assert_eq!(taps.upper, vec![0, 1, 3, 5]);
        assert_eq!(taps.lower, vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_minimal_config_taps() {
        // X=1, schemes 1: only the register cell is tapped, not the input bit
        let taps = TapSet::derive(&CodecConfig::new(1, 1, 1)).unwrap();
        assert_eq!(taps.upper, vec![1]);
        assert_eq!(taps.lower, vec![1]);
    }

    #[test]
    fn test_short_scheme_is_left_padded() {
        let taps = TapSet::derive(&CodecConfig::new(3, 5, 7)).unwrap();
        assert_eq!(taps.upper, vec![1, 3]);
        assert_eq!(taps.lower, vec![1, 2, 3]);
    }

    #[test]
    fn test_high_bits_are_truncated() {
        let base = TapSet::derive(&CodecConfig::new(5, 53, 46)).unwrap();
        let wide = TapSet::derive(&CodecConfig::new(5, 53 + 64, 46)).unwrap();
        assert_eq!(base, wide);
    }

    #[test]
    fn test_truncation_to_nothing_is_rejected() {
        // 64 has no bit in the low 6, so for X=5 it selects no position
        assert_eq!(
            TapSet::derive(&CodecConfig::new(5, 64, 46)),
            Err(CodecErr::EmptyTapSet { scheme: "upper" })
        );
        assert_eq!(
            TapSet::derive(&CodecConfig::new(5, 53, 64)),
            Err(CodecErr::EmptyTapSet { scheme: "lower" })
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            TapSet::derive(&CodecConfig::new(0, 53, 46)),
            Err(CodecErr::InvalidConfiguration { field: "register_len", .. })
        ));
    }
}
