use serde::Deserialize;

use convlink_core::CodecErr;

/// Largest accepted register length. The decoder keeps one survivor slot
/// per register state, so the state space 2^X must stay enumerable; 24 also
/// keeps X+1 within the 32 bits of the feedback scheme values.
pub const MAX_REGISTER_LEN: usize = 24;

/// Code parameters. A value of this type fully determines the code; it is
/// constructed once per invocation and read-only thereafter.
///
/// `upper_scheme` and `lower_scheme` are generator polynomials given as
/// integers: bit value 1 marks a tapped position once the value is aligned
/// to `register_len + 1` bits (see `TapSet` in convlink-codec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CodecConfig {
    /// Number of delay cells in the shift register (X)
    pub register_len: usize,
    /// Upper feedback scheme (Y), producing the first bit of each pair
    pub upper_scheme: u32,
    /// Lower feedback scheme (Z), producing the second bit of each pair
    pub lower_scheme: u32,
}

impl CodecConfig {
    pub fn new(register_len: usize, upper_scheme: u32, lower_scheme: u32) -> Self {
        CodecConfig { register_len, upper_scheme, lower_scheme }
    }

    /// Checks that all parameters are positive and the register length keeps
    /// the state space enumerable. Callers are expected to have validated
    /// user input already; the codec core re-checks before touching bits.
    pub fn validate(&self) -> Result<(), CodecErr> {
        if self.register_len == 0 || self.register_len > MAX_REGISTER_LEN {
            return Err(CodecErr::InvalidConfiguration {
                field: "register_len",
                value: self.register_len as u64,
            });
        }
        if self.upper_scheme == 0 {
            return Err(CodecErr::InvalidConfiguration { field: "upper_scheme", value: 0 });
        }
        if self.lower_scheme == 0 {
            return Err(CodecErr::InvalidConfiguration { field: "lower_scheme", value: 0 });
        }
        Ok(())
    }

    /// Number of distinct register states (2^X).
    pub fn num_states(&self) -> usize {
        1 << self.register_len
    }
}

/// The stock parameter triple used when the caller supplies none.
impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            register_len: 5,
            upper_scheme: 53,
            lower_scheme: 46,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let cfg = CodecConfig::default();
        assert_eq!(cfg, CodecConfig::new(5, 53, 46));
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.num_states(), 32);
    }

    #[test]
    fn test_validate_rejects_zero_fields() {
        assert_eq!(
            CodecConfig::new(0, 53, 46).validate(),
            Err(CodecErr::InvalidConfiguration { field: "register_len", value: 0 })
        );
        assert_eq!(
            CodecConfig::new(5, 0, 46).validate(),
            Err(CodecErr::InvalidConfiguration { field: "upper_scheme", value: 0 })
        );
        assert_eq!(
            CodecConfig::new(5, 53, 0).validate(),
            Err(CodecErr::InvalidConfiguration { field: "lower_scheme", value: 0 })
        );
    }

    #[test]
    fn test_validate_rejects_huge_register() {
        let cfg = CodecConfig::new(MAX_REGISTER_LEN + 1, 53, 46);
        assert!(matches!(cfg.validate(), Err(CodecErr::InvalidConfiguration { field: "register_len", .. })));
    }
}
