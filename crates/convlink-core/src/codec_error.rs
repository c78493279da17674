use std::fmt;

/// Error conditions of the codec core. All inputs reaching the encoder or
/// decoder are expected to have been validated by the caller; these cover
/// what remains when the core is invoked directly.
#[derive(Debug, PartialEq, Eq)]
pub enum CodecErr {
    /// A code parameter is out of its valid range.
    InvalidConfiguration { field: &'static str, value: u64 },
    /// A feedback scheme has no tap left after alignment to the register
    /// length (its low X+1 bits are all zero).
    EmptyTapSet { scheme: &'static str },
}

impl fmt::Display for CodecErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecErr::InvalidConfiguration { field, value } => {
                write!(f, "invalid configuration: {} = {}", field, value)
            }
            CodecErr::EmptyTapSet { scheme } => {
                write!(f, "{} feedback scheme selects no tap positions for this register length", scheme)
            }
        }
    }
}

impl std::error::Error for CodecErr {}
