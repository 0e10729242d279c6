//! Error type.

use core::fmt;

/// Buffers handed to the engine do not satisfy its contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Fewer bytes than one native cipher block to process.
    TooShort,

    /// Input buffer doesn't cover every block the call reads.
    InputTooShort,

    /// Xor mask is shorter than the processed length.
    XorTooShort,

    /// `IN_BLOCK_IS_COUNTER` was set without a counter stream, or a counter stream was passed
    /// without the flag.
    CounterMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::TooShort => "less than one cipher block to process",
            Error::InputTooShort => "input buffer too short",
            Error::XorTooShort => "xor buffer too short",
            Error::CounterMismatch => "counter flag does not match the block stream",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
