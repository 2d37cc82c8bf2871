use std::fmt;

/// Failure decoding a byte buffer as a [`crate::ScreenBuffer`].
///
/// Both variants are recoverable: per §5's concurrency model, a consumer
/// that observes either should simply wait for the next change notification
/// and re-read, since the producer was mid-write (a torn read), not
/// corrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is shorter than the header claims `width * height` cells
    /// require.
    Truncated { expected: usize, actual: usize },
    /// A cell's character field is not a valid Unicode scalar value and also
    /// not the `0` sentinel for "blank".
    InvalidCharacter { index: usize, raw: u32 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { expected, actual } => {
                write!(f, "screen buffer truncated: expected at least {expected} bytes, got {actual}")
            }
            DecodeError::InvalidCharacter { index, raw } => {
                write!(f, "cell {index} has invalid character code point 0x{raw:08X}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}
