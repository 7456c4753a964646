use thiserror::Error;

use crate::common::Freq;

#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
/// An error produced while configuring the converter.
pub enum ConfigError {
    /// Requested sample rate is out of range.
    #[error("Sample rate ({0:?}) is out of range ([{1:?}, {2:?}])")]
    InvalidRate(Freq<u32>, Freq<u32>, Freq<u32>),
    /// The policy requires a scale/roll pair, but none exists for the ratio.
    #[error("No scale/roll pair found for denominator {0}")]
    NoScaleRoll(u32),
    /// The reduced ratio has a zero term.
    #[error("Conversion ratio is degenerate")]
    DegenerateRatio,
    /// Scaling policy value is not recognized.
    #[error("Unknown scaling policy")]
    UnknownPolicy,
    /// The configured rate bounds are empty or zero.
    #[error("Sample rate range ([{0:?}, {1:?}]) is invalid")]
    InvalidRateRange(Freq<u32>, Freq<u32>),
    /// Staging buffer capacity is odd or out of range.
    #[error("Staging buffer capacity ({0}) must be even and in [2, 65536]")]
    InvalidBufferCapacity(usize),
    /// Staging buffer is too small to hold the interpolation context.
    #[error("Staging buffer capacity ({0}) is too small for resampling (at least {1})")]
    BufferTooSmall(usize, usize),
}
