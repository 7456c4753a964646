mod freq;

pub use freq::*;

/// Number of interleaved channels handled by the converter.
pub const CHANNELS: usize = 2;

/// Size of one interleaved sample in bytes.
pub const SAMPLE_BYTES: usize = core::mem::size_of::<i16>();

/// Size of one stereo frame in bytes.
pub const FRAME_BYTES: usize = CHANNELS * SAMPLE_BYTES;

/// The default lower bound of accepted sample rates.
pub const RATE_MIN: Freq<u32> = Freq { freq: 4000 };

/// The default upper bound of accepted sample rates.
pub const RATE_MAX: Freq<u32> = Freq { freq: 1_102_500 };

/// The default staging buffer capacity in samples.
pub const BUFFER_CAPACITY_DEFAULT: usize = 8192;

/// The smallest staging buffer capacity accepted by the configuration.
pub const BUFFER_CAPACITY_MIN: usize = 2;

/// The largest staging buffer capacity accepted by the configuration.
pub const BUFFER_CAPACITY_MAX: usize = 65536;

/// The smallest staging buffer capacity that can run an interpolating kernel.
///
/// Two frames hold the interpolation seed, the rest is fetch room.
pub const RESAMPLE_CAPACITY_MIN: usize = 8;
