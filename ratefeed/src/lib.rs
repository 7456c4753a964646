#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::unescaped_backticks)]

//! Streaming sample-rate converter for interleaved signed 16-bit stereo PCM.
//!
//! A [`RateConverter`] pulls raw bytes from a [`ByteSource`](source::ByteSource),
//! stages them and runs one of four linear-interpolation kernels selected at
//! configuration time:
//!
//! ```
//! use ratefeed::prelude::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut converter = RateConverter::new(FeederConfig::default())?;
//! converter.configure(RateSpec::new(44100 * Hz, 48000 * Hz), ScalingPolicy::Optimal)?;
//!
//! let input = [0u8; 4 * 441];
//! let mut output = [0u8; 4 * 480];
//! let n = converter.feed(&mut output, &mut SliceSource::new(&input))?;
//! assert_eq!(output.len(), n);
//! # Ok(())
//! # }
//! ```

/// Staging buffer.
pub mod buffer;
/// The converter state machine and feed driver.
pub mod converter;
/// Errors.
pub mod error;
mod kernel;
/// Commonly used types.
pub mod prelude;
/// Upstream byte sources.
pub mod source;

pub use converter::{RateConverter, RateParam};
