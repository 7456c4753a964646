pub use crate::{
    buffer::StagingBuffer,
    converter::{RateConverter, RateParam},
    error::{ConfigError, FeedError, SourceError},
    source::{ByteSource, ReadSource, SliceSource},
};

#[cfg(feature = "wav")]
pub use crate::source::WavSource;

pub use ratefeed_core::{
    common::{kHz, Freq, Hz, CHANNELS, FRAME_BYTES, SAMPLE_BYTES},
    config::FeederConfig,
    plan::{ConversionPlan, ConversionStrategy, RateSpec, ScalingPolicy},
    rate::{Ratio, ScaleRoll},
};
