use derive_more::Display;
use derive_new::new;
use thiserror::Error;

pub use ratefeed_core::error::ConfigError;

#[derive(new, Error, Debug, Display, PartialEq, Clone)]
#[display("{}", msg)]
/// An error produced by an upstream byte source.
pub struct SourceError {
    msg: String,
}

// GRCOV_EXCL_START
impl From<std::io::Error> for SourceError {
    fn from(value: std::io::Error) -> Self {
        Self::new(value.to_string())
    }
}

#[cfg(feature = "wav")]
impl From<hound::Error> for SourceError {
    fn from(value: hound::Error) -> Self {
        Self::new(value.to_string())
    }
}
// GRCOV_EXCL_STOP

#[derive(Error, Debug, PartialEq, Clone)]
/// An error produced while feeding the converter.
pub enum FeedError {
    /// [`feed`](crate::RateConverter::feed) was called before a successful configuration.
    #[error("Converter is not configured")]
    NotConfigured,
    /// The upstream source failed; the current call is aborted.
    #[error("{0}")]
    Source(#[from] SourceError),
}
