use crate::{
    common::{
        Freq, BUFFER_CAPACITY_DEFAULT, BUFFER_CAPACITY_MAX, BUFFER_CAPACITY_MIN, RATE_MAX,
        RATE_MIN,
    },
    error::ConfigError,
    plan::{RateSpec, ScalingPolicy},
};

/// Converter configuration.
///
/// Replaces process-wide tunables: every converter carries its own copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FeederConfig {
    /// Lowest accepted sample rate.
    pub rate_min: Freq<u32>,
    /// Highest accepted sample rate.
    pub rate_max: Freq<u32>,
    /// Staging buffer capacity in samples (two per frame).
    pub buffer_capacity: usize,
    /// Strategy selection policy used by rate setters.
    pub policy: ScalingPolicy,
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            rate_min: RATE_MIN,
            rate_max: RATE_MAX,
            buffer_capacity: BUFFER_CAPACITY_DEFAULT,
            policy: ScalingPolicy::default(),
        }
    }
}

impl FeederConfig {
    /// Checks the rate bounds and the buffer capacity.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidRateRange`] if `rate_min` is zero or above `rate_max`.
    /// - [`ConfigError::InvalidBufferCapacity`] if `buffer_capacity` is odd or
    ///   outside `2..=65536`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate_min.hz() == 0 || self.rate_min > self.rate_max {
            return Err(ConfigError::InvalidRateRange(self.rate_min, self.rate_max));
        }
        if self.buffer_capacity % 2 != 0
            || !(BUFFER_CAPACITY_MIN..=BUFFER_CAPACITY_MAX).contains(&self.buffer_capacity)
        {
            return Err(ConfigError::InvalidBufferCapacity(self.buffer_capacity));
        }
        Ok(())
    }

    /// Checks a single rate against the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRate`] if `rate` is out of range.
    pub fn check_rate(&self, rate: Freq<u32>) -> Result<(), ConfigError> {
        if !(self.rate_min..=self.rate_max).contains(&rate) {
            return Err(ConfigError::InvalidRate(rate, self.rate_min, self.rate_max));
        }
        Ok(())
    }

    /// Checks both rates of `spec` against the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRate`] for the first rate out of range.
    pub fn check_spec(&self, spec: &RateSpec) -> Result<(), ConfigError> {
        self.check_rate(spec.src())?;
        self.check_rate(spec.dst())
    }
}
