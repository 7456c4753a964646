use derive_more::Display;
use derive_new::new;
use getset::CopyGetters;

use crate::{
    common::Freq,
    error::ConfigError,
    rate::{
        find_best_coefficients, find_scale_roll, reduce_ratio, Coefficients, Ratio, ScaleRoll,
        MAX_SHIFT_32, MAX_SHIFT_64,
    },
};

/// The kernel selected for a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum ConversionStrategy {
    /// 64-bit accumulator with a true division per sample.
    Exact64,
    /// 64-bit accumulator with a scale/roll shift.
    Scaled64,
    /// 32-bit accumulator with a scale/roll shift.
    Scaled32,
    /// No interpolation.
    PlainCopy,
}

/// How the converter picks a [`ConversionStrategy`] for a pair of rates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ScalingPolicy {
    /// Always [`ConversionStrategy::Exact64`].
    #[display("exact64")]
    Exact64,
    /// [`ConversionStrategy::Scaled64`] on the raw ratio, or fail.
    #[display("scaled64")]
    Scaled64,
    /// [`ConversionStrategy::Scaled32`] via the coefficient search, or fail.
    #[display("scaled32")]
    Scaled32,
    /// [`ConversionStrategy::PlainCopy`] on the raw ratio. Loses or repeats
    /// frames unless the rates are equal.
    #[display("plain")]
    #[cfg_attr(feature = "serde", serde(rename = "plain"))]
    PlainCopyForced,
    /// [`ConversionStrategy::Scaled32`] if a rounding step succeeds, else the
    /// 64-bit cascade.
    #[display("fixed")]
    Fixed,
    /// [`ConversionStrategy::Scaled32`] whenever any scale/roll fits, else the
    /// 64-bit cascade.
    #[default]
    #[display("optimal")]
    Optimal,
    /// [`ConversionStrategy::Scaled32`] if possible, else
    /// [`ConversionStrategy::PlainCopy`]. Never uses 64-bit arithmetic.
    #[display("worst")]
    Worst,
}

impl ScalingPolicy {
    /// All policies in tunable order.
    pub const ALL: [Self; 7] = [
        Self::Exact64,
        Self::Scaled64,
        Self::Scaled32,
        Self::PlainCopyForced,
        Self::Fixed,
        Self::Optimal,
        Self::Worst,
    ];
}

impl core::str::FromStr for ScalingPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or(ConfigError::UnknownPolicy)
    }
}

impl TryFrom<u8> for ScalingPolicy {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::UnknownPolicy)
    }
}

/// Requested source and destination rates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, new, CopyGetters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[getset(get_copy = "pub")]
pub struct RateSpec {
    /// Source rate.
    src: Freq<u32>,
    /// Destination rate.
    dst: Freq<u32>,
}

/// The outcome of the configuration phase: everything a kernel needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct ConversionPlan {
    /// The requested rates.
    spec: RateSpec,
    /// Selected kernel.
    strategy: ConversionStrategy,
    /// Effective source rate, never above the requested one.
    src: Freq<u32>,
    /// Effective destination rate, never above the requested one.
    dst: Freq<u32>,
    /// Reduced ratio of the effective rates.
    ratio: Ratio,
    /// Scale/roll pair, present for the scaled kernels.
    scale_roll: Option<ScaleRoll>,
}

impl ConversionPlan {
    /// Selects a strategy for `spec` under `policy`.
    ///
    /// Equal rates always give a 1:1 [`ConversionStrategy::PlainCopy`] plan
    /// without searching. A ratio that reduces to 1:1 after rounding is also
    /// turned into a plain copy.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoScaleRoll`] if `policy` requires a scale/roll pair
    ///   and none is found.
    /// - [`ConfigError::DegenerateRatio`] if a rate is zero.
    #[tracing::instrument(level = "debug")]
    pub fn new(spec: RateSpec, policy: ScalingPolicy) -> Result<Self, ConfigError> {
        let (src, dst) = (spec.src().hz(), spec.dst().hz());
        if src == dst {
            return Ok(Self {
                spec,
                strategy: ConversionStrategy::PlainCopy,
                src: spec.src(),
                dst: spec.dst(),
                ratio: Ratio::UNITY,
                scale_roll: None,
            });
        }

        let plan = match policy {
            ScalingPolicy::Exact64 => Self::raw(spec, ConversionStrategy::Exact64),
            ScalingPolicy::Scaled64 => {
                let plan = Self::raw(spec, ConversionStrategy::Scaled64);
                let sr = find_scale_roll(plan.ratio.gy(), MAX_SHIFT_64)
                    .ok_or(ConfigError::NoScaleRoll(plan.ratio.gy()))?;
                Self {
                    scale_roll: Some(sr),
                    ..plan
                }
            }
            ScalingPolicy::Scaled32 => {
                let c = find_best_coefficients(src, dst, MAX_SHIFT_32);
                Self::scaled32(spec, &c).ok_or(ConfigError::NoScaleRoll(c.ratio().gy()))?
            }
            ScalingPolicy::PlainCopyForced => Self::raw(spec, ConversionStrategy::PlainCopy),
            ScalingPolicy::Fixed => {
                let c = find_best_coefficients(src, dst, MAX_SHIFT_32);
                c.is_adjusted()
                    .then(|| Self::scaled32(spec, &c))
                    .flatten()
                    .unwrap_or_else(|| Self::fallback64(spec))
            }
            ScalingPolicy::Optimal => {
                let c = find_best_coefficients(src, dst, MAX_SHIFT_32);
                Self::scaled32(spec, &c).unwrap_or_else(|| Self::fallback64(spec))
            }
            ScalingPolicy::Worst => {
                let c = find_best_coefficients(src, dst, MAX_SHIFT_32);
                Self::scaled32(spec, &c)
                    .unwrap_or_else(|| Self::raw(spec, ConversionStrategy::PlainCopy))
            }
        };

        let plan = plan.finish()?;
        if plan.strategy == ConversionStrategy::PlainCopy && !plan.ratio.is_unity() {
            tracing::warn!(
                "{:?} -> {:?} uses plain copy under {} policy; frames will be dropped or repeated",
                spec.src(),
                spec.dst(),
                policy
            );
        }
        tracing::debug!(
            "Selected {} for {:?} -> {:?} (effective {:?} -> {:?}, ratio {}:{}, {:?})",
            plan.strategy,
            spec.src(),
            spec.dst(),
            plan.src,
            plan.dst,
            plan.ratio.gx(),
            plan.ratio.gy(),
            plan.scale_roll
        );
        Ok(plan)
    }

    /// Returns `true` if the plan copies input to output unchanged.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        matches!(self.strategy, ConversionStrategy::PlainCopy) && self.ratio.is_unity()
    }

    fn raw(spec: RateSpec, strategy: ConversionStrategy) -> Self {
        Self {
            spec,
            strategy,
            src: spec.src(),
            dst: spec.dst(),
            ratio: reduce_ratio(spec.src().hz(), spec.dst().hz()),
            scale_roll: None,
        }
    }

    fn scaled32(spec: RateSpec, c: &Coefficients) -> Option<Self> {
        c.scale_roll()
            .filter(|sr| sr.fits_i32(c.ratio()))
            .map(|sr| Self {
                spec,
                strategy: ConversionStrategy::Scaled32,
                src: Freq { freq: c.src() },
                dst: Freq { freq: c.dst() },
                ratio: c.ratio(),
                scale_roll: Some(sr),
            })
    }

    fn fallback64(spec: RateSpec) -> Self {
        let plan = Self::raw(spec, ConversionStrategy::Exact64);
        match find_scale_roll(plan.ratio.gy(), MAX_SHIFT_64) {
            Some(sr) => Self {
                strategy: ConversionStrategy::Scaled64,
                scale_roll: Some(sr),
                ..plan
            },
            None => plan,
        }
    }

    fn finish(self) -> Result<Self, ConfigError> {
        if self.ratio.is_degenerate() {
            return Err(ConfigError::DegenerateRatio);
        }
        if self.ratio.is_unity() {
            return Ok(Self {
                strategy: ConversionStrategy::PlainCopy,
                ..self
            });
        }
        Ok(self)
    }
}
