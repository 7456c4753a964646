use ratefeed_core::{
    common::{Freq, CHANNELS, FRAME_BYTES, RESAMPLE_CAPACITY_MIN, SAMPLE_BYTES},
    config::FeederConfig,
    plan::{ConversionPlan, ConversionStrategy, RateSpec, ScalingPolicy},
};

use crate::{
    buffer::StagingBuffer,
    error::{ConfigError, FeedError},
    kernel::Kernel,
    source::ByteSource,
};

/// Selects one side of the conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RateParam {
    /// The source (input) rate.
    Src,
    /// The destination (output) rate.
    Dst,
}

/// Streaming sample-rate converter for interleaved S16 stereo.
///
/// A converter starts unconfigured. [`configure`](Self::configure) selects a
/// [`ConversionPlan`] and restarts the stream; [`feed`](Self::feed) then pulls
/// bytes from a [`ByteSource`] and writes converted frames. Dropping the
/// converter closes it.
#[derive(Debug)]
pub struct RateConverter {
    config: FeederConfig,
    policy: ScalingPolicy,
    plan: Option<ConversionPlan>,
    staging: StagingBuffer,
    alpha: u32,
    carry: [u8; FRAME_BYTES],
    carry_len: usize,
}

impl RateConverter {
    /// Creates an unconfigured converter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` does not validate.
    pub fn new(config: FeederConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            policy: config.policy,
            plan: None,
            staging: StagingBuffer::new(config.buffer_capacity),
            alpha: 0,
            carry: [0; FRAME_BYTES],
            carry_len: 0,
        })
    }

    /// Selects a strategy for `spec` under `policy` and restarts the stream.
    ///
    /// On error the previous configuration, if any, stays active.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidRate`] if a rate is out of the configured range.
    /// - [`ConfigError::NoScaleRoll`] or [`ConfigError::DegenerateRatio`] from
    ///   the strategy selection.
    /// - [`ConfigError::BufferTooSmall`] if the plan needs interpolation and the
    ///   staging buffer cannot hold it.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn configure(
        &mut self,
        spec: RateSpec,
        policy: ScalingPolicy,
    ) -> Result<ConversionStrategy, ConfigError> {
        self.config.check_spec(&spec)?;
        let plan = ConversionPlan::new(spec, policy)?;
        if !plan.is_passthrough() && self.staging.capacity() < RESAMPLE_CAPACITY_MIN {
            return Err(ConfigError::BufferTooSmall(
                self.staging.capacity(),
                RESAMPLE_CAPACITY_MIN,
            ));
        }
        self.plan = Some(plan);
        self.policy = policy;
        self.reset();
        Ok(plan.strategy())
    }

    /// Changes one rate and reconfigures with the last used policy.
    ///
    /// Before the first configuration the other side is set to the same rate.
    ///
    /// # Errors
    ///
    /// Same as [`configure`](Self::configure).
    pub fn set_rate(
        &mut self,
        param: RateParam,
        rate: Freq<u32>,
    ) -> Result<ConversionStrategy, ConfigError> {
        self.config.check_rate(rate)?;
        let current = self.plan.map(|p| p.spec());
        let spec = match param {
            RateParam::Src => RateSpec::new(rate, current.map_or(rate, |s| s.dst())),
            RateParam::Dst => RateSpec::new(current.map_or(rate, |s| s.src()), rate),
        };
        self.configure(spec, self.policy)
    }

    /// The requested rate on one side, if configured.
    #[must_use]
    pub fn rate(&self, param: RateParam) -> Option<Freq<u32>> {
        self.plan.map(|p| match param {
            RateParam::Src => p.spec().src(),
            RateParam::Dst => p.spec().dst(),
        })
    }

    /// The requested rates, never the internally rounded ones.
    #[must_use]
    pub fn get_rates(&self) -> Option<RateSpec> {
        self.plan.map(|p| p.spec())
    }

    /// The active plan.
    #[must_use]
    pub const fn plan(&self) -> Option<&ConversionPlan> {
        self.plan.as_ref()
    }

    /// The configuration this converter was created with.
    #[must_use]
    pub const fn config(&self) -> &FeederConfig {
        &self.config
    }

    /// Read-only view of the staging buffer.
    #[must_use]
    pub const fn staging(&self) -> &StagingBuffer {
        &self.staging
    }

    /// The interpolation accumulator, in unscaled units.
    #[must_use]
    pub const fn alpha(&self) -> u32 {
        self.alpha
    }

    /// Restarts the stream without changing the plan.
    pub fn reset(&mut self) {
        self.staging.reset();
        self.alpha = 0;
        self.carry_len = 0;
    }

    /// Fills `out` with converted frames pulled from `source`.
    ///
    /// `out` is truncated to whole frames. Returns the number of bytes
    /// written, always whole frames, which is less than requested only when
    /// `source` reports end of stream. Bytes of an incomplete trailing frame
    /// are held back until the rest of the frame arrives.
    ///
    /// # Errors
    ///
    /// - [`FeedError::NotConfigured`] before a successful configuration.
    /// - [`FeedError::Source`] if `source` fails; the call is aborted.
    pub fn feed<S: ByteSource + ?Sized>(
        &mut self,
        out: &mut [u8],
        source: &mut S,
    ) -> Result<usize, FeedError> {
        let plan = self.plan.ok_or(FeedError::NotConfigured)?;
        let len = out.len() / FRAME_BYTES * FRAME_BYTES;
        if len == 0 {
            return Ok(0);
        }
        let out = &mut out[..len];

        let produced = if plan.is_passthrough() {
            self.passthrough(out, source)?
        } else {
            self.resample(&plan, out, source)? * SAMPLE_BYTES
        };
        if produced < len {
            tracing::trace!("Short read: {} of {} bytes", produced, len);
        }
        Ok(produced)
    }

    fn passthrough<S: ByteSource + ?Sized>(
        &mut self,
        out: &mut [u8],
        source: &mut S,
    ) -> Result<usize, FeedError> {
        let mut n = self.carry_len;
        out[..n].copy_from_slice(&self.carry[..n]);
        self.carry_len = 0;
        while n < out.len() {
            let fetched = source.fetch(&mut out[n..])?;
            if fetched == 0 {
                break;
            }
            n += fetched;
        }
        let whole = n / FRAME_BYTES * FRAME_BYTES;
        self.carry_len = n - whole;
        self.carry[..self.carry_len].copy_from_slice(&out[whole..n]);
        Ok(whole)
    }

    fn resample<S: ByteSource + ?Sized>(
        &mut self,
        plan: &ConversionPlan,
        out: &mut [u8],
        source: &mut S,
    ) -> Result<usize, FeedError> {
        let kernel = Kernel::new(plan);
        let (gx, gy) = (plan.ratio().gx(), plan.ratio().gy());
        let count = out.len() / SAMPLE_BYTES;
        let frames = (count / CHANNELS) as u64;
        let mut slot = (u64::from(gx) * frames)
            .saturating_sub(u64::from(self.alpha))
            .div_ceil(u64::from(gy)) as usize
            * CHANNELS;

        let staging = &mut self.staging;
        if staging.is_drained() {
            slot += CHANNELS;
        }
        if staging.read_pos() != CHANNELS
            && staging.frames_available() == 1
            && staging.write_pos() + slot > staging.capacity()
        {
            staging.compact();
        }

        let mut produced = 0;
        loop {
            while slot > 0 && !staging.is_full() {
                let window = staging.fetch_window(slot * SAMPLE_BYTES);
                let n = source.fetch(window)?;
                debug_assert!(n <= window.len());
                let fetched = staging.commit(n) * CHANNELS;
                debug_assert!(fetched <= slot);
                slot -= fetched;
                if n == 0 {
                    break;
                }
            }

            if staging.is_drained() {
                break;
            }

            let (src, pos) = staging.staged();
            produced += kernel.convert(
                src,
                pos,
                &mut self.alpha,
                &mut out[produced * SAMPLE_BYTES..],
            );
            staging.check_invariants();
            debug_assert!(u64::from(self.alpha) < u64::from(gx) + u64::from(gy));

            if staging.is_drained() {
                staging.recycle();
            }
            if produced == count {
                break;
            }
        }
        Ok(produced)
    }
}
