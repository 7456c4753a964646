use ratefeed_core::{
    common::{CHANNELS, SAMPLE_BYTES},
    plan::{ConversionPlan, ConversionStrategy},
    rate::ScaleRoll,
};

/// A conversion kernel bound to a ratio.
///
/// Every kernel walks the staged samples from `pos`, interpolating between
/// the frame at `pos - 2` and the frame at `pos`, and stops when the output
/// is full or `pos` reaches the end of the staged samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kernel {
    Exact64 { gx: u32, gy: u32 },
    Scaled64 { gx: u32, gy: u32, sr: ScaleRoll },
    Scaled32 { gx: u32, gy: u32, sr: ScaleRoll },
    PlainCopy { gx: u32, gy: u32 },
}

impl Kernel {
    pub(crate) fn new(plan: &ConversionPlan) -> Self {
        let (gx, gy) = (plan.ratio().gx(), plan.ratio().gy());
        match (plan.strategy(), plan.scale_roll()) {
            (ConversionStrategy::Scaled64, Some(sr)) => Self::Scaled64 { gx, gy, sr },
            (ConversionStrategy::Scaled32, Some(sr)) => Self::Scaled32 { gx, gy, sr },
            (ConversionStrategy::PlainCopy, _) => Self::PlainCopy { gx, gy },
            _ => Self::Exact64 { gx, gy },
        }
    }

    /// Converts staged samples in `src` starting at `*pos` into `out`.
    ///
    /// Returns the number of samples written. `pos` and `alpha` are advanced
    /// in place; `alpha` is always stored unscaled.
    pub(crate) fn convert(
        &self,
        src: &[i16],
        pos: &mut usize,
        alpha: &mut u32,
        out: &mut [u8],
    ) -> usize {
        let max = out.len() / SAMPLE_BYTES / CHANNELS * CHANNELS;
        if max == 0 || *pos >= src.len() {
            return 0;
        }
        debug_assert!(*pos >= CHANNELS && *pos % CHANNELS == 0);
        match *self {
            Self::Exact64 { gx, gy } => exact64(gx, gy, src, pos, alpha, out, max),
            Self::Scaled64 { gx, gy, sr } => scaled64(gx, gy, sr, src, pos, alpha, out, max),
            Self::Scaled32 { gx, gy, sr } => scaled32(gx, gy, sr, src, pos, alpha, out, max),
            Self::PlainCopy { gx, gy } => plain_copy(gx, gy, src, pos, alpha, out, max),
        }
    }
}

#[inline(always)]
fn put(out: &mut [u8], idx: usize, v: i16) {
    out[idx * SAMPLE_BYTES..(idx + 1) * SAMPLE_BYTES].copy_from_slice(&v.to_ne_bytes());
}

#[allow(clippy::too_many_arguments)]
fn exact64(
    gx: u32,
    gy: u32,
    src: &[i16],
    pos: &mut usize,
    alpha: &mut u32,
    out: &mut [u8],
    max: usize,
) -> usize {
    let (gx, gy) = (i64::from(gx), i64::from(gy));
    let bpos = src.len();
    let mut a = i64::from(*alpha);
    let mut p = *pos;
    let mut ret = 0;
    loop {
        if a < gx {
            a += gy;
            p += CHANNELS;
            if p == bpos {
                break;
            }
        } else {
            a -= gx;
            let d = gy - a;
            let l = (a * i64::from(src[p - 2]) + d * i64::from(src[p])) / gy;
            let r = (a * i64::from(src[p - 1]) + d * i64::from(src[p + 1])) / gy;
            put(out, ret, l as i16);
            put(out, ret + 1, r as i16);
            ret += CHANNELS;
            if ret == max {
                break;
            }
        }
    }
    *pos = p;
    *alpha = a as u32;
    ret
}

// Weights are measured against `1 << roll` so they always sum to the shift unit.
macro_rules! scaled_kernel {
    ($name:ident, $t:ty) => {
        #[allow(clippy::too_many_arguments)]
        fn $name(
            gx: u32,
            gy: u32,
            sr: ScaleRoll,
            src: &[i16],
            pos: &mut usize,
            alpha: &mut u32,
            out: &mut [u8],
            max: usize,
        ) -> usize {
            let scale = sr.scale() as $t;
            let roll = sr.roll();
            let unit: $t = 1 << roll;
            let (gx, gy) = (gx as $t * scale, gy as $t * scale);
            let bpos = src.len();
            let mut a = *alpha as $t * scale;
            let mut p = *pos;
            let mut ret = 0;
            loop {
                if a < gx {
                    a += gy;
                    p += CHANNELS;
                    if p == bpos {
                        break;
                    }
                } else {
                    a -= gx;
                    let d = unit - a;
                    let l = (a * src[p - 2] as $t + d * src[p] as $t) >> roll;
                    let r = (a * src[p - 1] as $t + d * src[p + 1] as $t) >> roll;
                    put(out, ret, l as i16);
                    put(out, ret + 1, r as i16);
                    ret += CHANNELS;
                    if ret == max {
                        break;
                    }
                }
            }
            *pos = p;
            *alpha = (a / scale) as u32;
            ret
        }
    };
}

scaled_kernel!(scaled64, i64);
scaled_kernel!(scaled32, i32);

#[allow(clippy::too_many_arguments)]
fn plain_copy(
    gx: u32,
    gy: u32,
    src: &[i16],
    pos: &mut usize,
    alpha: &mut u32,
    out: &mut [u8],
    max: usize,
) -> usize {
    let bpos = src.len();
    let mut a = *alpha;
    let mut p = *pos;
    let mut ret = 0;
    loop {
        if a < gx {
            a += gy;
            p += CHANNELS;
            if p == bpos {
                break;
            }
        } else {
            a -= gx;
            put(out, ret, src[p]);
            put(out, ret + 1, src[p + 1]);
            ret += CHANNELS;
            if ret == max {
                break;
            }
        }
    }
    *pos = p;
    *alpha = a;
    ret
}
