use getset::CopyGetters;

use super::{find_scale_roll, reduce_ratio, Ratio, ScaleRoll};

/// Largest rounding modulus of the first search pass.
pub const ROUND_HZ: u32 = 25;

/// Which side of the conversion a rounding step adjusted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Adjust {
    /// Only the source rate was rounded down.
    Src,
    /// Both rates were rounded down.
    Both,
    /// Only the destination rate was rounded down.
    Dst,
}

impl Adjust {
    const ORDER: [Self; 3] = [Self::Src, Self::Both, Self::Dst];

    const fn apply(self, src: u32, dst: u32, modulus: u32) -> (u32, u32) {
        match self {
            Self::Src => (src - src % modulus, dst),
            Self::Both => (src - src % modulus, dst - dst % modulus),
            Self::Dst => (src, dst - dst % modulus),
        }
    }
}

/// How the coefficient search arrived at its result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOutcome {
    /// A rounding step produced a ratio with a scale/roll pair.
    Adjusted {
        /// The rounding modulus.
        modulus: u32,
        /// The side that was rounded.
        adjust: Adjust,
    },
    /// Every rounding step failed; the raw ratio was used.
    RawFallback,
}

/// Result of [`find_best_coefficients`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Coefficients {
    /// Effective source rate.
    src: u32,
    /// Effective destination rate.
    dst: u32,
    /// Reduced ratio of the effective rates.
    ratio: Ratio,
    /// Scale/roll pair for `ratio.gy()`, if any.
    scale_roll: Option<ScaleRoll>,
    /// Whether the search loop or the raw fallback produced the result.
    outcome: SearchOutcome,
}

impl Coefficients {
    /// Returns `true` if the result came from a rounding step.
    #[must_use]
    pub const fn is_adjusted(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Adjusted { .. })
    }
}

/// Rounds `src` and/or `dst` down to small round numbers until the reduced
/// ratio admits a scale/roll pair within `max_shift` bits.
///
/// Moduli `1..=ROUND_HZ` are tried first, then `ROUND_HZ + 1..=2 * ROUND_HZ`.
/// For each modulus the source side is rounded first, then both sides, then
/// the destination side. Rates are never rounded up. A modulus that rounds a
/// rate to zero is skipped.
#[tracing::instrument(level = "trace")]
pub fn find_best_coefficients(src: u32, dst: u32, max_shift: u32) -> Coefficients {
    let passes = [1..ROUND_HZ + 1, ROUND_HZ + 1..2 * ROUND_HZ + 1];
    for modulus in passes.into_iter().flatten() {
        for adjust in Adjust::ORDER {
            let (s, d) = adjust.apply(src, dst, modulus);
            if s == 0 || d == 0 {
                break;
            }
            let ratio = reduce_ratio(s, d);
            if let Some(sr) = find_scale_roll(ratio.gy(), max_shift) {
                tracing::trace!(
                    "Coefficients found: {}:{} -> {}:{} (modulus {}, {:?})",
                    src,
                    dst,
                    s,
                    d,
                    modulus,
                    adjust
                );
                return Coefficients {
                    src: s,
                    dst: d,
                    ratio,
                    scale_roll: Some(sr),
                    outcome: SearchOutcome::Adjusted { modulus, adjust },
                };
            }
        }
    }

    let ratio = reduce_ratio(src, dst);
    let scale_roll = find_scale_roll(ratio.gy(), max_shift);
    tracing::debug!(
        "No rounded coefficients for {}:{}, using raw ratio {}:{} ({:?})",
        src,
        dst,
        ratio.gx(),
        ratio.gy(),
        scale_roll
    );
    Coefficients {
        src,
        dst,
        ratio,
        scale_roll,
        outcome: SearchOutcome::RawFallback,
    }
}
