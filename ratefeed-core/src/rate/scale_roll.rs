use getset::CopyGetters;

use super::Ratio;

/// Upper bound of the gain window in percent.
pub const GAIN_MAX: u64 = 100;

/// Exclusive lower bounds of the gain window, tried in order.
const GAIN_FLOORS: [u64; 2] = [96, 93];

/// The widest shift usable by the 32-bit kernel.
pub const MAX_SHIFT_32: u32 = 16;

/// The widest shift usable by the 64-bit kernel.
pub const MAX_SHIFT_64: u32 = 32;

/// Fixed-point multiplier and right shift substituting for a division by `gy`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, CopyGetters)]
pub struct ScaleRoll {
    /// Multiplier applied to the ratio terms.
    #[getset(get_copy = "pub")]
    scale: u32,
    /// Right shift applied to the weighted sum.
    #[getset(get_copy = "pub")]
    roll: u32,
}

impl ScaleRoll {
    /// Gain of this pair for `den` in percent: `(scale * den * 100) >> roll`.
    #[must_use]
    pub const fn gain(&self, den: u32) -> u64 {
        (self.scale as u64 * den as u64 * GAIN_MAX) >> self.roll
    }

    /// Returns `true` if the scaled ratio terms fit the 32-bit kernel's accumulator.
    #[must_use]
    pub fn fits_i32(&self, ratio: Ratio) -> bool {
        (u64::from(ratio.gx()) + u64::from(ratio.gy())) * u64::from(self.scale) <= i32::MAX as u64
    }
}

/// Searches a `(scale, roll)` pair whose gain for `den` lies in the gain window.
///
/// Shifts `0..max_shift` are scanned for the narrow window first, then for
/// the wide one. Returns `None` if no shift works.
#[must_use]
pub fn find_scale_roll(den: u32, max_shift: u32) -> Option<ScaleRoll> {
    if den == 0 {
        return None;
    }
    GAIN_FLOORS.iter().find_map(|&floor| {
        (0..max_shift.min(63)).find_map(|roll| {
            let scale = (1u64 << roll) / den as u64;
            let k = (scale * den as u64 * GAIN_MAX) >> roll;
            (k > floor && k <= GAIN_MAX).then_some(ScaleRoll {
                scale: scale as u32,
                roll,
            })
        })
    })
}
