use getset::CopyGetters;

use crate::utils::int::gcd;

/// Source to destination step ratio in lowest terms.
///
/// Advancing `gx` units on the input side corresponds to advancing `gy` units
/// on the output side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, CopyGetters)]
pub struct Ratio {
    /// Input-side step.
    #[getset(get_copy = "pub")]
    gx: u32,
    /// Output-side step.
    #[getset(get_copy = "pub")]
    gy: u32,
}

impl Ratio {
    /// The 1:1 ratio.
    pub const UNITY: Self = Self { gx: 1, gy: 1 };

    /// Returns `true` if no resampling is needed.
    #[must_use]
    pub const fn is_unity(&self) -> bool {
        self.gx == self.gy
    }

    /// Returns `true` if either term is zero.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.gx == 0 || self.gy == 0
    }
}

/// Reduces `x:y` by their greatest common divisor.
///
/// A zero `y` yields a degenerate ratio instead of panicking.
#[must_use]
pub fn reduce_ratio(x: u32, y: u32) -> Ratio {
    let g = gcd(x, y);
    if g == 0 {
        return Ratio { gx: 0, gy: 0 };
    }
    Ratio {
        gx: x / g,
        gy: y / g,
    }
}
