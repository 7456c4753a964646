/// \[Hz\]
pub struct Hz;

/// \[kHz\]
#[allow(non_camel_case_types)]
pub struct kHz;

/// Sample rate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Freq<T: Copy> {
    pub(crate) freq: T,
}

impl<T: Copy> core::fmt::Debug for Freq<T>
where
    T: core::fmt::Display,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} Hz", self.freq)
    }
}

impl<T: Copy> Freq<T> {
    #[inline]
    /// Returns the rate in Hz.
    pub const fn hz(&self) -> T {
        self.freq
    }
}

impl core::ops::Mul<Hz> for u32 {
    type Output = Freq<u32>;

    fn mul(self, _rhs: Hz) -> Self::Output {
        Self::Output { freq: self }
    }
}

impl core::ops::Mul<kHz> for u32 {
    type Output = Freq<u32>;

    fn mul(self, _rhs: kHz) -> Self::Output {
        Self::Output { freq: self * 1000 }
    }
}
