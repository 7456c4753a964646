fn is_zero<T>(x: T) -> bool
where
    T: From<u8> + PartialEq,
{
    x == T::from(0u8)
}

/// Greatest common divisor by the Euclidean remainder loop.
///
/// `gcd(0, 0)` is `0`.
pub fn gcd<T>(mut a: T, mut b: T) -> T
where
    T: Copy + From<u8> + PartialEq + core::ops::Rem<Output = T>,
{
    while !is_zero(b) {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}
