//! Scalar helpers shared by the geometry code.

use num_traits::Float;

/// Sign of `value` with the conventions of JavaScript's `Math.sign`.
///
/// Unlike [`f32::signum`], zero maps to zero (keeping its sign bit) and NaN
/// stays NaN, so a degenerate tangent frame yields a zero or NaN handedness
/// instead of a silent `+1`.
///
/// # Examples
/// ```
/// use lumen_core::math_utils::sign;
/// assert_eq!(sign(3.5f32), 1.0);
/// assert_eq!(sign(-0.25f32), -1.0);
/// assert_eq!(sign(0.0f32), 0.0);
/// assert!(sign(f32::NAN).is_nan());
/// ```
#[inline]
pub fn sign<T: Float>(value: T) -> T {
    if value > T::zero() {
        T::one()
    } else if value < T::zero() {
        -T::one()
    } else {
        value
    }
}

/// Size of the next mip level along one axis: halved, floored, at least 1.
///
/// # Examples
/// ```
/// use lumen_core::math_utils::next_mip_dimension;
/// assert_eq!(next_mip_dimension(256), 128);
/// assert_eq!(next_mip_dimension(5), 2);
/// assert_eq!(next_mip_dimension(1), 1);
/// ```
#[inline]
pub fn next_mip_dimension(dimension: u32) -> u32 {
    (dimension >> 1).max(1)
}

/// Number of zero bytes that pad `length` up to a multiple of four.
///
/// This is `3 - (length + 3) % 4`, the row padding rule of the KTX format.
#[inline]
pub fn padding_to_4(length: usize) -> usize {
    3 - (length + 3) % 4
}
