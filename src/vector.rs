/// Vector type used for positions, velocities and accelerations.
pub type Vector2 = glam::DVec2;

/// Direction helpers that stay total on degenerate input.
///
/// The normalization of a zero-length vector is the zero vector instead of `NaN`, so any
/// product involving the resulting direction stays finite.
///
/// ```
/// # use jostle::prelude::*;
/// assert_eq!(Vector2::new(0.0, -4.0).unit(), Vector2::NEG_Y);
/// assert_eq!(Vector2::ZERO.unit(), Vector2::ZERO);
/// ```
pub trait Unit: Sized {
    /// Returns the vector scaled to a length of one, or zero if it has no direction.
    fn unit(self) -> Self;

    /// Returns the unit vector perpendicular to this one, rotated counter-clockwise.
    fn normal(self) -> Self;
}

macro_rules! impl_unit {
    ($v: ty) => {
        impl Unit for $v {
            #[inline]
            fn unit(self) -> Self {
                self.normalize_or_zero()
            }

            #[inline]
            fn normal(self) -> Self {
                self.perp().unit()
            }
        }
    };
}

impl_unit!(glam::DVec2);
