//! Precision-aware comparison for the continuous domain kinds.
//!
//! Two continuous values closer together than the precision are treated as equal. The tolerance
//! scales with the magnitude of the operands so that large intervals do not become impossible to
//! close; for values around 1 and below it behaves as an absolute tolerance.

pub(crate) trait PrecisionCompare: Copy + PartialOrd {
    const DEFAULT_PRECISION: Self;

    /// `true` if the two values are equal up to the given precision.
    fn eq_within(self, other: Self, precision: Self) -> bool;

    /// `true` if `self` is smaller than `other` by more than the given precision.
    fn lt_beyond(self, other: Self, precision: Self) -> bool;
}

macro_rules! impl_precision_compare {
    ($ty:ty, $default:expr) => {
        impl PrecisionCompare for $ty {
            const DEFAULT_PRECISION: $ty = $default;

            fn eq_within(self, other: Self, precision: Self) -> bool {
                let scale = self.abs().max(other.abs()).max(1.0);
                (self - other).abs() <= precision * scale
            }

            fn lt_beyond(self, other: Self, precision: Self) -> bool {
                self < other && !self.eq_within(other, precision)
            }
        }
    };
}

impl_precision_compare!(f32, 1.0e-4);
impl_precision_compare!(f64, 1.0e-9);
