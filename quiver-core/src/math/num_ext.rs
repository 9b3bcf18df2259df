//! Extensions for numbers that are not present in the stable standard library.

pub(crate) trait NumExt {
    /// Division with rounding up.
    fn div_ceil(self, other: Self) -> Self;

    /// Division with rounding down.
    ///
    /// Note this is different from truncating, which is rounding toward zero.
    fn div_floor(self, other: Self) -> Self;
}

macro_rules! impl_num_ext {
    ($ty:ty) => {
        impl NumExt for $ty {
            fn div_ceil(self, other: Self) -> Self {
                let d = self / other;
                let r = self % other;
                if (r > 0 && other > 0) || (r < 0 && other < 0) {
                    d + 1
                } else {
                    d
                }
            }

            fn div_floor(self, other: Self) -> Self {
                let d = self / other;
                let r = self % other;
                if (r > 0 && other < 0) || (r < 0 && other > 0) {
                    d - 1
                } else {
                    d
                }
            }
        }
    };
}

impl_num_ext!(i32);
impl_num_ext!(i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_ceil_rounds_away_from_negative_infinity() {
        assert_eq!(3, 5_i32.div_ceil(2));
        assert_eq!(-2, (-5_i32).div_ceil(2));
        assert_eq!(-2, 5_i32.div_ceil(-2));
        assert_eq!(3, (-5_i32).div_ceil(-2));
        assert_eq!(2, 4_i32.div_ceil(2));
    }

    #[test]
    fn div_floor_rounds_toward_negative_infinity() {
        assert_eq!(2, 5_i32.div_floor(2));
        assert_eq!(-3, (-5_i32).div_floor(2));
        assert_eq!(-3, 5_i32.div_floor(-2));
        assert_eq!(2, (-5_i32).div_floor(-2));
        assert_eq!(2, 4_i64.div_floor(2));
    }
}
