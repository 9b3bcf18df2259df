use std::fmt::Debug;
use std::fmt::Display;

use crate::basic_types::PropagationResult;
use crate::domains::ContinuousDomain;
use crate::domains::DiscreteDomain;
use crate::domains::Domain;
use crate::math::precision::PrecisionCompare;
use crate::math::rounding::RoundDir;

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// The closed set of numeric kinds the engine supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumKind {
    Int,
    Long,
    Float,
    Double,
}

/// A numeric kind the engine can build domains, expressions and arcs over. Implemented exactly
/// for `i32`, `i64`, `f32` and `f64`; the trait is sealed so that every shape combination in
/// constraint synthesis can be matched exhaustively.
pub trait NumValue: Copy + PartialOrd + Debug + Display + sealed::Sealed + 'static {
    const KIND: NumKind;

    /// The concrete domain representation for this kind.
    type Dom: NumDomain<Self> + Clone + Debug;

    fn zero() -> Self;
    fn one() -> Self;
    fn min_value() -> Self;
    fn max_value() -> Self;

    /// Saturating for the discrete kinds; bound arithmetic must not wrap.
    fn add(self, other: Self) -> Self;
    fn sub(self, other: Self) -> Self;
    fn mul(self, other: Self) -> Self;
    fn neg(self) -> Self;
    fn abs_val(self) -> Self;

    /// `self / divisor`, rounded in the given direction when the quotient is not exact.
    /// Continuous kinds divide exactly and ignore the direction.
    fn divide(self, divisor: Self, dir: RoundDir) -> Self;

    /// Whether `self / divisor` leaves no remainder. Always true for continuous kinds.
    fn divides_exactly(self, divisor: Self) -> bool;

    /// The largest representable value strictly below `self`. Continuous kinds return `self`,
    /// since strictness finer than the precision is not representable.
    fn strictly_below(self) -> Self;
    fn strictly_above(self) -> Self;

    fn pow_exp(self, exp: u32) -> Self;

    /// The `exp`-th root of a non-negative value, rounded in the given direction for discrete
    /// kinds.
    fn root(self, exp: u32, dir: RoundDir) -> Self;

    fn domain(min: Self, max: Self) -> Self::Dom;

    /// Project the kind-specific domain out of a [`Domain`]. A kind mismatch is a malformed
    /// graph and panics.
    fn project(domain: &Domain) -> &Self::Dom;
    fn project_mut(domain: &mut Domain) -> &mut Self::Dom;
    fn wrap(dom: Self::Dom) -> Domain;
}

/// A discrete numeric kind: countable, with exact neighbors.
pub trait DiscreteValue: NumValue + Ord + std::hash::Hash {
    /// The previous representable value, saturating at the type minimum.
    fn prev(self) -> Self;
    /// The next representable value, saturating at the type maximum.
    fn next(self) -> Self;
    /// The number of values in the inclusive interval `[min, max]`.
    fn width(min: Self, max: Self) -> u64;
}

/// A continuous numeric kind: interval-only domains with precision-aware comparison.
pub trait ContinuousValue: NumValue {
    fn default_precision() -> Self;
    fn eq_within(self, other: Self, precision: Self) -> bool;
    fn lt_beyond(self, other: Self, precision: Self) -> bool;
}

/// The operation surface shared by every numeric domain, regardless of kind.
///
/// Every mutator either shrinks the domain, leaves it unchanged, or fails; none of them ever
/// widens it. A failing mutator leaves the domain in its pre-operation state.
pub trait NumDomain<T> {
    fn min(&self) -> T;
    fn max(&self) -> T;

    /// The number of values left in the domain. A continuous domain that is not reduced to a
    /// single point reports `u64::MAX`.
    fn size(&self) -> u64;
    fn is_bound(&self) -> bool;
    fn contains(&self, value: T) -> bool;

    /// The next value in the domain strictly above `value`, or `value` itself when no such
    /// neighbor exists.
    fn next_higher(&self, value: T) -> T;
    /// The next value in the domain strictly below `value`, or `value` itself when no such
    /// neighbor exists.
    fn next_lower(&self, value: T) -> T;

    fn set_min(&mut self, value: T) -> PropagationResult;
    fn set_max(&mut self, value: T) -> PropagationResult;
    fn set_value(&mut self, value: T) -> PropagationResult;
    fn set_range(&mut self, min: T, max: T) -> PropagationResult;
    fn remove_value(&mut self, value: T) -> PropagationResult;
    fn remove_range(&mut self, min: T, max: T) -> PropagationResult;
    fn remove_all(&mut self, values: &[T]) -> PropagationResult;

    /// Whether the domain has been narrowed since the last [`NumDomain::clear_delta`].
    fn changed(&self) -> bool;
    /// The inclusive value ranges removed since the last [`NumDomain::clear_delta`]. Ranges may
    /// cover values that had already been removed previously.
    fn delta(&self) -> &[(T, T)];
    fn clear_delta(&mut self);

    /// A counter bumped on every successful narrowing; the propagation loop compares it around
    /// an arc invocation to detect which nodes the arc touched.
    fn version(&self) -> u64;
}

macro_rules! impl_discrete_value {
    ($ty:ty, $kind:expr, $variant:ident, $variant_name:literal) => {
        impl NumValue for $ty {
            const KIND: NumKind = $kind;

            type Dom = DiscreteDomain<$ty>;

            fn zero() -> Self {
                0
            }

            fn one() -> Self {
                1
            }

            fn min_value() -> Self {
                <$ty>::MIN
            }

            fn max_value() -> Self {
                <$ty>::MAX
            }

            fn add(self, other: Self) -> Self {
                self.saturating_add(other)
            }

            fn sub(self, other: Self) -> Self {
                self.saturating_sub(other)
            }

            fn mul(self, other: Self) -> Self {
                self.saturating_mul(other)
            }

            fn neg(self) -> Self {
                self.checked_neg().unwrap_or(<$ty>::MAX)
            }

            fn abs_val(self) -> Self {
                self.saturating_abs()
            }

            fn divide(self, divisor: Self, dir: RoundDir) -> Self {
                use crate::math::num_ext::NumExt;
                match dir {
                    RoundDir::Up => self.div_ceil(divisor),
                    RoundDir::Down => self.div_floor(divisor),
                }
            }

            fn divides_exactly(self, divisor: Self) -> bool {
                divisor != 0 && self % divisor == 0
            }

            fn strictly_below(self) -> Self {
                self.saturating_sub(1)
            }

            fn strictly_above(self) -> Self {
                self.saturating_add(1)
            }

            fn pow_exp(self, exp: u32) -> Self {
                self.saturating_pow(exp)
            }

            fn root(self, exp: u32, dir: RoundDir) -> Self {
                debug_assert!(self >= 0 && exp > 0);
                if exp == 1 {
                    return self;
                }
                let mut candidate =
                    (self as f64).powf(1.0 / f64::from(exp)).round() as $ty;
                // Float approximation may be off by one in either direction.
                while candidate > 0 && candidate.pow_exp(exp) > self {
                    candidate -= 1;
                }
                while (candidate + 1).pow_exp(exp) <= self {
                    candidate += 1;
                }
                match dir {
                    RoundDir::Down => candidate,
                    RoundDir::Up => {
                        if candidate.pow_exp(exp) == self {
                            candidate
                        } else {
                            candidate + 1
                        }
                    }
                }
            }

            fn domain(min: Self, max: Self) -> Self::Dom {
                DiscreteDomain::new(min, max)
            }

            fn project(domain: &Domain) -> &Self::Dom {
                match domain {
                    Domain::$variant(dom) => dom,
                    other => panic!(
                        "expected {} domain, found {:?}",
                        $variant_name,
                        other.kind()
                    ),
                }
            }

            fn project_mut(domain: &mut Domain) -> &mut Self::Dom {
                match domain {
                    Domain::$variant(dom) => dom,
                    other => panic!(
                        "expected {} domain, found {:?}",
                        $variant_name,
                        other.kind()
                    ),
                }
            }

            fn wrap(dom: Self::Dom) -> Domain {
                Domain::$variant(dom)
            }
        }

        impl DiscreteValue for $ty {
            fn prev(self) -> Self {
                self.saturating_sub(1)
            }

            fn next(self) -> Self {
                self.saturating_add(1)
            }

            fn width(min: Self, max: Self) -> u64 {
                debug_assert!(min <= max);
                ((max as i128) - (min as i128) + 1) as u64
            }
        }
    };
}

macro_rules! impl_continuous_value {
    ($ty:ty, $kind:expr, $variant:ident, $variant_name:literal) => {
        impl NumValue for $ty {
            const KIND: NumKind = $kind;

            type Dom = ContinuousDomain<$ty>;

            fn zero() -> Self {
                0.0
            }

            fn one() -> Self {
                1.0
            }

            fn min_value() -> Self {
                <$ty>::MIN
            }

            fn max_value() -> Self {
                <$ty>::MAX
            }

            fn add(self, other: Self) -> Self {
                self + other
            }

            fn sub(self, other: Self) -> Self {
                self - other
            }

            fn mul(self, other: Self) -> Self {
                self * other
            }

            fn neg(self) -> Self {
                -self
            }

            fn abs_val(self) -> Self {
                self.abs()
            }

            fn divide(self, divisor: Self, _dir: RoundDir) -> Self {
                self / divisor
            }

            fn divides_exactly(self, _divisor: Self) -> bool {
                true
            }

            fn strictly_below(self) -> Self {
                self
            }

            fn strictly_above(self) -> Self {
                self
            }

            fn pow_exp(self, exp: u32) -> Self {
                self.powi(exp as i32)
            }

            fn root(self, exp: u32, _dir: RoundDir) -> Self {
                debug_assert!(self >= 0.0 && exp > 0);
                self.powf(1.0 / (exp as $ty))
            }

            fn domain(min: Self, max: Self) -> Self::Dom {
                ContinuousDomain::new(min, max)
            }

            fn project(domain: &Domain) -> &Self::Dom {
                match domain {
                    Domain::$variant(dom) => dom,
                    other => panic!(
                        "expected {} domain, found {:?}",
                        $variant_name,
                        other.kind()
                    ),
                }
            }

            fn project_mut(domain: &mut Domain) -> &mut Self::Dom {
                match domain {
                    Domain::$variant(dom) => dom,
                    other => panic!(
                        "expected {} domain, found {:?}",
                        $variant_name,
                        other.kind()
                    ),
                }
            }

            fn wrap(dom: Self::Dom) -> Domain {
                Domain::$variant(dom)
            }
        }

        impl ContinuousValue for $ty {
            fn default_precision() -> Self {
                <$ty as PrecisionCompare>::DEFAULT_PRECISION
            }

            fn eq_within(self, other: Self, precision: Self) -> bool {
                PrecisionCompare::eq_within(self, other, precision)
            }

            fn lt_beyond(self, other: Self, precision: Self) -> bool {
                PrecisionCompare::lt_beyond(self, other, precision)
            }
        }
    };
}

impl_discrete_value!(i32, NumKind::Int, Int, "int");
impl_discrete_value!(i64, NumKind::Long, Long, "long");
impl_continuous_value!(f32, NumKind::Float, Float, "float");
impl_continuous_value!(f64, NumKind::Double, Double, "double");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_bound_arithmetic_saturates() {
        assert_eq!(i32::MAX, i32::MAX.add(1));
        assert_eq!(i64::MIN, i64::MIN.sub(1));
        assert_eq!(i32::MAX, i32::MIN.neg());
    }

    #[test]
    fn integer_root_rounds_in_both_directions() {
        assert_eq!(3, 10_i32.root(2, RoundDir::Down));
        assert_eq!(4, 10_i32.root(2, RoundDir::Up));
        assert_eq!(3, 9_i32.root(2, RoundDir::Up));
        assert_eq!(2, 8_i64.root(3, RoundDir::Down));
    }

    #[test]
    #[should_panic(expected = "expected int domain")]
    fn kind_confused_projection_is_fatal() {
        let domain = Domain::Long(DiscreteDomain::new(0_i64, 1));
        let _ = <i32 as NumValue>::project(&domain);
    }
}
