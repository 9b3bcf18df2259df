use crate::basic_types::PropagationFailure;
use crate::basic_types::PropagationResult;
use crate::domains::ContinuousValue;
use crate::domains::NumDomain;
use crate::quiver_asserts::quiver_assert_simple;

/// The domain of a continuous numeric variable (`f32` or `f64`): a closed interval with a
/// precision below which two values are considered equal.
///
/// Continuous domains cannot represent interior holes; removals only ever act on the interval
/// endpoints. All comparisons go through the precision-aware comparator.
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousDomain<T> {
    min: T,
    max: T,
    precision: T,
    delta: Vec<(T, T)>,
    changed: bool,
    version: u64,
}

impl<T: ContinuousValue> ContinuousDomain<T> {
    pub fn new(min: T, max: T) -> Self {
        quiver_assert_simple!(min <= max, "domain created with min above max");

        ContinuousDomain {
            min,
            max,
            precision: T::default_precision(),
            delta: Vec::new(),
            changed: false,
            version: 0,
        }
    }

    pub fn precision(&self) -> T {
        self.precision
    }

    pub fn set_precision(&mut self, precision: T) {
        quiver_assert_simple!(precision > T::zero(), "precision must be positive");
        self.precision = precision;
    }

    fn narrowed(&mut self, removed_low: T, removed_high: T) {
        self.delta.push((removed_low, removed_high));
        self.changed = true;
        self.version += 1;
    }

    pub(crate) fn force_version(&mut self, version: u64) {
        self.version = version;
    }
}

impl<T: ContinuousValue> NumDomain<T> for ContinuousDomain<T> {
    fn min(&self) -> T {
        self.min
    }

    fn max(&self) -> T {
        self.max
    }

    fn size(&self) -> u64 {
        if self.is_bound() {
            1
        } else {
            u64::MAX
        }
    }

    fn is_bound(&self) -> bool {
        self.min.eq_within(self.max, self.precision)
    }

    fn contains(&self, value: T) -> bool {
        !value.lt_beyond(self.min, self.precision) && !self.max.lt_beyond(value, self.precision)
    }

    fn next_higher(&self, value: T) -> T {
        // A continuum has no next value; the argument is returned unchanged.
        value
    }

    fn next_lower(&self, value: T) -> T {
        value
    }

    fn set_min(&mut self, value: T) -> PropagationResult {
        if self.max.lt_beyond(value, self.precision) {
            return Err(PropagationFailure::new());
        }
        if !self.min.lt_beyond(value, self.precision) {
            return Ok(());
        }

        let old_min = self.min;
        // A new bound within precision of the maximum closes the interval exactly.
        self.min = if value.eq_within(self.max, self.precision) {
            self.max
        } else {
            value
        };
        self.narrowed(old_min, self.min);
        Ok(())
    }

    fn set_max(&mut self, value: T) -> PropagationResult {
        if value.lt_beyond(self.min, self.precision) {
            return Err(PropagationFailure::new());
        }
        if !value.lt_beyond(self.max, self.precision) {
            return Ok(());
        }

        let old_max = self.max;
        self.max = if value.eq_within(self.min, self.precision) {
            self.min
        } else {
            value
        };
        self.narrowed(self.max, old_max);
        Ok(())
    }

    fn set_value(&mut self, value: T) -> PropagationResult {
        if !self.contains(value) {
            return Err(PropagationFailure::new());
        }
        self.set_min(value)?;
        self.set_max(value)
    }

    fn set_range(&mut self, min: T, max: T) -> PropagationResult {
        if self.max.lt_beyond(min, self.precision) || max.lt_beyond(self.min, self.precision) {
            return Err(PropagationFailure::new());
        }
        self.set_min(min)?;
        self.set_max(max)
    }

    fn remove_value(&mut self, value: T) -> PropagationResult {
        // Removing a single point from a continuum is only observable when the domain has
        // already collapsed onto that point.
        if self.is_bound() && self.min.eq_within(value, self.precision) {
            return Err(PropagationFailure::new());
        }
        Ok(())
    }

    fn remove_range(&mut self, min: T, max: T) -> PropagationResult {
        if max.lt_beyond(min, self.precision) {
            return Ok(());
        }
        let covers_min = !self.min.lt_beyond(min, self.precision);
        let covers_max = !max.lt_beyond(self.max, self.precision);
        match (covers_min, covers_max) {
            (true, true) => Err(PropagationFailure::new()),
            (true, false) => self.set_min(max),
            (false, true) => self.set_max(min),
            // An interior open gap is not representable in an interval domain.
            (false, false) => Ok(()),
        }
    }

    fn remove_all(&mut self, values: &[T]) -> PropagationResult {
        for &value in values {
            self.remove_value(value)?;
        }
        Ok(())
    }

    fn changed(&self) -> bool {
        self.changed
    }

    fn delta(&self) -> &[(T, T)] {
        &self.delta
    }

    fn clear_delta(&mut self) {
        self.delta.clear();
        self.changed = false;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrowing_within_precision_is_a_no_op() {
        let mut domain = ContinuousDomain::new(0.0_f64, 10.0);

        domain.set_min(1.0e-12).expect("non-empty");
        assert!(!domain.changed());
        assert_eq!(0.0, domain.min());

        domain.set_min(2.5).expect("non-empty");
        assert!(domain.changed());
        assert_eq!(2.5, domain.min());
    }

    #[test]
    fn bound_crossing_beyond_precision_fails() {
        let mut domain = ContinuousDomain::new(0.0_f64, 1.0);

        assert!(domain.set_min(1.5).is_err());
        assert_eq!(0.0, domain.min());

        domain.set_min(1.0 + 1.0e-12).expect("within precision of max");
        assert!(domain.is_bound());
    }

    #[test]
    fn size_is_one_only_when_reduced_to_a_point() {
        let mut domain = ContinuousDomain::new(0.0_f32, 5.0);
        assert_eq!(u64::MAX, domain.size());

        domain.set_value(3.25).expect("in domain");
        assert_eq!(1, domain.size());
    }

    #[test]
    fn remove_range_acts_on_endpoints_only() {
        let mut domain = ContinuousDomain::new(0.0_f64, 10.0);

        domain.remove_range(4.0, 6.0).expect("interior gap ignored");
        assert_eq!(0.0, domain.min());
        assert_eq!(10.0, domain.max());

        domain.remove_range(-1.0, 2.0).expect("clips the lower end");
        assert_eq!(2.0, domain.min());

        assert!(domain.remove_range(0.0, 11.0).is_err());
    }

    #[test]
    fn custom_precision_widens_equality() {
        let mut domain = ContinuousDomain::new(0.0_f64, 1.0);
        domain.set_precision(0.1);

        domain.set_min(0.95).expect("within precision of max");
        assert!(domain.is_bound());
    }
}
