use crate::basic_types::PropagationFailure;
use crate::basic_types::PropagationResult;
use crate::domains::interval_set::IntervalSet;
use crate::domains::DiscreteValue;
use crate::domains::NumDomain;
use crate::quiver_asserts::quiver_assert_simple;

/// The domain of a discrete numeric variable (`i32` or `i64`): an inclusive bound interval with
/// a set of interior holes.
///
/// Invariants: `min <= max`, both bounds are always in the domain, and holes lie strictly
/// between them. Mutators only ever shrink the domain; a mutation that would empty it fails and
/// leaves the domain untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscreteDomain<T> {
    min: T,
    max: T,
    holes: IntervalSet<T>,
    delta: Vec<(T, T)>,
    changed: bool,
    version: u64,
}

impl<T: DiscreteValue> DiscreteDomain<T> {
    pub fn new(min: T, max: T) -> Self {
        quiver_assert_simple!(min <= max, "domain created with min above max");

        DiscreteDomain {
            min,
            max,
            holes: IntervalSet::new(),
            delta: Vec::new(),
            changed: false,
            version: 0,
        }
    }

    /// Create a domain holding exactly the given values.
    pub fn from_values(mut values: Vec<T>) -> Self {
        quiver_assert_simple!(!values.is_empty(), "domain created with no values");

        values.sort_unstable();
        values.dedup();

        let mut domain = DiscreteDomain::new(values[0], values[values.len() - 1]);
        for pair in values.windows(2) {
            if pair[1] > pair[0].next() {
                domain.holes.insert(pair[0].next(), pair[1].prev());
            }
        }
        domain
    }

    fn narrowed(&mut self, removed_low: T, removed_high: T) {
        self.delta.push((removed_low, removed_high));
        self.changed = true;
        self.version += 1;
    }

    pub(crate) fn force_version(&mut self, version: u64) {
        self.version = version;
    }

    /// The smallest in-domain value `>= value`, if any.
    fn first_at_or_above(&self, value: T) -> Option<T> {
        if value > self.max {
            return None;
        }
        let candidate = self.holes.next_clear_at_or_above(value.max(self.min));
        (candidate <= self.max).then_some(candidate)
    }

    /// The largest in-domain value `<= value`, if any.
    fn last_at_or_below(&self, value: T) -> Option<T> {
        if value < self.min {
            return None;
        }
        let candidate = self.holes.next_clear_at_or_below(value.min(self.max));
        (candidate >= self.min).then_some(candidate)
    }
}

impl<T: DiscreteValue> NumDomain<T> for DiscreteDomain<T> {
    fn min(&self) -> T {
        self.min
    }

    fn max(&self) -> T {
        self.max
    }

    fn size(&self) -> u64 {
        T::width(self.min, self.max) - self.holes.covered_count_between(self.min, self.max)
    }

    fn is_bound(&self) -> bool {
        self.min == self.max
    }

    fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max && !self.holes.contains(value)
    }

    fn next_higher(&self, value: T) -> T {
        if value >= self.max {
            return value;
        }
        self.first_at_or_above(value.next().max(self.min))
            .unwrap_or(value)
    }

    fn next_lower(&self, value: T) -> T {
        if value <= self.min {
            return value;
        }
        self.last_at_or_below(value.prev().min(self.max))
            .unwrap_or(value)
    }

    fn set_min(&mut self, value: T) -> PropagationResult {
        if value <= self.min {
            return Ok(());
        }
        let Some(new_min) = self.first_at_or_above(value) else {
            return Err(PropagationFailure::new());
        };

        let old_min = self.min;
        self.min = new_min;
        self.holes.trim_below(new_min);
        self.narrowed(old_min, new_min.prev());
        Ok(())
    }

    fn set_max(&mut self, value: T) -> PropagationResult {
        if value >= self.max {
            return Ok(());
        }
        let Some(new_max) = self.last_at_or_below(value) else {
            return Err(PropagationFailure::new());
        };

        let old_max = self.max;
        self.max = new_max;
        self.holes.trim_above(new_max);
        self.narrowed(new_max.next(), old_max);
        Ok(())
    }

    fn set_value(&mut self, value: T) -> PropagationResult {
        if !self.contains(value) {
            return Err(PropagationFailure::new());
        }
        if self.is_bound() {
            return Ok(());
        }

        if self.min < value {
            self.narrowed(self.min, value.prev());
        }
        if self.max > value {
            self.narrowed(value.next(), self.max);
        }
        self.min = value;
        self.max = value;
        self.holes.clear();
        Ok(())
    }

    fn set_range(&mut self, min: T, max: T) -> PropagationResult {
        // Both cuts are validated before either is applied, so a failing call cannot leave a
        // half-updated domain behind.
        let new_min = self.first_at_or_above(min.max(self.min));
        let new_max = self.last_at_or_below(max.min(self.max));
        match (new_min, new_max) {
            (Some(lo), Some(hi)) if lo <= hi => {
                self.set_min(lo)?;
                self.set_max(hi)
            }
            _ => Err(PropagationFailure::new()),
        }
    }

    fn remove_value(&mut self, value: T) -> PropagationResult {
        if !self.contains(value) {
            return Ok(());
        }
        if self.is_bound() {
            return Err(PropagationFailure::new());
        }

        if value == self.min {
            let new_min = self
                .first_at_or_above(value.next())
                .expect("an unbound domain has a value above its minimum");
            self.min = new_min;
            self.holes.trim_below(new_min);
            self.narrowed(value, new_min.prev());
        } else if value == self.max {
            let new_max = self
                .last_at_or_below(value.prev())
                .expect("an unbound domain has a value below its maximum");
            self.max = new_max;
            self.holes.trim_above(new_max);
            self.narrowed(new_max.next(), value);
        } else {
            self.holes.insert(value, value);
            self.narrowed(value, value);
        }
        Ok(())
    }

    fn remove_range(&mut self, min: T, max: T) -> PropagationResult {
        if min > max || max < self.min || min > self.max {
            return Ok(());
        }
        if min <= self.min && max >= self.max {
            return Err(PropagationFailure::new());
        }

        if min <= self.min {
            // Removal clips the lower end; `max < self.max` here, so a value survives.
            self.set_min(max.next())
        } else if max >= self.max {
            self.set_max(min.prev())
        } else {
            self.holes.insert(min, max);
            self.narrowed(min, max);
            Ok(())
        }
    }

    fn remove_all(&mut self, values: &[T]) -> PropagationResult {
        let mut sorted: Vec<T> = values.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        // Find a survivor up front: if none exists the whole operation must fail without
        // mutating anything.
        let mut survivor = self.min;
        let mut found = false;
        for &value in &sorted {
            if value < survivor {
                continue;
            }
            if value > survivor {
                found = true;
                break;
            }
            let next = self.next_higher(survivor);
            if next == survivor {
                break;
            }
            survivor = next;
        }
        if !found && !sorted.contains(&survivor) && self.contains(survivor) {
            found = true;
        }
        if !found {
            return Err(PropagationFailure::new());
        }

        for &value in &sorted {
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
    fn bound_mutations_only_shrink() {
        let mut domain = DiscreteDomain::new(0_i32, 10);

        domain.set_min(3).expect("non-empty");
        domain.set_min(1).expect("widening is a no-op");
        assert_eq!(3, domain.min());

        domain.set_max(8).expect("non-empty");
        domain.set_max(9).expect("widening is a no-op");
        assert_eq!(8, domain.max());
        assert_eq!(6, domain.size());
    }

    #[test]
    fn emptying_operation_fails_and_leaves_state() {
        let mut domain = DiscreteDomain::new(0_i32, 5);

        assert!(domain.set_min(6).is_err());
        assert_eq!(0, domain.min());
        assert_eq!(5, domain.max());
        assert!(!domain.changed());
    }

    #[test]
    fn bounds_skip_holes() {
        let mut domain = DiscreteDomain::new(0_i32, 10);
        domain.remove_value(4).expect("non-empty");
        domain.remove_value(5).expect("non-empty");

        domain.set_min(4).expect("non-empty");
        assert_eq!(6, domain.min());
    }

    #[test]
    fn removing_a_bound_value_moves_the_bound() {
        let mut domain = DiscreteDomain::new(0_i32, 5);
        domain.remove_value(1).expect("non-empty");
        domain.remove_value(0).expect("non-empty");

        assert_eq!(2, domain.min());
        assert_eq!(4, domain.size());
    }

    #[test]
    fn neighbor_queries_return_argument_when_exhausted() {
        let mut domain = DiscreteDomain::new(0_i32, 5);
        domain.remove_value(3).expect("non-empty");

        assert_eq!(4, domain.next_higher(2));
        assert_eq!(2, domain.next_lower(4));
        assert_eq!(5, domain.next_higher(5));
        assert_eq!(0, domain.next_lower(0));
    }

    #[test]
    fn delta_records_removed_ranges_until_cleared() {
        let mut domain = DiscreteDomain::new(0_i32, 10);
        domain.set_min(2).expect("non-empty");
        domain.remove_value(7).expect("non-empty");

        assert_eq!(&[(0, 1), (7, 7)], domain.delta());
        assert!(domain.changed());

        domain.clear_delta();
        assert!(domain.delta().is_empty());
        assert!(!domain.changed());
    }

    #[test]
    fn set_value_outside_domain_fails() {
        let mut domain = DiscreteDomain::new(0_i32, 10);
        domain.remove_value(4).expect("non-empty");

        assert!(domain.set_value(4).is_err());
        assert!(domain.set_value(11).is_err());
        assert_eq!(0, domain.min());
        assert_eq!(10, domain.max());

        domain.set_value(6).expect("in domain");
        assert!(domain.is_bound());
        assert_eq!(1, domain.size());
    }

    #[test]
    fn remove_all_with_no_survivor_fails_atomically() {
        let mut domain = DiscreteDomain::from_values(vec![1_i32, 3, 5]);

        assert!(domain.remove_all(&[1, 3, 5]).is_err());
        assert_eq!(3, domain.size());

        domain.remove_all(&[1, 5]).expect("survivor remains");
        assert!(domain.is_bound());
        assert_eq!(3, domain.min());
    }

    #[test]
    fn from_values_builds_sparse_domain() {
        let domain = DiscreteDomain::from_values(vec![5_i64, 1, 9, 5]);

        assert_eq!(1, domain.min());
        assert_eq!(9, domain.max());
        assert_eq!(3, domain.size());
        assert!(domain.contains(5));
        assert!(!domain.contains(4));
    }

    #[test]
    fn interior_range_removal_punches_a_hole() {
        let mut domain = DiscreteDomain::new(0_i32, 10);
        domain.remove_range(3, 6).expect("non-empty");

        assert_eq!(7, domain.size());
        assert!(!domain.contains(4));
        assert!(domain.remove_range(0, 10).is_err());
        assert_eq!(7, domain.size());
    }
}
