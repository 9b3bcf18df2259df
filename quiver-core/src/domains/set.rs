use std::collections::BTreeSet;

use crate::basic_types::PropagationFailure;
use crate::basic_types::PropagationResult;
use crate::quiver_asserts::quiver_assert_simple;

/// The domain of a set variable: the values still *possible* and the values already *required*
/// to be in the set.
///
/// Invariant: `required ⊆ possible`. The remaining choice is `1 + |possible| − |required|`;
/// the domain is bound once every possible value is required.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDomain {
    possible: BTreeSet<i32>,
    required: BTreeSet<i32>,
    removed_possible: Vec<i32>,
    added_required: Vec<i32>,
    changed: bool,
    version: u64,
}

impl SetDomain {
    pub fn new(values: impl IntoIterator<Item = i32>) -> Self {
        SetDomain {
            possible: values.into_iter().collect(),
            required: BTreeSet::new(),
            removed_possible: Vec::new(),
            added_required: Vec::new(),
            changed: false,
            version: 0,
        }
    }

    pub fn possible(&self) -> &BTreeSet<i32> {
        &self.possible
    }

    pub fn required(&self) -> &BTreeSet<i32> {
        &self.required
    }

    pub fn is_possible(&self, value: i32) -> bool {
        self.possible.contains(&value)
    }

    pub fn is_required(&self, value: i32) -> bool {
        self.required.contains(&value)
    }

    pub fn is_bound(&self) -> bool {
        self.possible.len() == self.required.len()
    }

    pub fn size(&self) -> u64 {
        quiver_assert_simple!(self.required.is_subset(&self.possible));
        1 + (self.possible.len() - self.required.len()) as u64
    }

    /// Commit `value` to be in the set.
    pub fn require(&mut self, value: i32) -> PropagationResult {
        if self.required.contains(&value) {
            return Ok(());
        }
        if !self.possible.contains(&value) {
            return Err(PropagationFailure::new());
        }

        let _ = self.required.insert(value);
        self.added_required.push(value);
        self.changed = true;
        self.version += 1;
        Ok(())
    }

    /// Rule `value` out of the set.
    pub fn exclude(&mut self, value: i32) -> PropagationResult {
        if !self.possible.contains(&value) {
            return Ok(());
        }
        if self.required.contains(&value) {
            return Err(PropagationFailure::new());
        }

        let _ = self.possible.remove(&value);
        self.removed_possible.push(value);
        self.changed = true;
        self.version += 1;
        Ok(())
    }

    pub fn require_all(&mut self, values: impl IntoIterator<Item = i32>) -> PropagationResult {
        values.into_iter().try_for_each(|value| self.require(value))
    }

    pub fn exclude_all(&mut self, values: impl IntoIterator<Item = i32>) -> PropagationResult {
        values.into_iter().try_for_each(|value| self.exclude(value))
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Values removed from the possible set since the last [`SetDomain::clear_delta`].
    pub fn removed_possible(&self) -> &[i32] {
        &self.removed_possible
    }

    /// Values newly committed since the last [`SetDomain::clear_delta`].
    pub fn added_required(&self) -> &[i32] {
        &self.added_required
    }

    pub fn clear_delta(&mut self) {
        self.removed_possible.clear();
        self.added_required.clear();
        self.changed = false;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn force_version(&mut self, version: u64) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_counts_remaining_choice() {
        let mut domain = SetDomain::new(1..=4);
        assert_eq!(5, domain.size());

        domain.require(1).expect("possible");
        assert_eq!(4, domain.size());

        domain.exclude(4).expect("not required");
        assert_eq!(3, domain.size());

        domain.require(2).expect("possible");
        domain.require(3).expect("possible");
        assert!(domain.is_bound());
        assert_eq!(1, domain.size());
    }

    #[test]
    fn required_stays_subset_of_possible() {
        let mut domain = SetDomain::new([1, 2, 3]);
        domain.require(2).expect("possible");

        assert!(domain.exclude(2).is_err());
        assert!(domain.is_possible(2));

        domain.exclude(3).expect("not required");
        assert!(domain.require(3).is_err());
    }

    #[test]
    fn deltas_track_both_directions() {
        let mut domain = SetDomain::new([1, 2, 3]);
        domain.require(1).expect("possible");
        domain.exclude(3).expect("not required");

        assert_eq!(&[1], domain.added_required());
        assert_eq!(&[3], domain.removed_possible());

        domain.clear_delta();
        assert!(!domain.changed());
        assert!(domain.added_required().is_empty());
    }
}
