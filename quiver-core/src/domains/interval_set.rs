use std::collections::BTreeMap;

use crate::domains::DiscreteValue;

/// A set of disjoint inclusive integer intervals, used to store the holes of a
/// [`DiscreteDomain`](crate::domains::DiscreteDomain) without enumerating individual values.
///
/// Intervals are keyed by their start and never touch: `[1, 3]` and `[4, 6]` are merged into
/// `[1, 6]` on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct IntervalSet<T> {
    ranges: BTreeMap<T, T>,
}

impl<T: DiscreteValue> IntervalSet<T> {
    pub(crate) fn new() -> Self {
        IntervalSet {
            ranges: BTreeMap::new(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.ranges.clear();
    }

    pub(crate) fn contains(&self, value: T) -> bool {
        self.ranges
            .range(..=value)
            .next_back()
            .is_some_and(|(_, &end)| value <= end)
    }

    /// Insert the inclusive interval `[start, end]`, merging with overlapping or adjacent
    /// intervals.
    pub(crate) fn insert(&mut self, start: T, end: T) {
        debug_assert!(start <= end);

        let mut new_start = start;
        let mut new_end = end;

        // An existing interval that starts at or before `start` may swallow or touch it.
        if let Some((&s, &e)) = self.ranges.range(..=start).next_back() {
            if e.next() >= start {
                new_start = s;
                new_end = new_end.max(e);
                let _ = self.ranges.remove(&s);
            }
        }

        // Absorb all intervals that begin within (or adjacent to) the new interval.
        let absorbed: Vec<T> = self
            .ranges
            .range(new_start..)
            .take_while(|(&s, _)| end == T::max_value() || s <= end.next())
            .map(|(&s, _)| s)
            .collect();
        for s in absorbed {
            let e = self.ranges.remove(&s).unwrap();
            new_end = new_end.max(e);
        }

        let _ = self.ranges.insert(new_start, new_end);
    }

    /// The smallest value `>= value` that is not covered by any interval.
    pub(crate) fn next_clear_at_or_above(&self, value: T) -> T {
        let mut candidate = value;
        while let Some((_, &end)) = self
            .ranges
            .range(..=candidate)
            .next_back()
            .filter(|(_, &end)| candidate <= end)
        {
            candidate = end.next();
        }
        candidate
    }

    /// The largest value `<= value` that is not covered by any interval.
    pub(crate) fn next_clear_at_or_below(&self, value: T) -> T {
        let mut candidate = value;
        while let Some((&start, _)) = self
            .ranges
            .range(..=candidate)
            .next_back()
            .filter(|(_, &end)| candidate <= end)
        {
            candidate = start.prev();
        }
        candidate
    }

    /// Drop all coverage strictly below `bound`.
    pub(crate) fn trim_below(&mut self, bound: T) {
        let affected: Vec<(T, T)> = self
            .ranges
            .range(..bound)
            .map(|(&s, &e)| (s, e))
            .collect();
        for (s, e) in affected {
            let _ = self.ranges.remove(&s);
            if e >= bound {
                let _ = self.ranges.insert(bound, e);
            }
        }
    }

    /// Drop all coverage strictly above `bound`.
    pub(crate) fn trim_above(&mut self, bound: T) {
        let affected: Vec<(T, T)> = self
            .ranges
            .range(..=bound)
            .filter(|(_, &e)| e > bound)
            .map(|(&s, &e)| (s, e))
            .collect();
        for (s, _) in affected {
            let _ = self.ranges.remove(&s);
            let _ = self.ranges.insert(s, bound);
        }
        let beyond: Vec<T> = self
            .ranges
            .range(..)
            .filter(|(&s, _)| s > bound)
            .map(|(&s, _)| s)
            .collect();
        for s in beyond {
            let _ = self.ranges.remove(&s);
        }
    }

    /// The number of covered values within the inclusive window `[low, high]`.
    pub(crate) fn covered_count_between(&self, low: T, high: T) -> u64 {
        self.ranges
            .iter()
            .filter(|(&s, &e)| e >= low && s <= high)
            .map(|(&s, &e)| T::width(s.max(low), e.min(high)))
            .sum()
    }
}
