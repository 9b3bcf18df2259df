use std::rc::Rc;

use itertools::Itertools;

use crate::generics::GenericIndex;
use crate::quiver_asserts::quiver_assert_simple;

/// Row-major strides over a list of index dimensions: `offsets[N-1] = 1`,
/// `offsets[k] = offsets[k+1] * size(k+1)`.
///
/// A layout maps the indices' current values to a flat offset and back. Construction validates
/// the element count against the dimension product; a mismatch is a malformed collection and
/// panics.
#[derive(Clone, Debug)]
pub struct IndexLayout {
    indices: Vec<Rc<GenericIndex>>,
    offsets: Vec<usize>,
    element_count: usize,
}

impl IndexLayout {
    pub fn new(indices: Vec<Rc<GenericIndex>>, element_count: usize) -> Self {
        let layout = IndexLayout::over(indices);
        assert_eq!(
            layout.element_count, element_count,
            "element count does not match the index dimension product"
        );
        layout
    }

    /// A layout whose element count is the dimension product itself.
    pub fn over(indices: Vec<Rc<GenericIndex>>) -> Self {
        quiver_assert_simple!(!indices.is_empty(), "a layout needs at least one dimension");
        let mut offsets = vec![1; indices.len()];
        for k in (0..indices.len() - 1).rev() {
            offsets[k] = offsets[k + 1] * indices[k + 1].size();
        }
        let element_count = offsets[0] * indices[0].size();
        IndexLayout {
            indices,
            offsets,
            element_count,
        }
    }

    pub fn indices(&self) -> &[Rc<GenericIndex>] {
        &self.indices
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    pub fn contains(&self, index: &Rc<GenericIndex>) -> bool {
        self.indices.iter().any(|own| Rc::ptr_eq(own, index))
    }

    /// The flat offset addressed by the indices' current values. Pure: the indices are only
    /// read.
    pub fn offset_for_current(&self) -> usize {
        self.indices
            .iter()
            .zip(&self.offsets)
            .map(|(index, stride)| index.current() * stride)
            .sum()
    }

    /// The inverse of [`IndexLayout::offset_for_current`]: position every index at the given
    /// flat offset.
    pub fn set_indices_to_offset(&self, mut offset: usize) {
        quiver_assert_simple!(offset < self.element_count, "offset beyond the collection");
        for (index, stride) in self.indices.iter().zip(&self.offsets) {
            index.set_current(offset / stride);
            offset %= stride;
        }
    }

    /// The dimensions of this layout not listed in `eliminated`.
    pub fn remaining_after(&self, eliminated: &[Rc<GenericIndex>]) -> Vec<Rc<GenericIndex>> {
        self.indices
            .iter()
            .filter(|own| !eliminated.iter().any(|gone| Rc::ptr_eq(own, gone)))
            .cloned()
            .collect()
    }

    /// The dimensions of two operands merged, each appearing once. The left operand's order
    /// wins.
    pub fn union(left: &[Rc<GenericIndex>], right: &[Rc<GenericIndex>]) -> Vec<Rc<GenericIndex>> {
        let mut merged = left.to_vec();
        for index in right {
            if !merged.iter().any(|own| Rc::ptr_eq(own, index)) {
                merged.push(Rc::clone(index));
            }
        }
        merged
    }
}

/// Visit every combination of current values for the given indices, in row-major order. The
/// indices are left positioned at the last combination.
pub fn for_each_combination(indices: &[Rc<GenericIndex>], mut visit: impl FnMut()) {
    if indices.is_empty() {
        visit();
        return;
    }
    for combination in indices
        .iter()
        .map(|index| 0..index.size())
        .multi_cartesian_product()
    {
        for (index, value) in indices.iter().zip(combination) {
            index.set_current(value);
        }
        visit();
    }
}
