use std::cell::Cell;
use std::rc::Rc;

use crate::quiver_asserts::quiver_assert_simple;

/// A named index dimension with a fixed size and a mutable "currently selected" value.
///
/// An index is scratch state for addressing generic collections, not a variable of the
/// problem. Indices are shared by reference; two indices are the same dimension exactly when
/// their `Rc`s point to the same allocation.
#[derive(Debug)]
pub struct GenericIndex {
    name: String,
    size: usize,
    current: Cell<usize>,
}

impl GenericIndex {
    pub fn new(name: impl Into<String>, size: usize) -> Rc<Self> {
        quiver_assert_simple!(size > 0, "an index dimension cannot be empty");
        Rc::new(GenericIndex {
            name: name.into(),
            size,
            current: Cell::new(0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn current(&self) -> usize {
        self.current.get()
    }

    pub fn set_current(&self, value: usize) {
        quiver_assert_simple!(
            value < self.size,
            "index {} set beyond its size {}",
            self.name,
            self.size
        );
        self.current.set(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_by_allocation_not_name() {
        let i = GenericIndex::new("i", 3);
        let also_i = Rc::clone(&i);
        let other = GenericIndex::new("i", 3);

        assert!(Rc::ptr_eq(&i, &also_i));
        assert!(!Rc::ptr_eq(&i, &other));
    }

    #[test]
    #[should_panic]
    fn setting_beyond_the_size_is_fatal() {
        let i = GenericIndex::new("i", 3);
        i.set_current(3);
    }
}
