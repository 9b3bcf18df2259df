use std::fmt::Debug;
use std::rc::Rc;

use crate::generics::for_each_combination;
use crate::generics::GenericIndex;
use crate::generics::IndexLayout;
use crate::generics::NameGenerator;

/// An indexed, dense, row-major collection of constants over one or more index dimensions.
#[derive(Debug)]
pub struct GenericConstant<T> {
    name: String,
    layout: IndexLayout,
    values: Vec<T>,
}

/// The result of projecting a [`GenericConstant`] onto a subset of its indices.
#[derive(Debug)]
pub enum ConstantFragment<T> {
    /// Every index was eliminated; the fragment is the element at the current combination.
    Scalar(T),
    /// Some (or no) indices remain.
    Generic(Rc<GenericConstant<T>>),
}

impl<T: Copy + Debug> GenericConstant<T> {
    pub fn new(
        name: impl Into<String>,
        indices: Vec<Rc<GenericIndex>>,
        values: Vec<T>,
    ) -> Rc<Self> {
        let layout = IndexLayout::new(indices, values.len());
        Rc::new(GenericConstant {
            name: name.into(),
            layout,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &IndexLayout {
        &self.layout
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn value_for_current(&self) -> T {
        self.values[self.layout.offset_for_current()]
    }

    /// Project onto the indices left after eliminating `eliminated` at their current values.
    ///
    /// Eliminating nothing returns this collection itself (by identity); eliminating every
    /// index returns the single addressed element; anything in between builds a smaller
    /// collection with a fresh unique name.
    pub fn fragment(
        self: &Rc<Self>,
        eliminated: &[Rc<GenericIndex>],
        names: &NameGenerator,
    ) -> ConstantFragment<T> {
        let remaining = self.layout.remaining_after(eliminated);
        if remaining.is_empty() {
            return ConstantFragment::Scalar(self.value_for_current());
        }
        if remaining.len() == self.layout.indices().len() {
            return ConstantFragment::Generic(Rc::clone(self));
        }

        let mut values = Vec::new();
        for_each_combination(&remaining, || {
            values.push(self.values[self.layout.offset_for_current()]);
        });
        ConstantFragment::Generic(GenericConstant::new(
            names.next_name(&self.name),
            remaining,
            values,
        ))
    }
}

impl GenericConstant<bool> {
    pub fn any_true(&self) -> bool {
        self.values.iter().any(|&value| value)
    }

    pub fn all_true(&self) -> bool {
        self.values.iter().all(|&value| value)
    }

    pub fn any_false(&self) -> bool {
        self.values.iter().any(|&value| !value)
    }

    pub fn all_false(&self) -> bool {
        self.values.iter().all(|&value| !value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> (Rc<GenericIndex>, Rc<GenericIndex>, Rc<GenericConstant<i32>>) {
        let i = GenericIndex::new("i", 2);
        let j = GenericIndex::new("j", 3);
        let constant = GenericConstant::new(
            "c",
            vec![Rc::clone(&i), Rc::clone(&j)],
            vec![10, 11, 12, 20, 21, 22],
        );
        (i, j, constant)
    }

    #[test]
    fn lookup_follows_the_current_indices() {
        let (i, j, constant) = table();
        i.set_current(1);
        j.set_current(2);
        assert_eq!(22, constant.value_for_current());
    }

    #[test]
    fn eliminating_every_index_yields_the_addressed_element() {
        let (i, j, constant) = table();
        let names = NameGenerator::new();
        i.set_current(0);
        j.set_current(1);

        match constant.fragment(&[Rc::clone(&i), Rc::clone(&j)], &names) {
            ConstantFragment::Scalar(value) => assert_eq!(11, value),
            ConstantFragment::Generic(_) => panic!("expected a scalar fragment"),
        }
    }

    #[test]
    fn eliminating_nothing_returns_the_same_allocation() {
        let (_, _, constant) = table();
        let names = NameGenerator::new();

        match constant.fragment(&[], &names) {
            ConstantFragment::Generic(same) => assert!(Rc::ptr_eq(&same, &constant)),
            ConstantFragment::Scalar(_) => panic!("expected a generic fragment"),
        }
    }

    #[test]
    fn partial_elimination_slices_at_the_current_value() {
        let (i, j, constant) = table();
        let names = NameGenerator::new();
        i.set_current(1);

        match constant.fragment(&[Rc::clone(&i)], &names) {
            ConstantFragment::Generic(slice) => {
                assert_eq!(&[20, 21, 22], slice.values());
                assert_eq!(1, slice.layout().indices().len());
                assert!(Rc::ptr_eq(&slice.layout().indices()[0], &j));
            }
            ConstantFragment::Scalar(_) => panic!("expected a generic fragment"),
        }
    }

    #[test]
    #[should_panic(expected = "element count")]
    fn wrong_value_count_is_fatal() {
        let i = GenericIndex::new("i", 2);
        let _ = GenericConstant::new("c", vec![i], vec![1, 2, 3]);
    }

    #[test]
    fn boolean_aggregates() {
        let i = GenericIndex::new("i", 3);
        let flags = GenericConstant::new("f", vec![i], vec![true, false, true]);

        assert!(flags.any_true());
        assert!(flags.any_false());
        assert!(!flags.all_true());
        assert!(!flags.all_false());
    }
}
