use std::cell::OnceCell;
use std::rc::Rc;

use crate::domains::NumValue;
use crate::basic_types::RelOp;
use crate::expr::NumConstraint;
use crate::expr::NumExpr;
use crate::expr::NumOp;
use crate::expr::Operand;
use crate::expr::UnaryOp;
use crate::generics::for_each_combination;
use crate::generics::GenericIndex;
use crate::generics::IndexLayout;
use crate::generics::NameGenerator;

/// What a generic expression is made of.
#[derive(Debug)]
enum GenericSource<T: NumValue> {
    /// One concrete expression per flat offset (typically an array of variables).
    Elements(Vec<NumExpr<T>>),
    /// A derived expression over the union of its operands' index sets.
    Binary {
        op: NumOp,
        left: Operand<T>,
        right: Operand<T>,
    },
    Unary {
        op: UnaryOp,
        operand: Rc<GenericNumExpr<T>>,
    },
}

/// An indexed family of numeric expressions over one or more index dimensions.
///
/// Derived families record their operands only; the concrete scalar expression for an offset
/// is built on first access and cached per offset.
#[derive(Debug)]
pub struct GenericNumExpr<T: NumValue> {
    name: String,
    layout: IndexLayout,
    source: GenericSource<T>,
    cache: Vec<OnceCell<NumExpr<T>>>,
}

/// The result of projecting a [`GenericNumExpr`] onto a subset of its indices.
#[derive(Debug)]
pub enum ExprFragment<T: NumValue> {
    Scalar(NumExpr<T>),
    Generic(Rc<GenericNumExpr<T>>),
}

impl<T: NumValue> GenericNumExpr<T> {
    /// A family backed directly by one expression per offset, in row-major order.
    pub fn from_elements(
        name: impl Into<String>,
        indices: Vec<Rc<GenericIndex>>,
        elements: Vec<NumExpr<T>>,
    ) -> Rc<Self> {
        let layout = IndexLayout::new(indices, elements.len());
        let cache = (0..elements.len()).map(|_| OnceCell::new()).collect();
        Rc::new(GenericNumExpr {
            name: name.into(),
            layout,
            source: GenericSource::Elements(elements),
            cache,
        })
    }

    fn derived(name: String, indices: Vec<Rc<GenericIndex>>, source: GenericSource<T>) -> Rc<Self> {
        let layout = IndexLayout::over(indices);
        let cache = (0..layout.element_count()).map(|_| OnceCell::new()).collect();
        Rc::new(GenericNumExpr {
            name,
            layout,
            source,
            cache,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &IndexLayout {
        &self.layout
    }

    /// The concrete expression addressed by the indices' current values, built on first access.
    pub fn expr_for_current(&self) -> NumExpr<T> {
        let offset = self.layout.offset_for_current();
        self.cache[offset]
            .get_or_init(|| match &self.source {
                GenericSource::Elements(elements) => elements[offset].clone(),
                GenericSource::Binary { op, left, right } => NumExpr::Binary {
                    op: *op,
                    left: left.resolve_for_current(),
                    right: right.resolve_for_current(),
                },
                GenericSource::Unary { op, operand } => NumExpr::Unary {
                    op: *op,
                    operand: Rc::new(operand.expr_for_current()),
                },
            })
            .clone()
    }

    fn binary(self: &Rc<Self>, op: NumOp, right: impl Into<Operand<T>>) -> Rc<GenericNumExpr<T>> {
        let right = right.into();
        let mut indices = self.layout.indices().to_vec();
        right.collect_indices(&mut indices);
        GenericNumExpr::derived(
            format!("({} {op:?})", self.name),
            indices,
            GenericSource::Binary {
                op,
                left: Operand::GenericExpr(Rc::clone(self)),
                right,
            },
        )
    }

    pub fn add(self: &Rc<Self>, right: impl Into<Operand<T>>) -> Rc<GenericNumExpr<T>> {
        self.binary(NumOp::Add, right)
    }

    pub fn sub(self: &Rc<Self>, right: impl Into<Operand<T>>) -> Rc<GenericNumExpr<T>> {
        self.binary(NumOp::Sub, right)
    }

    pub fn mul(self: &Rc<Self>, right: impl Into<Operand<T>>) -> Rc<GenericNumExpr<T>> {
        self.binary(NumOp::Mul, right)
    }

    pub fn div(self: &Rc<Self>, right: impl Into<Operand<T>>) -> Rc<GenericNumExpr<T>> {
        self.binary(NumOp::Div, right)
    }

    pub fn abs(self: &Rc<Self>) -> Rc<GenericNumExpr<T>> {
        self.unary(UnaryOp::Abs)
    }

    pub fn square(self: &Rc<Self>) -> Rc<GenericNumExpr<T>> {
        self.unary(UnaryOp::Square)
    }

    pub fn pow(self: &Rc<Self>, exp: u32) -> Rc<GenericNumExpr<T>> {
        self.unary(UnaryOp::Pow(exp))
    }

    fn unary(self: &Rc<Self>, op: UnaryOp) -> Rc<GenericNumExpr<T>> {
        GenericNumExpr::derived(
            format!("({op:?} {})", self.name),
            self.layout.indices().to_vec(),
            GenericSource::Unary {
                op,
                operand: Rc::clone(self),
            },
        )
    }

    /// The sum of every element of the family, as a scalar expression.
    pub fn sum(self: &Rc<Self>) -> NumExpr<T> {
        let mut terms = Vec::with_capacity(self.layout.element_count());
        for_each_combination(self.layout.indices(), || terms.push(self.expr_for_current()));
        NumExpr::Summation { terms }
    }

    fn relate(self: &Rc<Self>, op: RelOp, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        NumConstraint::Relation {
            left: Operand::GenericExpr(Rc::clone(self)),
            op,
            right: right.into(),
        }
    }

    pub fn eq(self: &Rc<Self>, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Eq, right)
    }

    pub fn neq(self: &Rc<Self>, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Neq, right)
    }

    pub fn lt(self: &Rc<Self>, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Lt, right)
    }

    pub fn leq(self: &Rc<Self>, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Leq, right)
    }

    pub fn gt(self: &Rc<Self>, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Gt, right)
    }

    pub fn geq(self: &Rc<Self>, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Geq, right)
    }

    /// Project onto the indices left after eliminating `eliminated` at their current values.
    /// Same contract as [`crate::generics::GenericConstant::fragment`].
    pub fn fragment(
        self: &Rc<Self>,
        eliminated: &[Rc<GenericIndex>],
        names: &NameGenerator,
    ) -> ExprFragment<T> {
        let remaining = self.layout.remaining_after(eliminated);
        if remaining.is_empty() {
            return ExprFragment::Scalar(self.expr_for_current());
        }
        if remaining.len() == self.layout.indices().len() {
            return ExprFragment::Generic(Rc::clone(self));
        }

        let mut elements = Vec::new();
        for_each_combination(&remaining, || elements.push(self.expr_for_current()));
        ExprFragment::Generic(GenericNumExpr::from_elements(
            names.next_name(&self.name),
            remaining,
            elements,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::VarRef;
    use crate::engine::NodeId;

    fn vars(n: u32) -> Vec<NumExpr<i32>> {
        (0..n).map(|k| NumExpr::Var(VarRef::new(NodeId(k)))).collect()
    }

    #[test]
    fn derived_family_resolves_lazily_per_offset() {
        let i = GenericIndex::new("i", 3);
        let xs = GenericNumExpr::from_elements("x", vec![Rc::clone(&i)], vars(3));
        let shifted = xs.add(5);

        i.set_current(1);
        match shifted.expr_for_current() {
            NumExpr::Binary {
                op: NumOp::Add,
                left: Operand::Expr(left),
                right: Operand::Const(5),
            } => match *left {
                NumExpr::Var(var) => assert_eq!(NodeId(1), var.node()),
                ref other => panic!("expected a variable, got {other:?}"),
            },
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn fragment_over_all_indices_matches_direct_lookup() {
        let i = GenericIndex::new("i", 3);
        let xs = GenericNumExpr::from_elements("x", vec![Rc::clone(&i)], vars(3));
        let names = NameGenerator::new();

        i.set_current(2);
        match xs.fragment(&[Rc::clone(&i)], &names) {
            ExprFragment::Scalar(NumExpr::Var(var)) => assert_eq!(NodeId(2), var.node()),
            other => panic!("expected the scalar element, got {other:?}"),
        }
    }

    #[test]
    fn fragment_over_no_indices_is_the_same_object() {
        let i = GenericIndex::new("i", 3);
        let xs = GenericNumExpr::from_elements("x", vec![i], vars(3));
        let names = NameGenerator::new();

        match xs.fragment(&[], &names) {
            ExprFragment::Generic(same) => assert!(Rc::ptr_eq(&same, &xs)),
            ExprFragment::Scalar(_) => panic!("expected the original family"),
        }
    }

    #[test]
    fn partial_fragment_slices_the_family() {
        let i = GenericIndex::new("i", 2);
        let j = GenericIndex::new("j", 2);
        let xs = GenericNumExpr::from_elements(
            "x",
            vec![Rc::clone(&i), Rc::clone(&j)],
            vars(4),
        );
        let names = NameGenerator::new();

        i.set_current(1);
        match xs.fragment(&[Rc::clone(&i)], &names) {
            ExprFragment::Generic(slice) => {
                assert_eq!(2, slice.layout().element_count());
                j.set_current(0);
                match slice.expr_for_current() {
                    NumExpr::Var(var) => assert_eq!(NodeId(2), var.node()),
                    other => panic!("expected a variable, got {other:?}"),
                }
            }
            ExprFragment::Scalar(_) => panic!("expected a smaller family"),
        }
    }

    #[test]
    fn sum_collects_every_element() {
        let i = GenericIndex::new("i", 3);
        let xs = GenericNumExpr::from_elements("x", vec![i], vars(3));

        match xs.sum() {
            NumExpr::Summation { terms } => assert_eq!(3, terms.len()),
            other => panic!("expected a summation, got {other:?}"),
        }
    }
}
