use std::rc::Rc;

use crate::expr::BoolVarRef;
use crate::generics::for_each_combination;
use crate::generics::GenericIndex;
use crate::generics::IndexLayout;

/// A lazily composed boolean expression.
#[derive(Clone, Debug)]
pub enum BoolExpr {
    Var(BoolVarRef),
    Const(bool),
    And(Vec<BoolExpr>),
    Or(Vec<BoolExpr>),
    Not(Box<BoolExpr>),
}

impl BoolExpr {
    pub fn and(self, other: BoolExpr) -> BoolExpr {
        BoolExpr::And(vec![self, other])
    }

    pub fn or(self, other: BoolExpr) -> BoolExpr {
        BoolExpr::Or(vec![self, other])
    }

    #[allow(clippy::should_implement_trait, reason = "mirrors the other operator methods")]
    pub fn not(self) -> BoolExpr {
        BoolExpr::Not(Box::new(self))
    }

    pub fn eq_const(self, value: bool) -> BoolConstraint {
        BoolConstraint {
            left: BoolSubject::Scalar(self),
            right: BoolRhs::Const(value),
        }
    }

    pub fn eq(self, other: BoolExpr) -> BoolConstraint {
        BoolConstraint {
            left: BoolSubject::Scalar(self),
            right: BoolRhs::Expr(other),
        }
    }
}

impl BoolVarRef {
    /// Lift the variable into the expression layer.
    pub fn expr(self) -> BoolExpr {
        BoolExpr::Var(self)
    }
}

/// An indexed family of boolean expressions, one per flat offset.
#[derive(Debug)]
pub struct GenericBoolExpr {
    name: String,
    layout: IndexLayout,
    elements: Vec<BoolExpr>,
}

impl GenericBoolExpr {
    pub fn from_elements(
        name: impl Into<String>,
        indices: Vec<Rc<GenericIndex>>,
        elements: Vec<BoolExpr>,
    ) -> Rc<Self> {
        let layout = IndexLayout::new(indices, elements.len());
        Rc::new(GenericBoolExpr {
            name: name.into(),
            layout,
            elements,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &IndexLayout {
        &self.layout
    }

    pub fn expr_for_current(&self) -> BoolExpr {
        self.elements[self.layout.offset_for_current()].clone()
    }

    fn zip_with(
        self: &Rc<Self>,
        other: Option<&Rc<GenericBoolExpr>>,
        scalar: Option<&BoolExpr>,
        combine: fn(BoolExpr, BoolExpr) -> BoolExpr,
        tag: &str,
    ) -> Rc<GenericBoolExpr> {
        let indices = match other {
            Some(other) => IndexLayout::union(self.layout.indices(), other.layout.indices()),
            None => self.layout.indices().to_vec(),
        };
        let mut elements = Vec::new();
        for_each_combination(&indices, || {
            let right = match (other, scalar) {
                (Some(other), _) => other.expr_for_current(),
                (None, Some(scalar)) => scalar.clone(),
                (None, None) => unreachable!(),
            };
            elements.push(combine(self.expr_for_current(), right));
        });
        GenericBoolExpr::from_elements(format!("({} {tag})", self.name), indices, elements)
    }

    /// Combine every element with a scalar expression: `AND(x_i, y)` for each offset.
    pub fn and_scalar(self: &Rc<Self>, other: BoolExpr) -> Rc<GenericBoolExpr> {
        self.zip_with(None, Some(&other), BoolExpr::and, "and")
    }

    pub fn or_scalar(self: &Rc<Self>, other: BoolExpr) -> Rc<GenericBoolExpr> {
        self.zip_with(None, Some(&other), BoolExpr::or, "or")
    }

    /// Elementwise conjunction over the union of both families' index sets.
    pub fn and(self: &Rc<Self>, other: &Rc<GenericBoolExpr>) -> Rc<GenericBoolExpr> {
        self.zip_with(Some(other), None, BoolExpr::and, "and")
    }

    pub fn or(self: &Rc<Self>, other: &Rc<GenericBoolExpr>) -> Rc<GenericBoolExpr> {
        self.zip_with(Some(other), None, BoolExpr::or, "or")
    }

    pub fn not(self: &Rc<Self>) -> Rc<GenericBoolExpr> {
        let elements = self.elements.iter().cloned().map(BoolExpr::not).collect();
        GenericBoolExpr::from_elements(
            format!("(not {})", self.name),
            self.layout.indices().to_vec(),
            elements,
        )
    }

    /// Constrain every element of the family to the given truth value.
    pub fn eq_const(self: &Rc<Self>, value: bool) -> BoolConstraint {
        BoolConstraint {
            left: BoolSubject::Generic(Rc::clone(self)),
            right: BoolRhs::Const(value),
        }
    }

    /// Constrain every element of the family to equal a scalar expression.
    pub fn eq(self: &Rc<Self>, other: BoolExpr) -> BoolConstraint {
        BoolConstraint {
            left: BoolSubject::Generic(Rc::clone(self)),
            right: BoolRhs::Expr(other),
        }
    }
}

/// A boolean relation waiting to be posted. A generic subject expands to one scalar
/// constraint per offset.
#[derive(Debug)]
pub struct BoolConstraint {
    pub(crate) left: BoolSubject,
    pub(crate) right: BoolRhs,
}

#[derive(Debug)]
pub(crate) enum BoolSubject {
    Scalar(BoolExpr),
    Generic(Rc<GenericBoolExpr>),
}

#[derive(Debug)]
pub(crate) enum BoolRhs {
    Const(bool),
    Expr(BoolExpr),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NodeId;

    fn bool_vars(n: u32) -> Vec<BoolExpr> {
        (0..n)
            .map(|k| BoolExpr::Var(BoolVarRef::new(NodeId(k))))
            .collect()
    }

    #[test]
    fn and_scalar_pairs_each_element_with_the_scalar() {
        let i = GenericIndex::new("i", 3);
        let xs = GenericBoolExpr::from_elements("x", vec![Rc::clone(&i)], bool_vars(3));
        let y = BoolExpr::Var(BoolVarRef::new(NodeId(9)));

        let combined = xs.and_scalar(y);
        i.set_current(2);
        match combined.expr_for_current() {
            BoolExpr::And(parts) => {
                assert_eq!(2, parts.len());
                match (&parts[0], &parts[1]) {
                    (BoolExpr::Var(x), BoolExpr::Var(y)) => {
                        assert_eq!(NodeId(2), x.node());
                        assert_eq!(NodeId(9), y.node());
                    }
                    other => panic!("unexpected parts {other:?}"),
                }
            }
            other => panic!("expected a conjunction, got {other:?}"),
        }
    }

    #[test]
    fn union_zip_covers_both_index_sets() {
        let i = GenericIndex::new("i", 2);
        let j = GenericIndex::new("j", 3);
        let xs = GenericBoolExpr::from_elements("x", vec![i], bool_vars(2));
        let ys = GenericBoolExpr::from_elements("y", vec![j], bool_vars(3));

        let combined = xs.and(&ys);
        assert_eq!(6, combined.layout().element_count());
    }
}
