use std::rc::Rc;

use crate::domains::NumValue;
use crate::basic_types::RelOp;
use crate::expr::GenericNumExpr;
use crate::expr::VarRef;
use crate::generics::GenericConstant;
use crate::generics::GenericIndex;
use crate::generics::IndexLayout;

/// A binary arithmetic operation tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A unary arithmetic operation tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Abs,
    Square,
    /// Exponentiation by a constant positive exponent, over a non-negative base.
    Pow(u32),
}

/// One side of a binary operation or relation: the four shapes constraint synthesis
/// case-splits on, matched exhaustively.
#[derive(Clone, Debug)]
pub enum Operand<T: NumValue> {
    Expr(Rc<NumExpr<T>>),
    Const(T),
    GenericExpr(Rc<GenericNumExpr<T>>),
    GenericConst(Rc<GenericConstant<T>>),
}

impl<T: NumValue> Operand<T> {
    /// Every index dimension the operand ranges over, including those of nested operands.
    pub(crate) fn collect_indices(&self, into: &mut Vec<Rc<GenericIndex>>) {
        match self {
            Operand::Expr(expr) => expr.collect_indices(into),
            Operand::Const(_) => {}
            Operand::GenericExpr(generic) => {
                *into = IndexLayout::union(into, generic.layout().indices());
            }
            Operand::GenericConst(generic) => {
                *into = IndexLayout::union(into, generic.layout().indices());
            }
        }
    }

    /// Resolve generic shapes to the element addressed by the indices' current values.
    pub(crate) fn resolve_for_current(&self) -> Operand<T> {
        match self {
            Operand::Expr(expr) => Operand::Expr(Rc::new(expr.resolve_for_current())),
            Operand::Const(value) => Operand::Const(*value),
            Operand::GenericExpr(generic) => {
                Operand::Expr(Rc::new(generic.expr_for_current()))
            }
            Operand::GenericConst(generic) => Operand::Const(generic.value_for_current()),
        }
    }
}

impl<T: NumValue> From<T> for Operand<T> {
    fn from(value: T) -> Self {
        Operand::Const(value)
    }
}

impl<T: NumValue> From<NumExpr<T>> for Operand<T> {
    fn from(expr: NumExpr<T>) -> Self {
        Operand::Expr(Rc::new(expr))
    }
}

impl<T: NumValue> From<VarRef<T>> for Operand<T> {
    fn from(var: VarRef<T>) -> Self {
        Operand::Expr(Rc::new(NumExpr::Var(var)))
    }
}

impl<T: NumValue> From<Rc<GenericNumExpr<T>>> for Operand<T> {
    fn from(generic: Rc<GenericNumExpr<T>>) -> Self {
        Operand::GenericExpr(generic)
    }
}

impl<T: NumValue> From<Rc<GenericConstant<T>>> for Operand<T> {
    fn from(generic: Rc<GenericConstant<T>>) -> Self {
        Operand::GenericConst(generic)
    }
}

/// A lazily composed numeric expression. Operators build tree nodes only; no graph structure
/// exists until a relation over the expression is posted.
#[derive(Clone, Debug)]
pub enum NumExpr<T: NumValue> {
    Var(VarRef<T>),
    Binary {
        op: NumOp,
        left: Operand<T>,
        right: Operand<T>,
    },
    Unary {
        op: UnaryOp,
        operand: Rc<NumExpr<T>>,
    },
    Summation {
        terms: Vec<NumExpr<T>>,
    },
}

impl<T: NumValue> NumExpr<T> {
    fn binary(self, op: NumOp, right: impl Into<Operand<T>>) -> NumExpr<T> {
        NumExpr::Binary {
            op,
            left: self.into(),
            right: right.into(),
        }
    }

    pub fn add(self, right: impl Into<Operand<T>>) -> NumExpr<T> {
        self.binary(NumOp::Add, right)
    }

    pub fn sub(self, right: impl Into<Operand<T>>) -> NumExpr<T> {
        self.binary(NumOp::Sub, right)
    }

    pub fn mul(self, right: impl Into<Operand<T>>) -> NumExpr<T> {
        self.binary(NumOp::Mul, right)
    }

    pub fn div(self, right: impl Into<Operand<T>>) -> NumExpr<T> {
        self.binary(NumOp::Div, right)
    }

    pub fn abs(self) -> NumExpr<T> {
        NumExpr::Unary {
            op: UnaryOp::Abs,
            operand: Rc::new(self),
        }
    }

    pub fn square(self) -> NumExpr<T> {
        NumExpr::Unary {
            op: UnaryOp::Square,
            operand: Rc::new(self),
        }
    }

    pub fn pow(self, exp: u32) -> NumExpr<T> {
        NumExpr::Unary {
            op: UnaryOp::Pow(exp),
            operand: Rc::new(self),
        }
    }

    fn relate(self, op: RelOp, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        NumConstraint::Relation {
            left: self.into(),
            op,
            right: right.into(),
        }
    }

    pub fn eq(self, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Eq, right)
    }

    pub fn neq(self, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Neq, right)
    }

    pub fn lt(self, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Lt, right)
    }

    pub fn leq(self, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Leq, right)
    }

    pub fn gt(self, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Gt, right)
    }

    pub fn geq(self, right: impl Into<Operand<T>>) -> NumConstraint<T> {
        self.relate(RelOp::Geq, right)
    }

    pub fn between(self, min: T, min_exclusive: bool, max: T, max_exclusive: bool) -> NumConstraint<T> {
        NumConstraint::Between {
            expr: self.into(),
            min,
            min_exclusive,
            max,
            max_exclusive,
        }
    }

    pub fn not_between(self, min: T, max: T) -> NumConstraint<T> {
        NumConstraint::NotBetween {
            expr: self.into(),
            min,
            max,
        }
    }

    pub(crate) fn collect_indices(&self, into: &mut Vec<Rc<GenericIndex>>) {
        match self {
            NumExpr::Var(_) => {}
            NumExpr::Binary { left, right, .. } => {
                left.collect_indices(into);
                right.collect_indices(into);
            }
            NumExpr::Unary { operand, .. } => operand.collect_indices(into),
            NumExpr::Summation { terms } => {
                for term in terms {
                    term.collect_indices(into);
                }
            }
        }
    }

    /// The same expression with every nested generic shape resolved at the indices' current
    /// values.
    pub(crate) fn resolve_for_current(&self) -> NumExpr<T> {
        match self {
            NumExpr::Var(var) => NumExpr::Var(*var),
            NumExpr::Binary { op, left, right } => NumExpr::Binary {
                op: *op,
                left: left.resolve_for_current(),
                right: right.resolve_for_current(),
            },
            NumExpr::Unary { op, operand } => NumExpr::Unary {
                op: *op,
                operand: Rc::new(operand.resolve_for_current()),
            },
            NumExpr::Summation { terms } => NumExpr::Summation {
                terms: terms.iter().map(NumExpr::resolve_for_current).collect(),
            },
        }
    }
}

impl<T: NumValue> VarRef<T> {
    /// Lift the variable into the expression layer.
    pub fn expr(self) -> NumExpr<T> {
        NumExpr::Var(self)
    }
}

/// A relation over numeric expressions, waiting to be posted.
#[derive(Clone, Debug)]
pub enum NumConstraint<T: NumValue> {
    Relation {
        left: Operand<T>,
        op: RelOp,
        right: Operand<T>,
    },
    Between {
        expr: Operand<T>,
        min: T,
        min_exclusive: bool,
        max: T,
        max_exclusive: bool,
    },
    NotBetween {
        expr: Operand<T>,
        min: T,
        max: T,
    },
}
