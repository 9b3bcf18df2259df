/// A relational operator between two numeric operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
}

impl RelOp {
    /// The operator obtained by swapping the two sides: `a REL b` iff `b REL.swap() a`.
    pub fn swap(self) -> RelOp {
        match self {
            RelOp::Eq => RelOp::Eq,
            RelOp::Neq => RelOp::Neq,
            RelOp::Lt => RelOp::Gt,
            RelOp::Leq => RelOp::Geq,
            RelOp::Gt => RelOp::Lt,
            RelOp::Geq => RelOp::Leq,
        }
    }

    /// The operator after multiplying both sides by a negative factor.
    pub fn flip(self) -> RelOp {
        self.swap()
    }

    /// Whether this operator tightens the upper bound of its left-hand side.
    pub(crate) fn tightens_upper(self) -> bool {
        matches!(self, RelOp::Lt | RelOp::Leq)
    }
}

impl std::fmt::Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            RelOp::Eq => "=",
            RelOp::Neq => "!=",
            RelOp::Lt => "<",
            RelOp::Leq => "<=",
            RelOp::Gt => ">",
            RelOp::Geq => ">=",
        };
        write!(f, "{symbol}")
    }
}
