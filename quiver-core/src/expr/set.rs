use crate::expr::Operand;
use crate::expr::SetVarRef;

/// A set constraint waiting to be posted. Each variant maps onto one or more set arcs; the
/// `advanced` variants additionally wire an auxiliary intersection variable for stronger
/// filtering at extra cost.
#[derive(Clone, Debug)]
pub enum SetConstraint {
    /// `a ∩ b = result`.
    Intersection {
        a: SetVarRef,
        b: SetVarRef,
        result: SetVarRef,
    },
    /// `⋃ sources = result`; `advanced` derives extra deductions through the sources'
    /// intersection.
    Union {
        sources: Vec<SetVarRef>,
        result: SetVarRef,
        advanced: bool,
    },
    /// `⋃ parts = whole` with pairwise disjoint parts.
    Partition {
        parts: Vec<SetVarRef>,
        whole: SetVarRef,
        advanced: bool,
    },
    /// `sub ⊆ superset`, strict when requested.
    Subset {
        sub: SetVarRef,
        superset: SetVarRef,
        strict: bool,
    },
    /// `a ∩ b = ∅`.
    NullIntersection { a: SetVarRef, b: SetVarRef },
    /// `element ∈ set` (or `∉` when negated) for an int-valued expression.
    Member {
        element: Operand<i32>,
        set: SetVarRef,
        negated: bool,
    },
}

impl SetVarRef {
    pub fn intersection(self, other: SetVarRef, result: SetVarRef) -> SetConstraint {
        SetConstraint::Intersection {
            a: self,
            b: other,
            result,
        }
    }

    pub fn subset_of(self, superset: SetVarRef, strict: bool) -> SetConstraint {
        SetConstraint::Subset {
            sub: self,
            superset,
            strict,
        }
    }

    pub fn disjoint_from(self, other: SetVarRef) -> SetConstraint {
        SetConstraint::NullIntersection { a: self, b: other }
    }

    pub fn contains(self, element: impl Into<Operand<i32>>) -> SetConstraint {
        SetConstraint::Member {
            element: element.into(),
            set: self,
            negated: false,
        }
    }

    pub fn excludes(self, element: impl Into<Operand<i32>>) -> SetConstraint {
        SetConstraint::Member {
            element: element.into(),
            set: self,
            negated: true,
        }
    }
}

/// `⋃ sources = result`.
pub fn union_of(sources: Vec<SetVarRef>, result: SetVarRef, advanced: bool) -> SetConstraint {
    SetConstraint::Union {
        sources,
        result,
        advanced,
    }
}

/// `⋃ parts = whole`, parts pairwise disjoint.
pub fn partition_of(parts: Vec<SetVarRef>, whole: SetVarRef, advanced: bool) -> SetConstraint {
    SetConstraint::Partition {
        parts,
        whole,
        advanced,
    }
}
