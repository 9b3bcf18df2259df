use crate::expr::BoolConstraint;
use crate::expr::NumConstraint;
use crate::expr::SetConstraint;

/// Any constraint the store can post, over any supported kind.
#[derive(Debug)]
pub enum Constraint {
    Int(NumConstraint<i32>),
    Long(NumConstraint<i64>),
    Float(NumConstraint<f32>),
    Double(NumConstraint<f64>),
    Bool(BoolConstraint),
    Set(SetConstraint),
}

impl From<NumConstraint<i32>> for Constraint {
    fn from(constraint: NumConstraint<i32>) -> Self {
        Constraint::Int(constraint)
    }
}

impl From<NumConstraint<i64>> for Constraint {
    fn from(constraint: NumConstraint<i64>) -> Self {
        Constraint::Long(constraint)
    }
}

impl From<NumConstraint<f32>> for Constraint {
    fn from(constraint: NumConstraint<f32>) -> Self {
        Constraint::Float(constraint)
    }
}

impl From<NumConstraint<f64>> for Constraint {
    fn from(constraint: NumConstraint<f64>) -> Self {
        Constraint::Double(constraint)
    }
}

impl From<BoolConstraint> for Constraint {
    fn from(constraint: BoolConstraint) -> Self {
        Constraint::Bool(constraint)
    }
}

impl From<SetConstraint> for Constraint {
    fn from(constraint: SetConstraint) -> Self {
        Constraint::Set(constraint)
    }
}
