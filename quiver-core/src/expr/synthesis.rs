//! Constraint synthesis: turning posted [`Constraint`] descriptors into nodes and arcs.
//!
//! Scalar relations case-split on the operand shapes. A relation between a constant-offset
//! expression and a constant is *algebraically inverted* into a single direct bound arc,
//! using the rounding table in [`crate::math::rounding`]; every other shape flattens its
//! subtrees into auxiliary nodes connected by arithmetic arcs. Generic operands expand first:
//! the union of the index sets is enumerated and one scalar constraint is synthesized per
//! offset.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::basic_types::RelOp;
use crate::domains::BoolDomain;
use crate::domains::Domain;
use crate::domains::NumValue;
use crate::domains::SetDomain;
use crate::engine::NodeArcGraph;
use crate::engine::NodeId;
use crate::expr::BoolConstraint;
use crate::expr::BoolExpr;
use crate::expr::BoolRhs;
use crate::expr::BoolSubject;
use crate::expr::Constraint;
use crate::expr::NumConstraint;
use crate::expr::NumExpr;
use crate::expr::NumOp;
use crate::expr::Operand;
use crate::expr::SetConstraint;
use crate::expr::SetVarRef;
use crate::expr::UnaryOp;
use crate::generics::for_each_combination;
use crate::generics::GenericIndex;
use crate::generics::NameGenerator;
use crate::math::rounding::bound_side;
use crate::math::rounding::round_dir;
use crate::math::rounding::RoundDir;
use crate::propagators::AbsArc;
use crate::propagators::AndArc;
use crate::propagators::BetweenArc;
use crate::propagators::BinaryRelationArc;
use crate::propagators::BoolConstArc;
use crate::propagators::BoolEqArc;
use crate::propagators::IntersectionArc;
use crate::propagators::MemberArc;
use crate::propagators::NotArc;
use crate::propagators::NotBetweenArc;
use crate::propagators::NullIntersectionArc;
use crate::propagators::NumBoundArc;
use crate::propagators::OrArc;
use crate::propagators::PowerArc;
use crate::propagators::ProdArc;
use crate::propagators::SquareArc;
use crate::propagators::SubsetArc;
use crate::propagators::SumArc;
use crate::propagators::SummationArc;
use crate::propagators::TrivialArc;
use crate::propagators::UnionArc;

pub(crate) fn post(graph: &mut NodeArcGraph, names: &NameGenerator, constraint: &Constraint) {
    match constraint {
        Constraint::Int(relation) => post_num(graph, names, relation),
        Constraint::Long(relation) => post_num(graph, names, relation),
        Constraint::Float(relation) => post_num(graph, names, relation),
        Constraint::Double(relation) => post_num(graph, names, relation),
        Constraint::Bool(relation) => post_bool(graph, names, relation),
        Constraint::Set(relation) => post_set(graph, names, relation),
    }
}

fn post_num<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    constraint: &NumConstraint<T>,
) {
    match constraint {
        NumConstraint::Relation { left, op, right } => {
            let mut indices = Vec::new();
            left.collect_indices(&mut indices);
            right.collect_indices(&mut indices);
            expand(&indices, || {
                post_scalar_relation(
                    graph,
                    names,
                    &left.resolve_for_current(),
                    *op,
                    &right.resolve_for_current(),
                );
            });
        }
        NumConstraint::Between {
            expr,
            min,
            min_exclusive,
            max,
            max_exclusive,
        } => {
            let mut indices = Vec::new();
            expr.collect_indices(&mut indices);
            expand(&indices, || {
                let node = flatten_operand(graph, names, &expr.resolve_for_current());
                let _ = graph.add_arc(Box::new(BetweenArc::new(
                    node,
                    *min,
                    *min_exclusive,
                    *max,
                    *max_exclusive,
                )));
            });
        }
        NumConstraint::NotBetween { expr, min, max } => {
            let mut indices = Vec::new();
            expr.collect_indices(&mut indices);
            expand(&indices, || {
                let node = flatten_operand(graph, names, &expr.resolve_for_current());
                let _ = graph.add_arc(Box::new(NotBetweenArc::new(node, *min, *max)));
            });
        }
    }
}

/// Run `synthesize` once per combination of the given indices (or exactly once when the
/// relation is not generic at all).
fn expand(indices: &[Rc<GenericIndex>], synthesize: impl FnMut()) {
    for_each_combination(indices, synthesize);
}

fn post_scalar_relation<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    left: &Operand<T>,
    op: RelOp,
    right: &Operand<T>,
) {
    match (left, right) {
        (Operand::Const(a), Operand::Const(b)) => post_trivial(graph, holds(*a, op, *b)),
        (Operand::Expr(expr), Operand::Const(value)) => {
            post_expr_vs_const(graph, names, expr, op, *value);
        }
        (Operand::Const(value), Operand::Expr(expr)) => {
            post_expr_vs_const(graph, names, expr, op.swap(), *value);
        }
        (Operand::Expr(left), Operand::Expr(right)) => {
            match (left.as_ref(), right.as_ref()) {
                (NumExpr::Var(x), NumExpr::Var(y)) => {
                    let _ = graph.add_arc(Box::new(BinaryRelationArc::<T>::new(
                        x.node(),
                        y.node(),
                        op,
                    )));
                }
                _ => {
                    let x = flatten_expr(graph, names, left);
                    let y = flatten_expr(graph, names, right);
                    let _ = graph.add_arc(Box::new(BinaryRelationArc::<T>::new(x, y, op)));
                }
            }
        }
        _ => unreachable!("generic operands are expanded before scalar synthesis"),
    }
}

/// `expr REL value`, inverting constant-offset shapes into a direct bound on the variable.
fn post_expr_vs_const<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    expr: &NumExpr<T>,
    op: RelOp,
    value: T,
) {
    match expr {
        NumExpr::Var(var) => {
            let _ = graph.add_arc(Box::new(NumBoundArc::new(var.node(), op, value)));
        }
        NumExpr::Binary {
            op: NumOp::Add,
            left,
            right,
        } => match (left, right) {
            // a + Z REL v  =>  Z REL v - a
            (Operand::Const(a), other) | (other, Operand::Const(a)) => {
                post_operand_vs_const(graph, names, other, op, value.sub(*a));
            }
            _ => post_general_vs_const(graph, names, expr, op, value),
        },
        NumExpr::Binary {
            op: NumOp::Sub,
            left,
            right,
        } => match (left, right) {
            // Z - a REL v  =>  Z REL v + a
            (other, Operand::Const(a)) => {
                post_operand_vs_const(graph, names, other, op, value.add(*a));
            }
            // a - Z REL v  =>  Z flip(REL) a - v
            (Operand::Const(a), other) => {
                post_operand_vs_const(graph, names, other, op.flip(), a.sub(value));
            }
            _ => post_general_vs_const(graph, names, expr, op, value),
        },
        NumExpr::Binary {
            op: NumOp::Mul,
            left,
            right,
        } => match (left, right) {
            (Operand::Const(a), other) | (other, Operand::Const(a)) => {
                invert_mul(graph, names, other, op, value, *a);
            }
            _ => post_general_vs_const(graph, names, expr, op, value),
        },
        NumExpr::Binary {
            op: NumOp::Div,
            left,
            right,
        } => match (left, right) {
            // Z / a REL v  =>  Z REL' v * a, exact since the quotient is rational
            (other, Operand::Const(a)) => {
                assert!(*a != T::zero(), "division by a zero constant");
                let op = if *a < T::zero() { op.flip() } else { op };
                post_operand_vs_const(graph, names, other, op, value.mul(*a));
            }
            _ => post_general_vs_const(graph, names, expr, op, value),
        },
        NumExpr::Summation { terms } => {
            let nodes = terms
                .iter()
                .map(|term| flatten_expr(graph, names, term))
                .collect();
            let rhs = const_node(graph, names, value);
            let _ = graph.add_arc(Box::new(SummationArc::<T>::new(nodes, op, rhs)));
        }
        NumExpr::Unary { .. } => post_general_vs_const(graph, names, expr, op, value),
    }
}

fn post_operand_vs_const<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    operand: &Operand<T>,
    op: RelOp,
    value: T,
) {
    match operand {
        Operand::Const(constant) => post_trivial(graph, holds(*constant, op, value)),
        Operand::Expr(expr) => post_expr_vs_const(graph, names, expr, op, value),
        _ => unreachable!("generic operands are expanded before scalar synthesis"),
    }
}

/// `a * Z REL v`: divide the bound by the multiplier, rounding so that no feasible value of
/// `Z` is cut and no infeasible one survives.
fn invert_mul<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    operand: &Operand<T>,
    op: RelOp,
    value: T,
    multiplier: T,
) {
    if multiplier == T::zero() {
        post_trivial(graph, holds(T::zero(), op, value));
        return;
    }

    // Strict inequalities are normalised on the (integer) product before dividing.
    let (op, value) = match op {
        RelOp::Lt => (RelOp::Leq, value.strictly_below()),
        RelOp::Gt => (RelOp::Geq, value.strictly_above()),
        _ => (op, value),
    };

    match op {
        RelOp::Eq => {
            if value.divides_exactly(multiplier) {
                let bound = value.divide(multiplier, RoundDir::Up);
                post_operand_vs_const(graph, names, operand, RelOp::Eq, bound);
            } else {
                post_trivial(graph, false);
            }
        }
        RelOp::Neq => {
            if value.divides_exactly(multiplier) {
                let bound = value.divide(multiplier, RoundDir::Up);
                post_operand_vs_const(graph, names, operand, RelOp::Neq, bound);
            }
            // Otherwise the product can never equal the value; nothing to post.
        }
        RelOp::Leq | RelOp::Geq => {
            let side = bound_side(op.tightens_upper(), multiplier < T::zero());
            let dir = round_dir(side);
            let op = if multiplier < T::zero() { op.flip() } else { op };
            post_operand_vs_const(graph, names, operand, op, value.divide(multiplier, dir));
        }
        RelOp::Lt | RelOp::Gt => unreachable!("normalised above"),
    }
}

fn post_general_vs_const<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    expr: &NumExpr<T>,
    op: RelOp,
    value: T,
) {
    let node = flatten_expr(graph, names, expr);
    let _ = graph.add_arc(Box::new(NumBoundArc::new(node, op, value)));
}

fn post_trivial(graph: &mut NodeArcGraph, satisfied: bool) {
    if !satisfied {
        let _ = graph.add_arc(Box::new(TrivialArc::new(false)));
    }
}

fn holds<T: NumValue>(left: T, op: RelOp, right: T) -> bool {
    match op {
        RelOp::Eq => left == right,
        RelOp::Neq => left != right,
        RelOp::Lt => left < right,
        RelOp::Leq => left <= right,
        RelOp::Gt => left > right,
        RelOp::Geq => left >= right,
    }
}

/// Reduce an expression to a single node, introducing auxiliary nodes and arithmetic arcs for
/// derived shapes.
fn flatten_expr<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    expr: &NumExpr<T>,
) -> NodeId {
    match expr {
        NumExpr::Var(var) => var.node(),
        NumExpr::Binary { op, left, right } => {
            let left = flatten_operand(graph, names, left);
            let right = flatten_operand(graph, names, right);
            let result = aux_num_node::<T>(graph, names);
            let arc: Box<dyn crate::engine::Arc> = match op {
                NumOp::Add => Box::new(SumArc::<T>::new(left, right, result)),
                // left - right = result  <=>  result + right = left
                NumOp::Sub => Box::new(SumArc::<T>::new(result, right, left)),
                NumOp::Mul => Box::new(ProdArc::<T>::new(left, right, result)),
                // left / right = result  <=>  result * right = left
                NumOp::Div => Box::new(ProdArc::<T>::new(result, right, left)),
            };
            let _ = graph.add_arc(arc);
            result
        }
        NumExpr::Unary { op, operand } => {
            let operand = flatten_expr(graph, names, operand);
            let result = aux_num_node::<T>(graph, names);
            let arc: Box<dyn crate::engine::Arc> = match op {
                UnaryOp::Abs => Box::new(AbsArc::<T>::new(operand, result)),
                UnaryOp::Square => Box::new(SquareArc::<T>::new(operand, result)),
                UnaryOp::Pow(exp) => Box::new(PowerArc::<T>::new(operand, result, *exp)),
            };
            let _ = graph.add_arc(arc);
            result
        }
        NumExpr::Summation { terms } => {
            let nodes = terms
                .iter()
                .map(|term| flatten_expr(graph, names, term))
                .collect();
            let result = aux_num_node::<T>(graph, names);
            let _ = graph.add_arc(Box::new(SummationArc::<T>::new(nodes, RelOp::Eq, result)));
            result
        }
    }
}

fn flatten_operand<T: NumValue>(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    operand: &Operand<T>,
) -> NodeId {
    match operand {
        Operand::Expr(expr) => flatten_expr(graph, names, expr),
        Operand::Const(value) => const_node(graph, names, *value),
        _ => unreachable!("generic operands are expanded before scalar synthesis"),
    }
}

fn aux_num_node<T: NumValue>(graph: &mut NodeArcGraph, names: &NameGenerator) -> NodeId {
    graph.new_node(
        names.next_name("aux"),
        T::wrap(T::domain(T::min_value(), T::max_value())),
    )
}

fn const_node<T: NumValue>(graph: &mut NodeArcGraph, names: &NameGenerator, value: T) -> NodeId {
    graph.new_node(names.next_name("const"), T::wrap(T::domain(value, value)))
}

fn post_bool(graph: &mut NodeArcGraph, names: &NameGenerator, constraint: &BoolConstraint) {
    match &constraint.left {
        BoolSubject::Scalar(expr) => post_bool_scalar(graph, names, expr, &constraint.right),
        BoolSubject::Generic(generic) => {
            for_each_combination(generic.layout().indices(), || {
                post_bool_scalar(graph, names, &generic.expr_for_current(), &constraint.right);
            });
        }
    }
}

fn post_bool_scalar(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    expr: &BoolExpr,
    rhs: &BoolRhs,
) {
    match rhs {
        BoolRhs::Const(value) => {
            let node = flatten_bool(graph, names, expr);
            let _ = graph.add_arc(Box::new(BoolConstArc::new(node, *value)));
        }
        BoolRhs::Expr(other) => {
            let left = flatten_bool(graph, names, expr);
            let right = flatten_bool(graph, names, other);
            let _ = graph.add_arc(Box::new(BoolEqArc::new(left, right)));
        }
    }
}

fn flatten_bool(graph: &mut NodeArcGraph, names: &NameGenerator, expr: &BoolExpr) -> NodeId {
    match expr {
        BoolExpr::Var(var) => var.node(),
        BoolExpr::Const(value) => {
            let node = aux_bool_node(graph, names);
            let _ = graph.add_arc(Box::new(BoolConstArc::new(node, *value)));
            node
        }
        BoolExpr::And(parts) => {
            let inputs = parts
                .iter()
                .map(|part| flatten_bool(graph, names, part))
                .collect();
            let result = aux_bool_node(graph, names);
            let _ = graph.add_arc(Box::new(AndArc::new(inputs, result)));
            result
        }
        BoolExpr::Or(parts) => {
            let inputs = parts
                .iter()
                .map(|part| flatten_bool(graph, names, part))
                .collect();
            let result = aux_bool_node(graph, names);
            let _ = graph.add_arc(Box::new(OrArc::new(inputs, result)));
            result
        }
        BoolExpr::Not(inner) => {
            let input = flatten_bool(graph, names, inner);
            let result = aux_bool_node(graph, names);
            let _ = graph.add_arc(Box::new(NotArc::new(input, result)));
            result
        }
    }
}

fn aux_bool_node(graph: &mut NodeArcGraph, names: &NameGenerator) -> NodeId {
    graph.new_node(names.next_name("aux"), Domain::Bool(BoolDomain::new()))
}

fn post_set(graph: &mut NodeArcGraph, names: &NameGenerator, constraint: &SetConstraint) {
    match constraint {
        SetConstraint::Intersection { a, b, result } => {
            let _ = graph.add_arc(Box::new(IntersectionArc::new(
                a.node(),
                b.node(),
                result.node(),
            )));
        }
        SetConstraint::Union {
            sources,
            result,
            advanced,
        } => {
            let nodes: Vec<NodeId> = sources.iter().map(SetVarRef::node).collect();
            if *advanced {
                let intersection = common_possible_node(graph, names, &nodes);
                let _ = graph.add_arc(Box::new(UnionArc::with_intersection(
                    nodes,
                    result.node(),
                    intersection,
                )));
            } else {
                let _ = graph.add_arc(Box::new(UnionArc::new(nodes, result.node())));
            }
        }
        SetConstraint::Partition {
            parts,
            whole,
            advanced,
        } => {
            let nodes: Vec<NodeId> = parts.iter().map(SetVarRef::node).collect();
            for (k, &a) in nodes.iter().enumerate() {
                for &b in &nodes[k + 1..] {
                    let _ = graph.add_arc(Box::new(NullIntersectionArc::new(a, b)));
                }
            }
            if *advanced {
                // Disjointness makes the parts' intersection empty; forcing it empty lets the
                // union arc run its intersection-based deductions.
                let empty = graph.new_node(
                    names.next_name("empty"),
                    Domain::Set(SetDomain::new(std::iter::empty())),
                );
                let _ = graph.add_arc(Box::new(UnionArc::with_intersection(
                    nodes,
                    whole.node(),
                    empty,
                )));
            } else {
                let _ = graph.add_arc(Box::new(UnionArc::new(nodes, whole.node())));
            }
        }
        SetConstraint::Subset {
            sub,
            superset,
            strict,
        } => {
            let _ = graph.add_arc(Box::new(SubsetArc::new(
                sub.node(),
                superset.node(),
                *strict,
            )));
        }
        SetConstraint::NullIntersection { a, b } => {
            let _ = graph.add_arc(Box::new(NullIntersectionArc::new(a.node(), b.node())));
        }
        SetConstraint::Member {
            element,
            set,
            negated,
        } => {
            let mut indices = Vec::new();
            element.collect_indices(&mut indices);
            expand(&indices, || {
                let node = flatten_operand(graph, names, &element.resolve_for_current());
                let arc = if *negated {
                    MemberArc::negated(node, set.node())
                } else {
                    MemberArc::new(node, set.node())
                };
                let _ = graph.add_arc(Box::new(arc));
            });
        }
    }
}

/// An auxiliary set node admitting exactly the values every listed node still admits.
fn common_possible_node(
    graph: &mut NodeArcGraph,
    names: &NameGenerator,
    nodes: &[NodeId],
) -> NodeId {
    let mut common: Option<BTreeSet<i32>> = None;
    for &node in nodes {
        let possible = graph.domain(node).as_set().possible();
        common = Some(match common {
            None => possible.clone(),
            Some(so_far) => so_far.intersection(possible).copied().collect(),
        });
    }
    graph.new_node(
        names.next_name("inter"),
        Domain::Set(SetDomain::new(common.unwrap_or_default())),
    )
}
