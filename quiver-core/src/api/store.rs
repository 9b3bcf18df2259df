use std::rc::Rc;

use log::debug;

use crate::basic_types::PropagationResult;
use crate::domains::BoolDomain;
use crate::domains::Domain;
use crate::domains::NumDomain;
use crate::domains::NumValue;
use crate::domains::SetDomain;
use crate::engine::ConsistencyStrength;
use crate::engine::GraphState;
use crate::engine::NodeArcGraph;
use crate::engine::RunState;
use crate::expr::synthesis;
use crate::expr::BoolVarRef;
use crate::expr::Constraint;
use crate::expr::GenericBoolExpr;
use crate::expr::GenericNumExpr;
use crate::expr::SetVarRef;
use crate::expr::VarRef;
use crate::generics::GenericIndex;
use crate::generics::NameGenerator;

/// The orchestrator: owns the [`NodeArcGraph`], hands out typed variable handles, posts
/// constraints, and runs propagation.
///
/// With auto-propagation enabled, every posted constraint and every external domain mutation
/// runs the engine to a fixpoint immediately; by default propagation happens only on an
/// explicit [`ConstraintStore::propagate`] call.
#[derive(Debug, Default)]
pub struct ConstraintStore {
    graph: NodeArcGraph,
    names: NameGenerator,
    auto_propagate: bool,
}

impl ConstraintStore {
    pub fn new() -> Self {
        ConstraintStore::default()
    }

    /// Whether propagation runs implicitly after every mutation and post.
    pub fn set_auto_propagate(&mut self, enabled: bool) {
        self.auto_propagate = enabled;
    }

    pub fn auto_propagate(&self) -> bool {
        self.auto_propagate
    }

    pub fn new_num<T: NumValue>(&mut self, name: impl Into<String>, min: T, max: T) -> VarRef<T> {
        VarRef::new(self.graph.new_node(name, T::wrap(T::domain(min, max))))
    }

    pub fn new_int(&mut self, name: impl Into<String>, min: i32, max: i32) -> VarRef<i32> {
        self.new_num(name, min, max)
    }

    pub fn new_long(&mut self, name: impl Into<String>, min: i64, max: i64) -> VarRef<i64> {
        self.new_num(name, min, max)
    }

    pub fn new_float(&mut self, name: impl Into<String>, min: f32, max: f32) -> VarRef<f32> {
        self.new_num(name, min, max)
    }

    pub fn new_double(&mut self, name: impl Into<String>, min: f64, max: f64) -> VarRef<f64> {
        self.new_num(name, min, max)
    }

    pub fn new_bool(&mut self, name: impl Into<String>) -> BoolVarRef {
        BoolVarRef::new(self.graph.new_node(name, Domain::Bool(BoolDomain::new())))
    }

    pub fn new_set(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = i32>,
    ) -> SetVarRef {
        SetVarRef::new(
            self.graph
                .new_node(name, Domain::Set(SetDomain::new(values))),
        )
    }

    /// A family of numeric variables over the given index dimensions, one node per flat
    /// offset, all with the same initial bounds.
    pub fn new_num_family<T: NumValue>(
        &mut self,
        name: &str,
        indices: Vec<Rc<GenericIndex>>,
        min: T,
        max: T,
    ) -> Rc<GenericNumExpr<T>> {
        let count: usize = indices.iter().map(|index| index.size()).product();
        let elements = (0..count)
            .map(|offset| self.new_num(format!("{name}[{offset}]"), min, max).expr())
            .collect();
        GenericNumExpr::from_elements(name, indices, elements)
    }

    /// A family of boolean variables over the given index dimensions.
    pub fn new_bool_family(
        &mut self,
        name: &str,
        indices: Vec<Rc<GenericIndex>>,
    ) -> Rc<GenericBoolExpr> {
        let count: usize = indices.iter().map(|index| index.size()).product();
        let elements = (0..count)
            .map(|offset| self.new_bool(format!("{name}[{offset}]")).expr())
            .collect();
        GenericBoolExpr::from_elements(name, indices, elements)
    }

    /// Post a constraint: synthesize its arcs into the graph, then propagate if
    /// auto-propagation is on.
    pub fn add_constraint(&mut self, constraint: impl Into<Constraint>) -> PropagationResult {
        let constraint = constraint.into();
        debug!("posting {constraint:?}");
        synthesis::post(&mut self.graph, &self.names, &constraint);
        self.maybe_propagate()
    }

    /// Run the engine to a fixpoint or failure.
    pub fn propagate(&mut self) -> PropagationResult {
        self.graph.propagate()
    }

    pub fn run_state(&self) -> RunState {
        self.graph.run_state()
    }

    /// Cap the consistency strength employed by propagation.
    pub fn set_max_strength(&mut self, strength: ConsistencyStrength) {
        self.graph.set_max_strength(strength);
    }

    pub fn capture_state(&self) -> GraphState {
        self.graph.capture_state()
    }

    pub fn restore_state(&mut self, state: &GraphState) {
        self.graph.restore_state(state);
    }

    // Direct domain mutation for the search layer. Each either narrows the domain (scheduling
    // re-propagation of the node's listeners) or fails without propagating.

    pub fn set_min<T: NumValue>(&mut self, var: VarRef<T>, value: T) -> PropagationResult {
        self.graph
            .modify(var.node(), |domain| T::project_mut(domain).set_min(value))?;
        self.maybe_propagate()
    }

    pub fn set_max<T: NumValue>(&mut self, var: VarRef<T>, value: T) -> PropagationResult {
        self.graph
            .modify(var.node(), |domain| T::project_mut(domain).set_max(value))?;
        self.maybe_propagate()
    }

    pub fn set_value<T: NumValue>(&mut self, var: VarRef<T>, value: T) -> PropagationResult {
        self.graph
            .modify(var.node(), |domain| T::project_mut(domain).set_value(value))?;
        self.maybe_propagate()
    }

    pub fn remove_value<T: NumValue>(&mut self, var: VarRef<T>, value: T) -> PropagationResult {
        self.graph.modify(var.node(), |domain| {
            T::project_mut(domain).remove_value(value)
        })?;
        self.maybe_propagate()
    }

    pub fn set_bool(&mut self, var: BoolVarRef, value: bool) -> PropagationResult {
        self.graph
            .modify(var.node(), |domain| domain.as_bool_mut().set_value(value))?;
        self.maybe_propagate()
    }

    /// Commit a value to a set variable.
    pub fn require_in_set(&mut self, var: SetVarRef, value: i32) -> PropagationResult {
        self.graph
            .modify(var.node(), |domain| domain.as_set_mut().require(value))?;
        self.maybe_propagate()
    }

    /// Rule a value out of a set variable.
    pub fn exclude_from_set(&mut self, var: SetVarRef, value: i32) -> PropagationResult {
        self.graph
            .modify(var.node(), |domain| domain.as_set_mut().exclude(value))?;
        self.maybe_propagate()
    }

    // Inspection.

    pub fn min<T: NumValue>(&self, var: VarRef<T>) -> T {
        self.num_domain(var).min()
    }

    pub fn max<T: NumValue>(&self, var: VarRef<T>) -> T {
        self.num_domain(var).max()
    }

    pub fn contains<T: NumValue>(&self, var: VarRef<T>, value: T) -> bool {
        self.num_domain(var).contains(value)
    }

    pub fn is_bound<T: NumValue>(&self, var: VarRef<T>) -> bool {
        self.num_domain(var).is_bound()
    }

    pub fn num_domain<T: NumValue>(&self, var: VarRef<T>) -> &T::Dom {
        T::project(self.graph.domain(var.node()))
    }

    /// The variable's truth value, if it is already decided.
    pub fn bool_value(&self, var: BoolVarRef) -> Option<bool> {
        let domain = self.graph.domain(var.node()).as_bool();
        if domain.is_true() {
            Some(true)
        } else if domain.is_false() {
            Some(false)
        } else {
            None
        }
    }

    pub fn set_domain(&self, var: SetVarRef) -> &SetDomain {
        self.graph.domain(var.node()).as_set()
    }

    pub fn num_nodes(&self) -> usize {
        self.graph.num_nodes()
    }

    pub fn num_arcs(&self) -> usize {
        self.graph.num_arcs()
    }

    fn maybe_propagate(&mut self) -> PropagationResult {
        if self.auto_propagate {
            self.graph.propagate()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::RelOp;
    use crate::propagators::BinaryRelationArc;

    #[test]
    fn posting_and_propagating_narrows_variables() {
        let mut store = ConstraintStore::new();
        let x = store.new_int("x", 0, 10);
        let y = store.new_int("y", 0, 10);
        let z = store.new_int("z", 0, 3);

        store
            .add_constraint(x.expr().add(y).eq(z))
            .expect("nothing to do yet");
        store.propagate().expect("satisfiable");

        assert_eq!(RunState::Fixpoint, store.run_state());
        assert_eq!(0, store.min(x));
        assert_eq!(3, store.max(x));
        assert_eq!(3, store.max(y));
    }

    #[test]
    fn second_run_from_a_fixpoint_changes_nothing() {
        let mut store = ConstraintStore::new();
        let x = store.new_int("x", 0, 10);
        let y = store.new_int("y", 2, 6);

        store
            .add_constraint(x.expr().leq(y))
            .expect("not propagated yet");
        store.propagate().expect("satisfiable");
        let (min, max) = (store.min(x), store.max(x));

        store.propagate().expect("still satisfiable");
        assert_eq!(RunState::Fixpoint, store.run_state());
        assert_eq!((min, max), (store.min(x), store.max(x)));
    }

    #[test]
    fn auto_propagation_runs_after_each_mutation() {
        let mut store = ConstraintStore::new();
        store.set_auto_propagate(true);
        let x = store.new_int("x", 0, 10);
        let y = store.new_int("y", 0, 10);

        store.add_constraint(x.expr().leq(y)).expect("satisfiable");
        store.set_max(y, 4).expect("satisfiable");

        assert_eq!(RunState::Fixpoint, store.run_state());
        assert_eq!(4, store.max(x));
    }

    #[test]
    fn failure_is_recovered_by_restoring_a_snapshot() {
        let mut store = ConstraintStore::new();
        let x = store.new_int("x", 0, 10);
        let y = store.new_int("y", 0, 10);
        store.add_constraint(x.expr().lt(y)).expect("not propagated");
        store.propagate().expect("satisfiable");

        let snapshot = store.capture_state();

        store.set_value(x, 7).expect("in domain");
        store.set_max(y, 7).expect("non-empty");
        assert!(store.propagate().is_err());
        assert_eq!(RunState::Failed, store.run_state());

        store.restore_state(&snapshot);
        assert_eq!(0, store.min(x));
        assert_eq!(10, store.max(y));
        store.propagate().expect("back to a consistent state");
        assert_eq!(RunState::Fixpoint, store.run_state());
    }

    #[test]
    fn strength_cap_skips_stronger_arcs() {
        let mut store = ConstraintStore::new();
        let x = store.new_int("x", 0, 5);
        let y = store.new_int("y", 3, 3);

        // Neq is range-consistent; under a bounds-only cap it is never scheduled.
        store.set_max_strength(ConsistencyStrength::Bounds);
        let _ = store.graph.add_arc(Box::new(BinaryRelationArc::<i32>::new(
            x.node(),
            y.node(),
            RelOp::Neq,
        )));
        store.propagate().expect("satisfiable");
        assert!(store.contains(x, 3));

        // Raising the cap and re-seeding (via restore) lets the arc fire.
        store.set_max_strength(ConsistencyStrength::HyperArc);
        let snapshot = store.capture_state();
        store.restore_state(&snapshot);
        store.propagate().expect("satisfiable");
        assert!(!store.contains(x, 3));
    }

    #[test]
    fn generic_family_posts_one_constraint_per_offset() {
        let mut store = ConstraintStore::new();
        let i = GenericIndex::new("i", 4);
        let xs = store.new_num_family::<i32>("x", vec![i], 0, 100);

        store.add_constraint(xs.mul(2).leq(9)).expect("not propagated");
        assert_eq!(4, store.num_arcs());

        store.propagate().expect("satisfiable");
        for offset in 0..4 {
            let var = VarRef::<i32>::new(crate::engine::NodeId(offset));
            assert_eq!(4, store.max(var));
        }
    }

    #[test]
    fn bool_family_conjunction_decides_the_output() {
        let mut store = ConstraintStore::new();
        let i = GenericIndex::new("i", 2);
        let xs = store.new_bool_family("x", vec![i]);
        let y = store.new_bool("y");

        store
            .add_constraint(xs.and_scalar(y.expr()).eq_const(true))
            .expect("not propagated");
        store.propagate().expect("satisfiable");

        assert_eq!(Some(true), store.bool_value(y));
    }

    #[test]
    fn set_mutations_feed_set_constraints() {
        let mut store = ConstraintStore::new();
        let a = store.new_set("a", [1, 2, 3]);
        let b = store.new_set("b", [2, 3, 4]);

        store.add_constraint(a.disjoint_from(b)).expect("not propagated");
        store.require_in_set(a, 2).expect("possible");
        store.propagate().expect("satisfiable");

        assert!(!store.set_domain(b).is_possible(2));
    }
}
