//! A thin wrapper around [`NodeArcGraph`] for propagator tests: shorthand node constructors,
//! direct domain access, and bound assertions.

use crate::basic_types::PropagationResult;
use crate::domains::BoolDomain;
use crate::domains::DiscreteDomain;
use crate::domains::Domain;
use crate::domains::NumDomain;
use crate::domains::NumValue;
use crate::domains::SetDomain;
use crate::engine::Arc;
use crate::engine::ArcId;
use crate::engine::NodeArcGraph;
use crate::engine::NodeId;

#[derive(Debug, Default)]
pub(crate) struct TestGraph {
    pub(crate) graph: NodeArcGraph,
}

impl TestGraph {
    pub(crate) fn new_num<T: NumValue>(&mut self, min: T, max: T) -> NodeId {
        let name = format!("x{}", self.graph.num_nodes());
        self.graph.new_node(name, T::wrap(T::domain(min, max)))
    }

    pub(crate) fn new_int(&mut self, min: i32, max: i32) -> NodeId {
        self.new_num(min, max)
    }

    pub(crate) fn new_bool(&mut self) -> NodeId {
        let name = format!("b{}", self.graph.num_nodes());
        self.graph.new_node(name, Domain::Bool(BoolDomain::new()))
    }

    pub(crate) fn new_set(&mut self, values: impl IntoIterator<Item = i32>) -> NodeId {
        let name = format!("s{}", self.graph.num_nodes());
        self.graph.new_node(name, Domain::Set(SetDomain::new(values)))
    }

    pub(crate) fn post(&mut self, arc: Box<dyn Arc>) -> ArcId {
        self.graph.add_arc(arc)
    }

    pub(crate) fn propagate(&mut self) -> PropagationResult {
        self.graph.propagate()
    }

    pub(crate) fn num_dom<T: NumValue>(&self, node: NodeId) -> &T::Dom {
        T::project(self.graph.domain(node))
    }

    pub(crate) fn int_dom(&self, node: NodeId) -> &DiscreteDomain<i32> {
        self.num_dom::<i32>(node)
    }

    pub(crate) fn bool_dom(&self, node: NodeId) -> &BoolDomain {
        self.graph.domain(node).as_bool()
    }

    pub(crate) fn set_dom(&self, node: NodeId) -> &SetDomain {
        self.graph.domain(node).as_set()
    }

    pub(crate) fn set_bool(&mut self, node: NodeId, value: bool) -> PropagationResult {
        self.graph
            .modify(node, |domain| domain.as_bool_mut().set_value(value))
    }

    pub(crate) fn assert_bounds<T: NumValue>(&self, node: NodeId, min: T, max: T) {
        let dom = self.num_dom::<T>(node);
        assert_eq!(
            min,
            dom.min(),
            "lower bound of {}",
            self.graph.node(node).name()
        );
        assert_eq!(
            max,
            dom.max(),
            "upper bound of {}",
            self.graph.node(node).name()
        );
    }
}
