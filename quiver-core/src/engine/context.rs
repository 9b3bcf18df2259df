use crate::basic_types::PropagationResult;
use crate::containers::KeyedVec;
use crate::domains::BoolDomain;
use crate::domains::NumDomain;
use crate::domains::NumValue;
use crate::domains::SetDomain;
use crate::engine::Node;
use crate::engine::NodeId;

/// The view an arc gets of the node arena while propagating: typed, checked access to the
/// domains of the nodes it declared.
///
/// A kind mismatch between the access and the node's domain is a malformed graph and panics.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    nodes: &'a mut KeyedVec<NodeId, Node>,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(nodes: &'a mut KeyedVec<NodeId, Node>) -> Self {
        PropagationContext { nodes }
    }

    pub fn name(&self, node: NodeId) -> &str {
        self.nodes[node].name()
    }

    pub fn num<T: NumValue>(&self, node: NodeId) -> &T::Dom {
        T::project(self.nodes[node].domain())
    }

    pub fn num_mut<T: NumValue>(&mut self, node: NodeId) -> &mut T::Dom {
        T::project_mut(self.nodes[node].domain_mut())
    }

    pub fn min<T: NumValue>(&self, node: NodeId) -> T {
        self.num::<T>(node).min()
    }

    pub fn max<T: NumValue>(&self, node: NodeId) -> T {
        self.num::<T>(node).max()
    }

    pub fn is_bound<T: NumValue>(&self, node: NodeId) -> bool {
        self.num::<T>(node).is_bound()
    }

    pub fn set_min<T: NumValue>(&mut self, node: NodeId, value: T) -> PropagationResult {
        self.num_mut::<T>(node).set_min(value)
    }

    pub fn set_max<T: NumValue>(&mut self, node: NodeId, value: T) -> PropagationResult {
        self.num_mut::<T>(node).set_max(value)
    }

    pub fn set_value<T: NumValue>(&mut self, node: NodeId, value: T) -> PropagationResult {
        self.num_mut::<T>(node).set_value(value)
    }

    pub fn remove_value<T: NumValue>(&mut self, node: NodeId, value: T) -> PropagationResult {
        self.num_mut::<T>(node).remove_value(value)
    }

    pub fn bool_dom(&self, node: NodeId) -> &BoolDomain {
        self.nodes[node].domain().as_bool()
    }

    pub fn bool_dom_mut(&mut self, node: NodeId) -> &mut BoolDomain {
        self.nodes[node].domain_mut().as_bool_mut()
    }

    pub fn set_dom(&self, node: NodeId) -> &SetDomain {
        self.nodes[node].domain().as_set()
    }

    pub fn set_dom_mut(&mut self, node: NodeId) -> &mut SetDomain {
        self.nodes[node].domain_mut().as_set_mut()
    }
}
