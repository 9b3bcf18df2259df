use std::marker::PhantomData;

use crate::domains::NumValue;
use crate::engine::NodeId;

/// Handle to a numeric variable of kind `T`, issued by the store that owns the node.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct VarRef<T> {
    node: NodeId,
    marker: PhantomData<T>,
}

impl<T> Clone for VarRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for VarRef<T> {}

impl<T: NumValue> VarRef<T> {
    pub(crate) fn new(node: NodeId) -> Self {
        VarRef {
            node,
            marker: PhantomData,
        }
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }
}

/// Handle to a boolean variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoolVarRef {
    node: NodeId,
}

impl BoolVarRef {
    pub(crate) fn new(node: NodeId) -> Self {
        BoolVarRef { node }
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }
}

/// Handle to a set variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SetVarRef {
    node: NodeId,
}

impl SetVarRef {
    pub(crate) fn new(node: NodeId) -> Self {
        SetVarRef { node }
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }
}
