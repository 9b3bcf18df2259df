use crate::containers::HashMap;
use crate::containers::StorageKey;
use crate::domains::Domain;
use crate::engine::ArcId;

/// Identifies a [`Node`] in the graph's node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl StorageKey for NodeId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A graph vertex owning exactly one [`Domain`]. Identity is by name for diagnostics and by
/// [`NodeId`] for the engine.
///
/// Listener registration is reference-counted: an arc registered twice must be deregistered
/// twice before it stops being notified of changes to this node.
#[derive(Debug)]
pub struct Node {
    name: String,
    domain: Domain,
    listeners: HashMap<ArcId, usize>,
}

impl Node {
    pub(crate) fn new(name: String, domain: Domain) -> Self {
        Node {
            name,
            domain,
            listeners: HashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub(crate) fn domain_mut(&mut self) -> &mut Domain {
        &mut self.domain
    }

    pub(crate) fn register_listener(&mut self, arc: ArcId) {
        *self.listeners.entry(arc).or_insert(0) += 1;
    }

    pub(crate) fn deregister_listener(&mut self, arc: ArcId) {
        if let Some(count) = self.listeners.get_mut(&arc) {
            *count -= 1;
            if *count == 0 {
                let _ = self.listeners.remove(&arc);
            }
        }
    }

    /// The arcs currently listening to changes of this node, each reported once regardless of
    /// its registration count.
    pub(crate) fn listeners(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.listeners.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::BoolDomain;

    #[test]
    fn listener_registration_is_reference_counted() {
        let mut node = Node::new("b".to_owned(), Domain::Bool(BoolDomain::new()));
        let arc = ArcId(0);

        node.register_listener(arc);
        node.register_listener(arc);
        assert_eq!(1, node.listeners().count());

        node.deregister_listener(arc);
        assert_eq!(1, node.listeners().count(), "one registration remains");

        node.deregister_listener(arc);
        assert_eq!(0, node.listeners().count());
    }
}
