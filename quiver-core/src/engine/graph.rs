use log::debug;
use log::trace;

use crate::basic_types::PropagationResult;
use crate::containers::HashSet;
use crate::containers::KeyedVec;
use crate::domains::Domain;
use crate::domains::DomainState;
use crate::engine::Arc;
use crate::engine::ArcId;
use crate::engine::ArcQueue;
use crate::engine::ConsistencyStrength;
use crate::engine::Node;
use crate::engine::NodeId;
use crate::engine::PropagationContext;
use crate::quiver_asserts::quiver_assert_eq_simple;

/// The state of the most recent propagation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// No run has happened, or domains were mutated since the last run.
    #[default]
    Idle,
    /// Arcs are being seeded into the worklist.
    Queued,
    /// The worklist loop is executing.
    Propagating,
    /// The last run reached a fixpoint: no arc can narrow any domain further.
    Fixpoint,
    /// The last run proved the current assignment infeasible.
    Failed,
}

/// The propagation engine: the working set of nodes and arcs, and the worklist algorithm that
/// narrows domains to a fixpoint or detects failure.
///
/// Propagation is single-threaded and synchronous. A run either completes fully or fails as a
/// whole; domain mutations made before a failing arc are *not* rolled back — callers recover by
/// restoring a previously captured [`GraphState`].
#[derive(Debug, Default)]
pub struct NodeArcGraph {
    nodes: KeyedVec<NodeId, Node>,
    arcs: KeyedVec<ArcId, Box<dyn Arc>>,
    queue: ArcQueue,
    run_state: RunState,
    max_strength: ConsistencyStrength,
    /// Nodes mutated from outside propagation since the last run.
    changed_nodes: HashSet<NodeId>,
}

impl NodeArcGraph {
    pub fn new_node(&mut self, name: impl Into<String>, domain: Domain) -> NodeId {
        self.nodes.push(Node::new(name.into(), domain))
    }

    /// Add an arc to the graph. It is registered as a listener on each of its sources and
    /// scheduled for the next propagation run.
    pub fn add_arc(&mut self, arc: Box<dyn Arc>) -> ArcId {
        let sources = arc.sources();
        let strength = arc.strength();
        let arc_id = self.arcs.push(arc);

        for source in sources {
            self.nodes[source].register_listener(arc_id);
        }
        if strength <= self.max_strength {
            self.queue.enqueue(arc_id);
        }
        self.run_state = RunState::Idle;
        arc_id
    }

    pub fn node(&self, node: NodeId) -> &Node {
        &self.nodes[node]
    }

    pub fn domain(&self, node: NodeId) -> &Domain {
        self.nodes[node].domain()
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    pub(crate) fn arc(&self, arc: ArcId) -> &dyn Arc {
        self.arcs[arc].as_ref()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Cap the consistency strength employed by propagation. Arcs stronger than the cap are
    /// never scheduled; the fixpoint reached is then consistent only up to the cap.
    pub fn set_max_strength(&mut self, strength: ConsistencyStrength) {
        self.max_strength = strength;
    }

    pub fn max_strength(&self) -> ConsistencyStrength {
        self.max_strength
    }

    /// Mutate a domain from outside propagation (the search layer assigning a value, for
    /// instance). If the domain actually narrowed, the node's listeners will be re-seeded on
    /// the next run.
    pub fn modify<R>(&mut self, node: NodeId, f: impl FnOnce(&mut Domain) -> R) -> R {
        let before = self.nodes[node].domain().version();
        let result = f(self.nodes[node].domain_mut());
        if self.nodes[node].domain().version() != before {
            let _ = self.changed_nodes.insert(node);
            self.run_state = RunState::Idle;
        }
        result
    }

    pub(crate) fn context(&mut self) -> PropagationContext<'_> {
        PropagationContext::new(&mut self.nodes)
    }

    /// Run the worklist algorithm to a fixpoint or failure.
    ///
    /// Seeding: arcs added since the last run are already queued; additionally, every arc
    /// listening to a node that changed since the last run is enqueued. The loop then dequeues
    /// one arc at a time; when an arc narrows a node, every other arc reading that node is
    /// re-enqueued. An empty queue means fixpoint; a failing arc aborts the entire run.
    pub fn propagate(&mut self) -> PropagationResult {
        self.run_state = RunState::Queued;
        let changed: Vec<NodeId> = self.changed_nodes.drain().collect();
        for node in changed {
            self.enqueue_listeners(node, None);
        }

        self.run_state = RunState::Propagating;
        while let Some(arc_id) = self.queue.pop() {
            let status;
            let targets;
            let versions_before: Vec<u64>;
            {
                let Self { nodes, arcs, .. } = &mut *self;
                let arc = &mut arcs[arc_id];
                targets = arc.targets();
                versions_before = targets
                    .iter()
                    .map(|&target| nodes[target].domain().version())
                    .collect();

                trace!("propagating {}", arc.name());
                let mut context = PropagationContext::new(nodes);
                status = arc.propagate(&mut context);
            }

            if let Err(failure) = status {
                debug!("{} failed: {failure}", self.arcs[arc_id].name());
                self.queue.clear();
                self.clear_deltas();
                self.run_state = RunState::Failed;
                return Err(failure);
            }

            for (&target, &version) in targets.iter().zip(&versions_before) {
                if self.nodes[target].domain().version() != version {
                    trace!(
                        "{} narrowed {}",
                        self.arcs[arc_id].name(),
                        self.nodes[target].name()
                    );
                    self.enqueue_listeners(target, Some(arc_id));
                }
            }
        }

        self.clear_deltas();
        self.run_state = RunState::Fixpoint;
        Ok(())
    }

    /// Capture the state of every domain. Restoring requires the graph to still have the same
    /// nodes.
    pub fn capture_state(&self) -> GraphState {
        GraphState {
            states: self.nodes.iter().map(|node| node.domain().state()).collect(),
        }
    }

    /// Restore every domain to a previously captured state and re-seed all arcs.
    pub fn restore_state(&mut self, state: &GraphState) {
        quiver_assert_eq_simple!(
            state.states.len(),
            self.nodes.len(),
            "state restored into a graph with a different node count"
        );

        for (node, domain_state) in self.nodes.iter_mut().zip(&state.states) {
            node.domain_mut().restore_state(domain_state);
        }
        self.changed_nodes.clear();
        self.queue.clear();
        for arc_id in self.arcs.keys().collect::<Vec<_>>() {
            if self.arcs[arc_id].strength() <= self.max_strength {
                self.queue.enqueue(arc_id);
            }
        }
        self.run_state = RunState::Idle;
    }

    fn enqueue_listeners(&mut self, node: NodeId, exclude: Option<ArcId>) {
        let listeners: Vec<ArcId> = self.nodes[node].listeners().collect();
        for arc_id in listeners {
            if Some(arc_id) == exclude {
                continue;
            }
            if self.arcs[arc_id].strength() > self.max_strength {
                continue;
            }
            self.queue.enqueue(arc_id);
        }
    }

    fn clear_deltas(&mut self) {
        for node in self.nodes.iter_mut() {
            node.domain_mut().clear_delta();
        }
    }
}

/// An opaque snapshot of every domain in a graph, produced by [`NodeArcGraph::capture_state`].
#[derive(Clone, Debug)]
pub struct GraphState {
    states: Vec<DomainState>,
}
