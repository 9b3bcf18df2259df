use crate::basic_types::PropagationResult;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Hyper-arc for `⋃ sources = union`, optionally also pinning `⋂ sources = intersection`.
///
/// The intersection node is what makes the "advanced" variants of the set constraints cheap to
/// express: a partition, for instance, posts a union whose intersection is forced empty.
#[derive(Clone, Debug)]
pub struct UnionArc {
    sources: Vec<NodeId>,
    union: NodeId,
    intersection: Option<NodeId>,
}

impl UnionArc {
    pub fn new(sources: Vec<NodeId>, union: NodeId) -> Self {
        UnionArc {
            sources,
            union,
            intersection: None,
        }
    }

    pub fn with_intersection(sources: Vec<NodeId>, union: NodeId, intersection: NodeId) -> Self {
        UnionArc {
            sources,
            union,
            intersection: Some(intersection),
        }
    }

    fn propagate_union(&self, context: &mut PropagationContext<'_>) -> PropagationResult {
        // The union can only hold values some source still admits.
        let impossible: Vec<i32> = context
            .set_dom(self.union)
            .possible()
            .iter()
            .copied()
            .filter(|&value| {
                !self
                    .sources
                    .iter()
                    .any(|&source| context.set_dom(source).is_possible(value))
            })
            .collect();
        context.set_dom_mut(self.union).exclude_all(impossible)?;

        // A value committed to any source is in the union.
        for &source in &self.sources {
            let committed: Vec<i32> =
                context.set_dom(source).required().iter().copied().collect();
            context.set_dom_mut(self.union).require_all(committed)?;
        }

        // A value ruled out of the union is in no source.
        for &source in &self.sources {
            let ruled_out: Vec<i32> = context
                .set_dom(source)
                .possible()
                .iter()
                .copied()
                .filter(|&value| !context.set_dom(self.union).is_possible(value))
                .collect();
            context.set_dom_mut(source).exclude_all(ruled_out)?;
        }

        // A committed union value with a single remaining candidate source pins that source.
        let committed: Vec<i32> =
            context.set_dom(self.union).required().iter().copied().collect();
        for value in committed {
            let candidates: Vec<NodeId> = self
                .sources
                .iter()
                .copied()
                .filter(|&source| context.set_dom(source).is_possible(value))
                .collect();
            if let [only] = candidates[..] {
                context.set_dom_mut(only).require(value)?;
            }
        }
        Ok(())
    }

    fn propagate_intersection(
        &self,
        context: &mut PropagationContext<'_>,
        intersection: NodeId,
    ) -> PropagationResult {
        let impossible: Vec<i32> = context
            .set_dom(intersection)
            .possible()
            .iter()
            .copied()
            .filter(|&value| {
                !self
                    .sources
                    .iter()
                    .all(|&source| context.set_dom(source).is_possible(value))
            })
            .collect();
        context.set_dom_mut(intersection).exclude_all(impossible)?;

        let in_all: Vec<i32> = context
            .set_dom(self.union)
            .possible()
            .iter()
            .copied()
            .filter(|&value| {
                self.sources
                    .iter()
                    .all(|&source| context.set_dom(source).is_required(value))
            })
            .collect();
        context.set_dom_mut(intersection).require_all(in_all)?;

        let committed: Vec<i32> =
            context.set_dom(intersection).required().iter().copied().collect();
        for &source in &self.sources {
            context
                .set_dom_mut(source)
                .require_all(committed.iter().copied())?;
        }

        // A value committed to a source but excluded from the intersection must miss some
        // other source; forced only when one candidate remains.
        let excluded: Vec<i32> = context
            .set_dom(self.union)
            .possible()
            .iter()
            .copied()
            .filter(|&value| !context.set_dom(intersection).is_possible(value))
            .collect();
        for value in excluded {
            let candidates: Vec<NodeId> = self
                .sources
                .iter()
                .copied()
                .filter(|&source| !context.set_dom(source).is_required(value))
                .collect();
            match candidates[..] {
                [] => {
                    // Every source holds the value, yet the intersection excludes it.
                    return Err(crate::basic_types::PropagationFailure::with_message(
                        format!("{value} is in every operand but barred from the intersection"),
                    ));
                }
                [only] => context.set_dom_mut(only).exclude(value)?,
                _ => {}
            }
        }
        Ok(())
    }
}

impl Arc for UnionArc {
    fn sources(&self) -> Vec<NodeId> {
        let mut all = self.sources.clone();
        all.push(self.union);
        all.extend(self.intersection);
        all
    }

    fn targets(&self) -> Vec<NodeId> {
        self.sources()
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::HyperArc
    }

    fn name(&self) -> &str {
        "Union"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        self.propagate_union(context)?;
        if let Some(intersection) = self.intersection {
            self.propagate_intersection(context, intersection)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn union_collects_committed_source_values() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2]);
        let b = solver.new_set([3, 4]);
        let u = solver.new_set([1, 2, 3, 4, 5]);

        let _ = solver.post(Box::new(UnionArc::new(vec![a, b], u)));
        solver
            .graph
            .modify(a, |domain| domain.as_set_mut().require(2))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        assert!(solver.set_dom(u).is_required(2));
        // 5 is possible in no source.
        assert!(!solver.set_dom(u).is_possible(5));
    }

    #[test]
    fn excluded_union_value_leaves_every_source() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2]);
        let b = solver.new_set([2, 3]);
        let u = solver.new_set([1, 3]);

        let _ = solver.post(Box::new(UnionArc::new(vec![a, b], u)));
        solver.propagate().expect("satisfiable");

        assert!(!solver.set_dom(a).is_possible(2));
        assert!(!solver.set_dom(b).is_possible(2));
    }

    #[test]
    fn committed_union_value_with_one_candidate_pins_it() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2]);
        let b = solver.new_set([3, 4]);
        let u = solver.new_set([1, 2, 3, 4]);

        let _ = solver.post(Box::new(UnionArc::new(vec![a, b], u)));
        solver
            .graph
            .modify(u, |domain| domain.as_set_mut().require(3))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        assert!(solver.set_dom(b).is_required(3));
    }

    #[test]
    fn forced_empty_intersection_makes_sources_disjoint() {
        let mut solver = TestGraph::default();
        let a = solver.new_set([1, 2]);
        let b = solver.new_set([2, 3]);
        let u = solver.new_set([1, 2, 3]);
        let inter = solver.new_set(std::iter::empty());

        let _ = solver.post(Box::new(UnionArc::with_intersection(vec![a, b], u, inter)));
        solver
            .graph
            .modify(a, |domain| domain.as_set_mut().require(2))
            .expect("possible");
        solver.propagate().expect("satisfiable");

        // 2 is committed to a, so a disjoint b must drop it.
        assert!(!solver.set_dom(b).is_possible(2));
    }
}
