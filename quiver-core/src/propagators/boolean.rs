use crate::basic_types::PropagationResult;
use crate::engine::Arc;
use crate::engine::ConsistencyStrength;
use crate::engine::NodeId;
use crate::engine::PropagationContext;

/// Arc for `AND(inputs) = output`.
#[derive(Clone, Debug)]
pub struct AndArc {
    inputs: Vec<NodeId>,
    output: NodeId,
}

impl AndArc {
    pub fn new(inputs: Vec<NodeId>, output: NodeId) -> Self {
        AndArc { inputs, output }
    }
}

impl Arc for AndArc {
    fn sources(&self) -> Vec<NodeId> {
        let mut sources = self.inputs.clone();
        sources.push(self.output);
        sources
    }

    fn targets(&self) -> Vec<NodeId> {
        self.sources()
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "And"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        if self.inputs.iter().any(|&input| context.bool_dom(input).is_false()) {
            return context.bool_dom_mut(self.output).set_value(false);
        }
        if self.inputs.iter().all(|&input| context.bool_dom(input).is_true()) {
            return context.bool_dom_mut(self.output).set_value(true);
        }

        if context.bool_dom(self.output).is_true() {
            for &input in &self.inputs {
                context.bool_dom_mut(input).set_value(true)?;
            }
            return Ok(());
        }
        if context.bool_dom(self.output).is_false() {
            // A false conjunction needs one false input; forced only when one candidate is left.
            let unbound: Vec<NodeId> = self
                .inputs
                .iter()
                .copied()
                .filter(|&input| !context.bool_dom(input).is_bound())
                .collect();
            if let [only] = unbound[..] {
                return context.bool_dom_mut(only).set_value(false);
            }
        }
        Ok(())
    }
}

/// Arc for `OR(inputs) = output`.
#[derive(Clone, Debug)]
pub struct OrArc {
    inputs: Vec<NodeId>,
    output: NodeId,
}

impl OrArc {
    pub fn new(inputs: Vec<NodeId>, output: NodeId) -> Self {
        OrArc { inputs, output }
    }
}

impl Arc for OrArc {
    fn sources(&self) -> Vec<NodeId> {
        let mut sources = self.inputs.clone();
        sources.push(self.output);
        sources
    }

    fn targets(&self) -> Vec<NodeId> {
        self.sources()
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "Or"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        if self.inputs.iter().any(|&input| context.bool_dom(input).is_true()) {
            return context.bool_dom_mut(self.output).set_value(true);
        }
        if self.inputs.iter().all(|&input| context.bool_dom(input).is_false()) {
            return context.bool_dom_mut(self.output).set_value(false);
        }

        if context.bool_dom(self.output).is_false() {
            for &input in &self.inputs {
                context.bool_dom_mut(input).set_value(false)?;
            }
            return Ok(());
        }
        if context.bool_dom(self.output).is_true() {
            let unbound: Vec<NodeId> = self
                .inputs
                .iter()
                .copied()
                .filter(|&input| !context.bool_dom(input).is_bound())
                .collect();
            if let [only] = unbound[..] {
                return context.bool_dom_mut(only).set_value(true);
            }
        }
        Ok(())
    }
}

/// Arc for `NOT input = output`.
#[derive(Clone, Copy, Debug)]
pub struct NotArc {
    input: NodeId,
    output: NodeId,
}

impl NotArc {
    pub fn new(input: NodeId, output: NodeId) -> Self {
        NotArc { input, output }
    }
}

impl Arc for NotArc {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.input, self.output]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.input, self.output]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "Not"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        if context.bool_dom(self.input).is_bound() {
            let value = context.bool_dom(self.input).is_true();
            context.bool_dom_mut(self.output).set_value(!value)?;
        }
        if context.bool_dom(self.output).is_bound() {
            let value = context.bool_dom(self.output).is_true();
            context.bool_dom_mut(self.input).set_value(!value)?;
        }
        Ok(())
    }
}

/// Arc for `x = y` over two boolean nodes.
#[derive(Clone, Copy, Debug)]
pub struct BoolEqArc {
    x: NodeId,
    y: NodeId,
}

impl BoolEqArc {
    pub fn new(x: NodeId, y: NodeId) -> Self {
        BoolEqArc { x, y }
    }
}

impl Arc for BoolEqArc {
    fn sources(&self) -> Vec<NodeId> {
        vec![self.x, self.y]
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.x, self.y]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "BoolEq"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        if context.bool_dom(self.x).is_bound() {
            let value = context.bool_dom(self.x).is_true();
            context.bool_dom_mut(self.y).set_value(value)?;
        }
        if context.bool_dom(self.y).is_bound() {
            let value = context.bool_dom(self.y).is_true();
            context.bool_dom_mut(self.x).set_value(value)?;
        }
        Ok(())
    }
}

/// Arc binding a boolean node to a constant.
#[derive(Clone, Copy, Debug)]
pub struct BoolConstArc {
    node: NodeId,
    value: bool,
}

impl BoolConstArc {
    pub fn new(node: NodeId, value: bool) -> Self {
        BoolConstArc { node, value }
    }
}

impl Arc for BoolConstArc {
    fn sources(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn targets(&self) -> Vec<NodeId> {
        vec![self.node]
    }

    fn strength(&self) -> ConsistencyStrength {
        ConsistencyStrength::Arc
    }

    fn name(&self) -> &str {
        "BoolConst"
    }

    fn propagate(&mut self, context: &mut PropagationContext<'_>) -> PropagationResult {
        context.bool_dom_mut(self.node).set_value(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_graph::TestGraph;

    #[test]
    fn and_with_a_false_input_is_false() {
        let mut solver = TestGraph::default();
        let a = solver.new_bool();
        let b = solver.new_bool();
        let out = solver.new_bool();

        let _ = solver.post(Box::new(AndArc::new(vec![a, b], out)));
        solver.set_bool(a, false).expect("unbound");
        solver.propagate().expect("satisfiable");

        assert!(solver.bool_dom(out).is_false());
        // The other input stays free.
        assert!(!solver.bool_dom(b).is_bound());
    }

    #[test]
    fn false_and_with_one_candidate_forces_it() {
        let mut solver = TestGraph::default();
        let a = solver.new_bool();
        let b = solver.new_bool();
        let out = solver.new_bool();

        let _ = solver.post(Box::new(AndArc::new(vec![a, b], out)));
        let _ = solver.post(Box::new(BoolConstArc::new(out, false)));
        solver.set_bool(a, true).expect("unbound");
        solver.propagate().expect("satisfiable");

        assert!(solver.bool_dom(b).is_false());
    }

    #[test]
    fn true_or_with_one_candidate_forces_it() {
        let mut solver = TestGraph::default();
        let a = solver.new_bool();
        let b = solver.new_bool();
        let out = solver.new_bool();

        let _ = solver.post(Box::new(OrArc::new(vec![a, b], out)));
        let _ = solver.post(Box::new(BoolConstArc::new(out, true)));
        solver.set_bool(b, false).expect("unbound");
        solver.propagate().expect("satisfiable");

        assert!(solver.bool_dom(a).is_true());
    }

    #[test]
    fn negation_propagates_both_ways() {
        let mut solver = TestGraph::default();
        let input = solver.new_bool();
        let output = solver.new_bool();

        let _ = solver.post(Box::new(NotArc::new(input, output)));
        solver.set_bool(output, false).expect("unbound");
        solver.propagate().expect("satisfiable");

        assert!(solver.bool_dom(input).is_true());
    }

    #[test]
    fn equality_chain_detects_a_contradiction() {
        let mut solver = TestGraph::default();
        let a = solver.new_bool();
        let b = solver.new_bool();
        let c = solver.new_bool();

        let _ = solver.post(Box::new(BoolEqArc::new(a, b)));
        let _ = solver.post(Box::new(BoolEqArc::new(b, c)));
        let _ = solver.post(Box::new(BoolConstArc::new(a, true)));
        let _ = solver.post(Box::new(BoolConstArc::new(c, false)));

        assert!(solver.propagate().is_err());
    }
}
