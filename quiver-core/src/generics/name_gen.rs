use std::cell::Cell;
use std::rc::Rc;

/// A monotonically increasing counter for unique generated names (auxiliary nodes, fragments).
/// Owned by the construction context and threaded explicitly; clones share the counter.
#[derive(Clone, Debug, Default)]
pub struct NameGenerator {
    next: Rc<Cell<u64>>,
}

impl NameGenerator {
    pub fn new() -> Self {
        NameGenerator::default()
    }

    pub fn next_name(&self, prefix: &str) -> String {
        let id = self.next.get();
        self.next.set(id + 1);
        format!("{prefix}~{id}")
    }
}
