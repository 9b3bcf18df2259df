use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::engine::ArcId;

/// The worklist of arcs awaiting propagation. FIFO, with an enqueued mask so that an arc is
/// present at most once.
#[derive(Debug, Default)]
pub(crate) struct ArcQueue {
    queue: VecDeque<ArcId>,
    is_enqueued: KeyedVec<ArcId, bool>,
}

impl ArcQueue {
    pub(crate) fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn enqueue(&mut self, arc_id: ArcId) {
        if !self.is_arc_enqueued(arc_id) {
            self.is_enqueued.accomodate(arc_id, false);
            self.is_enqueued[arc_id] = true;
            self.queue.push_back(arc_id);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<ArcId> {
        let arc_id = self.queue.pop_front();
        if let Some(arc_id) = arc_id {
            self.is_enqueued[arc_id] = false;
        }
        arc_id
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
        for is_enqueued in self.is_enqueued.iter_mut() {
            *is_enqueued = false;
        }
    }

    pub(crate) fn is_arc_enqueued(&self, arc_id: ArcId) -> bool {
        self.is_enqueued.get(arc_id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo_and_deduplicates() {
        let mut queue = ArcQueue::default();

        queue.enqueue(ArcId(2));
        queue.enqueue(ArcId(0));
        queue.enqueue(ArcId(2));

        assert_eq!(Some(ArcId(2)), queue.pop());
        assert_eq!(Some(ArcId(0)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn popped_arcs_can_be_enqueued_again() {
        let mut queue = ArcQueue::default();

        queue.enqueue(ArcId(1));
        assert_eq!(Some(ArcId(1)), queue.pop());
        assert!(!queue.is_arc_enqueued(ArcId(1)));

        queue.enqueue(ArcId(1));
        assert_eq!(Some(ArcId(1)), queue.pop());
    }
}
