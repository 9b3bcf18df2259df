//! Typed domains: the current set of possible values for each variable kind, with delta
//! tracking for incremental re-propagation and snapshot/restore for external backtracking.

mod boolean;
mod continuous;
mod discrete;
mod interval_set;
mod num_value;
mod set;

pub use boolean::*;
pub use continuous::*;
pub use discrete::*;
pub use num_value::*;
pub use set::*;

/// The kind of values a [`Domain`] holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Int,
    Long,
    Float,
    Double,
    Bool,
    Set,
}

/// A domain of any supported kind; the variant is fixed at node creation and never changes.
#[derive(Clone, Debug)]
pub enum Domain {
    Int(DiscreteDomain<i32>),
    Long(DiscreteDomain<i64>),
    Float(ContinuousDomain<f32>),
    Double(ContinuousDomain<f64>),
    Bool(BoolDomain),
    Set(SetDomain),
}

impl Domain {
    pub fn kind(&self) -> DomainKind {
        match self {
            Domain::Int(_) => DomainKind::Int,
            Domain::Long(_) => DomainKind::Long,
            Domain::Float(_) => DomainKind::Float,
            Domain::Double(_) => DomainKind::Double,
            Domain::Bool(_) => DomainKind::Bool,
            Domain::Set(_) => DomainKind::Set,
        }
    }

    pub fn changed(&self) -> bool {
        match self {
            Domain::Int(dom) => dom.changed(),
            Domain::Long(dom) => dom.changed(),
            Domain::Float(dom) => dom.changed(),
            Domain::Double(dom) => dom.changed(),
            Domain::Bool(dom) => dom.changed(),
            Domain::Set(dom) => dom.changed(),
        }
    }

    pub(crate) fn clear_delta(&mut self) {
        match self {
            Domain::Int(dom) => dom.clear_delta(),
            Domain::Long(dom) => dom.clear_delta(),
            Domain::Float(dom) => dom.clear_delta(),
            Domain::Double(dom) => dom.clear_delta(),
            Domain::Bool(dom) => dom.clear_delta(),
            Domain::Set(dom) => dom.clear_delta(),
        }
    }

    pub(crate) fn version(&self) -> u64 {
        match self {
            Domain::Int(dom) => dom.version(),
            Domain::Long(dom) => dom.version(),
            Domain::Float(dom) => dom.version(),
            Domain::Double(dom) => dom.version(),
            Domain::Bool(dom) => dom.version(),
            Domain::Set(dom) => dom.version(),
        }
    }

    /// Access the boolean domain; a kind mismatch is a malformed graph and panics.
    pub fn as_bool(&self) -> &BoolDomain {
        match self {
            Domain::Bool(dom) => dom,
            other => panic!("expected bool domain, found {:?}", other.kind()),
        }
    }

    pub fn as_bool_mut(&mut self) -> &mut BoolDomain {
        match self {
            Domain::Bool(dom) => dom,
            other => panic!("expected bool domain, found {:?}", other.kind()),
        }
    }

    /// Access the set domain; a kind mismatch is a malformed graph and panics.
    pub fn as_set(&self) -> &SetDomain {
        match self {
            Domain::Set(dom) => dom,
            other => panic!("expected set domain, found {:?}", other.kind()),
        }
    }

    pub fn as_set_mut(&mut self) -> &mut SetDomain {
        match self {
            Domain::Set(dom) => dom,
            other => panic!("expected set domain, found {:?}", other.kind()),
        }
    }

    /// Capture the current value state. The token is opaque; its only use is
    /// [`Domain::restore_state`].
    pub fn state(&self) -> DomainState {
        let mut snapshot = self.clone();
        snapshot.clear_delta();
        DomainState(snapshot)
    }

    /// Restore a previously captured state. This is the sole undo mechanism: the engine never
    /// rolls back partial mutations on its own.
    pub fn restore_state(&mut self, state: &DomainState) {
        assert_eq!(
            self.kind(),
            state.0.kind(),
            "state restored into a domain of a different kind"
        );

        let version = self.version() + 1;
        *self = state.0.clone();
        self.force_version(version);
    }

    fn force_version(&mut self, version: u64) {
        match self {
            Domain::Int(dom) => dom.force_version(version),
            Domain::Long(dom) => dom.force_version(version),
            Domain::Float(dom) => dom.force_version(version),
            Domain::Double(dom) => dom.force_version(version),
            Domain::Bool(dom) => dom.force_version(version),
            Domain::Set(dom) => dom.force_version(version),
        }
    }
}

/// An opaque snapshot of one domain's state, produced by [`Domain::state`].
#[derive(Clone, Debug)]
pub struct DomainState(Domain);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_restores_values_but_not_delta() {
        let mut domain = Domain::Int(DiscreteDomain::new(0, 10));
        let state = domain.state();

        {
            let dom = <i32 as NumValue>::project_mut(&mut domain);
            dom.set_min(5).expect("non-empty");
            dom.remove_value(8).expect("non-empty");
        }
        assert!(domain.changed());

        domain.restore_state(&state);
        let dom = <i32 as NumValue>::project(&domain);
        assert_eq!(0, dom.min());
        assert_eq!(10, dom.max());
        assert!(dom.contains(8));
        assert!(!domain.changed());
    }

    #[test]
    #[should_panic(expected = "different kind")]
    fn restoring_across_kinds_is_fatal() {
        let mut int_domain = Domain::Int(DiscreteDomain::new(0, 1));
        let bool_state = Domain::Bool(BoolDomain::new()).state();
        int_domain.restore_state(&bool_state);
    }
}
