use crate::basic_types::PropagationFailure;
use crate::basic_types::PropagationResult;

/// The domain of a boolean variable: initially both truth values, narrowed at most once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolDomain {
    can_be_true: bool,
    can_be_false: bool,
    delta: Vec<bool>,
    changed: bool,
    version: u64,
}

impl Default for BoolDomain {
    fn default() -> Self {
        BoolDomain {
            can_be_true: true,
            can_be_false: true,
            delta: Vec::new(),
            changed: false,
            version: 0,
        }
    }
}

impl BoolDomain {
    pub fn new() -> Self {
        BoolDomain::default()
    }

    pub fn is_bound(&self) -> bool {
        self.can_be_true != self.can_be_false
    }

    /// Whether the domain is bound to `true`.
    pub fn is_true(&self) -> bool {
        self.can_be_true && !self.can_be_false
    }

    /// Whether the domain is bound to `false`.
    pub fn is_false(&self) -> bool {
        self.can_be_false && !self.can_be_true
    }

    pub fn can_be(&self, value: bool) -> bool {
        if value {
            self.can_be_true
        } else {
            self.can_be_false
        }
    }

    pub fn size(&self) -> u64 {
        if self.is_bound() {
            1
        } else {
            2
        }
    }

    pub fn set_value(&mut self, value: bool) -> PropagationResult {
        if !self.can_be(value) {
            return Err(PropagationFailure::new());
        }
        if self.is_bound() {
            return Ok(());
        }

        if value {
            self.can_be_false = false;
        } else {
            self.can_be_true = false;
        }
        self.delta.push(!value);
        self.changed = true;
        self.version += 1;
        Ok(())
    }

    pub fn remove_value(&mut self, value: bool) -> PropagationResult {
        self.set_value(!value)
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Truth values removed since the last [`BoolDomain::clear_delta`].
    pub fn delta(&self) -> &[bool] {
        &self.delta
    }

    pub fn clear_delta(&mut self) {
        self.delta.clear();
        self.changed = false;
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn force_version(&mut self, version: u64) {
        self.version = version;
    }
}
