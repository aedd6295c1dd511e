use std::collections::HashMap;

/// Maps label names to the index of the command they mark.
///
/// Branch resolution fills and reads this table; the parser only carries a
/// handle to it.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LabelMap {
    entries: HashMap<String, usize>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the previous location if the label was already defined.
    pub fn insert<S: Into<String>>(&mut self, name: S, index: usize) -> Option<usize> {
        self.entries.insert(name.into(), index)
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
