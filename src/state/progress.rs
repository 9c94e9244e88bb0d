use std::collections::BTreeSet;

/// Completed step indices. Strictly grow-only: once a step has been left
/// in the forward direction it stays completed, even if its data is edited
/// into an invalid state afterwards. Revisiting relies on this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    completed: BTreeSet<usize>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, index: usize) {
        self.completed.insert(index);
    }

    pub fn contains(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.completed.iter().copied()
    }
}
