use crate::state::progress::CompletionSet;

/// Render-facing view of a step's place in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Active,
    Completed,
    /// Reachable by a jump but not completed yet.
    Unlocked,
    Locked,
}

/// Position within a linear flow plus the completion record. Movement here
/// is mechanical; validity gating lives one level up in the session, which
/// also owns the step ids these indices refer to.
#[derive(Debug, Clone)]
pub struct StepFlow {
    current: usize,
    total: usize,
    completion: CompletionSet,
}

impl StepFlow {
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total,
            completion: CompletionSet::new(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn is_last(&self) -> bool {
        !self.is_empty() && self.current + 1 == self.total
    }

    pub fn completion(&self) -> &CompletionSet {
        &self.completion
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completion.contains(index)
    }

    /// A step can be jumped to when it is the first, the current, or the
    /// direct successor of a completed step.
    pub fn is_accessible(&self, index: usize) -> bool {
        if index >= self.total {
            return false;
        }
        index == 0 || index == self.current || self.completion.contains(index - 1)
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        if index == self.current {
            StepStatus::Active
        } else if self.completion.contains(index) {
            StepStatus::Completed
        } else if self.is_accessible(index) {
            StepStatus::Unlocked
        } else {
            StepStatus::Locked
        }
    }

    /// Marks the current step completed, then moves forward.
    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.completion.mark(self.current);
        self.current += 1;
        true
    }

    /// Moves backward. Completion is untouched; going back never undoes
    /// progress.
    pub fn retreat(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Moves to an accessible index. Completion is untouched in either
    /// direction.
    pub fn jump(&mut self, index: usize) -> bool {
        if !self.is_accessible(index) {
            return false;
        }
        self.current = index;
        true
    }
}
