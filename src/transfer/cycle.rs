//! Trigger / sample / decide state machine shared by both executors.
//!
//! The executors own the I/O; the cycle owns the iteration budget, the
//! completion window and the last accepted reading. Keeping these apart lets
//! the decision logic be tested without an inventory.

use tracing::debug;

/// Inclusive range of measured quantities accepted as "transfer complete"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionWindow {
    pub low: u32,
    pub high: u32,
}

impl CompletionWindow {
    pub fn new(target: u32, slack: u32) -> Self {
        Self {
            low: target,
            high: target.saturating_add(slack),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.low <= value && value <= self.high
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    /// An iteration started; the transfer action is about to be sent
    Triggered,
    /// The action was sent; waiting for a reading
    Sampling,
    /// A reading landed inside the completion window
    Done,
    /// Iteration budget spent without reaching the window
    Exhausted,
    /// No matching slot left in the source
    SourceDepleted,
}

#[derive(Debug, Clone)]
pub struct TransferCycle {
    phase: CyclePhase,
    budget: u32,
    iterations: u32,
    window: CompletionWindow,
    last_reading: Option<u32>,
}

impl TransferCycle {
    pub fn new(budget: u32, window: CompletionWindow) -> Self {
        Self {
            phase: CyclePhase::Idle,
            budget,
            iterations: 0,
            window,
            last_reading: None,
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Transfer actions sent so far. An iteration that finds the source empty
    /// sends nothing and is not counted.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Most recent valid reading, whether or not it was in the window
    pub fn last_reading(&self) -> Option<u32> {
        self.last_reading
    }

    /// Idle -> Triggered. Returns false once the cycle is finished, moving to
    /// `Exhausted` if the budget ran out.
    pub fn begin_iteration(&mut self) -> bool {
        if self.phase != CyclePhase::Idle {
            return false;
        }
        if self.iterations >= self.budget {
            debug!(iterations = self.iterations, "transfer budget exhausted");
            self.phase = CyclePhase::Exhausted;
            return false;
        }
        self.phase = CyclePhase::Triggered;
        true
    }

    /// Triggered -> SourceDepleted
    pub fn source_depleted(&mut self) {
        debug_assert_eq!(self.phase, CyclePhase::Triggered);
        self.phase = CyclePhase::SourceDepleted;
    }

    /// Triggered -> Sampling
    pub fn action_sent(&mut self) {
        debug_assert_eq!(self.phase, CyclePhase::Triggered);
        self.iterations += 1;
        self.phase = CyclePhase::Sampling;
    }

    /// Sampling -> Done when `reading` is inside the window, otherwise back to
    /// Idle. An absent reading is skipped without counting as progress.
    pub fn observe(&mut self, reading: Option<u32>) -> bool {
        debug_assert_eq!(self.phase, CyclePhase::Sampling);
        let Some(value) = reading else {
            self.phase = CyclePhase::Idle;
            return false;
        };

        self.last_reading = Some(value);
        if self.window.contains(value) {
            self.phase = CyclePhase::Done;
            true
        } else {
            self.phase = CyclePhase::Idle;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_inclusive() {
        let window = CompletionWindow::new(1200, 3000);
        assert!(!window.contains(1199));
        assert!(window.contains(1200));
        assert!(window.contains(4200));
        assert!(!window.contains(4201));
    }

    #[test]
    fn test_window_saturates() {
        let window = CompletionWindow::new(u32::MAX - 1, 10);
        assert_eq!(window.high, u32::MAX);
    }

    #[test]
    fn test_done_on_window_hit() {
        let mut cycle = TransferCycle::new(5, CompletionWindow::new(300, 50));
        for reading in [100, 200] {
            assert!(cycle.begin_iteration());
            cycle.action_sent();
            assert!(!cycle.observe(Some(reading)));
            assert_eq!(cycle.phase(), CyclePhase::Idle);
        }
        assert!(cycle.begin_iteration());
        cycle.action_sent();
        assert!(cycle.observe(Some(300)));
        assert_eq!(cycle.phase(), CyclePhase::Done);
        assert!(!cycle.begin_iteration());
        assert_eq!(cycle.iterations(), 3);
        assert_eq!(cycle.last_reading(), Some(300));
    }

    #[test]
    fn test_exhausts_budget() {
        let mut cycle = TransferCycle::new(2, CompletionWindow::new(300, 0));
        while cycle.begin_iteration() {
            cycle.action_sent();
            cycle.observe(None);
        }
        assert_eq!(cycle.phase(), CyclePhase::Exhausted);
        assert_eq!(cycle.iterations(), 2);
        assert_eq!(cycle.last_reading(), None);
    }

    #[test]
    fn test_zero_budget() {
        let mut cycle = TransferCycle::new(0, CompletionWindow::new(0, 0));
        assert!(!cycle.begin_iteration());
        assert_eq!(cycle.phase(), CyclePhase::Exhausted);
        assert_eq!(cycle.iterations(), 0);
    }

    #[test]
    fn test_missing_reading_keeps_previous() {
        let mut cycle = TransferCycle::new(3, CompletionWindow::new(1000, 0));
        assert!(cycle.begin_iteration());
        cycle.action_sent();
        cycle.observe(Some(400));
        assert!(cycle.begin_iteration());
        cycle.action_sent();
        cycle.observe(None);
        assert_eq!(cycle.last_reading(), Some(400));
    }

    #[test]
    fn test_source_depleted_is_terminal() {
        let mut cycle = TransferCycle::new(3, CompletionWindow::new(1000, 0));
        assert!(cycle.begin_iteration());
        cycle.source_depleted();
        assert_eq!(cycle.phase(), CyclePhase::SourceDepleted);
        assert!(!cycle.begin_iteration());
        assert_eq!(cycle.phase(), CyclePhase::SourceDepleted);
        assert_eq!(cycle.iterations(), 0);
    }

    #[test]
    fn test_depleted_after_presses_counts_only_presses() {
        let mut cycle = TransferCycle::new(5, CompletionWindow::new(1000, 0));
        for reading in [200, 400] {
            assert!(cycle.begin_iteration());
            cycle.action_sent();
            cycle.observe(Some(reading));
        }
        assert!(cycle.begin_iteration());
        cycle.source_depleted();
        assert_eq!(cycle.iterations(), 2);
        assert_eq!(cycle.last_reading(), Some(400));
    }
}
