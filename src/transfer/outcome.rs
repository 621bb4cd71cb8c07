use super::cycle::{CyclePhase, TransferCycle};
use super::plan::TransferPlan;
use super::strategy::Strategy;

/// What a finished transfer can say about the items it moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Completion window hit, or at least the rounded amount measured
    Complete,
    /// Some progress measured, but less than requested
    Partial,
    /// No valid reading was ever taken
    Nothing,
    /// The source ran out of matching slots
    SourceDepleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub plan: TransferPlan,
    pub strategy: Strategy,
    pub delivery: Delivery,
    /// Last measured quantity, if any
    pub transferred: Option<u32>,
    pub iterations: u32,
}

impl TransferOutcome {
    /// Outcome of a zero-amount request; nothing is touched
    pub fn noop(plan: TransferPlan) -> Self {
        Self {
            plan,
            strategy: Strategy::Rows,
            delivery: Delivery::Complete,
            transferred: Some(0),
            iterations: 0,
        }
    }

    pub fn from_cycle(plan: TransferPlan, strategy: Strategy, cycle: &TransferCycle) -> Self {
        let transferred = cycle.last_reading();
        let delivery = match cycle.phase() {
            CyclePhase::Done => Delivery::Complete,
            CyclePhase::SourceDepleted => Delivery::SourceDepleted,
            _ => match transferred {
                Some(n) if u64::from(n) >= plan.rounded_amount => Delivery::Complete,
                Some(n) if n > 0 => Delivery::Partial,
                _ => Delivery::Nothing,
            },
        };

        Self {
            plan,
            strategy,
            delivery,
            transferred,
            iterations: cycle.iterations(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.delivery == Delivery::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::cycle::CompletionWindow;

    fn exhausted_with(reading: Option<u32>) -> TransferCycle {
        let mut cycle = TransferCycle::new(1, CompletionWindow::new(1200, 0));
        cycle.begin_iteration();
        cycle.action_sent();
        cycle.observe(reading);
        cycle.begin_iteration();
        cycle
    }

    #[test]
    fn test_classification_after_exhaustion() {
        let plan = TransferPlan::new(403, 200, 6);

        let outcome = TransferOutcome::from_cycle(plan, Strategy::Stacks, &exhausted_with(Some(600)));
        assert_eq!(outcome.delivery, Delivery::Complete);

        let outcome = TransferOutcome::from_cycle(plan, Strategy::Stacks, &exhausted_with(Some(400)));
        assert_eq!(outcome.delivery, Delivery::Partial);
        assert_eq!(outcome.transferred, Some(400));

        let outcome = TransferOutcome::from_cycle(plan, Strategy::Rows, &exhausted_with(None));
        assert_eq!(outcome.delivery, Delivery::Nothing);
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_source_depleted() {
        let plan = TransferPlan::new(1200, 200, 6);
        let mut cycle = TransferCycle::new(6, CompletionWindow::new(1200, 0));
        cycle.begin_iteration();
        cycle.source_depleted();

        let outcome = TransferOutcome::from_cycle(plan, Strategy::Rows, &cycle);
        assert_eq!(outcome.delivery, Delivery::SourceDepleted);
        assert_eq!(outcome.iterations, 0);
        assert!(!outcome.is_complete());
    }
}
