//! Strategy selection between stack counting and the OCR row readout.

use super::plan::TransferPlan;
use crate::config::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Count destination stacks before and after every press
    Stacks,
    /// Read the "removed" notification after every press
    Rows,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Stacks => "stacks",
            Strategy::Rows => "rows",
        }
    }
}

/// Whether the destination has to be searched and counted before choosing.
/// Large transfers go by rows no matter what the destination holds.
pub fn needs_destination_probe(plan: &TransferPlan, layout: &LayoutConfig) -> bool {
    plan.rows <= layout.max_stack_rows
}

/// Pick the verification strategy.
///
/// `destination_count` is the number of matching stacks already in the
/// destination, or `None` when there is no destination. Stack counting is only
/// trusted when the destination starts without the item and the transfer fits
/// within its capacity.
pub fn select_strategy(
    plan: &TransferPlan,
    destination_count: Option<u32>,
    layout: &LayoutConfig,
) -> Strategy {
    if !needs_destination_probe(plan, layout) {
        return Strategy::Rows;
    }

    match destination_count {
        None => Strategy::Rows,
        Some(existing) => {
            let overflow = u32::from(plan.stacks > layout.stack_capacity);
            if existing.saturating_add(overflow) > 0 {
                Strategy::Rows
            } else {
                Strategy::Stacks
            }
        }
    }
}
