//! Quantity normalization: requested amount to whole stacks and rows.

/// Ephemeral plan derived from a transfer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    pub requested_amount: u32,
    /// Smallest multiple of the stack size that covers the request. Wider than
    /// the request since rounding up can leave the `u32` range.
    pub rounded_amount: u64,
    pub stacks: u32,
    /// `stacks / slots_per_row`, rounded half away from zero
    pub rows: u32,
}

impl TransferPlan {
    /// `stack_size` and `slots_per_row` must be positive; the item registry and
    /// config defaults guarantee that.
    pub fn new(requested_amount: u32, stack_size: u32, slots_per_row: u32) -> Self {
        debug_assert!(stack_size > 0, "stack size must be positive");
        debug_assert!(slots_per_row > 0, "slots per row must be positive");

        // i.e. 403 items with a stack size of 200 become 600
        let stacks = requested_amount.div_ceil(stack_size);
        let rounded_amount = u64::from(stacks) * u64::from(stack_size);
        let rows = ((u64::from(stacks) * 2 + u64::from(slots_per_row))
            / (2 * u64::from(slots_per_row))) as u32;

        Self {
            requested_amount,
            rounded_amount,
            stacks,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rounded_amount == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_up_to_whole_stacks() {
        let plan = TransferPlan::new(403, 200, 6);
        assert_eq!(plan.rounded_amount, 600);
        assert_eq!(plan.stacks, 3);
        assert_eq!(plan.rows, 1);
    }

    #[test]
    fn test_smallest_covering_multiple() {
        for stack_size in [1, 7, 100, 200] {
            for requested in 0..=2_000 {
                let plan = TransferPlan::new(requested, stack_size, 6);
                assert_eq!(plan.rounded_amount % u64::from(stack_size), 0);
                assert!(plan.rounded_amount >= u64::from(requested));
                if plan.rounded_amount > 0 {
                    assert!(plan.rounded_amount - u64::from(stack_size) < u64::from(requested));
                }
                assert_eq!(plan.rounded_amount == 0, requested == 0);
                assert_eq!(u64::from(plan.stacks * stack_size), plan.rounded_amount);
            }
        }
    }

    #[test]
    fn test_rounding_past_u32_max() {
        let plan = TransferPlan::new(u32::MAX, 200, 6);
        assert_eq!(plan.stacks, 21_474_837);
        assert_eq!(plan.rounded_amount, 4_294_967_400);
        assert_eq!(plan.rounded_amount % 200, 0);
        assert!(plan.rounded_amount > u64::from(u32::MAX));

        let plan = TransferPlan::new(u32::MAX, u32::MAX, 6);
        assert_eq!(plan.stacks, 1);
        assert_eq!(plan.rounded_amount, u64::from(u32::MAX));
    }

    #[test]
    fn test_row_rounding() {
        let rows = |stacks: u32| TransferPlan::new(stacks * 100, 100, 6).rows;
        assert_eq!(rows(0), 0);
        assert_eq!(rows(2), 0);
        assert_eq!(rows(3), 1);
        assert_eq!(rows(8), 1);
        assert_eq!(rows(9), 2);
        assert_eq!(rows(15), 3);
        assert_eq!(rows(42), 7);
        assert_eq!(rows(45), 8);
    }

    #[test]
    fn test_zero_request_is_empty() {
        let plan = TransferPlan::new(0, 200, 6);
        assert!(plan.is_empty());
        assert_eq!(plan.stacks, 0);
        assert_eq!(plan.rows, 0);
    }
}
