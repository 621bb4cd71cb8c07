//! Stack transfer: count the destination's stacks before each press and wait
//! for that count to change. Exact, but only meaningful when the destination
//! started without the item.

use tracing::{debug, info, warn};

use super::TransferEngine;
use super::cycle::{CompletionWindow, TransferCycle};
use crate::data::Item;
use crate::errors::BotError;
use crate::inventory::Inventory;
use crate::waiter::Clock;

impl<C: Clock> TransferEngine<C> {
    pub fn transfer_by_stacks(
        &self,
        source: &mut dyn Inventory,
        item: &Item,
        stacks: u32,
        target: &mut dyn Inventory,
    ) -> Result<TransferCycle, BotError> {
        // The window is one row's worth; the upper slack absorbs lag over-reads
        let amount = item.row_amount(self.config.layout.slots_per_row);
        let window = CompletionWindow::new(amount, self.config.tolerance.stack_overshoot);
        let mut cycle = TransferCycle::new(stacks, window);

        while cycle.begin_iteration() {
            let Some(slot) = source.find(item) else {
                warn!(item = %item.name, source = source.name(), "no slot left to transfer from");
                cycle.source_depleted();
                break;
            };

            source.hover(slot);
            let before = target.count(item);
            source.press(&self.config.keybinds.transfer);
            cycle.action_sent();

            self.await_stack_received(&*target, item, before)?;
            let transferred = target.count(item).saturating_mul(item.stack_size);

            info!("Transferred {}/{}...", transferred, amount);
            cycle.observe(Some(transferred));
        }

        debug!(phase = ?cycle.phase(), iterations = cycle.iterations(), "stack transfer finished");
        Ok(cycle)
    }

    /// Wait for the destination's stack count to move away from `before`.
    fn await_stack_received(
        &self,
        target: &dyn Inventory,
        item: &Item,
        before: u32,
    ) -> Result<(), BotError> {
        let changed = self.waiter.await_event(
            || target.count(item) != before,
            self.config.timing.stack_received_timeout(),
        );
        if changed {
            Ok(())
        } else {
            Err(BotError::NoItemsAdded {
                item: item.name.clone(),
            })
        }
    }
}
