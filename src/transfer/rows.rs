//! Row transfer: press through the source and OCR the "removed" notification.
//! Coarser than stack counting but works with any destination, or none.

use tracing::{debug, info, warn};

use super::TransferEngine;
use super::cycle::{CompletionWindow, TransferCycle};
use crate::data::Item;
use crate::errors::BotError;
use crate::inventory::{Inventory, TransferDirection};
use crate::waiter::Clock;

impl<C: Clock> TransferEngine<C> {
    /// Presses granted for `rows` rows, including the safety margin for
    /// presses that never show up in the readout.
    pub fn row_budget(&self, rows: u32) -> u32 {
        let factor = self.config.tolerance.row_budget_factor;
        // Ties go to even: 3 rows pad to 4, not 5
        let padded_rows = (f64::from(rows) * factor).round_ties_even() as u32;
        padded_rows.saturating_mul(self.config.layout.slots_per_row)
    }

    pub fn transfer_by_rows(
        &self,
        source: &mut dyn Inventory,
        item: &Item,
        rows: u32,
    ) -> Result<TransferCycle, BotError> {
        let amount = item
            .row_amount(self.config.layout.slots_per_row)
            .saturating_mul(rows);
        let slack = self
            .config
            .tolerance
            .row_overshoot_stacks
            .saturating_mul(item.stack_size);
        let mut cycle = TransferCycle::new(self.row_budget(rows), CompletionWindow::new(amount, slack));

        while cycle.begin_iteration() {
            let Some(slot) = source.find(item) else {
                warn!(item = %item.name, source = source.name(), "no slot left to transfer from");
                cycle.source_depleted();
                break;
            };

            source.hover(slot);
            source.press(&self.config.keybinds.transfer);
            cycle.action_sent();

            // A zero reads the same as no notification at all
            let transferred = source
                .amount_transferred(item, TransferDirection::Removed)
                .filter(|n| *n > 0);
            match transferred {
                Some(n) => info!("Transferred {}/{}...", n, amount),
                None => debug!(iteration = cycle.iterations(), "transfer readout unreadable"),
            }
            cycle.observe(transferred);
        }

        debug!(phase = ?cycle.phase(), iterations = cycle.iterations(), "row transfer finished");
        Ok(cycle)
    }
}
